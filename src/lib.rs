pub mod api;
pub mod config;
pub mod consts;
pub mod dataset;
pub mod error;
pub mod plot;
pub mod stats;

pub use error::{BrResult, BrinleyError};
pub use plot::{generate_comparison_plot, BrinleyChart};
// cmd and reports are modules of the binary crate (main.rs).

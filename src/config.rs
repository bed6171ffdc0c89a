use crate::consts::{
    DEFAULT_CANVAS_SIZE, DEFAULT_FONT_SIZE, MAX_CANVAS_SIZE, MAX_FONT_SIZE, MIN_CANVAS_SIZE,
    MIN_FONT_SIZE,
};
use crate::dataset::ComparisonPair;
use crate::error::{BrResult, BrinleyError};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub render: RenderParams,
    #[command(flatten)]
    pub selection: SelectionParams,
}

#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RenderParams {
    /// Width of the square chart body in pixels (the title sits above it).
    #[arg(
        long,
        default_value_t = DEFAULT_CANVAS_SIZE,
        value_parser = clap::value_parser!(u32).range(MIN_CANVAS_SIZE as i64..=MAX_CANVAS_SIZE as i64)
    )]
    pub size: u32,
    #[arg(
        long,
        default_value_t = DEFAULT_FONT_SIZE,
        value_parser = clap::value_parser!(u32).range(MIN_FONT_SIZE as i64..=MAX_FONT_SIZE as i64)
    )]
    pub font_size: u32,
}

impl RenderParams {
    /// Same bounds the CLI enforces, for params built in code.
    pub fn validate(&self) -> BrResult<()> {
        if !(MIN_CANVAS_SIZE..=MAX_CANVAS_SIZE).contains(&self.size) {
            return Err(BrinleyError::InvalidInput(format!(
                "canvas size {} outside {}..={}",
                self.size, MIN_CANVAS_SIZE, MAX_CANVAS_SIZE
            )));
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(BrinleyError::InvalidInput(format!(
                "font size {} outside {}..={}",
                self.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        Ok(())
    }
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_CANVAS_SIZE,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectionParams {
    /// Only run comparisons whose y condition contains this text (case-insensitive).
    #[arg(long)]
    pub comparison: Option<String>,

    /// Record a failed comparison and continue with the rest.
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}

impl SelectionParams {
    pub fn matches(&self, pair: &ComparisonPair) -> bool {
        match &self.comparison {
            Some(filter) => pair
                .y
                .to_string()
                .to_lowercase()
                .contains(&filter.to_lowercase()),
            None => true,
        }
    }

    pub fn select(&self, pairs: &[ComparisonPair]) -> Vec<ComparisonPair> {
        pairs.iter().copied().filter(|p| self.matches(p)).collect()
    }
}

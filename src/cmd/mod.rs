use brinley::config::Config;
use brinley::dataset::ComparisonPair;
use clap::Subcommand;
use tracing::warn;

pub mod render;
pub mod summary;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every selected comparison to SVG and print the summary table.
    Render(render::RenderArgs),
    /// Print the statistics of every selected comparison without rendering.
    Summary(summary::SummaryArgs),
}

/// Applies the `--comparison` filter; `None` (after a warning) when nothing matches.
fn select(config: &Config, pairs: &[ComparisonPair]) -> Option<Vec<ComparisonPair>> {
    let selected = config.selection.select(pairs);
    if selected.is_empty() {
        warn!(
            "No comparison matches the filter '{}'",
            config.selection.comparison.as_deref().unwrap_or_default()
        );
        return None;
    }
    Some(selected)
}

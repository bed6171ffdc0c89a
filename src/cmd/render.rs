use crate::reports;
use brinley::api::{self, ComparisonSummary, FailurePolicy};
use brinley::config::Config;
use brinley::dataset::{ComparisonPair, ScoreTable};
use brinley::BrResult;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long, default_value = "plots")]
    pub out_dir: PathBuf,
}

/// Returns `Ok(false)` when at least one comparison failed.
pub fn run(args: RenderArgs, table: &ScoreTable, pairs: &[ComparisonPair]) -> BrResult<bool> {
    let Some(selected) = super::select(&args.config, pairs) else {
        return Ok(true);
    };
    let policy = FailurePolicy::from_keep_going(args.config.selection.keep_going);

    let outcomes = api::render_all(table, &selected, &args.config.render, &args.out_dir, policy);

    // Charts written before a failure still get a row.
    let mut summaries = Vec::new();
    let mut all_ok = outcomes.len() == selected.len();
    for outcome in outcomes {
        match outcome.result {
            Ok(written) => summaries.push(ComparisonSummary::new(
                table,
                outcome.pair,
                written.chart.summary,
            )),
            Err(_) => all_ok = false,
        }
    }

    reports::print_summary_report(&summaries);
    Ok(all_ok)
}

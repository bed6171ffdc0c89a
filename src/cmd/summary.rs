use crate::reports;
use brinley::api::{self, FailurePolicy};
use brinley::config::Config;
use brinley::dataset::{ComparisonPair, ScoreTable};
use brinley::BrResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub config: Config,

    /// Emit JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: SummaryArgs, table: &ScoreTable, pairs: &[ComparisonPair]) -> BrResult<bool> {
    let Some(selected) = super::select(&args.config, pairs) else {
        return Ok(true);
    };
    let policy = FailurePolicy::from_keep_going(args.config.selection.keep_going);

    let outcomes = api::summarize_all(table, &selected, policy);
    let all_ok = outcomes.len() == selected.len() && outcomes.iter().all(|o| o.is_ok());
    let summaries: Vec<_> = outcomes.into_iter().filter_map(|o| o.result.ok()).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for s in &summaries {
            reports::print_subject_table(s);
        }
        reports::print_summary_report(&summaries);
    }
    Ok(all_ok)
}

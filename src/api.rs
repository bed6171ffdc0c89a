use crate::config::RenderParams;
use crate::dataset::{ComparisonPair, Condition, ScoreTable};
use crate::error::{BrResult, BrinleyError};
use crate::plot::{generate_comparison_plot_with, BrinleyChart};
use crate::stats::PairedSummary;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// What the batch driver does after a comparison fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure; later comparisons are not attempted.
    Halt,
    /// Record the failure and run the remaining comparisons.
    KeepGoing,
}

impl FailurePolicy {
    pub fn from_keep_going(keep_going: bool) -> Self {
        if keep_going {
            Self::KeepGoing
        } else {
            Self::Halt
        }
    }
}

#[derive(Debug)]
pub struct ComparisonOutcome<T> {
    pub pair: ComparisonPair,
    pub result: BrResult<T>,
}

impl<T> ComparisonOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-subject values of one comparison plus its statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub x_label: Condition,
    pub y_label: Condition,
    pub subjects: Vec<SubjectPair>,
    pub summary: PairedSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectPair {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub difference: f64,
}

impl ComparisonSummary {
    pub fn new(table: &ScoreTable, pair: ComparisonPair, summary: PairedSummary) -> Self {
        let subjects = table
            .rows()
            .iter()
            .map(|r| {
                let (x, y) = (r.score(pair.x), r.score(pair.y));
                SubjectPair {
                    id: r.id.to_string(),
                    x,
                    y,
                    difference: y - x,
                }
            })
            .collect();
        Self {
            x_label: pair.x,
            y_label: pair.y,
            subjects,
            summary,
        }
    }
}

/// Runs `step` for each pair in order, honouring `policy` on failure.
///
/// Errors come back wrapped with the labels of the comparison that failed.
pub fn run_batch<T, F>(
    pairs: &[ComparisonPair],
    policy: FailurePolicy,
    mut step: F,
) -> Vec<ComparisonOutcome<T>>
where
    F: FnMut(ComparisonPair) -> BrResult<T>,
{
    let mut outcomes = Vec::with_capacity(pairs.len());
    for (i, &pair) in pairs.iter().enumerate() {
        info!("📊 Comparison {}/{}: {} vs {}", i + 1, pairs.len(), pair.x, pair.y);
        let result = step(pair)
            .map_err(|e| e.in_comparison(&pair.x.to_string(), &pair.y.to_string()));

        let failed = result.is_err();
        if let Err(e) = &result {
            error!("{}", e);
        }
        outcomes.push(ComparisonOutcome { pair, result });

        if failed && policy == FailurePolicy::Halt {
            let skipped = pairs.len() - i - 1;
            if skipped > 0 {
                warn!("Halting batch; {} comparison(s) not attempted", skipped);
            }
            break;
        }
    }
    outcomes
}

pub fn summarize_comparison(table: &ScoreTable, pair: ComparisonPair) -> BrResult<ComparisonSummary> {
    let summary = PairedSummary::compute(&table.column(pair.x), &table.column(pair.y))?;
    Ok(ComparisonSummary::new(table, pair, summary))
}

pub fn render_comparison(
    table: &ScoreTable,
    pair: ComparisonPair,
    params: &RenderParams,
) -> BrResult<BrinleyChart> {
    generate_comparison_plot_with(
        &table.column(pair.x),
        &table.column(pair.y),
        &pair.x.to_string(),
        &pair.y.to_string(),
        params,
    )
}

pub fn summarize_all(
    table: &ScoreTable,
    pairs: &[ComparisonPair],
    policy: FailurePolicy,
) -> Vec<ComparisonOutcome<ComparisonSummary>> {
    run_batch(pairs, policy, |pair| summarize_comparison(table, pair))
}

/// A rendered chart and the file it was written to.
#[derive(Debug, Clone)]
pub struct WrittenChart {
    pub chart: BrinleyChart,
    pub path: PathBuf,
}

/// Renders each pair and writes its SVG into `dir`.
///
/// A failed write counts as a failed comparison, so `policy` applies to it too.
pub fn render_all<P: AsRef<Path>>(
    table: &ScoreTable,
    pairs: &[ComparisonPair],
    params: &RenderParams,
    dir: P,
    policy: FailurePolicy,
) -> Vec<ComparisonOutcome<WrittenChart>> {
    let dir = dir.as_ref();
    run_batch(pairs, policy, |pair| {
        let chart = render_comparison(table, pair, params)?;
        let path = write_chart(&chart, dir)?;
        Ok(WrittenChart { chart, path })
    })
}

/// Writes the chart's SVG into `dir`, creating it if needed.
pub fn write_chart<P: AsRef<Path>>(chart: &BrinleyChart, dir: P) -> BrResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(chart.file_name());
    if chart.svg.is_empty() {
        return Err(BrinleyError::Render(format!(
            "chart '{}' has no rendered content",
            chart.title
        )));
    }
    fs::write(&path, &chart.svg)?;
    info!("💾 Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::default_comparisons;

    #[test]
    fn test_run_batch_halts_on_first_failure() {
        let pairs = default_comparisons();
        let mut calls = 0;
        let outcomes = run_batch(&pairs, FailurePolicy::Halt, |pair| {
            calls += 1;
            if pair.y == Condition::Intervention {
                Err(BrinleyError::InvalidInput("boom".to_string()))
            } else {
                Ok(())
            }
        });
        assert_eq!(calls, 1);
        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].is_ok());
    }

    #[test]
    fn test_run_batch_keep_going_labels_failure() {
        let pairs = default_comparisons();
        let outcomes = run_batch(&pairs, FailurePolicy::KeepGoing, |pair| {
            if pair.y == Condition::PostInt {
                Err(BrinleyError::InvalidInput("boom".to_string()))
            } else {
                Ok(pair.y)
            }
        });
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[2].is_ok());

        let err = outcomes[1].result.as_ref().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'Baseline' vs 'Post-int'"), "{}", msg);
        assert!(err.is_invalid_input());
    }

    /// A directory squatting on the Post-int file name makes that one write fail.
    fn blocked_out_dir() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join("brinley_baseline_vs_post_int.svg")).unwrap();
        dir
    }

    #[test]
    fn test_render_all_keeps_going_past_write_failure() {
        let table = ScoreTable::embedded();
        let dir = blocked_out_dir();
        let outcomes = render_all(
            &table,
            &default_comparisons(),
            &RenderParams::default(),
            dir.path(),
            FailurePolicy::KeepGoing,
        );
        assert_eq!(outcomes.len(), 3);

        let err = outcomes[1].result.as_ref().unwrap_err();
        assert!(err.to_string().contains("'Baseline' vs 'Post-int'"), "{}", err);
        assert!(matches!(
            err,
            BrinleyError::Comparison { source, .. } if matches!(**source, BrinleyError::Io(_))
        ));

        for outcome in [&outcomes[0], &outcomes[2]] {
            let written = outcome.result.as_ref().unwrap();
            assert!(written.path.is_file());
            assert_eq!(written.path.parent(), Some(dir.path()));
        }
    }

    #[test]
    fn test_render_all_halts_on_write_failure() {
        let table = ScoreTable::embedded();
        let dir = blocked_out_dir();
        let outcomes = render_all(
            &table,
            &default_comparisons(),
            &RenderParams::default(),
            dir.path(),
            FailurePolicy::Halt,
        );
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
        assert!(!dir.path().join("brinley_baseline_vs_follow_up.svg").exists());
    }

    #[test]
    fn test_summary_subjects_carry_differences() {
        let table = ScoreTable::embedded();
        let pair = ComparisonPair::new(Condition::Baseline, Condition::FollowUp);
        let s = summarize_comparison(&table, pair).unwrap();
        let diffs: Vec<f64> = s.subjects.iter().map(|p| p.difference).collect();
        assert_eq!(diffs, s.summary.differences);
        assert_eq!(s.subjects[0].id, "S249");
    }
}

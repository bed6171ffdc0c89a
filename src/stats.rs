use crate::error::{BrResult, BrinleyError};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;
use tracing::debug;

/// Two-tailed 95% interval.
pub const CI_QUANTILE: f64 = 0.975;

/// Differences whose SD is within this many ulps of the data scale count as constant.
const ZERO_VARIANCE_ULPS: f64 = 16.0;

/// Descriptive and inferential statistics for one paired comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedSummary {
    pub n: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    /// Per-subject `y - x`.
    pub differences: Vec<f64>,
    pub mean_diff: f64,
    /// Sample standard deviation of the differences (n - 1 divisor).
    pub sd_diff: f64,
    pub cohens_d: f64,
    pub std_error: f64,
    pub t_critical: f64,
    pub ci_half_width: f64,
}

pub fn validate_pair(x: &[f64], y: &[f64]) -> BrResult<()> {
    if x.len() != y.len() {
        return Err(BrinleyError::InvalidInput(format!(
            "sequence length mismatch: {} x values vs {} y values",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(BrinleyError::InvalidInput(format!(
            "insufficient sample size: need at least 2 pairs, got {}",
            x.len()
        )));
    }
    if let Some(v) = x.iter().chain(y.iter()).find(|v| !v.is_finite()) {
        return Err(BrinleyError::InvalidInput(format!(
            "non-finite score: {}",
            v
        )));
    }
    Ok(())
}

// Plain sum over n keeps integer-valued means exact.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Two-tailed critical value of Student's t for `df` degrees of freedom.
pub fn t_critical(df: f64) -> BrResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| BrinleyError::Statistics(format!("t-distribution (df={}): {}", df, e)))?;
    Ok(dist.inverse_cdf(CI_QUANTILE))
}

impl PairedSummary {
    pub fn compute(x: &[f64], y: &[f64]) -> BrResult<Self> {
        validate_pair(x, y)?;

        let n = x.len();
        let differences: Vec<f64> = x.iter().zip(y).map(|(a, b)| b - a).collect();

        let mean_x = mean(x);
        let mean_y = mean(y);
        let mean_diff = mean(&differences);
        let sd_diff = differences.iter().std_dev();

        // Rounding in `b - a` leaves a residual SD of a few ulps of the scores.
        let scale = x.iter().chain(y).fold(0.0f64, |m, v| m.max(v.abs()));
        if sd_diff <= ZERO_VARIANCE_ULPS * f64::EPSILON * scale {
            return Err(BrinleyError::InvalidInput(
                "differences have zero variance; Cohen's d is undefined".to_string(),
            ));
        }

        let cohens_d = mean_diff / sd_diff;
        let std_error = sd_diff / (n as f64).sqrt();
        let t_critical = t_critical((n - 1) as f64)?;
        let ci_half_width = t_critical * std_error;

        debug!(
            n,
            mean_diff, sd_diff, cohens_d, std_error, t_critical, "paired summary"
        );

        Ok(Self {
            n,
            mean_x,
            mean_y,
            differences,
            mean_diff,
            sd_diff,
            cohens_d,
            std_error,
            t_critical,
            ci_half_width,
        })
    }

    pub fn ci_lower(&self) -> f64 {
        self.cohens_d - self.ci_half_width
    }

    pub fn ci_upper(&self) -> f64 {
        self.cohens_d + self.ci_half_width
    }

    /// Lines of the label drawn above the mean marker.
    pub fn means_annotation(&self, x_label: &str, y_label: &str) -> Vec<String> {
        vec![
            "Means:".to_string(),
            format!("{}: {:.1}", x_label, self.mean_x),
            format!("{}: {:.1}", y_label, self.mean_y),
        ]
    }

    /// Lines of the effect-size box in the upper-left corner.
    pub fn effect_annotation(&self) -> Vec<String> {
        vec![
            format!("Cohen's d: {:.2}", self.cohens_d),
            format!("95% CI: [{:.2}, {:.2}]", self.ci_lower(), self.ci_upper()),
            format!("Mean diff: {:.2}", self.mean_diff),
        ]
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrinleyError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Statistics Error: {0}")]
    Statistics(String),

    #[error("Render Error: {0}")]
    Render(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Comparison '{x_label}' vs '{y_label}' failed: {source}")]
    Comparison {
        x_label: String,
        y_label: String,
        #[source]
        source: Box<BrinleyError>,
    },
}

impl BrinleyError {
    /// Attaches the labels of the comparison that produced this error.
    pub fn in_comparison(self, x_label: &str, y_label: &str) -> Self {
        Self::Comparison {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            source: Box::new(self),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::Comparison { source, .. } => source.is_invalid_input(),
            _ => false,
        }
    }
}

pub type BrResult<T> = Result<T, BrinleyError>;

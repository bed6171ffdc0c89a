use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Header of the subject identifier column.
pub const SUBJECT_COLUMN: &str = "PUKI";

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
pub enum Condition {
    #[strum(serialize = "Baseline")]
    Baseline,
    #[strum(serialize = "Intervention")]
    Intervention,
    #[strum(serialize = "Post-int")]
    PostInt,
    #[strum(serialize = "Follow-up")]
    FollowUp,
}

impl Condition {
    fn column(&self) -> usize {
        match self {
            Self::Baseline => 0,
            Self::Intervention => 1,
            Self::PostInt => 2,
            Self::FollowUp => 3,
        }
    }
}

// Serialized by column label so JSON output matches the chart text.
impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectRecord {
    pub id: &'static str,
    pub scores: [f64; 4],
}

impl SubjectRecord {
    pub fn score(&self, condition: Condition) -> f64 {
        self.scores[condition.column()]
    }
}

static SUBJECTS: [SubjectRecord; 4] = [
    SubjectRecord {
        id: "S249",
        scores: [14.0, 9.0, 13.0, 14.0],
    },
    SubjectRecord {
        id: "S113",
        scores: [10.0, 12.0, 8.0, 4.0],
    },
    SubjectRecord {
        id: "S189",
        scores: [19.0, 17.0, 10.0, 10.0],
    },
    SubjectRecord {
        id: "S931",
        scores: [10.0, 8.0, 6.0, 2.0],
    },
];

/// Read-only view over a set of subject records.
#[derive(Debug, Clone, Copy)]
pub struct ScoreTable<'a> {
    rows: &'a [SubjectRecord],
}

impl ScoreTable<'static> {
    /// The embedded repeated-measures dataset.
    pub fn embedded() -> Self {
        Self { rows: &SUBJECTS }
    }
}

impl<'a> ScoreTable<'a> {
    pub fn rows(&self) -> &'a [SubjectRecord] {
        self.rows
    }

    pub fn column(&self, condition: Condition) -> Vec<f64> {
        self.rows.iter().map(|r| r.score(condition)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonPair {
    pub x: Condition,
    pub y: Condition,
}

impl ComparisonPair {
    pub fn new(x: Condition, y: Condition) -> Self {
        Self { x, y }
    }
}

/// Every non-baseline condition plotted against Baseline, in column order.
pub fn default_comparisons() -> Vec<ComparisonPair> {
    Condition::iter()
        .filter(|c| *c != Condition::Baseline)
        .map(|c| ComparisonPair::new(Condition::Baseline, c))
        .collect()
}

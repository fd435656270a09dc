use serde::{Deserialize, Serialize};

/// Coarse purpose of a query. Controls graph traversal depth and the
/// section boosts applied during reranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Direct fact lookup ("what is my deductible?").
    Qa,
    /// Cross-section reasoning ("how does this endorsement change coverage?").
    Analysis,
    /// Exhaustive review ("list every exclusion that applies").
    Audit,
}

impl Intent {
    /// All variants for iteration.
    pub const ALL: [Intent; 3] = [Self::Qa, Self::Analysis, Self::Audit];

    /// Graph traversal depth associated with this intent.
    pub fn traversal_depth(&self) -> usize {
        match self {
            Self::Qa => 1,
            Self::Analysis => 2,
            Self::Audit => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qa => "QA",
            Self::Analysis => "ANALYSIS",
            Self::Audit => "AUDIT",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QA" => Ok(Self::Qa),
            "ANALYSIS" => Ok(Self::Analysis),
            "AUDIT" => Ok(Self::Audit),
            other => Err(format!("unknown intent: {other}")),
        }
    }
}

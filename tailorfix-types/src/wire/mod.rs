use serde::{Deserialize, Serialize};

pub mod suggestions_v1;

pub use suggestions_v1::{SuggestionV1, SuggestionsV1};

/// Tool information for wire-level schemas (schema-exact).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfoV1 {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Errors emitted while converting wire records to internal models.
#[derive(Debug, Clone)]
pub enum WireError {
    UnknownSection { section: String },
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::UnknownSection { section } => {
                write!(f, "unknown section tag {section:?}")
            }
        }
    }
}

impl std::error::Error for WireError {}

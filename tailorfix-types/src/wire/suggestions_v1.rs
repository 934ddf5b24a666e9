use serde::{Deserialize, Deserializer, Serialize};

use crate::suggestion::{Section, Suggestion};
use crate::wire::{ToolInfoV1, WireError};

/// Schema-exact wire representation of tailorfix.suggestions.v1.
///
/// The generator service replies with either a bare JSON array of records or
/// this envelope. Records are kept as raw values so one malformed record can
/// be skipped without losing the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsV1 {
    pub schema: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolInfoV1>,

    #[serde(default)]
    pub suggestions: Vec<serde_json::Value>,
}

/// One wire suggestion record, field names as emitted by the generator.
///
/// The generator is an LLM behind an HTTP boundary and does not reliably type
/// its indices: they arrive as numbers, numeric strings, empty strings, or
/// negative values. The coercion rule matches the upstream service — a
/// parseable non-negative integer becomes an index, anything else becomes
/// "absent".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionV1 {
    pub section: String,

    #[serde(
        default,
        rename = "entryIdx",
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_idx: Option<usize>,

    #[serde(
        default,
        rename = "bulletIdx",
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub bullet_idx: Option<usize>,

    #[serde(default)]
    pub original: String,

    #[serde(default)]
    pub updated: String,

    #[serde(default)]
    pub explanation: String,
}

impl TryFrom<SuggestionV1> for Suggestion {
    type Error = WireError;

    fn try_from(wire: SuggestionV1) -> Result<Self, Self::Error> {
        let section = Section::parse(&wire.section).ok_or(WireError::UnknownSection {
            section: wire.section,
        })?;

        Ok(Suggestion {
            section,
            entry_idx: wire.entry_idx,
            bullet_idx: wire.bullet_idx,
            original: wire.original,
            updated: wire.updated,
            explanation: wire.explanation,
        })
    }
}

fn lenient_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_index))
}

fn coerce_index(value: &serde_json::Value) -> Option<usize> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok().and_then(|n| {
            if n >= 0 { Some(n as usize) } else { None }
        }),
        _ => None,
    }
}

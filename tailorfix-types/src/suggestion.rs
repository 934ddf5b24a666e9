use serde::{Deserialize, Serialize};

/// Resume section a suggestion targets.
///
/// Closed set: the engine matches exhaustively on it. Unrecognized tags are
/// rejected at the wire boundary (see [`crate::wire`]), never inside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Projects,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
        }
    }

    /// Parse a wire tag. Returns `None` for unknown sections.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "summary" => Some(Section::Summary),
            "skills" => Some(Section::Skills),
            "experience" => Some(Section::Experience),
            "projects" => Some(Section::Projects),
            _ => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proposed, localized edit to a resume, produced by the external
/// generator against some earlier snapshot.
///
/// `entry_idx`/`bullet_idx` address into `experience`/`projects`; for the
/// skills section `entry_idx` is a positional hint only and carries no
/// authority — skills are located by value at evaluation time because earlier
/// edits in a batch shift positions.
///
/// `original` empty means "nothing expected to exist"; `updated` empty
/// signals deletion. `explanation` is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub section: Section,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_idx: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_idx: Option<usize>,

    #[serde(default)]
    pub original: String,

    #[serde(default)]
    pub updated: String,

    #[serde(default)]
    pub explanation: String,
}

impl Suggestion {
    /// Lifecycle identity tuple, rendered the way the suggestion list keys
    /// its rows: `section-entryIdx-bulletIdx` with `none` for absent indices.
    ///
    /// Not unique within a batch (two skill additions both render as
    /// `skills-none-none`); batch tracking additionally keys on ordinal.
    pub fn identity(&self) -> String {
        let entry = self
            .entry_idx
            .map(|i| i.to_string())
            .unwrap_or_else(|| "none".to_string());
        let bullet = self
            .bullet_idx
            .map(|i| i.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!("{}-{}-{}", self.section, entry, bullet)
    }
}

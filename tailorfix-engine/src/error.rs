//! Error types for tailorfix-engine.
//!
//! `validate` is total and never produces these; they exist for `apply`,
//! which refuses to guess when a caller hands it a suggestion the current
//! snapshot cannot locate. Callers that gate on `validate` never see them.

use tailorfix_types::suggestion::Section;
use thiserror::Error;

/// Why an apply call could not locate its target.
///
/// Every variant is a caller contract violation: `validate` would have
/// returned `false` for the same pair. The engine fails loudly instead of
/// silently returning the input unchanged, so a missed validation gate shows
/// up in a test or a log line rather than as a quietly wrong resume.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("resume has no summary block to edit")]
    MissingSummary,

    #[error("skill suggestion has neither original nor updated text")]
    EmptySkillEdit,

    #[error("no skill matches {original:?}")]
    SkillNotFound { original: String },

    #[error("{section} suggestion is missing an entry or bullet index")]
    MissingIndex { section: Section },

    #[error("entry index {entry_idx} out of bounds for {section} ({len} entries)")]
    EntryOutOfBounds {
        section: Section,
        entry_idx: usize,
        len: usize,
    },

    #[error(
        "bullet index {bullet_idx} out of bounds for {section} entry {entry_idx} ({len} bullets)"
    )]
    BulletOutOfBounds {
        section: Section,
        entry_idx: usize,
        bullet_idx: usize,
        len: usize,
    },
}

//! Validate/apply engine for resume suggestions.
//!
//! Responsibilities:
//! - Decide whether a suggestion is still applicable to a resume snapshot
//!   (`validate`).
//! - Produce a new snapshot with one suggestion merged in (`apply`).
//!
//! Both functions are pure. Suggestion batches are generated once against an
//! initial snapshot but applied incrementally, so positions recorded in a
//! suggestion go stale whenever an earlier edit changes a sequence's length.
//! The rule throughout this crate: variable-length sequences (skills) are
//! located by trimmed-value match at evaluation time; fixed-slot targets (a
//! bullet inside a still-present entry) use their recorded indices, because
//! no suggestion reorders or resizes the entry containers.

mod error;

pub use error::ApplyError;

use tailorfix_types::resume::Resume;
use tailorfix_types::suggestion::{Section, Suggestion};

/// The three shapes a skills suggestion can take, derived from which of
/// `original`/`updated` carry text after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEdit {
    Add { skill: String },
    Remove { original: String },
    Replace { original: String, updated: String },
}

impl SkillEdit {
    /// Classify a skills suggestion. Returns `None` when both texts are
    /// empty — a shape the generator contract never produces on purpose.
    pub fn classify(original: &str, updated: &str) -> Option<SkillEdit> {
        let original = original.trim();
        let updated = updated.trim();

        match (original.is_empty(), updated.is_empty()) {
            (true, true) => None,
            (true, false) => Some(SkillEdit::Add {
                skill: updated.to_string(),
            }),
            (false, true) => Some(SkillEdit::Remove {
                original: original.to_string(),
            }),
            (false, false) => Some(SkillEdit::Replace {
                original: original.to_string(),
                updated: updated.to_string(),
            }),
        }
    }
}

/// Position of the first element trim-equal to `target`.
///
/// The single source of matching semantics: both `validate` and `apply` go
/// through here so the two can never disagree on what "present" means.
pub fn find_first_trim_eq(sequence: &[String], target: &str) -> Option<usize> {
    let target = target.trim();
    sequence.iter().position(|item| item.trim() == target)
}

/// Decide whether `suggestion` can be applied to `resume` as it stands now.
///
/// Total: every input maps to `true` or `false`, never a panic. Validity is
/// advisory input for the UI layer and the precondition for [`apply`], not a
/// runtime assertion.
pub fn validate(resume: &Resume, suggestion: &Suggestion) -> bool {
    match suggestion.section {
        // A resume with no summary block cannot receive a summary edit,
        // regardless of the suggestion's text content.
        Section::Summary => resume.summary.is_some(),

        // Additions always apply. Removals and replacements require the
        // original text to exist somewhere right now; entry_idx is a stale
        // hint and never consulted.
        Section::Skills => match SkillEdit::classify(&suggestion.original, &suggestion.updated) {
            Some(SkillEdit::Add { .. }) => true,
            Some(SkillEdit::Remove { original }) | Some(SkillEdit::Replace { original, .. }) => {
                find_first_trim_eq(&resume.skills, &original).is_some()
            }
            None => false,
        },

        Section::Experience => {
            let (Some(entry_idx), Some(bullet_idx)) = (suggestion.entry_idx, suggestion.bullet_idx)
            else {
                return false;
            };
            resume
                .experience
                .get(entry_idx)
                .is_some_and(|entry| bullet_idx < entry.details.len())
        }

        Section::Projects => {
            let (Some(entry_idx), Some(bullet_idx)) = (suggestion.entry_idx, suggestion.bullet_idx)
            else {
                return false;
            };
            resume
                .projects
                .get(entry_idx)
                .is_some_and(|entry| bullet_idx < entry.description.len())
        }
    }
}

/// Apply one suggestion, returning a new resume value.
///
/// The result shares no mutable state with the input; callers keep prior
/// snapshots for rollback-by-discard. Must be gated on [`validate`]: handed a
/// pair validation rejects, this returns an [`ApplyError`] naming the missing
/// target rather than silently no-opping.
pub fn apply(resume: &Resume, suggestion: &Suggestion) -> Result<Resume, ApplyError> {
    let mut next = resume.clone();

    match suggestion.section {
        Section::Summary => {
            if next.summary.is_none() {
                return Err(ApplyError::MissingSummary);
            }
            // Wholesale replacement, verbatim.
            next.summary = Some(suggestion.updated.clone());
        }

        Section::Skills => {
            match SkillEdit::classify(&suggestion.original, &suggestion.updated) {
                None => return Err(ApplyError::EmptySkillEdit),
                Some(SkillEdit::Add { skill }) => next.skills.push(skill),
                Some(SkillEdit::Remove { original }) => {
                    // First match only. Duplicate skill text is resolved by
                    // position of first occurrence, a documented limitation.
                    let idx = find_first_trim_eq(&next.skills, &original)
                        .ok_or(ApplyError::SkillNotFound { original })?;
                    next.skills.remove(idx);
                }
                Some(SkillEdit::Replace { original, updated }) => {
                    let idx = find_first_trim_eq(&next.skills, &original).ok_or_else(|| {
                        ApplyError::SkillNotFound {
                            original: original.clone(),
                        }
                    })?;
                    next.skills[idx] = updated;
                }
            }
        }

        Section::Experience => {
            let (entry_idx, bullet_idx) = require_indices(suggestion)?;
            let len = next.experience.len();
            let entry = next.experience.get_mut(entry_idx).ok_or(
                ApplyError::EntryOutOfBounds {
                    section: Section::Experience,
                    entry_idx,
                    len,
                },
            )?;
            // Bullet text is free-form prose: written back verbatim, unlike
            // the token-like skills list.
            overwrite_bullet(
                &mut entry.details,
                Section::Experience,
                entry_idx,
                bullet_idx,
                &suggestion.updated,
            )?;
        }

        Section::Projects => {
            let (entry_idx, bullet_idx) = require_indices(suggestion)?;
            let len = next.projects.len();
            let entry = next
                .projects
                .get_mut(entry_idx)
                .ok_or(ApplyError::EntryOutOfBounds {
                    section: Section::Projects,
                    entry_idx,
                    len,
                })?;
            overwrite_bullet(
                &mut entry.description,
                Section::Projects,
                entry_idx,
                bullet_idx,
                &suggestion.updated,
            )?;
        }
    }

    Ok(next)
}

fn require_indices(suggestion: &Suggestion) -> Result<(usize, usize), ApplyError> {
    match (suggestion.entry_idx, suggestion.bullet_idx) {
        (Some(entry_idx), Some(bullet_idx)) => Ok((entry_idx, bullet_idx)),
        _ => Err(ApplyError::MissingIndex {
            section: suggestion.section,
        }),
    }
}

fn overwrite_bullet(
    bullets: &mut [String],
    section: Section,
    entry_idx: usize,
    bullet_idx: usize,
    updated: &str,
) -> Result<(), ApplyError> {
    let len = bullets.len();
    let slot = bullets
        .get_mut(bullet_idx)
        .ok_or(ApplyError::BulletOutOfBounds {
            section,
            entry_idx,
            bullet_idx,
            len,
        })?;
    *slot = updated.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SkillEdit, find_first_trim_eq};

    #[test]
    fn classify_covers_all_three_shapes() {
        assert_eq!(
            SkillEdit::classify("", " Rust "),
            Some(SkillEdit::Add {
                skill: "Rust".to_string()
            })
        );
        assert_eq!(
            SkillEdit::classify("Go", ""),
            Some(SkillEdit::Remove {
                original: "Go".to_string()
            })
        );
        assert_eq!(
            SkillEdit::classify("Go", "Golang"),
            Some(SkillEdit::Replace {
                original: "Go".to_string(),
                updated: "Golang".to_string()
            })
        );
        assert_eq!(SkillEdit::classify("  ", ""), None);
    }

    #[test]
    fn find_first_trim_eq_ignores_surrounding_whitespace() {
        let skills = vec![" Go ".to_string(), "Rust".to_string()];
        assert_eq!(find_first_trim_eq(&skills, "Go"), Some(0));
        assert_eq!(find_first_trim_eq(&skills, " Rust"), Some(1));
        assert_eq!(find_first_trim_eq(&skills, "Python"), None);
    }

    #[test]
    fn find_first_trim_eq_returns_first_of_duplicates() {
        let skills = vec!["Go".to_string(), "Rust".to_string(), "Go".to_string()];
        assert_eq!(find_first_trim_eq(&skills, "Go"), Some(0));
    }
}

//! Batch lifecycle over a resume snapshot.
//!
//! This crate owns *when* a suggestion may be applied and what happens to the
//! canonical snapshot afterwards. It does not own *how* edits are made;
//! that's the `tailorfix-engine` crate.

mod policy;
mod session;

pub use policy::SectionPolicy;
pub use session::{
    BatchOptions, BatchOutcome, SessionAction, SessionState, StepOutcome, SuggestionItem,
    SuggestionStatus, reduce, resume_fingerprint, run_batch, suggestion_id,
};

//! Shared DTOs (schemas-as-code) for the tailorfix workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod resume;
pub mod session;
pub mod suggestion;
pub mod wire;

/// Schema identifiers.
pub mod schema {
    pub const TAILORFIX_SUGGESTIONS_V1: &str = "tailorfix.suggestions.v1";
    pub const TAILORFIX_SESSION_V1: &str = "tailorfix.session.v1";
}

//! Lifecycle tests: one-way transitions, re-entrant rejection, and
//! revalidation against the latest snapshot.

use pretty_assertions::assert_eq;
use tailorfix_session::{
    BatchOptions, SectionPolicy, SessionAction, SessionState, StepOutcome, SuggestionStatus,
    reduce, run_batch,
};
use tailorfix_types::resume::Resume;
use tailorfix_types::session::{ApplyStatus, ToolInfo};
use tailorfix_types::suggestion::{Section, Suggestion};

fn skills_resume(skills: &[&str]) -> Resume {
    Resume {
        summary: Some("Built systems.".to_string()),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        ..Resume::default()
    }
}

fn skill_suggestion(original: &str, updated: &str, hint: Option<usize>) -> Suggestion {
    Suggestion {
        section: Section::Skills,
        entry_idx: hint,
        bullet_idx: None,
        original: original.to_string(),
        updated: updated.to_string(),
        explanation: String::new(),
    }
}

fn tool() -> ToolInfo {
    ToolInfo {
        name: "tailorfix".to_string(),
        version: Some("0.0.0".to_string()),
    }
}

#[test]
fn apply_advances_the_snapshot_for_later_validations() {
    // Generated against ["A", "B", "C"]: remove "A", then replace "C" -> "D"
    // with a hint that goes stale as soon as the removal lands.
    let state = SessionState::new(
        skills_resume(&["A", "B", "C"]),
        vec![
            skill_suggestion("A", "", Some(0)),
            skill_suggestion("C", "D", Some(2)),
        ],
    );

    let (state, outcome) = reduce(state, SessionAction::Apply { ordinal: 0 });
    assert_eq!(outcome, StepOutcome::Applied);
    assert_eq!(state.resume().skills, vec!["B".to_string(), "C".to_string()]);

    let (state, outcome) = reduce(state, SessionAction::Apply { ordinal: 1 });
    assert_eq!(outcome, StepOutcome::Applied);
    assert_eq!(state.resume().skills, vec!["B".to_string(), "D".to_string()]);
}

#[test]
fn rejection_is_terminal_and_re_entrant() {
    let state = SessionState::new(
        skills_resume(&["Go"]),
        vec![skill_suggestion("Go", "", None)],
    );

    let (state, first) = reduce(state, SessionAction::Reject { ordinal: 0 });
    assert_eq!(first, StepOutcome::Rejected);
    let snapshot_after_first = state.resume().clone();

    // Rejecting twice has the same observable effect as rejecting once.
    let (state, second) = reduce(state, SessionAction::Reject { ordinal: 0 });
    assert_eq!(second, StepOutcome::Rejected);
    assert_eq!(state.resume(), &snapshot_after_first);
    assert_eq!(state.items()[0].status, SuggestionStatus::Rejected);

    // And the rejected suggestion can never be applied.
    let (state, apply_after) = reduce(state, SessionAction::Apply { ordinal: 0 });
    assert_eq!(apply_after, StepOutcome::AlreadyResolved);
    assert_eq!(state.resume().skills, vec!["Go".to_string()]);
}

#[test]
fn applied_items_cannot_be_rejected_or_reapplied() {
    let state = SessionState::new(
        skills_resume(&[]),
        vec![skill_suggestion("", "Rust", None)],
    );

    let (state, outcome) = reduce(state, SessionAction::Apply { ordinal: 0 });
    assert_eq!(outcome, StepOutcome::Applied);

    let (state, again) = reduce(state, SessionAction::Apply { ordinal: 0 });
    assert_eq!(again, StepOutcome::AlreadyResolved);

    let (state, rejected) = reduce(state, SessionAction::Reject { ordinal: 0 });
    assert_eq!(rejected, StepOutcome::AlreadyResolved);
    assert_eq!(state.resume().skills, vec!["Rust".to_string()]);
}

#[test]
fn consuming_a_value_invalidates_the_duplicate_suggestion() {
    // Two removals of the same text: the first wins, the second finds no
    // match in the updated snapshot.
    let state = SessionState::new(
        skills_resume(&["Go", "Rust"]),
        vec![
            skill_suggestion("Go", "", None),
            skill_suggestion("Go", "", None),
        ],
    );

    let (state, first) = reduce(state, SessionAction::Apply { ordinal: 0 });
    assert_eq!(first, StepOutcome::Applied);

    let (state, second) = reduce(state, SessionAction::Apply { ordinal: 1 });
    assert_eq!(second, StepOutcome::NotApplicable);
    assert_eq!(state.items()[1].status, SuggestionStatus::Pending);
    assert_eq!(state.resume().skills, vec!["Rust".to_string()]);
}

#[test]
fn unknown_ordinal_is_reported_not_panicked() {
    let state = SessionState::new(skills_resume(&[]), vec![]);
    let (_, outcome) = reduce(state, SessionAction::Apply { ordinal: 7 });
    assert_eq!(outcome, StepOutcome::UnknownOrdinal);
}

#[test]
fn policy_blocks_sections_without_consuming_them() {
    let state = SessionState::with_policy(
        skills_resume(&["Go"]),
        vec![skill_suggestion("Go", "", None)],
        SectionPolicy {
            allow: vec![],
            deny: vec![Section::Skills],
        },
    );

    let (state, outcome) = reduce(state, SessionAction::Apply { ordinal: 0 });
    assert_eq!(outcome, StepOutcome::Blocked);
    assert_eq!(state.items()[0].status, SuggestionStatus::Pending);
    assert_eq!(state.resume().skills, vec!["Go".to_string()]);
}

#[test]
fn applicable_reflects_the_latest_snapshot() {
    let state = SessionState::new(
        skills_resume(&["Go"]),
        vec![
            skill_suggestion("Go", "", None),
            skill_suggestion("Go", "Golang", None),
        ],
    );
    assert_eq!(state.applicable().len(), 2);

    let (state, _) = reduce(state, SessionAction::Apply { ordinal: 0 });

    // "Go" is gone; the replacement no longer applies.
    assert!(state.applicable().is_empty());
}

#[test]
fn run_batch_reports_every_row() {
    let resume = skills_resume(&["A", "B", "C"]);
    let suggestions = vec![
        skill_suggestion("A", "", Some(0)),       // applied
        skill_suggestion("C", "D", Some(2)),      // applied despite stale hint
        skill_suggestion("Missing", "", None),    // not applicable
        skill_suggestion("", "Kubernetes", None), // rejected by the user
    ];
    let options = BatchOptions {
        policy: SectionPolicy::default(),
        reject: vec![3],
        tool: tool(),
    };

    let outcome = run_batch(resume, suggestions, &options);
    let report = &outcome.report;

    assert_eq!(report.schema, "tailorfix.session.v1");
    assert_eq!(report.results.len(), 4);
    assert_eq!(report.results[0].status, ApplyStatus::Applied);
    assert_eq!(report.results[1].status, ApplyStatus::Applied);
    assert_eq!(report.results[2].status, ApplyStatus::NotApplicable);
    assert_eq!(report.results[3].status, ApplyStatus::Rejected);

    assert_eq!(report.summary.applied, 2);
    assert_eq!(report.summary.not_applicable, 1);
    assert_eq!(report.summary.rejected, 1);
    assert_eq!(report.summary.attempted, 3);

    assert_ne!(report.resume_sha256_before, report.resume_sha256_after);
    assert_eq!(
        outcome.state.resume().skills,
        vec!["B".to_string(), "D".to_string()]
    );
}

#[test]
fn run_batch_fingerprint_is_stable_when_nothing_applies() {
    let resume = skills_resume(&["Go"]);
    let suggestions = vec![skill_suggestion("Missing", "", None)];
    let options = BatchOptions {
        policy: SectionPolicy::default(),
        reject: vec![],
        tool: tool(),
    };

    let outcome = run_batch(resume, suggestions, &options);
    assert_eq!(
        outcome.report.resume_sha256_before,
        outcome.report.resume_sha256_after
    );
}

use crate::policy::SectionPolicy;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tailorfix_types::resume::Resume;
use tailorfix_types::session::{
    ApplyStatus, SessionReport, SessionSummary, SuggestionResult, ToolInfo,
};
use tailorfix_types::suggestion::Suggestion;
use uuid::Uuid;

/// Lifecycle state of one suggestion within a batch.
///
/// `Applied` and `Rejected` are terminal; there is no un-apply. Rolling back
/// means discarding the session and starting over from an earlier snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionStatus {
    Pending,
    Applied,
    Rejected,
}

impl SuggestionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SuggestionStatus::Pending)
    }
}

/// One batch row: the suggestion plus its lifecycle bookkeeping.
#[derive(Debug, Clone)]
pub struct SuggestionItem {
    /// Deterministic id; see [`suggestion_id`].
    pub id: Uuid,

    /// Position within the batch. Identity tuples collide (two skill
    /// additions both render as `skills-none-none`), ordinals never do.
    pub ordinal: usize,

    pub suggestion: Suggestion,
    pub status: SuggestionStatus,
}

/// A suggestion batch bound to the canonical "current resume" snapshot.
///
/// The state is only ever advanced through [`reduce`], one action at a time.
#[derive(Debug, Clone)]
pub struct SessionState {
    resume: Resume,
    policy: SectionPolicy,
    items: Vec<SuggestionItem>,
}

impl SessionState {
    pub fn new(resume: Resume, suggestions: Vec<Suggestion>) -> Self {
        Self::with_policy(resume, suggestions, SectionPolicy::default())
    }

    pub fn with_policy(
        resume: Resume,
        suggestions: Vec<Suggestion>,
        policy: SectionPolicy,
    ) -> Self {
        let items = suggestions
            .into_iter()
            .enumerate()
            .map(|(ordinal, suggestion)| SuggestionItem {
                id: suggestion_id(&suggestion, ordinal),
                ordinal,
                suggestion,
                status: SuggestionStatus::Pending,
            })
            .collect();
        Self {
            resume,
            policy,
            items,
        }
    }

    /// The latest snapshot. Every validation and apply in this session runs
    /// against this value, never against the snapshot the batch was
    /// generated from.
    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    pub fn into_resume(self) -> Resume {
        self.resume
    }

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    /// Pending items that would currently apply: policy-eligible and valid
    /// against the latest snapshot. Re-derive after every action; an applied
    /// suggestion can invalidate (or revalidate) later ones.
    pub fn applicable(&self) -> Vec<&SuggestionItem> {
        self.items
            .iter()
            .filter(|item| item.status == SuggestionStatus::Pending)
            .filter(|item| self.policy.eligible(item.suggestion.section))
            .filter(|item| tailorfix_engine::validate(&self.resume, &item.suggestion))
            .collect()
    }
}

/// One user action against a batch row, addressed by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Apply { ordinal: usize },
    Reject { ordinal: usize },
}

/// What a reducer step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    Rejected,
    /// The item was already applied or rejected; terminal states are
    /// one-way and the step changed nothing.
    AlreadyResolved,
    /// Section denied by policy; the item stays pending.
    Blocked,
    /// Validation against the latest snapshot said no; the item stays
    /// pending and the UI should disable the action.
    NotApplicable,
    /// The engine refused the edit. Only reachable when validation and
    /// application disagree, which is a bug worth surfacing, not hiding.
    Failed { message: String },
    UnknownOrdinal,
}

/// Advance the session by one action.
///
/// Explicit state in, explicit state out: the caller owns the value between
/// steps, and nothing here touches ambient state. Actions on terminal items
/// are no-ops, which makes rejection re-entrant: rejecting twice has the same
/// observable effect as rejecting once.
pub fn reduce(mut state: SessionState, action: SessionAction) -> (SessionState, StepOutcome) {
    match action {
        SessionAction::Reject { ordinal } => {
            let Some(item) = state.items.get_mut(ordinal) else {
                return (state, StepOutcome::UnknownOrdinal);
            };
            match item.status {
                SuggestionStatus::Applied => (state, StepOutcome::AlreadyResolved),
                SuggestionStatus::Pending | SuggestionStatus::Rejected => {
                    item.status = SuggestionStatus::Rejected;
                    (state, StepOutcome::Rejected)
                }
            }
        }

        SessionAction::Apply { ordinal } => {
            let Some(item) = state.items.get(ordinal) else {
                return (state, StepOutcome::UnknownOrdinal);
            };
            if item.status.is_terminal() {
                return (state, StepOutcome::AlreadyResolved);
            }
            let suggestion = item.suggestion.clone();

            if !state.policy.eligible(suggestion.section) {
                return (state, StepOutcome::Blocked);
            }

            // Always validate against the latest snapshot: an earlier apply
            // in this batch may have shifted positions recorded at
            // generation time.
            if !tailorfix_engine::validate(&state.resume, &suggestion) {
                return (state, StepOutcome::NotApplicable);
            }

            match tailorfix_engine::apply(&state.resume, &suggestion) {
                Ok(next) => {
                    state.resume = next;
                    state.items[ordinal].status = SuggestionStatus::Applied;
                    (state, StepOutcome::Applied)
                }
                Err(err) => (
                    state,
                    StepOutcome::Failed {
                        message: err.to_string(),
                    },
                ),
            }
        }
    }
}

/// Options for a whole-batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub policy: SectionPolicy,

    /// Ordinals to reject before anything is applied.
    pub reject: Vec<usize>,

    pub tool: ToolInfo,
}

/// Result of [`run_batch`]: the final state plus a serializable report.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub state: SessionState,
    pub report: SessionReport,
}

/// Run a batch end to end: explicit rejections first, then one apply attempt
/// per remaining suggestion in ordinal order.
pub fn run_batch(
    resume: Resume,
    suggestions: Vec<Suggestion>,
    options: &BatchOptions,
) -> BatchOutcome {
    let mut report = SessionReport::new(options.tool.clone());
    report.run.started_at = Some(Utc::now());
    report.resume_sha256_before = Some(resume_fingerprint(&resume));

    let mut state = SessionState::with_policy(resume, suggestions, options.policy.clone());
    let mut outcomes: Vec<Option<StepOutcome>> = vec![None; state.items.len()];

    // Rejections first, so a rejected suggestion can never consume a value a
    // later one matches on.
    for &ordinal in &options.reject {
        let (next, outcome) = reduce(state, SessionAction::Reject { ordinal });
        state = next;
        if let Some(slot) = outcomes.get_mut(ordinal) {
            *slot = Some(outcome);
        }
    }

    for ordinal in 0..state.items.len() {
        if state.items[ordinal].status.is_terminal() {
            continue;
        }
        let (next, outcome) = reduce(state, SessionAction::Apply { ordinal });
        state = next;
        outcomes[ordinal] = Some(outcome);
    }

    let mut summary = SessionSummary::default();
    for item in &state.items {
        let (status, message) = match item.status {
            SuggestionStatus::Applied => (ApplyStatus::Applied, None),
            SuggestionStatus::Rejected => (ApplyStatus::Rejected, None),
            SuggestionStatus::Pending => match outcomes[item.ordinal].take() {
                Some(StepOutcome::Blocked) => (
                    ApplyStatus::Blocked,
                    Some("section denied by policy".to_string()),
                ),
                Some(StepOutcome::Failed { message }) => (ApplyStatus::Failed, Some(message)),
                _ => (
                    ApplyStatus::NotApplicable,
                    Some("not applicable to the current snapshot".to_string()),
                ),
            },
        };

        match status {
            ApplyStatus::Applied => summary.applied += 1,
            ApplyStatus::Rejected => summary.rejected += 1,
            ApplyStatus::Blocked => summary.blocked += 1,
            ApplyStatus::NotApplicable => summary.not_applicable += 1,
            ApplyStatus::Failed => summary.failed += 1,
        }
        if status != ApplyStatus::Rejected {
            summary.attempted += 1;
        }

        report.results.push(SuggestionResult {
            suggestion_id: item.id.to_string(),
            ordinal: item.ordinal,
            section: item.suggestion.section,
            identity: item.suggestion.identity(),
            status,
            message,
        });
    }

    report.summary = summary;
    report.resume_sha256_after = Some(resume_fingerprint(state.resume()));
    report.run.ended_at = Some(Utc::now());

    BatchOutcome { state, report }
}

/// Deterministic id: v5(namespace, identity|ordinal).
///
/// The identity tuple alone is not unique within a batch, so the ordinal is
/// folded in. Regenerating ids for the same batch yields the same values.
pub fn suggestion_id(suggestion: &Suggestion, ordinal: usize) -> Uuid {
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x8e, 0x21, 0x7b, 0x0d, 0x5a, 0x4f, 0x4e, 0x9b, 0xb1, 0x6d, 0x2f, 0x93, 0x70, 0x1c, 0xae,
        0x44,
    ]);

    let stable_key = format!("{}|{}", suggestion.identity(), ordinal);
    Uuid::new_v5(&NAMESPACE, stable_key.as_bytes())
}

/// SHA-256 over the resume's canonical JSON form.
pub fn resume_fingerprint(resume: &Resume) -> String {
    let canonical = serde_json::to_string(resume).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

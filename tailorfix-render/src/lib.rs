//! Rendering helpers (markdown) for human-readable artifacts.

use diffy::PatchFormatter;
use tailorfix_types::resume::Resume;
use tailorfix_types::session::{ApplyStatus, SessionReport};

/// Render a resume as a markdown document.
///
/// Block order mirrors the on-screen editor: summary paragraph, skills list,
/// then the Experience and Projects sections with their per-entry headers
/// and bullets.
pub fn render_resume_md(resume: &Resume) -> String {
    let mut out = String::new();

    if let Some(summary) = &resume.summary {
        out.push_str(summary);
        out.push_str("\n\n");
    }

    if !resume.skills.is_empty() {
        for skill in &resume.skills {
            out.push_str(&format!("- {}\n", skill));
        }
        out.push('\n');
    }

    if !resume.experience.is_empty() {
        out.push_str("## Experience\n\n");
        for entry in &resume.experience {
            let mut header_parts: Vec<String> = Vec::new();
            if let Some(title) = &entry.title {
                header_parts.push(title.clone());
            }
            if let Some(company) = &entry.company {
                header_parts.push(format!("at {}", company));
            }
            if !header_parts.is_empty() {
                out.push_str(&format!("**{}**\n\n", header_parts.join(" ")));
            }
            for detail in &entry.details {
                out.push_str(&format!("- {}\n", detail));
            }
            if !entry.details.is_empty() {
                out.push('\n');
            }
        }
    }

    if !resume.projects.is_empty() {
        out.push_str("## Projects\n\n");
        for project in &resume.projects {
            if let Some(name) = &project.name {
                out.push_str(&format!("**{}**\n\n", name));
            }
            for line in &project.description {
                out.push_str(&format!("- {}\n", line));
            }
            if !project.description.is_empty() {
                out.push('\n');
            }
            if !project.tech.is_empty() {
                out.push_str(&format!("Tech: {}\n\n", project.tech.join(", ")));
            }
        }
    }

    out
}

pub fn render_session_md(report: &SessionReport) -> String {
    let mut out = String::new();
    out.push_str("# tailorfix session\n\n");
    out.push_str(&format!(
        "- Attempted: {}\n- Applied: {}\n- Rejected: {}\n- Blocked: {}\n- Not applicable: {}\n- Failed: {}\n\n",
        report.summary.attempted,
        report.summary.applied,
        report.summary.rejected,
        report.summary.blocked,
        report.summary.not_applicable,
        report.summary.failed
    ));

    if let (Some(before), Some(after)) = (&report.resume_sha256_before, &report.resume_sha256_after)
    {
        out.push_str(&format!("- Resume: `{}` → `{}`\n\n", before, after));
    }

    out.push_str("## Results\n\n");
    if report.results.is_empty() {
        out.push_str("_No suggestions in this batch._\n");
        return out;
    }

    for (i, r) in report.results.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, r.suggestion_id));
        out.push_str(&format!("- Section: `{}`\n", r.section));
        out.push_str(&format!("- Identity: `{}`\n", r.identity));
        out.push_str(&format!("- Status: `{}`\n", status_label(r.status)));
        if let Some(msg) = &r.message {
            out.push_str(&format!("- Message: {}\n", msg));
        }
        out.push('\n');
    }

    out
}

/// Unified diff between two rendered documents, empty when they match.
pub fn render_patch(before: &str, after: &str, label: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", label));

    let patch = diffy::create_patch(before, after);
    let formatter = PatchFormatter::new();
    out.push_str(&formatter.fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

fn status_label(status: ApplyStatus) -> &'static str {
    match status {
        ApplyStatus::Applied => "applied",
        ApplyStatus::Rejected => "rejected",
        ApplyStatus::Blocked => "blocked",
        ApplyStatus::NotApplicable => "not_applicable",
        ApplyStatus::Failed => "failed",
    }
}

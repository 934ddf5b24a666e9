mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::process::ExitCode;
use tailorfix_render::{render_patch, render_resume_md, render_session_md};
use tailorfix_session::{BatchOptions, run_batch};
use tailorfix_suggestions::{LoadedBatch, load_batch, load_batches};
use tailorfix_types::resume::Resume;
use tailorfix_types::session::ToolInfo;
use tailorfix_types::suggestion::Suggestion;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "tailorfix",
    version,
    about = "Deterministic suggestion validator and applicator for structured resumes."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check which suggestions in a batch still apply to the resume.
    Validate(ValidateArgs),
    /// Run a batch through the session engine (default: dry-run).
    Apply(ApplyArgs),
    /// Render the resume as markdown.
    Show(ShowArgs),
}

#[derive(Debug, Parser)]
struct ValidateArgs {
    /// Resume JSON file.
    #[arg(long)]
    resume: Utf8PathBuf,

    /// Suggestion batch file, or a directory of *.json batches.
    #[arg(long)]
    suggestions: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct ApplyArgs {
    /// Resume JSON file.
    #[arg(long)]
    resume: Utf8PathBuf,

    /// Suggestion batch file, or a directory of *.json batches.
    #[arg(long)]
    suggestions: Utf8PathBuf,

    /// Write artifacts to the output directory. If omitted, runs a dry-run
    /// and prints the would-be patch.
    #[arg(long, default_value_t = false)]
    apply: bool,

    /// Output directory for artifacts (default: tailorfix-out, or the
    /// config file's out_dir).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Reject the suggestion at this ordinal before applying (repeatable).
    #[arg(long)]
    reject: Vec<usize>,

    /// Only apply suggestions in these sections (repeatable).
    #[arg(long)]
    allow: Vec<String>,

    /// Never apply suggestions in these sections (repeatable).
    #[arg(long)]
    deny: Vec<String>,
}

#[derive(Debug, Parser)]
struct ShowArgs {
    /// Resume JSON file.
    #[arg(long)]
    resume: Utf8PathBuf,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Apply(args) => cmd_apply(args),
        Command::Show(args) => cmd_show(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let resume = load_resume(&args.resume)?;
    let suggestions = collect_suggestions(&args.suggestions)?;

    let mut applicable = 0usize;
    for (ordinal, suggestion) in suggestions.iter().enumerate() {
        let ok = tailorfix_engine::validate(&resume, suggestion);
        if ok {
            applicable += 1;
        }
        let marker = if ok { "ok" } else { "--" };
        println!(
            "{:>4}  [{}]  {}  {}",
            ordinal,
            marker,
            suggestion.identity(),
            preview_text(suggestion)
        );
    }

    println!(
        "\n{} of {} suggestions applicable",
        applicable,
        suggestions.len()
    );
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let cwd = Utf8PathBuf::from(".");
    let file_config = config::load_or_default(&cwd).context("load tailorfix.toml config")?;
    let policy = config::merge_policy(&file_config, &args.allow, &args.deny)?;
    let out_dir = args
        .out_dir
        .or(file_config.out_dir)
        .unwrap_or_else(|| Utf8PathBuf::from("tailorfix-out"));

    let resume = load_resume(&args.resume)?;
    let suggestions = collect_suggestions(&args.suggestions)?;

    let before_md = render_resume_md(&resume);

    let options = BatchOptions {
        policy,
        reject: args.reject.clone(),
        tool: ToolInfo {
            name: "tailorfix".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        },
    };
    let outcome = run_batch(resume, suggestions, &options);

    let after_md = render_resume_md(outcome.state.resume());
    let patch = render_patch(&before_md, &after_md, "resume.md");

    let summary = &outcome.report.summary;
    println!(
        "applied {} / rejected {} / blocked {} / not applicable {} / failed {}",
        summary.applied, summary.rejected, summary.blocked, summary.not_applicable, summary.failed
    );

    if !args.apply {
        println!("dry-run: no files written");
        if !patch.is_empty() {
            println!("\n{}", patch);
        }
        return Ok(());
    }

    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir))?;

    let resume_json = serde_json::to_string_pretty(outcome.state.resume())
        .context("serialize updated resume")?;
    write_artifact(&out_dir.join("resume.json"), &resume_json)?;

    let session_json =
        serde_json::to_string_pretty(&outcome.report).context("serialize session report")?;
    write_artifact(&out_dir.join("session.json"), &session_json)?;

    write_artifact(&out_dir.join("session.md"), &render_session_md(&outcome.report))?;
    write_artifact(&out_dir.join("resume.diff"), &patch)?;

    info!("artifacts written to {}", out_dir);
    Ok(())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let resume = load_resume(&args.resume)?;
    print!("{}", render_resume_md(&resume));
    Ok(())
}

fn load_resume(path: &Utf8Path) -> anyhow::Result<Resume> {
    let contents = fs::read_to_string(path).with_context(|| format!("read resume {}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("parse resume {}", path))
}

/// Gather suggestions from one batch file or a directory of batches,
/// preserving batch order and skipping what cannot be used.
fn collect_suggestions(path: &Utf8Path) -> anyhow::Result<Vec<Suggestion>> {
    let batches: Vec<LoadedBatch> = if path.is_dir() {
        load_batches(path).with_context(|| format!("scan suggestion batches in {}", path))?
    } else {
        vec![load_batch(path)]
    };

    let mut suggestions = Vec::new();
    let mut usable_batches = 0usize;
    for loaded in &batches {
        match &loaded.batch {
            Ok(batch) => {
                usable_batches += 1;
                for skipped in &batch.skipped {
                    warn!(
                        path = %loaded.path,
                        index = skipped.index,
                        reason = %skipped.reason,
                        "skipped suggestion record"
                    );
                }
                suggestions.extend(batch.suggestions.iter().cloned());
            }
            Err(e) => warn!(path = %loaded.path, error = %e, "unusable suggestion batch"),
        }
    }

    if usable_batches == 0 {
        anyhow::bail!("no usable suggestion batch at {}", path);
    }
    Ok(suggestions)
}

fn preview_text(suggestion: &Suggestion) -> String {
    let original = suggestion.original.trim();
    let updated = suggestion.updated.trim();
    match (original.is_empty(), updated.is_empty()) {
        (true, false) => format!("+ {}", truncate(updated)),
        (false, true) => format!("- {}", truncate(original)),
        _ => format!("{} → {}", truncate(original), truncate(updated)),
    }
}

fn truncate(text: &str) -> String {
    const MAX: usize = 48;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{}…", head)
    }
}

fn write_artifact(path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path))
}

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use tailorfix_types::schema::TAILORFIX_SUGGESTIONS_V1;
use tailorfix_types::suggestion::Suggestion;
use tailorfix_types::wire::{SuggestionV1, SuggestionsV1};
use thiserror::Error;
use tracing::debug;

/// One batch file, loaded best-effort.
#[derive(Debug, Clone)]
pub struct LoadedBatch {
    pub path: Utf8PathBuf,
    pub batch: Result<SuggestionBatch, BatchLoadError>,
}

/// The usable content of a batch file.
#[derive(Debug, Clone, Default)]
pub struct SuggestionBatch {
    pub suggestions: Vec<Suggestion>,

    /// Records that did not convert, kept for diagnostics. Their positions
    /// refer to the original payload, not to `suggestions`.
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Error, Clone)]
pub enum BatchLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },

    #[error("unsupported schema: {schema}")]
    Schema { schema: String },

    #[error("payload is neither a suggestion array nor an envelope")]
    Shape,
}

/// Load a single batch file. IO and parse failures end up in the returned
/// record rather than an `Err`, so a caller scanning many files keeps going.
pub fn load_batch(path: &Utf8Path) -> LoadedBatch {
    let batch = match fs::read_to_string(path) {
        Ok(contents) => parse_batch(&contents),
        Err(e) => Err(BatchLoadError::Io {
            message: e.to_string(),
        }),
    };

    LoadedBatch {
        path: path.to_path_buf(),
        batch,
    }
}

/// Load every `*.json` batch under `dir`, in deterministic path order.
pub fn load_batches(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedBatch>> {
    let pattern = dir.join("*.json");
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for suggestion batches");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob suggestion batches")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        out.push(load_batch(Utf8Path::new(&path)));
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

/// Parse a batch payload: a bare JSON array of records, or a
/// `tailorfix.suggestions.v1` envelope.
pub fn parse_batch(contents: &str) -> Result<SuggestionBatch, BatchLoadError> {
    let value: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| BatchLoadError::Json {
            message: e.to_string(),
        })?;

    let records = match value {
        serde_json::Value::Array(records) => records,
        serde_json::Value::Object(_) => {
            let envelope: SuggestionsV1 =
                serde_json::from_value(value).map_err(|e| BatchLoadError::Json {
                    message: e.to_string(),
                })?;
            if envelope.schema != TAILORFIX_SUGGESTIONS_V1 {
                return Err(BatchLoadError::Schema {
                    schema: envelope.schema,
                });
            }
            envelope.suggestions
        }
        _ => return Err(BatchLoadError::Shape),
    };

    let mut batch = SuggestionBatch::default();
    for (index, record) in records.into_iter().enumerate() {
        match convert_record(record) {
            Ok(suggestion) => batch.suggestions.push(suggestion),
            Err(reason) => {
                debug!(index, %reason, "skipping suggestion record");
                batch.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    Ok(batch)
}

fn convert_record(record: serde_json::Value) -> Result<Suggestion, String> {
    let wire: SuggestionV1 = serde_json::from_value(record).map_err(|e| e.to_string())?;
    Suggestion::try_from(wire).map_err(|e| e.to_string())
}

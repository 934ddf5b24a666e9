//! Loader for generator-produced suggestion batches.
//!
//! The generator service is an opaque producer: given a resume and a job
//! description it replies with suggestion records, either as a bare JSON
//! array or wrapped in a `tailorfix.suggestions.v1` envelope. This crate
//! reads those payloads from disk and converts them to the internal model,
//! tolerating the malformed shapes an LLM-backed service actually emits.

mod load;

pub use load::{
    BatchLoadError, LoadedBatch, SkippedRecord, SuggestionBatch, load_batch, load_batches,
    parse_batch,
};

//! Error types for trace configuration and output

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the tracer
///
/// Only configuration problems (raised before tracing starts) and output
/// sink failures are fatal. Source lookups and unknown preset keys are
/// recovered locally and never show up here.
#[derive(Error, Debug)]
pub enum TraceError {
    /// A good/bad regex failed to compile
    #[error("invalid {tier} regex: {source}")]
    InvalidRegex {
        /// Which tier the pattern was supplied for ("good" or "bad")
        tier: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The lookup tables file could not be read or parsed
    #[error("failed to load lookup tables from {path}: {reason}")]
    Tables { path: PathBuf, reason: String },

    /// Reading the event stream failed
    #[error("failed to read event stream: {0}")]
    Input(#[source] std::io::Error),

    /// The output sink rejected a write
    #[error("failed to write trace output: {0}")]
    Output(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TraceError>;

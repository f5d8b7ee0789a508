//! Unified error types for the valuation service.

use thiserror::Error;

use crate::genes::{BodyPart, Class};

/// Unified error type for the valuation service.
#[derive(Error, Debug)]
pub enum ValuerError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Request-layer error (retries exhausted).
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Genome decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single request attempt, before the retry budget is spent.
///
/// All three kinds are retryable; the request client distinguishes them only
/// for diagnostics.
#[derive(Error, Debug)]
pub enum AttemptError {
    /// The transport itself failed (connection error, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("http status {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not contain the expected payload.
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// Request-layer errors surfaced to callers.
///
/// Transient failures are absorbed by the retry loop; the only way a call
/// fails is by spending its whole retry budget.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Every attempt failed; carries the last observed error and the
    /// caller-supplied label for diagnostics.
    #[error("{label}: retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Caller-supplied label identifying the call site.
        label: String,
        /// Number of attempts made.
        attempts: u32,
        /// Last observed attempt failure.
        source: AttemptError,
    },
}

impl RequestError {
    /// The caller-supplied label of the failed call.
    pub fn label(&self) -> &str {
        match self {
            RequestError::RetriesExhausted { label, .. } => label,
        }
    }
}

/// Genome decoding errors. Always per-creature and never retried; the owning
/// player's valuation is skipped instead.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Genome length matches neither supported encoding.
    #[error("unsupported genome length: {0} hex digits (expected 64 or 128)")]
    UnsupportedLength(usize),

    /// Genome length does not match the declared encoding.
    #[error("genome length mismatch: expected {expected} hex digits, got {actual}")]
    Length {
        /// Hex digits required by the declared encoding.
        expected: usize,
        /// Hex digits actually present.
        actual: usize,
    },

    /// Genome contains a non-hexadecimal digit.
    #[error("invalid hex in genome: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The class field value maps to no known class.
    #[error("unknown class bits: {bits}")]
    UnknownClass {
        /// Raw class field bits.
        bits: String,
    },

    /// A dominant gene's trait bits are absent from the trait table.
    #[error("unknown {part} trait for {class}: {bits}")]
    UnknownTrait {
        /// Body-part slot being decoded.
        part: BodyPart,
        /// Class carried by the gene.
        class: Class,
        /// Raw trait bits.
        bits: String,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ValuerError>;

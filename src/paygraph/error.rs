//! Error types for the windowed graph engine and the line pipeline around it.
//!
//! The two layers fail differently: `GraphError` covers per-transaction
//! validation and internal invariants inside the core, `PipelineError` covers
//! everything that can go wrong between a file and the core (I/O, JSON
//! decoding, timestamp parsing). A stale timestamp below the retention floor
//! is deliberately NOT an error — the dispatcher reports it through
//! [`TransactionOutcome::IgnoredStale`](crate::paygraph::graph::TransactionOutcome).

use thiserror::Error;

/// Errors raised by the core graph engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A transaction failed validation. Validation runs before any index is
    /// touched, so a rejected transaction never partially mutates state.
    #[error("invalid transaction: {message}")]
    InvalidInput { message: String },

    /// A median was requested over zero positive-degree nodes. The dispatcher
    /// never recomputes the median before the first edge exists, so hitting
    /// this means an internal invariant is broken.
    #[error("no positive-degree nodes to take a median over")]
    EmptyDegreeSet,

    /// Bad construction-time configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl GraphError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Errors raised by the line-oriented I/O layer.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// I/O failures with the operation that was being attempted.
    #[error("I/O operation failed: {operation}")]
    Io {
        #[source]
        source: std::io::Error,
        operation: String,
    },

    /// A line that does not decode as a payment record.
    #[error("JSON decoding failed")]
    Json(#[from] serde_json::Error),

    /// A `created_time` value that does not parse as a timestamp.
    #[error("unparseable created_time '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// The core rejected the transaction.
    #[error("graph rejected transaction")]
    Graph(#[from] GraphError),
}

impl PipelineError {
    /// Helper to attach the failing operation to an I/O error.
    pub fn io(source: std::io::Error, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            operation: operation.into(),
        }
    }
}

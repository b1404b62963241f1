pub mod config;
pub mod error;
pub mod graph;
pub mod pipeline;

// Re-export the types most callers need.
pub use config::{GraphConfig, DEFAULT_WINDOW_SIZE};
pub use error::{GraphError, PipelineError};
pub use graph::{TransactionGraph, TransactionOutcome};

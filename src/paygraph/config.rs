//! Construction-time configuration for a transaction graph.

use crate::paygraph::error::GraphError;

/// Default trailing window width, in whole timestamp units (seconds).
pub const DEFAULT_WINDOW_SIZE: i64 = 60;

/// Tuning for a [`TransactionGraph`](crate::paygraph::graph::TransactionGraph).
///
/// The window width is fixed at construction and immutable for the life of
/// the graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Width of the trailing window in whole timestamp units.
    pub window_size: i64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl GraphConfig {
    /// Builds a config with an explicit window width.
    pub fn new(window_size: i64) -> Result<Self, GraphError> {
        if window_size <= 0 {
            return Err(GraphError::config(format!(
                "window size must be positive, got {}",
                window_size
            )));
        }
        Ok(Self { window_size })
    }
}

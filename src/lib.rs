//! # paygraph
//!
//! Rolling median of node degree over an undirected payment graph bounded to
//! a trailing time window. Transactions arrive as `(timestamp, actor,
//! target)` triples; each accepted transaction updates the graph and yields
//! the current median of all positive node degrees in O(log N) amortized
//! time.
//!
//! ## Quick start
//!
//! ```rust
//! use paygraph::{TransactionGraph, TransactionOutcome};
//!
//! let mut graph = TransactionGraph::with_default_window();
//! let outcome = graph.process_transaction(1, "alice", "bob").unwrap();
//! assert_eq!(outcome, TransactionOutcome::Median(1.0));
//! ```
//!
//! The `paygraph::pipeline` module wires the graph to line-delimited JSON
//! input and a two-decimal-per-line output file; the `paygraph` binary
//! exposes that pipeline on the command line.

pub mod paygraph;

pub use crate::paygraph::{
    GraphConfig, GraphError, PipelineError, TransactionGraph, TransactionOutcome,
    DEFAULT_WINDOW_SIZE,
};

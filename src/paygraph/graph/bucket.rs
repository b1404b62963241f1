//! Timestamp buckets used for contiguous-range window eviction.

use std::collections::BTreeSet;

/// The set of edges whose *current* timestamp equals `timestamp`.
///
/// Buckets track membership by canonical edge name; the edges themselves are
/// owned by the edge index. An edge belongs to exactly one bucket at any
/// time — a timestamp refresh moves it between buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub timestamp: i64,
    pub edges: BTreeSet<String>,
}

impl TimeBucket {
    pub fn new(timestamp: i64) -> Self {
        TimeBucket {
            timestamp,
            edges: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

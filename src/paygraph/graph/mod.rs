//! Windowed transaction graph: the core engine.
//!
//! A [`TransactionGraph`] owns three ordered indexes — edges by canonical
//! name, buckets by timestamp, nodes by name — plus the trailing-window
//! markers and the cached median. Transactions are applied one at a time;
//! each call either completes or fails without partially mutating state.
//!
//! Timestamp order on the bucket index is what keeps eviction cheap: when
//! the window advances, everything below the new floor is a contiguous
//! prefix of the index and detaches in one structural operation.

pub mod bucket;
pub mod degrees;
pub mod edge;
pub mod node;

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::paygraph::config::GraphConfig;
use crate::paygraph::error::GraphError;

use self::bucket::TimeBucket;
use self::degrees::DegreeMultiset;
use self::edge::Edge;
use self::node::Node;

/// Result of feeding one transaction into the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransactionOutcome {
    /// The transaction was applied; carries the current median.
    Median(f64),
    /// The timestamp fell below the retention floor; state is untouched.
    /// Late arrivals below the floor are tolerated, not errors.
    IgnoredStale,
}

/// Undirected graph of payment edges restricted to a trailing time window.
#[derive(Debug)]
pub struct TransactionGraph {
    config: GraphConfig,
    /// Inclusive lower bound of the window.
    low_marker: i64,
    /// Inclusive upper bound of the window.
    high_marker: i64,
    /// Live edges keyed by canonical pair name.
    edges: BTreeMap<String, Edge>,
    /// Edge membership grouped by current timestamp.
    buckets: BTreeMap<i64, TimeBucket>,
    /// Parties with at least one live edge.
    nodes: BTreeMap<String, Node>,
    degrees: DegreeMultiset,
    /// Cached median; 0.0 by convention before any processing.
    median: f64,
}

impl TransactionGraph {
    pub fn new(config: GraphConfig) -> Self {
        TransactionGraph {
            low_marker: 1,
            high_marker: config.window_size,
            config,
            edges: BTreeMap::new(),
            buckets: BTreeMap::new(),
            nodes: BTreeMap::new(),
            degrees: DegreeMultiset::new(),
            median: 0.0,
        }
    }

    pub fn with_default_window() -> Self {
        Self::new(GraphConfig::default())
    }

    /// Current cached median of all positive node degrees.
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Inclusive `(low, high)` window bounds.
    pub fn window(&self) -> (i64, i64) {
        (self.low_marker, self.high_marker)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Degree of `party`, if it currently has any live edge.
    pub fn degree_of(&self, party: &str) -> Option<i64> {
        self.nodes.get(party).map(|node| node.degree)
    }

    /// Parties currently in the graph, in name order.
    pub fn parties(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Applies one transaction and reports the resulting median.
    ///
    /// Rejects empty parties and self-loops with
    /// [`GraphError::InvalidInput`] before touching any index. Timestamps
    /// below the retention floor are a silent no-op reported as
    /// [`TransactionOutcome::IgnoredStale`]. A repeat transaction between a
    /// pair whose edge is still live only refreshes the edge's timestamp;
    /// the degree multiset is unchanged, so the cached median is returned
    /// without recomputation.
    pub fn process_transaction(
        &mut self,
        timestamp: i64,
        party_a: &str,
        party_b: &str,
    ) -> Result<TransactionOutcome, GraphError> {
        Self::validate(party_a, party_b)?;

        if timestamp < self.low_marker {
            trace!(
                "ignoring stale transaction at {} below floor {}",
                timestamp,
                self.low_marker
            );
            return Ok(TransactionOutcome::IgnoredStale);
        }

        if timestamp <= self.high_marker {
            let name = Edge::canonical_name(party_a, party_b);
            if self.edges.contains_key(&name) {
                self.refresh_edge(&name, timestamp);
                // Degree multiset unchanged; skipping the recompute is purely
                // a cost optimization.
                return Ok(TransactionOutcome::Median(self.median));
            }
            self.insert_edge(timestamp, party_a, party_b);
            self.median = self.degrees.median()?;
            return Ok(TransactionOutcome::Median(self.median));
        }

        // The transaction is newer than the window: advance the markers,
        // evict everything below the new floor, then apply the edge. Evicting
        // first means a pair whose edge just fell out of the window is
        // treated as brand new.
        debug!(
            "advancing window from [{}, {}] to [{}, {}]",
            self.low_marker,
            self.high_marker,
            timestamp - self.config.window_size + 1,
            timestamp
        );
        self.high_marker = timestamp;
        self.low_marker = timestamp - self.config.window_size + 1;
        self.evict_below_floor();

        let name = Edge::canonical_name(party_a, party_b);
        if self.edges.contains_key(&name) {
            self.refresh_edge(&name, timestamp);
        } else {
            self.insert_edge(timestamp, party_a, party_b);
        }

        // Eviction alone can change which degrees are counted, so this path
        // always recomputes.
        self.median = self.degrees.median()?;
        Ok(TransactionOutcome::Median(self.median))
    }

    fn validate(party_a: &str, party_b: &str) -> Result<(), GraphError> {
        if party_a.is_empty() || party_b.is_empty() {
            return Err(GraphError::invalid_input("party identifier is empty"));
        }
        if party_a == party_b {
            return Err(GraphError::invalid_input(format!(
                "self-loop rejected for '{}'",
                party_a
            )));
        }
        Ok(())
    }

    /// Inserts a brand-new edge and bumps both endpoint degrees.
    fn insert_edge(&mut self, timestamp: i64, party_a: &str, party_b: &str) {
        let edge = Edge::new(timestamp, party_a, party_b);
        trace!("inserting edge '{}' at {}", edge.name, timestamp);
        self.buckets
            .entry(timestamp)
            .or_insert_with(|| TimeBucket::new(timestamp))
            .edges
            .insert(edge.name.clone());
        self.bump_degree(&edge.source);
        self.bump_degree(&edge.target);
        self.edges.insert(edge.name.clone(), edge);
    }

    /// Moves an existing edge to the bucket for `timestamp`.
    ///
    /// An older or equal timestamp never moves an edge backward; out-of-order
    /// repeats within the window are ignored here.
    fn refresh_edge(&mut self, name: &str, timestamp: i64) {
        let Some(edge) = self.edges.get_mut(name) else {
            return;
        };
        if timestamp <= edge.timestamp {
            trace!(
                "keeping edge '{}' at {}; refresh to {} is not newer",
                name,
                edge.timestamp,
                timestamp
            );
            return;
        }
        let old_timestamp = edge.timestamp;
        edge.timestamp = timestamp;

        let mut drop_bucket = false;
        if let Some(old_bucket) = self.buckets.get_mut(&old_timestamp) {
            old_bucket.edges.remove(name);
            drop_bucket = old_bucket.is_empty();
        }
        if drop_bucket {
            self.buckets.remove(&old_timestamp);
        }
        self.buckets
            .entry(timestamp)
            .or_insert_with(|| TimeBucket::new(timestamp))
            .edges
            .insert(name.to_string());
    }

    /// Removes every bucket strictly below the retention floor, unwinding the
    /// degree contribution of each evicted edge. No qualifying buckets is a
    /// no-op.
    fn evict_below_floor(&mut self) {
        let retained = self.buckets.split_off(&self.low_marker);
        let evicted = std::mem::replace(&mut self.buckets, retained);
        if evicted.is_empty() {
            return;
        }
        debug!(
            "evicting {} bucket(s) below floor {}",
            evicted.len(),
            self.low_marker
        );
        for (_, bucket) in evicted {
            for name in bucket.edges {
                if let Some(edge) = self.edges.remove(&name) {
                    trace!("evicting edge '{}' at {}", edge.name, edge.timestamp);
                    self.drop_degree(&edge.source);
                    self.drop_degree(&edge.target);
                }
            }
        }
    }

    fn bump_degree(&mut self, party: &str) {
        let node = self
            .nodes
            .entry(party.to_string())
            .or_insert_with(|| Node::new(party));
        node.degree += 1;
        let degree = node.degree;
        self.degrees.shift(degree - 1, degree);
    }

    fn drop_degree(&mut self, party: &str) {
        if let Some(node) = self.nodes.get_mut(party) {
            node.degree -= 1;
            let degree = node.degree;
            self.degrees.shift(degree + 1, degree);
            if degree == 0 {
                self.nodes.remove(party);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> TransactionGraph {
        TransactionGraph::with_default_window()
    }

    fn median_of(outcome: TransactionOutcome) -> f64 {
        match outcome {
            TransactionOutcome::Median(m) => m,
            TransactionOutcome::IgnoredStale => panic!("expected a median outcome"),
        }
    }

    #[test]
    fn first_edge_yields_median_one() {
        let mut g = graph();
        let outcome = g.process_transaction(1, "a", "b").unwrap();
        assert_eq!(median_of(outcome), 1.0);
        assert_eq!(g.degree_of("a"), Some(1));
        assert_eq!(g.degree_of("b"), Some(1));
    }

    #[test]
    fn reversed_pair_resolves_to_one_edge() {
        let mut g = graph();
        g.process_transaction(1, "bob", "alice").unwrap();
        g.process_transaction(2, "alice", "bob").unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree_of("alice"), Some(1));
        assert_eq!(g.degree_of("bob"), Some(1));
    }

    #[test]
    fn repeat_transaction_refreshes_without_degree_change() {
        let mut g = graph();
        g.process_transaction(5, "a", "b").unwrap();
        let before = g.median();
        let outcome = g.process_transaction(9, "a", "b").unwrap();
        assert_eq!(median_of(outcome), before);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree_of("a"), Some(1));
    }

    #[test]
    fn older_repeat_never_moves_an_edge_backward() {
        let mut g = graph();
        g.process_transaction(9, "a", "b").unwrap();
        g.process_transaction(5, "a", "b").unwrap();
        // The edge stays in the bucket for 9: advancing past 9 + window must
        // still evict it exactly once.
        assert_eq!(g.edge_count(), 1);
        let outcome = g.process_transaction(69, "c", "d").unwrap();
        assert_eq!(median_of(outcome), 1.0);
        assert_eq!(g.degree_of("a"), None);
        assert_eq!(g.degree_of("b"), None);
    }

    #[test]
    fn self_loop_is_rejected_without_mutation() {
        let mut g = graph();
        g.process_transaction(1, "a", "b").unwrap();
        let err = g.process_transaction(2, "alice", "alice").unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput { .. }));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.median(), 1.0);
    }

    #[test]
    fn empty_party_is_rejected() {
        let mut g = graph();
        let err = g.process_transaction(1, "", "b").unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput { .. }));
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn stale_transaction_is_a_silent_no_op() {
        let mut g = graph();
        g.process_transaction(100, "a", "b").unwrap();
        // Window is now [41, 100].
        let outcome = g.process_transaction(40, "x", "y").unwrap();
        assert_eq!(outcome, TransactionOutcome::IgnoredStale);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.median(), 1.0);
    }

    #[test]
    fn window_advance_evicts_exactly_the_expired_prefix() {
        let mut g = graph();
        for t in 1..=60 {
            let a = format!("p{}", t);
            let b = format!("q{}", t);
            g.process_transaction(t, &a, &b).unwrap();
        }
        assert_eq!(g.edge_count(), 60);
        g.process_transaction(61, "d", "e").unwrap();
        // Only the bucket at timestamp 1 falls below the new floor of 2.
        assert_eq!(g.window(), (2, 61));
        assert_eq!(g.edge_count(), 60);
        assert_eq!(g.degree_of("p1"), None);
        assert_eq!(g.degree_of("q1"), None);
        assert_eq!(g.degree_of("p2"), Some(1));
    }

    #[test]
    fn spec_example_end_to_end() {
        let mut g = graph();
        assert_eq!(
            median_of(g.process_transaction(1, "a", "b").unwrap()),
            1.0
        );
        assert_eq!(
            median_of(g.process_transaction(1, "a", "c").unwrap()),
            1.0
        );
        assert_eq!(g.degree_of("a"), Some(2));
        assert_eq!(g.degree_of("b"), Some(1));
        assert_eq!(g.degree_of("c"), Some(1));

        assert_eq!(
            median_of(g.process_transaction(61, "d", "e").unwrap()),
            1.0
        );
        assert_eq!(g.window(), (2, 61));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.degree_of("d"), Some(1));
        assert_eq!(g.degree_of("e"), Some(1));
        assert_eq!(g.degree_of("a"), None);
    }

    #[test]
    fn even_degree_multiset_takes_the_mean() {
        let mut g = graph();
        g.process_transaction(1, "a", "b").unwrap();
        g.process_transaction(2, "c", "d").unwrap();
        let outcome = g.process_transaction(3, "a", "c").unwrap();
        // Degrees: a=2, b=1, c=2, d=1.
        assert_eq!(median_of(outcome), 1.5);
    }

    #[test]
    fn refreshed_edge_survives_a_window_advance() {
        let mut g = graph();
        g.process_transaction(1, "a", "b").unwrap();
        g.process_transaction(30, "a", "b").unwrap();
        // Edge now lives in bucket 30, so advancing to 61 keeps it.
        let outcome = g.process_transaction(61, "c", "d").unwrap();
        assert_eq!(g.window(), (2, 61));
        assert_eq!(g.degree_of("a"), Some(1));
        assert_eq!(median_of(outcome), 1.0);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn evicted_pair_reappears_as_a_new_edge() {
        let mut g = graph();
        g.process_transaction(1, "a", "b").unwrap();
        // Same pair far past the window: evict first, then insert fresh.
        let outcome = g.process_transaction(120, "a", "b").unwrap();
        assert_eq!(median_of(outcome), 1.0);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree_of("a"), Some(1));
        assert_eq!(g.window(), (61, 120));
    }

    #[test]
    fn node_index_matches_in_window_parties_for_monotone_streams() {
        let mut g = graph();
        let stream = [
            (10, "a", "b"),
            (20, "b", "c"),
            (75, "c", "d"),
            (90, "e", "f"),
        ];
        for (t, a, b) in stream {
            g.process_transaction(t, a, b).unwrap();
        }
        // Window is [31, 90]; only the edges at 75 and 90 remain.
        let parties: Vec<&str> = g.parties().collect();
        assert_eq!(parties, vec!["c", "d", "e", "f"]);
    }
}

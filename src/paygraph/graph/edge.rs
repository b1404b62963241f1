//! Undirected edges keyed by their canonical endpoint pair.

/// A single undirected edge in the transaction graph.
///
/// The pair is canonicalized on construction: the lexicographically smaller
/// party becomes `source` and the larger `target`, so `(a, b)` and `(b, a)`
/// always resolve to the same edge. `name` is the stable `source:target` key
/// used by the edge index, and `timestamp` is the most recent transaction
/// that touched this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub name: String,
    pub source: String,
    pub target: String,
    pub timestamp: i64,
}

impl Edge {
    pub fn new(timestamp: i64, party_a: &str, party_b: &str) -> Self {
        let (source, target) = if party_a < party_b {
            (party_a, party_b)
        } else {
            (party_b, party_a)
        };
        Edge {
            name: format!("{}:{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            timestamp,
        }
    }

    /// Deterministic key for an unordered pair: `min(a,b) + ":" + max(a,b)`.
    pub fn canonical_name(party_a: &str, party_b: &str) -> String {
        if party_a < party_b {
            format!("{}:{}", party_a, party_b)
        } else {
            format!("{}:{}", party_b, party_a)
        }
    }
}

//! Graph nodes and their degree lifecycle.

/// A party in the transaction graph.
///
/// A node lives in the node index only while its degree is strictly
/// positive; the graph removes it in the same mutation that drops the
/// degree to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub degree: i64,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            degree: 0,
        }
    }
}

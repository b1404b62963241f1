//! Incremental maintenance of the positive-degree multiset and its median.

use std::collections::BTreeMap;

use crate::paygraph::error::GraphError;

/// Multiset of strictly-positive node degrees.
///
/// Every mutation that changes a node's degree updates this multiset in the
/// same call — there is no deferred reconciliation — so the median is always
/// computable without rescanning the node index. Degree-zero nodes are never
/// members: disconnected parties must not dilute the median.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeMultiset {
    counts: BTreeMap<i64, usize>,
    len: usize,
}

impl DegreeMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Replaces one occurrence of `old` with `new`.
    ///
    /// Either side may be zero or negative to express a pure insertion
    /// (`old <= 0`) or a pure removal (`new <= 0`); non-positive degrees are
    /// never stored.
    pub fn shift(&mut self, old: i64, new: i64) {
        if old > 0 {
            self.remove(old);
        }
        if new > 0 {
            self.add(new);
        }
    }

    fn add(&mut self, degree: i64) {
        *self.counts.entry(degree).or_insert(0) += 1;
        self.len += 1;
    }

    fn remove(&mut self, degree: i64) {
        if let Some(count) = self.counts.get_mut(&degree) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&degree);
            }
            self.len -= 1;
        }
    }

    /// Median of the multiset: the middle element for odd sizes, the mean of
    /// the two middle elements for even sizes.
    pub fn median(&self) -> Result<f64, GraphError> {
        if self.len == 0 {
            return Err(GraphError::EmptyDegreeSet);
        }
        let upper = self.len / 2;
        if self.len % 2 == 1 {
            Ok(self.nth(upper) as f64)
        } else {
            Ok((self.nth(upper - 1) + self.nth(upper)) as f64 / 2.0)
        }
    }

    fn nth(&self, mut rank: usize) -> i64 {
        for (&degree, &count) in &self.counts {
            if rank < count {
                return degree;
            }
            rank -= count;
        }
        // `len` tracks the counts exactly, so every rank below `len` lands
        // in the loop above.
        unreachable!("rank {} out of bounds for multiset of length {}", rank, self.len)
    }
}

//! Search statistics

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one search direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionStats {
    /// Nodes whose neighbors were examined
    pub expanded: usize,
    /// Nodes marked visited without expansion because they could not beat the best path
    pub pruned: usize,
    /// Better paths installed into this direction's path map
    pub improved: usize,
    /// Complete paths this direction installed into the shared register
    pub published: usize,
}

/// Statistics for a whole search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub forward: DirectionStats,
    pub backward: DirectionStats,
    /// Size of the shared visited set when the search ended
    pub visited: usize,
    /// Whether the coordinator waited for the forward task
    pub forward_joined: bool,
}

impl SearchStats {
    pub fn expanded(&self) -> usize {
        self.forward.expanded + self.backward.expanded
    }
}

/// Counters shared between a worker and the coordinator
#[derive(Debug, Default)]
pub(crate) struct DirectionCounters {
    expanded: AtomicUsize,
    pruned: AtomicUsize,
    improved: AtomicUsize,
    published: AtomicUsize,
}

impl DirectionCounters {
    pub(crate) fn expanded(&self) {
        self.expanded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn pruned(&self) {
        self.pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn improved(&self) {
        self.improved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> DirectionStats {
        DirectionStats {
            expanded: self.expanded.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            improved: self.improved.load(Ordering::Relaxed),
            published: self.published.load(Ordering::Relaxed),
        }
    }
}

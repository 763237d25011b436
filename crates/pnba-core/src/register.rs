//! Lock-free register holding the cheapest complete path found so far

use crate::graph::Distance;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Snapshot of the register: where the two directions met and at what cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion<N> {
    meeting: Option<N>,
    distance: Distance,
}

impl<N> Completion<N> {
    /// No complete path yet; compares as infinitely long
    pub fn unreached() -> Self {
        Self {
            meeting: None,
            distance: Distance::MAX,
        }
    }

    pub fn reached(meeting: N, distance: Distance) -> Self {
        Self {
            meeting: Some(meeting),
            distance,
        }
    }

    /// Node reached by both directions, if any
    pub fn meeting(&self) -> Option<&N> {
        self.meeting.as_ref()
    }

    /// Total distance of the complete path, if any
    pub fn distance(&self) -> Option<Distance> {
        self.meeting.as_ref().map(|_| self.distance)
    }

    pub fn is_reached(&self) -> bool {
        self.meeting.is_some()
    }

    /// Whether a path of `distance` would be strictly better than this one
    pub fn improved_by(&self, distance: Distance) -> bool {
        self.meeting.is_none() || distance < self.distance
    }
}

/// Shared best-completion register
///
/// Updated only through [`BestCompletion::offer`], which retries a
/// compare-and-swap until it either installs a strictly shorter completion
/// or observes one at least as short. The stored distance never increases.
pub struct BestCompletion<N> {
    current: ArcSwap<Completion<N>>,
}

impl<N: Clone> BestCompletion<N> {
    pub fn new() -> Self {
        Self::starting_at(Completion::unreached())
    }

    /// Register pre-loaded with a known completion
    pub fn starting_at(completion: Completion<N>) -> Self {
        Self {
            current: ArcSwap::from_pointee(completion),
        }
    }

    /// Current completion
    pub fn load(&self) -> Arc<Completion<N>> {
        self.current.load_full()
    }

    pub fn is_reached(&self) -> bool {
        self.current.load().is_reached()
    }

    /// Test whether a path whose best possible length is `bound` could still win
    pub fn admits(&self, bound: Distance) -> bool {
        self.current.load().improved_by(bound)
    }

    /// Offer a complete path through `meeting`; returns true if it was installed
    pub fn offer(&self, meeting: &N, distance: Distance) -> bool {
        let mut current = self.current.load();
        loop {
            if !current.improved_by(distance) {
                return false;
            }
            let next = Arc::new(Completion::reached(meeting.clone(), distance));
            let previous = self.current.compare_and_swap(&*current, next);
            if Arc::ptr_eq(&*previous, &*current) {
                return true;
            }
            current = previous;
        }
    }
}

impl<N: Clone> Default for BestCompletion<N> {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-direction best-first expansion
//!
//! Each direction owns a path map and a frontier ordered by distance
//! travelled (g), not by g + h. The heuristic only gates expansion: a node is
//! expanded while no complete path is known, or while g + h is still below the
//! best complete distance in the shared register.

use crate::error::{Error, Result};
use crate::graph::{checked_sum, Distance, Graph};
use crate::path::Path;
use crate::register::BestCompletion;
use crate::stats::DirectionCounters;
use dashmap::{DashMap, DashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;

/// Best known path to each node for one direction; written by a single worker
pub type PathMap<N> = DashMap<N, Path<N>>;

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the start towards the end
    Forward,
    /// From the end towards the start
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

/// State shared by both directions of one search
pub struct SharedState<N> {
    pub(crate) finished: AtomicBool,
    pub(crate) visited: DashSet<N>,
    pub(crate) best: BestCompletion<N>,
}

impl<N: Clone + Eq + Hash> SharedState<N> {
    pub fn new() -> Self {
        Self {
            finished: AtomicBool::new(false),
            visited: DashSet::new(),
            best: BestCompletion::new(),
        }
    }

    /// True once either direction has exhausted its frontier
    pub fn is_finished(&self) -> bool {
        self.finished.load(atomic::Ordering::SeqCst)
    }

    pub(crate) fn finish(&self) {
        self.finished.store(true, atomic::Ordering::SeqCst);
    }

    pub fn best(&self) -> &BestCompletion<N> {
        &self.best
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl<N: Clone + Eq + Hash> Default for SharedState<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Frontier entry; ordered so that `BinaryHeap` pops the smallest g first
struct Entry<N> {
    distance: Distance,
    order: u64,
    node: N,
}

impl<N> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.order == other.order
    }
}

impl<N> Eq for Entry<N> {}

impl<N> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap, ties in insertion order
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl<N> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Nodes waiting to be processed, lowest distance travelled first
///
/// A node whose path improves is pushed again under its new distance; the
/// entry left behind no longer matches the path map and is skipped on pop.
struct Frontier<N> {
    heap: BinaryHeap<Entry<N>>,
    pushed: u64,
}

impl<N: Eq + Hash> Frontier<N> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }

    fn push(&mut self, node: N, distance: Distance) {
        self.heap.push(Entry {
            distance,
            order: self.pushed,
            node,
        });
        self.pushed += 1;
    }

    fn pop(&mut self, paths: &PathMap<N>) -> Option<N> {
        while let Some(entry) = self.heap.pop() {
            let current = paths.get(&entry.node).map(|path| path.distance_travelled());
            if current == Some(entry.distance) {
                return Some(entry.node);
            }
        }
        None
    }
}

/// Frontier worker for one direction
pub struct Search<G: Graph> {
    direction: Direction,
    origin: G::Node,
    target: G::Node,
    graph: Arc<G>,
    shared: Arc<SharedState<G::Node>>,
    paths: Arc<PathMap<G::Node>>,
    peer_paths: Arc<PathMap<G::Node>>,
    frontier: Frontier<G::Node>,
    counters: Arc<DirectionCounters>,
}

impl<G: Graph> Search<G> {
    /// Create a worker searching from `origin` towards `target`
    ///
    /// `paths` must already hold the origin path; `peer_paths` belongs to the
    /// opposite direction and is only read.
    pub fn new(
        direction: Direction,
        origin: G::Node,
        target: G::Node,
        graph: Arc<G>,
        shared: Arc<SharedState<G::Node>>,
        paths: Arc<PathMap<G::Node>>,
        peer_paths: Arc<PathMap<G::Node>>,
    ) -> Self {
        Self {
            direction,
            origin,
            target,
            graph,
            shared,
            paths,
            peer_paths,
            frontier: Frontier::new(),
            counters: Arc::new(DirectionCounters::default()),
        }
    }

    pub(crate) fn counters(&self) -> Arc<DirectionCounters> {
        Arc::clone(&self.counters)
    }

    /// Run until either direction exhausts its frontier
    ///
    /// An error aborts both directions.
    pub fn run(&mut self) -> Result<()> {
        let result = self.run_until_finished();
        if let Err(err) = &result {
            tracing::debug!("{} search aborted: {}", self.direction, err);
            self.shared.finish();
        }
        result
    }

    fn run_until_finished(&mut self) -> Result<()> {
        let mut x = self.origin.clone();
        while !self.shared.is_finished() {
            if !self.shared.is_visited(&x) {
                self.visit(&x)?;
            }
            match self.frontier.pop(&self.paths) {
                Some(next) => x = next,
                None => {
                    tracing::trace!("{} frontier exhausted", self.direction);
                    self.shared.finish();
                }
            }
        }
        Ok(())
    }

    fn visit(&mut self, x: &G::Node) -> Result<()> {
        let x_path = self
            .paths
            .get(x)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::invalid(format!("no {} path recorded for {:?}", self.direction, x)))?;

        if self.should_expand(&x_path)? {
            self.counters.expanded();
            for y in self.graph.neighbors(x)? {
                if !self.shared.is_visited(&y) {
                    self.relax(&x_path, y)?;
                }
            }
        } else {
            self.counters.pruned();
            tracing::trace!("{} pruned {:?}", self.direction, x);
        }

        self.shared.visited.insert(x.clone());
        Ok(())
    }

    fn should_expand(&self, x_path: &Path<G::Node>) -> Result<bool> {
        let best = self.shared.best.load();
        if !best.is_reached() {
            return Ok(true);
        }
        let bound = checked_sum(
            x_path.distance_travelled(),
            x_path.estimated_distance_to_goal(),
        )?;
        Ok(best.improved_by(bound))
    }

    fn relax(&mut self, x_path: &Path<G::Node>, y: G::Node) -> Result<()> {
        let step = self.graph.known_distance(x_path.value(), &y)?;
        let distance = checked_sum(x_path.distance_travelled(), step)?;

        let old = self.paths.get(&y).map(|entry| entry.value().clone());
        let better = match old {
            Some(old) if distance >= old.distance_travelled() => return Ok(()),
            Some(old) => x_path.prepend(
                y.clone(),
                old.estimated_distance_to_goal(),
                distance,
                old.estimate_of_actual_travel(),
            ),
            None => x_path.prepend(
                y.clone(),
                self.graph.estimated_distance(&y, &self.target)?,
                distance,
                self.graph.estimated_distance(&self.origin, &y)?,
            ),
        };

        self.paths.insert(y.clone(), better.clone());
        self.frontier.push(y, distance);
        self.counters.improved();

        // The install above and the peer lookup below must not be reordered,
        // or both directions could miss the same meeting node.
        atomic::fence(atomic::Ordering::SeqCst);
        self.publish(&better)
    }

    fn publish(&self, path: &Path<G::Node>) -> Result<()> {
        let meeting = path.value();
        let Some(connecting) = self.peer_paths.get(meeting).map(|entry| entry.value().clone()) else {
            return Ok(());
        };

        let total = checked_sum(path.distance_travelled(), connecting.distance_travelled())?;
        if self.shared.best.offer(meeting, total) {
            self.counters.published();
            tracing::trace!(
                "{} search improved complete path: meeting={:?}, distance={}",
                self.direction,
                meeting,
                total
            );
        }
        Ok(())
    }
}

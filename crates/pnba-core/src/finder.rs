//! Shortest path coordinator
//!
//! Seeds both path maps, runs the forward direction through a [`TaskRunner`]
//! and the backward direction on the calling thread, then stitches the two
//! halves together at the meeting node recorded in the shared register.

use crate::error::{Error, Result};
use crate::frontier::{Direction, PathMap, Search, SharedState};
use crate::graph::{checked_sum, Distance, Graph};
use crate::path::Path;
use crate::runner::{TaskHandle, TaskOutcome, TaskRunner, ThreadRunner};
use crate::stats::SearchStats;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a search with its cost and statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome<N> {
    /// Nodes from start to end inclusive; empty when unreachable
    pub path: Vec<N>,

    /// Sum of known distances along `path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Distance>,

    pub stats: SearchStats,
}

impl<N> SearchOutcome<N> {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    fn unreachable(stats: SearchStats) -> Self {
        Self {
            path: Vec::new(),
            distance: None,
            stats,
        }
    }
}

/// Finds shortest paths by searching from both ends in parallel
///
/// Edges are undirected with the same non-negative cost both ways. The graph
/// may be changed between searches, but not during one.
pub struct ShortestPathFinder<G: Graph> {
    graph: Arc<G>,
    runner: Arc<dyn TaskRunner>,
}

impl<G: Graph> ShortestPathFinder<G> {
    /// Finder running the forward direction on a dedicated thread
    pub fn new(graph: G) -> Self {
        Self::from_shared(Arc::new(graph))
    }

    pub fn from_shared(graph: Arc<G>) -> Self {
        Self {
            graph,
            runner: Arc::new(ThreadRunner::new()),
        }
    }

    /// Run the forward direction with a different runner
    pub fn with_runner(mut self, runner: Arc<dyn TaskRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Shortest path from `start` to `end` inclusive, or empty if none exists
    pub fn search(&self, start: &G::Node, end: &G::Node) -> Result<Vec<G::Node>> {
        self.search_with_stats(start, end).map(|outcome| outcome.path)
    }

    /// Like [`search`](Self::search), also reporting distance and statistics
    pub fn search_with_stats(
        &self,
        start: &G::Node,
        end: &G::Node,
    ) -> Result<SearchOutcome<G::Node>> {
        self.graph.validate_node(start)?;
        self.graph.validate_node(end)?;

        let estimate = self.graph.estimated_distance(start, end)?;
        if estimate == 0 {
            tracing::debug!("Start and end are the same node: {:?}", start);
            return Ok(SearchOutcome {
                path: vec![start.clone()],
                distance: Some(0),
                stats: SearchStats::default(),
            });
        }

        tracing::debug!(
            "Starting bidirectional search: start={:?}, end={:?}, estimate={}",
            start,
            end,
            estimate
        );

        let shared = Arc::new(SharedState::new());
        let forward_paths = Arc::new(PathMap::new());
        let backward_paths = Arc::new(PathMap::new());
        forward_paths.insert(start.clone(), Path::origin(start.clone(), estimate));
        backward_paths.insert(end.clone(), Path::origin(end.clone(), estimate));

        let mut forward = Search::new(
            Direction::Forward,
            start.clone(),
            end.clone(),
            Arc::clone(&self.graph),
            Arc::clone(&shared),
            Arc::clone(&forward_paths),
            Arc::clone(&backward_paths),
        );
        let forward_counters = forward.counters();
        let handle = self.runner.spawn(Box::new(move || forward.run()))?;

        let mut backward = Search::new(
            Direction::Backward,
            end.clone(),
            start.clone(),
            Arc::clone(&self.graph),
            Arc::clone(&shared),
            Arc::clone(&backward_paths),
            Arc::clone(&forward_paths),
        );
        let backward_counters = backward.counters();
        if let Err(err) = backward.run() {
            handle.cancel();
            return Err(err);
        }

        let mut stats = SearchStats {
            backward: backward_counters.snapshot(),
            ..SearchStats::default()
        };

        let completion = shared.best().load();
        let Some(meeting) = completion.meeting().cloned() else {
            // The forward direction may have stopped both searches by failing.
            handle.cancel();
            Self::join(handle)?;
            stats.forward = forward_counters.snapshot();
            stats.visited = shared.visited_count();
            stats.forward_joined = true;
            tracing::debug!("No path between {:?} and {:?}", start, end);
            return Ok(SearchOutcome::unreachable(stats));
        };

        let backward_path = Self::path_to(&backward_paths, &meeting, Direction::Backward)?;
        let mut path = Vec::new();
        if meeting == *start {
            // The backward direction alone reached the start.
            handle.cancel();
            backward_path.collect_into(&mut path);
        } else {
            Self::join(handle)?;
            stats.forward_joined = true;

            let forward_path = Self::path_to(&forward_paths, &meeting, Direction::Forward)?;
            if let Some(previous) = forward_path.previous() {
                previous.collect_into(&mut path);
            }
            path.reverse();
            backward_path.collect_into(&mut path);
        }

        stats.forward = forward_counters.snapshot();
        stats.visited = shared.visited_count();

        let distance = self.path_distance(&path)?;
        tracing::debug!(
            "Found path: nodes={}, distance={}, meeting={:?}, expanded={}",
            path.len(),
            distance,
            meeting,
            stats.expanded()
        );

        Ok(SearchOutcome {
            path,
            distance: Some(distance),
            stats,
        })
    }

    fn join(handle: Box<dyn TaskHandle>) -> Result<()> {
        match handle.join() {
            Ok(TaskOutcome::Completed) => Ok(()),
            Ok(TaskOutcome::Cancelled) => {
                tracing::warn!("Forward search was cancelled before it ran");
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Forward search failed: {}", err);
                Err(err)
            }
        }
    }

    fn path_to(
        paths: &PathMap<G::Node>,
        node: &G::Node,
        direction: Direction,
    ) -> Result<Path<G::Node>> {
        paths
            .get(node)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                Error::TaskFailed(format!(
                    "{} search recorded no path to meeting node {:?}",
                    direction, node
                ))
            })
    }

    fn path_distance(&self, path: &[G::Node]) -> Result<Distance> {
        path.windows(2).try_fold(0, |total, pair| {
            checked_sum(total, self.graph.known_distance(&pair[0], &pair[1])?)
        })
    }
}

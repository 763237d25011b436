//! PNBA Core - Parallel bidirectional heuristic shortest path search
//!
//! Two workers search from opposite ends of a weighted undirected graph, one
//! on the calling thread and one through a [`TaskRunner`]. They share a set of
//! visited nodes and a lock-free register holding the shortest complete path
//! found so far, which each uses to prune nodes that can no longer improve it.
//!
//! ```
//! use pnba_core::{FnGraph, ShortestPathFinder};
//!
//! let finder = ShortestPathFinder::new(FnGraph::new(
//!     |a: &u32, b: &u32| a.abs_diff(*b),
//!     |a: &u32, b: &u32| a.abs_diff(*b),
//!     |n: &u32| vec![n.saturating_sub(1), n + 1],
//! ));
//! let path = finder.search(&0, &5)?;
//! assert_eq!(path, vec![0, 1, 2, 3, 4, 5]);
//! # Ok::<(), pnba_core::Error>(())
//! ```

pub mod error;
pub mod finder;
pub mod frontier;
pub mod graph;
pub mod limits;
pub mod network;
pub mod path;
pub mod register;
pub mod runner;
pub mod stats;

pub use error::{Error, Result};
pub use finder::{SearchOutcome, ShortestPathFinder};
pub use frontier::{Direction, PathMap, Search, SharedState};
pub use graph::{Distance, FnGraph, Graph};
pub use network::{EdgeSpec, HeuristicKind, Network, NetworkSpec, NodeSpec};
pub use path::Path;
pub use register::{BestCompletion, Completion};
pub use runner::{Task, TaskHandle, TaskOutcome, TaskRunner, ThreadRunner, TokioRunner};
pub use stats::{DirectionStats, SearchStats};

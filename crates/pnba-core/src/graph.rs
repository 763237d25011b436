//! Graph capability trait and closure adapter

use crate::error::{Error, Result};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Distance between nodes (edge costs, g-costs and heuristic estimates)
pub type Distance = u32;

/// Add two distances, failing instead of wrapping
pub fn checked_sum(left: Distance, right: Distance) -> Result<Distance> {
    left.checked_add(right).ok_or(Error::Overflow { left, right })
}

/// Implicit, undirected, non-negatively weighted graph
///
/// The search engine discovers nothing on its own: adjacency, edge cost and
/// heuristic cost all come from this trait. Implementations are called from
/// two threads at once and must answer consistently for the duration of a
/// search.
pub trait Graph: Send + Sync + 'static {
    /// Node identity; equality and hashing must agree with every method below
    type Node: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// All nodes adjacent to `node`
    fn neighbors(&self, node: &Self::Node) -> Result<Vec<Self::Node>>;

    /// Exact cost of the edge between two adjacent nodes, zero iff they are equal
    fn known_distance(&self, from: &Self::Node, to: &Self::Node) -> Result<Distance>;

    /// Estimated cost between any two nodes, zero iff they are equal
    fn estimated_distance(&self, from: &Self::Node, to: &Self::Node) -> Result<Distance>;

    /// Reject nodes that do not belong to the graph
    fn validate_node(&self, _node: &Self::Node) -> Result<()> {
        Ok(())
    }
}

/// [`Graph`] built from three plain functions
pub struct FnGraph<N, K, E, A> {
    known: K,
    estimated: E,
    adjacent: A,
    _node: PhantomData<fn() -> N>,
}

impl<N, K, E, A> FnGraph<N, K, E, A>
where
    K: Fn(&N, &N) -> Distance,
    E: Fn(&N, &N) -> Distance,
    A: Fn(&N) -> Vec<N>,
{
    /// Create a graph from known edge cost, estimated cost and adjacency functions
    pub fn new(known: K, estimated: E, adjacent: A) -> Self {
        Self {
            known,
            estimated,
            adjacent,
            _node: PhantomData,
        }
    }
}

impl<N, K, E, A> Graph for FnGraph<N, K, E, A>
where
    N: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static,
    K: Fn(&N, &N) -> Distance + Send + Sync + 'static,
    E: Fn(&N, &N) -> Distance + Send + Sync + 'static,
    A: Fn(&N) -> Vec<N> + Send + Sync + 'static,
{
    type Node = N;

    fn neighbors(&self, node: &N) -> Result<Vec<N>> {
        Ok((self.adjacent)(node))
    }

    fn known_distance(&self, from: &N, to: &N) -> Result<Distance> {
        Ok((self.known)(from, to))
    }

    fn estimated_distance(&self, from: &N, to: &N) -> Result<Distance> {
        Ok((self.estimated)(from, to))
    }
}

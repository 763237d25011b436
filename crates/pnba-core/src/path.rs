//! Immutable, structurally shared path chains

use crate::graph::Distance;
use std::fmt;
use std::sync::Arc;

/// A partial path from a search origin to `value`
///
/// Cloning is cheap: every link is reference counted, so paths extended from
/// a common prefix share it instead of copying it.
pub struct Path<N> {
    link: Arc<Link<N>>,
}

struct Link<N> {
    value: N,
    previous: Option<Path<N>>,
    distance_travelled: Distance,
    estimated_distance_to_goal: Distance,
    estimate_of_actual_travel: Distance,
}

impl<N> Path<N> {
    /// Origin of a search direction
    pub fn origin(value: N, estimated_distance_to_goal: Distance) -> Self {
        Self {
            link: Arc::new(Link {
                value,
                previous: None,
                distance_travelled: 0,
                estimated_distance_to_goal,
                estimate_of_actual_travel: 0,
            }),
        }
    }

    /// Extend this path by one node, leaving `self` untouched
    pub fn prepend(
        &self,
        value: N,
        estimated_distance_to_goal: Distance,
        distance_travelled: Distance,
        estimate_of_actual_travel: Distance,
    ) -> Self {
        Self {
            link: Arc::new(Link {
                value,
                previous: Some(self.clone()),
                distance_travelled,
                estimated_distance_to_goal,
                estimate_of_actual_travel,
            }),
        }
    }

    /// Last node of the path
    pub fn value(&self) -> &N {
        &self.link.value
    }

    pub fn previous(&self) -> Option<&Path<N>> {
        self.link.previous.as_ref()
    }

    /// Known distance from the origin (g-cost)
    pub fn distance_travelled(&self) -> Distance {
        self.link.distance_travelled
    }

    /// Heuristic distance to this direction's target (h-cost)
    pub fn estimated_distance_to_goal(&self) -> Distance {
        self.link.estimated_distance_to_goal
    }

    /// Heuristic distance from this direction's origin
    ///
    /// Recorded on every extension but not consulted by the search.
    pub fn estimate_of_actual_travel(&self) -> Distance {
        self.link.estimate_of_actual_travel
    }

    /// True for an origin path
    pub fn is_origin(&self) -> bool {
        self.link.previous.is_none()
    }

    /// Nodes from this one back to the origin
    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            current: Some(self),
        }
    }
}

impl<N: Clone> Path<N> {
    /// Append this node and every predecessor to `out`, walking towards the origin
    pub fn collect_into(&self, out: &mut Vec<N>) {
        out.extend(self.iter().cloned());
    }
}

impl<N> Clone for Path<N> {
    fn clone(&self) -> Self {
        Self {
            link: Arc::clone(&self.link),
        }
    }
}

impl<N: fmt::Display> fmt::Display for Path<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes = self.iter();
        if let Some(first) = nodes.next() {
            write!(f, "{}", first)?;
        }
        for node in nodes {
            write!(f, " ← {}", node)?;
        }
        Ok(())
    }
}

impl<N: fmt::Debug> fmt::Debug for Path<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("nodes", &self.iter().collect::<Vec<_>>())
            .field("distance_travelled", &self.distance_travelled())
            .field("estimated_distance_to_goal", &self.estimated_distance_to_goal())
            .field("estimate_of_actual_travel", &self.estimate_of_actual_travel())
            .finish()
    }
}

/// Iterator over the nodes of a [`Path`], newest first
pub struct Iter<'a, N> {
    current: Option<&'a Path<N>>,
}

impl<'a, N> Iterator for Iter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.current?;
        self.current = path.previous();
        Some(path.value())
    }
}

impl<N> Drop for Link<N> {
    // Long chains would otherwise drop recursively, one stack frame per node.
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(path) = previous {
            match Arc::try_unwrap(path.link) {
                Ok(mut link) => previous = link.previous.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let path = Path::origin('a', 4);

        assert!(path.is_origin());
        assert_eq!(*path.value(), 'a');
        assert_eq!(path.distance_travelled(), 0);
        assert_eq!(path.estimated_distance_to_goal(), 4);
        assert_eq!(path.estimate_of_actual_travel(), 0);
        assert_eq!(path.iter().count(), 1);
    }

    #[test]
    fn test_prepend_does_not_mutate() {
        let a = Path::origin('a', 2);
        let b = a.prepend('b', 1, 5, 7);

        assert!(a.is_origin());
        assert_eq!(a.iter().count(), 1);

        assert_eq!(*b.value(), 'b');
        assert_eq!(b.distance_travelled(), 5);
        assert_eq!(b.estimated_distance_to_goal(), 1);
        assert_eq!(b.estimate_of_actual_travel(), 7);
        assert_eq!(b.previous().map(|p| *p.value()), Some('a'));
    }

    #[test]
    fn test_shared_prefix() {
        let a = Path::origin('a', 0);
        let b = a.prepend('b', 0, 1, 0);
        let c = b.prepend('c', 0, 2, 0);
        let d = b.prepend('d', 0, 2, 0);

        let mut via_c = Vec::new();
        c.collect_into(&mut via_c);
        let mut via_d = Vec::new();
        d.collect_into(&mut via_d);

        assert_eq!(via_c, vec!['c', 'b', 'a']);
        assert_eq!(via_d, vec!['d', 'b', 'a']);
        assert!(Arc::ptr_eq(
            &c.previous().unwrap().link,
            &d.previous().unwrap().link
        ));
    }

    #[test]
    fn test_collect_into_appends() {
        let path = Path::origin(1, 0).prepend(2, 0, 1, 0);
        let mut out = vec![9];
        path.collect_into(&mut out);
        assert_eq!(out, vec![9, 2, 1]);
    }

    #[test]
    fn test_display() {
        let path = Path::origin('a', 0).prepend('b', 0, 0, 0);
        assert_eq!(path.to_string(), "b ← a");
    }

    #[test]
    fn test_long_chain_drop() {
        let mut path = Path::origin(0u32, 0);
        for i in 1..200_000 {
            path = path.prepend(i, 0, i, 0);
        }
        assert_eq!(path.distance_travelled(), 199_999);
        drop(path);
    }
}

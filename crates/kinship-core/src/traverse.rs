//! Breadth-first reachability, distance, and radius queries.
//!
//! Every traversal marks a person visited when it is enqueued, never when it is
//! dequeued, so no person is queued twice and each recorded distance is the
//! shortest one.

use crate::filter::EdgeFilter;
use crate::graph::{PersonId, RELATED_NONE, RelationGraph};
use std::collections::{BTreeSet, HashSet, VecDeque};

impl RelationGraph {
    /// Whether any chain of relationships connects `a` to `b`. Always true for `a == b`.
    pub fn are_related(&self, a: PersonId, b: PersonId) -> bool {
        self.distance(a, b, EdgeFilter::All).is_some()
    }

    /// Like [`are_related`](Self::are_related), following only `label` edges.
    pub fn are_related_by(&self, a: PersonId, b: PersonId, label: &str) -> bool {
        self.distance(a, b, EdgeFilter::Label(label)).is_some()
    }

    /// Shortest path length from `a` to `b` through edges admitted by `filter`.
    pub fn distance(&self, a: PersonId, b: PersonId, filter: EdgeFilter<'_>) -> Option<usize> {
        let mut queue: VecDeque<(PersonId, usize)> = VecDeque::new();
        let mut visited: HashSet<PersonId> = HashSet::new();

        queue.push_back((a, 0));
        visited.insert(a);

        while let Some((current, depth)) = queue.pop_front() {
            if current == b {
                tracing::debug!(a, b, depth, explored = visited.len(), "path found");
                return Some(depth);
            }
            for next in self.neighbors(current, filter) {
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        tracing::debug!(a, b, explored = visited.len(), "no path");
        None
    }

    /// Shortest path length from `a` to `b`, or [`RELATED_NONE`] (−1) if unreachable.
    pub fn get_related(&self, a: PersonId, b: PersonId) -> i64 {
        Self::as_sentinel(self.distance(a, b, EdgeFilter::All))
    }

    /// Like [`get_related`](Self::get_related), following only `label` edges.
    pub fn get_related_by(&self, a: PersonId, b: PersonId, label: &str) -> i64 {
        Self::as_sentinel(self.distance(a, b, EdgeFilter::Label(label)))
    }

    fn as_sentinel(distance: Option<usize>) -> i64 {
        distance.map_or(RELATED_NONE, |d| d as i64)
    }

    /// People exactly `n` relationships away from `uin`, over edges of any label.
    ///
    /// `n == 0` yields an empty set: the origin is never its own step.
    pub fn get_steps(&self, uin: PersonId, n: usize) -> BTreeSet<PersonId> {
        if n == 0 {
            return BTreeSet::new();
        }

        let mut queue: VecDeque<(PersonId, usize)> = VecDeque::new();
        let mut visited: HashSet<PersonId> = HashSet::new();

        queue.push_back((uin, 0));
        visited.insert(uin);

        // Expand until the front of the queue sits on the target radius. Depths in the
        // queue never decrease and never differ by more than one, so at that point the
        // queue holds exactly the people at depth `n`.
        while let Some(&(current, depth)) = queue.front() {
            if depth >= n {
                break;
            }
            queue.pop_front();
            for next in self.neighbors(current, EdgeFilter::All) {
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        queue.into_iter().map(|(id, _)| id).collect()
    }
}

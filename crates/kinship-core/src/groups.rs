//! Connected-component counting under the three relationship selections.

use crate::filter::EdgeFilter;
use crate::graph::{PersonId, RelationGraph};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Component count split by how each group was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    /// Components flood-filled from people with at least one admitted edge.
    pub flooded: usize,
    /// People with no admitted edge, each a group of one.
    pub singletons: usize,
}

impl GroupCount {
    pub fn total(&self) -> usize {
        self.flooded + self.singletons
    }
}

impl RelationGraph {
    /// Number of groups of mutually related people, counting every label.
    pub fn count_groups(&self) -> usize {
        self.group_breakdown(EdgeFilter::All).total()
    }

    /// Number of groups when only `label` relationships connect people.
    pub fn count_groups_by(&self, label: &str) -> usize {
        self.group_breakdown(EdgeFilter::Label(label)).total()
    }

    /// Number of groups when relationships under any of `labels` connect people.
    pub fn count_groups_any<S: AsRef<str>>(&self, labels: &[S]) -> usize {
        let labels: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
        self.group_breakdown(EdgeFilter::AnyOf(&labels)).total()
    }

    /// Traversal seeds for `filter`: people with at least one admitted edge, ascending.
    pub fn seeds(&self, filter: EdgeFilter<'_>) -> Vec<PersonId> {
        self.people()
            .filter(|&id| self.has_admitted_edge(id, filter))
            .collect()
    }

    /// People with no admitted edge under `filter`.
    pub fn singleton_count(&self, filter: EdgeFilter<'_>) -> usize {
        self.people()
            .filter(|&id| !self.has_admitted_edge(id, filter))
            .count()
    }

    /// Flood-fill every seed not yet reached, then add one group per person without
    /// an admitted edge.
    ///
    /// A flood only ever reaches people that have an admitted edge themselves (the edge
    /// it arrived by, mirrored), so the two counts never cover the same person.
    pub fn group_breakdown(&self, filter: EdgeFilter<'_>) -> GroupCount {
        let mut visited: HashSet<PersonId> = HashSet::new();
        let mut queue: VecDeque<PersonId> = VecDeque::new();
        let mut flooded = 0;

        for seed in self.seeds(filter) {
            if !visited.insert(seed) {
                continue;
            }
            queue.push_back(seed);
            while let Some(current) = queue.pop_front() {
                for next in self.neighbors(current, filter) {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            flooded += 1;
        }

        let count = GroupCount {
            flooded,
            singletons: self.singleton_count(filter),
        };
        tracing::debug!(
            ?filter,
            flooded = count.flooded,
            singletons = count.singletons,
            "groups counted"
        );
        count
    }
}

//! Graph data model for the Kinship relationship graph.

use crate::filter::EdgeFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a person node.
pub type PersonId = i64;

/// Distance reported by [`RelationGraph::get_related`] when no path exists.
pub const RELATED_NONE: i64 = -1;

/// One parsed edge record: `a` and `b` share the relationship `label`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub a: PersonId,
    pub b: PersonId,
    pub label: String,
}

impl Relation {
    pub fn new(a: PersonId, b: PersonId, label: impl Into<String>) -> Self {
        Self {
            a,
            b,
            label: label.into(),
        }
    }
}

/// Per-person adjacency: label → neighbors reachable through an edge with that label.
///
/// A label key exists only if the person has at least one edge carrying it.
pub type LabelMap = BTreeMap<String, Vec<PersonId>>;

/// Undirected multi-label relationship graph.
///
/// Built once from a person list and a list of [`Relation`] records, read-only afterwards.
/// Every query keeps its own traversal state, so a shared `&RelationGraph` can be
/// queried from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    adjacency: BTreeMap<PersonId, LabelMap>,
    relation_count: usize,
}

/// Aggregate counts describing a constructed graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub people: usize,
    pub relations: usize,
    /// People with no relationship of any label.
    pub isolated: usize,
    /// Label → number of edge records carrying it.
    pub labels: BTreeMap<String, usize>,
}

impl RelationGraph {
    /// Build the graph from the known people and the relationship records.
    ///
    /// Each record is inserted in both directions. Endpoints missing from `people`
    /// are registered on first reference.
    pub fn new<P, R>(people: P, relations: R) -> Self
    where
        P: IntoIterator<Item = PersonId>,
        R: IntoIterator<Item = Relation>,
    {
        let mut adjacency: BTreeMap<PersonId, LabelMap> = people
            .into_iter()
            .map(|id| (id, LabelMap::new()))
            .collect();
        let mut relation_count = 0;

        for Relation { a, b, label } in relations {
            adjacency
                .entry(a)
                .or_default()
                .entry(label.clone())
                .or_default()
                .push(b);
            adjacency
                .entry(b)
                .or_default()
                .entry(label)
                .or_default()
                .push(a);
            relation_count += 1;
        }

        tracing::debug!(
            people = adjacency.len(),
            relations = relation_count,
            "relation graph constructed"
        );

        Self {
            adjacency,
            relation_count,
        }
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edge records inserted (each counted once, not per direction).
    pub fn relation_count(&self) -> usize {
        self.relation_count
    }

    /// All known people in ascending order.
    pub fn people(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Label map of a person, `None` for an unknown id.
    pub fn relations_of(&self, id: PersonId) -> Option<&LabelMap> {
        self.adjacency.get(&id)
    }

    /// Distinct labels present anywhere in the graph, ascending.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .adjacency
            .values()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Neighbors of `id` through edges admitted by `filter`, in label order.
    ///
    /// Duplicate edges yield duplicate neighbors. Unknown ids and absent labels
    /// yield nothing.
    pub fn neighbors<'a>(
        &'a self,
        id: PersonId,
        filter: EdgeFilter<'a>,
    ) -> impl Iterator<Item = PersonId> + 'a {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(move |labels| {
                labels
                    .iter()
                    .filter(move |(label, _)| filter.admits(label))
                    .flat_map(|(_, ids)| ids.iter().copied())
            })
    }

    /// Number of admitted edge endpoints at `id`, duplicates included.
    pub fn degree(&self, id: PersonId, filter: EdgeFilter<'_>) -> usize {
        self.adjacency.get(&id).map_or(0, |labels| {
            labels
                .iter()
                .filter(|(label, _)| filter.admits(label))
                .map(|(_, ids)| ids.len())
                .sum()
        })
    }

    /// Whether `id` has at least one edge admitted by `filter`.
    pub fn has_admitted_edge(&self, id: PersonId, filter: EdgeFilter<'_>) -> bool {
        self.adjacency.get(&id).is_some_and(|labels| {
            labels
                .iter()
                .any(|(label, ids)| !ids.is_empty() && filter.admits(label))
        })
    }

    pub fn stats(&self) -> GraphStats {
        let mut labels: BTreeMap<String, usize> = BTreeMap::new();
        for map in self.adjacency.values() {
            for (label, ids) in map {
                *labels.entry(label.clone()).or_default() += ids.len();
            }
        }
        // Each record was counted once from each endpoint.
        for count in labels.values_mut() {
            *count /= 2;
        }

        GraphStats {
            people: self.adjacency.len(),
            relations: self.relation_count,
            isolated: self.adjacency.values().filter(|m| m.is_empty()).count(),
            labels,
        }
    }
}

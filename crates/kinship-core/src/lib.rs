//! Core relationship graph and query engine for Kinship.
//!
//! Provides the graph data model ([`graph::RelationGraph`]), label filters for
//! traversals, reachability/distance/radius queries, connected-group counting, and
//! loading of person and relationship record files.

pub mod config;
pub mod filter;
pub mod graph;
pub mod groups;
pub mod ingest;
pub mod traverse;

pub use filter::EdgeFilter;
pub use graph::{GraphStats, PersonId, RELATED_NONE, Relation, RelationGraph};
pub use groups::GroupCount;

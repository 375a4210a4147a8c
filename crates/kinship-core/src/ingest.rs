//! Read person and relationship records from disk.

use crate::config::IngestConfig;
use crate::graph::{PersonId, Relation, RelationGraph};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{}: {}", .path.display(), .line, .reason)]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// A record-level parse failure before the source path is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub line: usize,
    pub reason: String,
}

impl RecordError {
    fn at(self, path: &Path) -> IngestError {
        IngestError::Malformed {
            path: path.to_path_buf(),
            line: self.line,
            reason: self.reason,
        }
    }
}

/// Parse a person list: integer ids separated by any whitespace.
pub fn parse_people(content: &str, skip_malformed: bool) -> Result<Vec<PersonId>, RecordError> {
    let mut people = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        for token in line.split_whitespace() {
            match token.parse::<PersonId>() {
                Ok(id) => people.push(id),
                Err(_) if skip_malformed => {
                    tracing::warn!(line = idx + 1, token, "skipping malformed person id");
                }
                Err(_) => {
                    return Err(RecordError {
                        line: idx + 1,
                        reason: format!("invalid person id {token:?}"),
                    });
                }
            }
        }
    }
    Ok(people)
}

/// Parse relationship records, one `id_a<delim>id_b<delim>label` per line.
///
/// Blank lines and lines starting with `#` are ignored. A label is a single token;
/// anything after it on the line makes the record malformed.
pub fn parse_relations(content: &str, config: &IngestConfig) -> Result<Vec<Relation>, RecordError> {
    let mut relations = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_relation(trimmed, config.delimiter) {
            Ok(relation) => relations.push(relation),
            Err(reason) if config.skip_malformed => {
                tracing::warn!(line = idx + 1, %reason, "skipping malformed relation");
            }
            Err(reason) => {
                return Err(RecordError {
                    line: idx + 1,
                    reason,
                });
            }
        }
    }
    Ok(relations)
}

fn parse_relation(line: &str, delimiter: char) -> Result<Relation, String> {
    let fields: Vec<&str> = line.splitn(3, delimiter).map(str::trim).collect();
    let [a, b, label] = fields.as_slice() else {
        return Err(format!(
            "expected 3 fields separated by {delimiter:?}, found {}",
            fields.len()
        ));
    };

    let a = a
        .parse::<PersonId>()
        .map_err(|_| format!("invalid person id {a:?}"))?;
    let b = b
        .parse::<PersonId>()
        .map_err(|_| format!("invalid person id {b:?}"))?;
    let mut tokens = label.split_whitespace();
    let Some(label) = tokens.next() else {
        return Err("empty relationship label".to_string());
    };
    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected trailing data {extra:?} after label {label:?}"));
    }

    Ok(Relation::new(a, b, label))
}

fn read(path: &Path) -> Result<String, IngestError> {
    fs::read_to_string(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Read both record files and construct the graph.
pub fn load_graph(
    people_path: &Path,
    relations_path: &Path,
    config: &IngestConfig,
) -> Result<RelationGraph, IngestError> {
    // Both files must open before anything is parsed.
    let people_src = read(people_path)?;
    let relations_src = read(relations_path)?;

    let people =
        parse_people(&people_src, config.skip_malformed).map_err(|e| e.at(people_path))?;
    let relations =
        parse_relations(&relations_src, config).map_err(|e| e.at(relations_path))?;

    tracing::info!(
        people = people.len(),
        relations = relations.len(),
        "loaded relationship records"
    );

    Ok(RelationGraph::new(people, relations))
}

/// Load the graph from the paths named in `config`.
pub fn load_configured(config: &IngestConfig) -> Result<RelationGraph, IngestError> {
    load_graph(&config.people, &config.relations, config)
}

//! Configuration for record ingestion and query output.
//!
//! Load order: `.kinship/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level Kinship configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KinshipConfig {
    pub ingest: IngestConfig,
    pub output: OutputConfig,
}

/// Where the person and relationship records live and how they are split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Person-list file: whitespace-separated integer ids.
    pub people: PathBuf,
    /// Relationship file: one `id_a,id_b,label` record per line.
    pub relations: PathBuf,
    /// Field separator within a relationship record.
    pub delimiter: char,
    /// Skip malformed records with a warning instead of failing the load.
    pub skip_malformed: bool,
}

/// Query result rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            people: PathBuf::from("people.txt"),
            relations: PathBuf::from("relations.csv"),
            delimiter: ',',
            skip_malformed: false,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
/// Unparseable values leave the field untouched and log a warning.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    let Ok(v) = std::env::var(var) else {
        return;
    };
    match v.parse() {
        Ok(n) => *target = n,
        Err(_) => tracing::warn!(var, value = %v, "ignoring unparseable environment override"),
    }
}

impl KinshipConfig {
    /// Load config from `.kinship/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".kinship").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("KINSHIP_PEOPLE", &mut config.ingest.people);
        env_override("KINSHIP_RELATIONS", &mut config.ingest.relations);
        env_override("KINSHIP_DELIMITER", &mut config.ingest.delimiter);
        env_override("KINSHIP_SKIP_MALFORMED", &mut config.ingest.skip_malformed);
        env_override("KINSHIP_FORMAT", &mut config.output.format);

        // Relative record paths are resolved against the project root.
        config.ingest.people = project_root.join(&config.ingest.people);
        config.ingest.relations = project_root.join(&config.ingest.relations);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let d = self.ingest.delimiter;
        if d == ' ' || d == '\n' || d.is_alphanumeric() || d == '-' {
            anyhow::bail!(
                "delimiter {:?} would be ambiguous with ids or labels; use a punctuation character",
                d
            );
        }
        Ok(())
    }
}

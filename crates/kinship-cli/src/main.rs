//! CLI binary for Kinship: query reachability, distance, and groups in a relationship graph.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinship_core::config::{KinshipConfig, OutputFormat};
use kinship_core::{EdgeFilter, PersonId, RelationGraph};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kinship", about = "Relationship graph queries")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Person-list file, relative to the project root (overrides config)
    #[arg(long, global = true)]
    people: Option<PathBuf>,

    /// Relationship file, relative to the project root (overrides config)
    #[arg(long, global = true)]
    relations: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether two people are connected by any chain of relationships
    Related {
        a: PersonId,
        b: PersonId,

        /// Only follow relationships with this label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Shortest number of relationships between two people (-1 if unreachable)
    Distance {
        a: PersonId,
        b: PersonId,

        /// Only follow relationships with this label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// List people exactly N relationships away
    Steps {
        uin: PersonId,
        n: usize,
    },

    /// Count groups of mutually related people
    Groups {
        /// Relationship labels that connect people (repeatable; none = all labels)
        #[arg(short, long)]
        label: Vec<String>,
    },

    /// Show graph statistics
    Info,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    let mut config = KinshipConfig::load(&project_root)?;
    if let Some(people) = &cli.people {
        config.ingest.people = project_root.join(people);
    }
    if let Some(relations) = &cli.relations {
        config.ingest.relations = project_root.join(relations);
    }
    if cli.json {
        config.output.format = OutputFormat::Json;
    }

    let graph = kinship_core::ingest::load_configured(&config.ingest).with_context(|| {
        format!(
            "failed to load graph from {} and {}",
            config.ingest.people.display(),
            config.ingest.relations.display()
        )
    })?;
    tracing::debug!(
        people = graph.node_count(),
        relations = graph.relation_count(),
        "graph ready"
    );

    let format = config.output.format;
    match cli.command {
        Commands::Related { a, b, label } => cmd_related(&graph, a, b, label.as_deref(), format),
        Commands::Distance { a, b, label } => {
            cmd_distance(&graph, a, b, label.as_deref(), format)
        }
        Commands::Steps { uin, n } => cmd_steps(&graph, uin, n, format),
        Commands::Groups { label } => cmd_groups(&graph, &label, format),
        Commands::Info => cmd_info(&graph, format),
    }
}

fn cmd_related(
    graph: &RelationGraph,
    a: PersonId,
    b: PersonId,
    label: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let related = match label {
        Some(l) => graph.are_related_by(a, b, l),
        None => graph.are_related(a, b),
    };
    match format {
        OutputFormat::Text => println!("{related}"),
        OutputFormat::Json => emit(&json!({ "a": a, "b": b, "label": label, "related": related }))?,
    }
    Ok(())
}

fn cmd_distance(
    graph: &RelationGraph,
    a: PersonId,
    b: PersonId,
    label: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let distance = match label {
        Some(l) => graph.get_related_by(a, b, l),
        None => graph.get_related(a, b),
    };
    match format {
        OutputFormat::Text => println!("{distance}"),
        OutputFormat::Json => {
            emit(&json!({ "a": a, "b": b, "label": label, "distance": distance }))?;
        }
    }
    Ok(())
}

fn cmd_steps(graph: &RelationGraph, uin: PersonId, n: usize, format: OutputFormat) -> Result<()> {
    let steps = graph.get_steps(uin, n);
    match format {
        OutputFormat::Text => {
            for id in &steps {
                println!("{id}");
            }
        }
        OutputFormat::Json => emit(&json!({ "uin": uin, "n": n, "people": steps }))?,
    }
    Ok(())
}

fn cmd_groups(graph: &RelationGraph, labels: &[String], format: OutputFormat) -> Result<()> {
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    let filter = match label_refs.as_slice() {
        [] => EdgeFilter::All,
        [single] => EdgeFilter::Label(single),
        many => EdgeFilter::AnyOf(many),
    };
    let breakdown = graph.group_breakdown(filter);
    match format {
        OutputFormat::Text => println!("{}", breakdown.total()),
        OutputFormat::Json => emit(&json!({
            "labels": labels,
            "groups": breakdown.total(),
            "flooded": breakdown.flooded,
            "singletons": breakdown.singletons,
        }))?,
    }
    Ok(())
}

fn cmd_info(graph: &RelationGraph, format: OutputFormat) -> Result<()> {
    let stats = graph.stats();
    match format {
        OutputFormat::Text => {
            println!("People:    {}", stats.people);
            println!("Relations: {}", stats.relations);
            println!("Isolated:  {}", stats.isolated);
            println!("Groups:    {}", graph.count_groups());
            if !stats.labels.is_empty() {
                println!("Labels:");
                for (label, count) in &stats.labels {
                    println!("  {label}: {count}");
                }
            }
        }
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&stats)?;
            value["groups"] = json!(graph.count_groups());
            emit(&value)?;
        }
    }
    Ok(())
}

fn emit(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

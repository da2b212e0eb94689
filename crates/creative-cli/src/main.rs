use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use creative_export::{derive_design, DeriveRequest, DesignSink, MemorySink};
use creative_layout::{build_all, build_layout};
use creative_reflow::ReflowEngine;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod config;
mod sink;

use config::EngineConfig;
use sink::DirectorySink;

#[derive(Parser, Debug)]
#[command(
    name = "creative",
    version,
    about = "Convert, reflow, and derive creative designs",
    arg_required_else_help = true
)]
struct Cli {
    /// JSON file with layout, reflow, and serialize options
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the layout tree of one design
    Build {
        #[arg(value_name = "RULES")]
        rules: PathBuf,
        id: String,
    },
    /// Reflow one design into a new container size
    Reflow {
        #[arg(value_name = "RULES")]
        rules: PathBuf,
        id: String,
        width: f64,
        height: f64,
    },
    /// Derive and persist a new design size from an existing design
    Derive {
        #[arg(value_name = "RULES")]
        rules: PathBuf,
        id: String,
        width: f64,
        height: f64,
        /// Name of the new design
        #[arg(long)]
        name: String,
        /// Id of the new design
        #[arg(long)]
        new_id: String,
        /// Directory to write the new design to
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Build the layout trees of every design, skipping broken ones
    Batch {
        #[arg(value_name = "RULES")]
        rules: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Build { rules, id } => {
            let designs = load_designs(&rules)?;
            let tree = build_layout(&designs, &id, &config.layout)
                .with_context(|| format!("failed to build design {}", id))?;
            print_json(&tree)?;
        }
        Command::Reflow {
            rules,
            id,
            width,
            height,
        } => {
            let designs = load_designs(&rules)?;
            let tree = build_layout(&designs, &id, &config.layout)
                .with_context(|| format!("failed to build design {}", id))?;
            let reflowed = ReflowEngine::new(config.reflow.clone())
                .reflow(&tree, width, height)
                .with_context(|| format!("failed to reflow design {}", id))?;
            print_json(&reflowed)?;
        }
        Command::Derive {
            rules,
            id,
            width,
            height,
            name,
            new_id,
            out,
        } => {
            let designs = load_designs(&rules)?;
            let request = DeriveRequest {
                source_id: id,
                design_id: new_id,
                name,
                width,
                height,
            };
            let mut sink: Box<dyn DesignSink> = match out {
                Some(dir) => Box::new(DirectorySink::new(dir)),
                None => Box::new(MemorySink::new()),
            };
            let design = derive_design(&designs, sink.as_mut(), &request, &config.derive_options())
                .with_context(|| format!("failed to derive {} from {}", request.design_id, request.source_id))?;
            print_json(&design)?;
        }
        Command::Batch { rules } => {
            let designs = load_designs(&rules)?;
            let trees = build_all(&designs, &config.layout);
            tracing::info!(total = designs.len(), built = trees.len(), "batch complete");
            print_json(&trees)?;
        }
    }

    Ok(())
}

fn load_designs(path: &Path) -> Result<IndexMap<String, Value>> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", json);
    Ok(())
}

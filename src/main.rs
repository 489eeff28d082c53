//! playgen CLI entrypoint
//! Parses command-line arguments and dispatches to the transformation layer.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use playgen::{
    GenerationFlags, GeneratorOptions, Transformer,
    ir::{ApiIr, Operation},
    render::{self, TeraRenderer},
    transform::{ArtifactBinding, ArtifactPlan, DecoratedSecurityScheme},
};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playgen")]
#[command(author, version, about = playgen::GENERATOR_HELP, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the template-to-output bindings selected by the generator options
    Plan {
        /// Generator options file (YAML, TOML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// API classes to expand per-class templates for
        #[arg(long = "api-class")]
        api_classes: Vec<String>,
    },
    /// Transform a parsed API model and print the result as JSON
    Transform {
        /// Parser output (JSON)
        #[arg(long)]
        ir: PathBuf,
        /// Generator options file (YAML, TOML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Transform a parsed API model and render it with a template directory
    Render {
        /// Parser output (JSON)
        #[arg(long)]
        ir: PathBuf,
        /// Directory holding the templates
        #[arg(long)]
        templates: PathBuf,
        /// Generator options file (YAML, TOML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Plan {
            config,
            api_classes,
        } => run_plan(config.as_deref(), api_classes).await?,
        Commands::Transform { ir, config } => run_transform(ir, config.as_deref()).await?,
        Commands::Render {
            ir,
            templates,
            config,
        } => run_render(ir, templates, config.as_deref()).await?,
    }
    Ok(())
}

/// Resolve generation flags from an optional options file
async fn load_flags(config: Option<&Path>) -> anyhow::Result<GenerationFlags> {
    let options = match config {
        Some(path) => GeneratorOptions::load(path)
            .await
            .with_context(|| format!("Failed to load generator options from {}", path.display()))?,
        None => GeneratorOptions::default(),
    };
    Ok(options.resolve())
}

async fn load_ir(path: &Path) -> anyhow::Result<ApiIr> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read API model from {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse API model")
}

async fn run_plan(config: Option<&Path>, api_classes: &[String]) -> anyhow::Result<()> {
    let flags = load_flags(config).await?;
    let plan = ArtifactPlan::assemble(&flags);

    for binding in plan.bindings(api_classes) {
        println!("{} -> {}", binding.template, binding.destination);
    }
    Ok(())
}

/// JSON shape printed by the transform command
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransformOutput<'a> {
    operations: &'a [Operation],
    security_schemes: &'a [DecoratedSecurityScheme],
    artifacts: Vec<ArtifactBinding>,
}

async fn run_transform(ir_path: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let flags = load_flags(config).await?;
    let ir = load_ir(ir_path).await?;

    let bundle = Transformer::new(flags)
        .run(ir)
        .context("Failed to transform API model")?;

    let output = TransformOutput {
        operations: &bundle.operations,
        security_schemes: &bundle.security_schemes,
        artifacts: bundle.bindings(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_render(ir_path: &Path, templates: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let flags = load_flags(config).await?;
    let ir = load_ir(ir_path).await?;

    let bundle = Transformer::new(flags)
        .run(ir)
        .context("Failed to transform API model")?;
    let renderer = TeraRenderer::from_dir(templates).context("Failed to load templates")?;

    let artifacts = render::render_bundle(&bundle, &renderer).context("Failed to render templates")?;
    for artifact in &artifacts {
        println!("{} ({} bytes)", artifact.path, artifact.content.len());
    }
    info!(artifacts = artifacts.len(), "Rendering complete");
    Ok(())
}

use anyhow::{bail, Context};
use clap::Parser;
use flowdoc_cli::{Cli, Commands};
use flowdoc_core::catalog::StaticCatalog;
use flowdoc_core::engine::DocEngine;
use flowdoc_core::overrides::OverrideTables;
use flowdoc_core::rules::JsonMethodRules;
use flowdoc_core::logging;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init_logging("flowdoc", cli.verbose);

    let catalog_path = cli
        .catalog
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--catalog is required"))?;
    let engine = build_engine(&catalog_path, cli.rules.clone())?;

    match cli.command {
        Commands::Schema { out } => {
            let schema = engine.schema().context("composing schema")?;
            write_output(out, &schema)?;
        }
        Commands::Lookup { out } => {
            let lookup = engine.lookup().context("exporting lookup manifest")?;
            write_output(out, &lookup)?;
        }
        Commands::Get { path } => {
            let store = engine
                .artifacts(doc_json_placeholder())
                .context("assembling artifacts")?;
            let artifact = store.get(&path);
            info!(path = %path, content_type = %artifact.content_type, "served");
            println!("{}", artifact.body);
        }
        Commands::Diagnostics => {
            let context = engine.context().context("building catalog context")?;
            let rendered = serde_json::to_string_pretty(context.diagnostics())?;
            println!("{rendered}");
        }
    }
    Ok(())
}

fn build_engine(catalog_path: &PathBuf, rules_path: Option<PathBuf>) -> anyhow::Result<DocEngine> {
    if !catalog_path.exists() {
        bail!("catalog file not found: {}", catalog_path.display());
    }
    let catalog = Arc::new(
        StaticCatalog::from_path(catalog_path)
            .with_context(|| format!("loading catalog {}", catalog_path.display()))?,
    );
    let rules = match rules_path {
        Some(path) => JsonMethodRules::from_path(path),
        None => JsonMethodRules::stock(),
    };
    Ok(DocEngine::new(
        catalog.clone(),
        catalog.clone(),
        catalog,
        Arc::new(rules),
        OverrideTables::default(),
    ))
}

/// The JSON documentation manifest comes from the sibling extractor; the CLI
/// serves an empty document when none is wired in.
fn doc_json_placeholder() -> String {
    "{}".to_string()
}

fn write_output(out: Option<PathBuf>, body: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, body)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = body.len(), "artifact written");
        }
        None => print!("{body}"),
    }
    Ok(())
}

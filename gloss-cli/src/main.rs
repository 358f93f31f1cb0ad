//! Gloss CLI
//!
//! Compiles a global-styles configuration to CSS.
//!
//! Usage:
//!   gloss --config merged.json --registry selectors.json
//!   gloss --base theme.json --user user.json --registry selectors.json
//!   gloss --config merged.json --format json

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use gloss_common::diagnostic::DIAGNOSTICS_TARGET;
use gloss_css::{CompileOptions, CompiledBundle, DEFAULT_NAMESPACE, SelectorRegistry, compile};
use gloss_tree::{apply_style_variation, load_config, merge};
use owo_colors::OwoColorize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Gloss: compile layered global styles to CSS
#[derive(Parser, Debug)]
#[command(name = "gloss")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compile an already merged configuration
    gloss --config merged.json --registry selectors.json

    # Merge a base and a user layer first
    gloss --base theme.json --user user.json --registry selectors.json

    # Apply a style variation and print the whole bundle
    gloss --config theme.json --variation dark --format json
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Merged configuration to compile
    #[arg(long, value_name = "FILE", conflicts_with_all = ["base", "user"])]
    config: Option<PathBuf>,

    /// Base layer (bundled defaults and theme)
    #[arg(long, value_name = "FILE", requires = "user")]
    base: Option<PathBuf>,

    /// User layer merged over --base
    #[arg(long, value_name = "FILE", requires = "base")]
    user: Option<PathBuf>,

    /// Selector registry; without one only root nodes compile
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Style variation applied after merging
    #[arg(long, value_name = "NAME")]
    variation: Option<String>,

    /// Custom property namespace
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Css)]
    format: Format,

    /// Treat block gap as unsupported
    #[arg(long)]
    no_block_gap: bool,

    /// Leave out layout rules
    #[arg(long)]
    no_layout: bool,

    /// Leave out block style variation rules
    #[arg(long)]
    no_variations: bool,

    /// Drop duotone filters from every node
    #[arg(long)]
    skip_filters: bool,

    /// Log compile progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The three stylesheets concatenated
    Css,
    /// The whole bundle, filters and diagnostics included
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics are printed below, so their log mirror stays quiet.
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("{level},{DIAGNOSTICS_TARGET}=off")))
        .with_writer(io::stderr)
        .init();

    let tree = load_tree(&cli)?;
    let registry = match &cli.registry {
        Some(path) => SelectorRegistry::from_json(&read(path)?)
            .with_context(|| format!("invalid selector registry {}", path.display()))?,
        None => {
            tracing::warn!("no selector registry given, only root nodes will compile");
            SelectorRegistry::new()
        }
    };
    let options = CompileOptions {
        namespace: cli.namespace.clone(),
        block_gap: cli.no_block_gap.then_some(false),
        disable_layout_styles: cli.no_layout,
        variation_styles: !cli.no_variations,
        skip_filters: cli.skip_filters,
    };

    let bundle = compile(&tree, &registry, &options);
    tracing::info!(
        scopes = registry.len(),
        styles_bytes = bundle.styles_css.len(),
        filters = bundle.filter_definitions.len(),
        diagnostics = bundle.diagnostics.len(),
        "compiled global styles"
    );
    print_diagnostics(&bundle);

    let mut stdout = io::stdout().lock();
    match cli.format {
        Format::Css => writeln!(stdout, "{}", bundle.stylesheet())?,
        Format::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&bundle)?)?,
    }
    Ok(())
}

/// Load, merge and vary the configuration tree from CLI arguments
fn load_tree(cli: &Cli) -> Result<Value> {
    let tree = match (&cli.config, &cli.base, &cli.user) {
        (Some(path), _, _) => parse(path)?,
        (None, Some(base), Some(user)) => {
            merge(&parse(base)?, &parse(user)?).context("failed to merge configuration layers")?
        }
        _ => bail!("either --config or both --base and --user are required"),
    };
    match &cli.variation {
        Some(name) => apply_style_variation(&tree, name).context("failed to apply style variation"),
        None => Ok(tree),
    }
}

fn parse(path: &Path) -> Result<Value> {
    tracing::debug!(path = %path.display(), "loading configuration");
    load_config(&read(path)?).with_context(|| format!("invalid configuration {}", path.display()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_diagnostics(bundle: &CompiledBundle) {
    for diagnostic in &bundle.diagnostics {
        eprintln!("{} {diagnostic}", "warning:".yellow().bold());
    }
}

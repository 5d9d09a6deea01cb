//! Skill group ranker CLI
//!
//! Reads a skill group dataset (and optional weighting file), ranks every
//! combination of three groups and prints the result as CSV on stdout.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use sg_core::{ItemFilter, RunConfig};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "skillgroups")]
#[command(about = "Rank combinations of three skill groups", long_about = None)]
struct Cli {
    /// Skill group dataset CSV
    data: PathBuf,

    /// Optional priority (or score, with --score) weighting CSV
    weights: Option<PathBuf>,

    /// Treat the weighting file as scores to sum
    #[arg(long, default_value = "false")]
    score: bool,

    /// Only keep buffs of these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Only keep buffs compatible with this damage type
    #[arg(long)]
    damage: Option<String>,

    /// Size of the priority histogram
    #[arg(long)]
    max_priority: Option<usize>,

    /// YAML run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Add a Count column in count mode
    #[arg(long, default_value = "false")]
    show_count: bool,

    /// Write a JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(max_priority) = cli.max_priority {
        config.max_priority = max_priority;
    }
    if cli.show_count {
        config.show_count = true;
    }
    if !cli.categories.is_empty() || cli.damage.is_some() {
        let flags = ItemFilter::from_raw(&cli.categories, cli.damage.as_deref())?;
        if flags.categories.is_some() {
            config.filter.categories = flags.categories;
        }
        if flags.damage.is_some() {
            config.filter.damage = flags.damage;
        }
    }
    config.validate()?;

    Ok(config)
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let request = sg_csv::RunRequest {
        dataset: cli.data.clone(),
        weights: cli.weights.clone(),
        score: cli.score,
        config: build_config(&cli)?,
    };

    // Nothing reaches stdout unless the whole run succeeded
    let (report, summary) = sg_csv::run(&request)?;

    let stdout = std::io::stdout();
    sg_csv::write_report(&report, stdout.lock())?;

    tracing::info!(
        mode = %summary.mode,
        combinations = summary.combinations,
        cache_hits = summary.cache_hits,
        cache_misses = summary.cache_misses,
        "done"
    );

    if let Some(path) = &cli.summary {
        sg_csv::save_summary(path, &summary)?;
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("skillgroups CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

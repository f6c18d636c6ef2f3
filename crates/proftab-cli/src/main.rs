//! proftab CLI - convert between CSV tables, profile blocks and xy series

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use log::LevelFilter;
use proftab::{ConversionKind, ConvertOptions, Registry};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "proftab")]
#[command(about = "Convert between CSV tables, profile blocks and xy series", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/proftab/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available converters
    List,

    /// Convert a file (output is written next to it)
    Convert {
        /// Input file
        input: PathBuf,
        /// Conversion kind: CSV2PROF, PROF2CSV, CSV2XY or XY2CSV
        #[arg(short, long)]
        kind: String,
        /// Values per line in profile column blocks
        #[arg(long)]
        values_per_line: Option<usize>,
        /// Fail when a profile column length disagrees with its header
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from_path(Some(path.clone())),
        None => Config::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let verbose = cli.verbose || (config.defaults.verbose && !cli.quiet);
    let quiet = cli.quiet || (config.defaults.quiet && !cli.verbose);
    init_logging(verbose, quiet);

    if let Some(e) = config_error {
        log::warn!("{e}; using defaults");
    }

    let registry = proftab_formats::default_registry();

    match cli.command {
        Commands::List => cmd_list(&registry),
        Commands::Convert {
            input,
            kind,
            values_per_line,
            strict,
        } => {
            let mut options = config.convert_options();
            if let Some(n) = values_per_line {
                options.values_per_line = n;
            }
            options.strict |= strict;
            cmd_convert(&registry, &input, &kind, &options)
        }
    }
}

/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn cmd_list(registry: &Registry) -> Result<()> {
    println!("Available converters:\n");

    for decl in registry.declarations() {
        let kind = ConversionKind::ALL
            .into_iter()
            .find(|k| decl.handles(k.source_format(), k.target_format()));

        match kind {
            Some(kind) => println!("  {} ({})", decl.id, kind),
            None => println!("  {}", decl.id),
        }
        if !decl.description.is_empty() {
            println!("    {}", decl.description);
        }
        println!("    {} -> {}", decl.from, decl.to);
        println!();
    }

    println!("Total: {} converters", registry.len());
    Ok(())
}

fn cmd_convert(
    registry: &Registry,
    input: &Path,
    kind: &str,
    options: &ConvertOptions,
) -> Result<()> {
    let conversion = proftab::dispatch(registry, input, kind, options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!(
        "Converted {} -> {} ({} rows, {} columns)",
        conversion.input.display(),
        conversion.output.display(),
        conversion.rows,
        conversion.columns
    );
    if !conversion.warnings.is_empty() {
        println!("  {} warning(s) reported", conversion.warnings.len());
    }

    Ok(())
}

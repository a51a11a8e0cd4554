//! `elements` command line driver.
//!
//! Runs the SVG extraction batch over the published registry records and
//! answers taxonomy/navigation queries against a `registry.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elements_core::Registry;
use elements_registry::{Navigator, ProviderMetadata};
use elements_svg::pipeline::{self, PipelineOptions};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "elements")]
#[command(about = "Registry asset pipeline for the elements component registry")]
struct Args {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert logo registry records into standalone SVG files plus an index
    ExtractSvgs {
        /// Directory holding the registry record files [default: public/r]
        #[arg(long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Output directory [default: public/r/svg]
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Only process files ending with this suffix [default: -logo.json]
        #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
        suffix: Option<String>,

        /// Maximum number of worker threads
        #[arg(long, value_name = "N")]
        threads: Option<usize>,
    },
    /// Print every provider with its metadata, in navigation order
    Providers {
        /// Registry document (registry.json)
        #[arg(long, value_name = "FILE")]
        registry: PathBuf,
    },
    /// Print the previous and next component of PROVIDER/COMPONENT
    Nav {
        /// Registry document (registry.json)
        #[arg(long, value_name = "FILE")]
        registry: PathBuf,

        /// Provider slug
        provider: String,

        /// Component name
        component: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_tracing(args.verbose);

    match args.command {
        Command::ExtractSvgs {
            input,
            output,
            suffix,
            threads,
        } => {
            let defaults = PipelineOptions::default();
            let options = PipelineOptions {
                input_dir: input.unwrap_or(defaults.input_dir),
                output_dir: output.unwrap_or(defaults.output_dir),
                suffix: suffix.unwrap_or(defaults.suffix),
                index_file: defaults.index_file,
                max_threads: threads,
            };
            extract_svgs(&options)
        }
        Command::Providers { registry } => {
            let registry = load_registry(&registry)?;
            let navigator = Navigator::new(&registry);
            let providers: Vec<ProviderMetadata> = navigator
                .sorted_providers()
                .into_iter()
                .map(|slug| navigator.taxonomy().provider_metadata(slug))
                .collect();
            print_json(&providers)
        }
        Command::Nav {
            registry,
            provider,
            component,
        } => {
            let registry = load_registry(&registry)?;
            let navigator = Navigator::new(&registry);
            if navigator.taxonomy().find_component(&component).is_none() {
                log::warn!("component {component} is not in the registry");
            }
            print_json(&navigator.adjacent_components(&provider, &component))
        }
    }
}

fn extract_svgs(options: &PipelineOptions) -> Result<()> {
    log::info!(
        "extracting SVGs from {} into {}",
        options.input_dir.display(),
        options.output_dir.display()
    );
    let report = pipeline::run(options)
        .with_context(|| format!("SVG extraction failed for {}", options.input_dir.display()))?;
    log::info!(
        "{} of {} files converted in {:.1}ms",
        report.generated,
        report.total(),
        report.processing_time_ms
    );
    Ok(())
}

fn load_registry(path: &Path) -> Result<Registry> {
    let registry = Registry::from_path(path)?;
    log::debug!("loaded {} registry items from {}", registry.items.len(), path.display());
    Ok(registry)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("ELEMENTS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

//! lorekg CLI: builds a reasoned knowledge graph from parsed infobox records.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use lore_core::pipeline;
use lore_core::OutputFormat;
use lore_schema::LoreConfig;

#[derive(Parser)]
#[command(name = "lorekg", version, about = "Lore knowledge-graph builder and reasoner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records into a graph, reason over it, and write it out.
    Build {
        /// JSON file with records or parsed pages.
        #[arg(long)]
        input: PathBuf,

        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Serialization of the graph.
        #[arg(long, value_enum, default_value_t = OutputFormat::Turtle)]
        format: OutputFormat,

        /// TOML file overriding the built-in tables and ontology.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Upper bound on RDFS closure passes (overrides the config).
        #[arg(long)]
        max_passes: Option<usize>,

        /// Write the extracted graph without reasoning.
        #[arg(long)]
        no_reason: bool,

        /// Write a JSON summary of the run to this file.
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Print the built-in configuration as TOML.
    DefaultConfig {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    // Logs go to stderr so the graph can be piped from stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            format,
            config,
            max_passes,
            no_reason,
            stats,
        } => {
            let mut config = pipeline::load_config(config.as_deref())?;
            if let Some(passes) = max_passes {
                config = config.with_max_closure_passes(passes);
            }

            let records = pipeline::load_records(&input)?;
            let run = pipeline::run(&records, &config, !no_reason);
            pipeline::write_output(&run.graph, format, output.as_deref())?;

            if let Some(path) = stats {
                pipeline::write_summary(&run, &path)?;
            }
        }

        Commands::DefaultConfig { output } => {
            let rendered = LoreConfig::default().to_toml().into_diagnostic()?;
            match output {
                Some(path) => std::fs::write(&path, rendered).into_diagnostic()?,
                None => print!("{rendered}"),
            }
        }
    }

    Ok(())
}

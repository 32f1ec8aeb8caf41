//! Pipewright CLI - compile visual ML pipelines into runnable artifacts.

mod components;
mod export;
mod generate;
mod input;
mod validate;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "pipewright")]
#[command(about = "Compile ML pipeline graphs into runnable artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a component catalog JSON file (defaults to the builtin catalog)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pipeline's structure and hyperparameters
    Validate {
        /// Path to the pipeline JSON document
        pipeline: String,
    },

    /// Generate the pipeline's Python script on stdout
    Generate {
        /// Path to the pipeline JSON document
        pipeline: String,

        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export the pipeline as a runnable artifact
    Export {
        /// Path to the pipeline JSON document
        pipeline: String,

        /// Artifact format to produce
        #[arg(long, value_enum, default_value = "python")]
        format: ExportFormat,

        /// Directory to write artifact files into
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Pin package versions in the requirements manifest
        #[arg(long)]
        pinned: bool,

        /// Python version for the Docker base image
        #[arg(long, default_value = "3.11")]
        python_version: String,

        /// Prefix the script with a command-line argument parser block
        #[arg(long)]
        with_cli: bool,
    },

    /// List the components available in the catalog
    Components,
}

/// Artifact formats the exporter set produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// Standalone Python script plus requirements.txt
    Python,
    /// Jupyter notebook (.ipynb)
    Notebook,
    /// Docker bundle (Dockerfile, compose, script, requirements)
    Docker,
    /// requirements.txt only
    Requirements,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let registry = input::load_registry(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Validate { pipeline } => {
            let valid = validate::execute(&pipeline, &registry)?;
            if !valid {
                std::process::exit(1);
            }
        }

        Commands::Generate { pipeline, output } => {
            generate::execute(&pipeline, output.as_deref(), &registry)?;
        }

        Commands::Export {
            pipeline,
            format,
            output,
            pinned,
            python_version,
            with_cli,
        } => {
            let options = export::ExportOptions {
                format,
                output_dir: output,
                pinned,
                python_version,
                with_cli,
            };
            export::execute(&pipeline, &registry, &options)?;
        }

        Commands::Components => {
            components::execute(&registry);
        }
    }

    Ok(())
}

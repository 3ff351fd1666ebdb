//! sysdocs CLI - automated architecture documentation for multi-module
//! projects.
//!
//! Extracts annotated entities and jobs into per-module documentation,
//! then merges everything into a project-wide index and a system-level
//! diagram with reproducible, build-order-independent output.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

/// Automated architecture documentation for multi-module projects.
///
/// sysdocs turns annotated source elements (persistent entities, triggered
/// jobs) and per-module description files into a single navigable
/// documentation index and a merged system diagram.
#[derive(Parser)]
#[command(name = "sysdocs")]
#[command(author, version)]
#[command(about = "Automated architecture documentation for multi-module projects")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  sysdocs build                 Build all docs, index, and system view
  sysdocs build-docs billing    Build one module's documentation
  sysdocs build-docs-index      Build the project-wide index
  sysdocs build-system-view     Build the merged system diagram")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all module docs plus the index and the system view
    Build {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Build one module's documentation bundle
    BuildDocs {
        /// Module id (relative module path, or `root`)
        module: String,

        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Build the project-wide documentation index
    BuildDocsIndex {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Build the merged system-level diagram
    BuildSystemView {
        /// Project root (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Build { path } => commands::build::run(&path),
        Commands::BuildDocs { module, path } => commands::docs::run(&path, &module),
        Commands::BuildDocsIndex { path } => commands::index::run(&path),
        Commands::BuildSystemView { path } => commands::system_view::run(&path),
    }
}

//! Nav CLI - content navigation.
//!
//! Provides commands for:
//! - `serve`: Start the navigation server
//! - `children`: Print the child list of a url
//! - `breadcrumb`: Print the ancestors of a url
//! - `menu`: Print the menu tree opened at a url
//! - `sitemap`: Print the full menu tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MenuArgs, ServeArgs, SitemapArgs, UrlArgs};
use error::CliError;
use output::Output;

/// Nav - content navigation.
#[derive(Parser)]
#[command(name = "nav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the navigation server.
    Serve(ServeArgs),
    /// Print the direct children of a url.
    Children(UrlArgs),
    /// Print the breadcrumb leading to a url.
    Breadcrumb(UrlArgs),
    /// Print the menu tree opened at a url.
    Menu(MenuArgs),
    /// Print the full menu tree.
    Sitemap(SitemapArgs),
}

impl Commands {
    fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Serve(args) => {
                let rt = tokio::runtime::Runtime::new()?;
                rt.block_on(args.execute())
            }
            Self::Children(args) => args.children(),
            Self::Breadcrumb(args) => args.breadcrumb(),
            Self::Menu(args) => args.execute(),
            Self::Sitemap(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.command.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

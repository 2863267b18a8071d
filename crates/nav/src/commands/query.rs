//! `nav children`, `nav breadcrumb`, `nav menu` and `nav sitemap`.
//!
//! Each command builds a walker from the loaded config, runs one traversal
//! and prints the result as pretty JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use nav_config::{CliSettings, Config};
use nav_core::{Depth, HierarchyWalker, MenuOptions};
use nav_server::{build_walker, server_config_from_nav_config};

use crate::error::CliError;
use crate::output::Output;

/// Options shared by all query commands.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover nav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Storage id the URL `/` maps to (overrides config).
    #[arg(long, env = "NAV_ROOT")]
    root: Option<String>,
}

impl SourceArgs {
    /// Load config with overrides applied.
    fn load(self, depth: Option<i64>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            root: self.root,
            depth,
            ..CliSettings::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build a walker from the loaded config.
fn walker(config: &Config) -> Result<HierarchyWalker, CliError> {
    let server_config = server_config_from_nav_config(config)?;
    tracing::debug!(source_dir = %server_config.source_dir.display(), root = %server_config.root, "Building walker");
    Ok(build_walker(&server_config)?)
}

/// Arguments for commands taking a url.
#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Public url of the node.
    url: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl UrlArgs {
    /// Print the direct children of the url.
    pub(crate) fn children(self) -> Result<(), CliError> {
        let walker = walker(&self.source.load(None)?)?;
        let children = walker.child_list(&self.url)?;
        Output::new().json(&children)
    }

    /// Print the ancestors of the url, root first.
    pub(crate) fn breadcrumb(self) -> Result<(), CliError> {
        let walker = walker(&self.source.load(None)?)?;
        let ancestors = walker.ancestors(&self.url)?;
        Output::new().json(&ancestors)
    }
}

/// Arguments for the menu command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    /// Public url the menu is opened at.
    #[arg(default_value = "/")]
    url: String,

    /// Expansion depth for entries off the active path (-1 = unlimited).
    #[arg(short, long, allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Return the root entry with its children attached.
    #[arg(long)]
    include_root: bool,

    #[command(flatten)]
    source: SourceArgs,
}

impl MenuArgs {
    /// Print the menu tree opened at the url.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load(self.depth)?;
        let walker = walker(&config)?;
        let options = MenuOptions {
            depth: Depth::try_from(config.navigation.depth)?,
            include_root: self.include_root || config.navigation.include_root,
        };
        let menu = walker.menu(&self.url, options)?;
        Output::new().json(&menu)
    }
}

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl SitemapArgs {
    /// Print the full menu tree.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let walker = walker(&self.source.load(None)?)?;
        let sitemap = walker.sitemap()?;
        Output::new().json(&sitemap)
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::components::{
    Component, DEFAULT_BACKUP, DEFAULT_OUTPUT, DEFAULT_TEMPLATE, Manifest, default_components,
};

#[derive(Debug, Parser)]
#[command(
    name = "pagestitch",
    version,
    about = "Assemble index.html from a page template and its HTML component fragments."
)]
pub struct Cli {
    /// Project root that relative paths are resolved against.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Optional TOML manifest overriding paths and the component mapping.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Page template containing `{{ NAME }}` placeholders.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Destination for the assembled page. Overwritten on every run.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Previous monolithic page used for the size comparison.
    #[arg(long)]
    pub backup: Option<PathBuf>,

    /// Skip the size and line-count comparison.
    #[arg(long)]
    pub no_report: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub backup: PathBuf,
    pub components: Vec<Component>,
    pub report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            backup: PathBuf::from(DEFAULT_BACKUP),
            components: default_components(),
            report: true,
        }
    }
}

impl Config {
    pub fn from_cli() -> Result<Self> {
        Config::from_parts(Cli::parse())
    }

    fn from_parts(cli: Cli) -> Result<Self> {
        let manifest = match &cli.manifest {
            Some(path) => {
                let path = cli.root.join(path);
                Manifest::load(&path)
                    .with_context(|| format!("invalid manifest {}", path.display()))?
            }
            None => Manifest::default(),
        };
        Ok(Config::with_overrides(cli, manifest))
    }

    /// Flags win over the manifest, which wins over the built-in defaults.
    fn with_overrides(cli: Cli, manifest: Manifest) -> Self {
        let defaults = Config::default();
        Self {
            root: cli.root,
            template: cli
                .template
                .or(manifest.template)
                .unwrap_or(defaults.template),
            output: cli.output.or(manifest.output).unwrap_or(defaults.output),
            backup: cli.backup.or(manifest.backup).unwrap_or(defaults.backup),
            components: manifest.components.unwrap_or(defaults.components),
            report: !cli.no_report,
        }
    }

    /// Resolves `path` against the project root. Absolute paths pass through.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

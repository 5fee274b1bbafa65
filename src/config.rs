//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::git::RepoMetadata;
use crate::logging::LogLevel;

/// Default syntect theme for file pages.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Command line configuration for stagen.
#[derive(Debug, Clone, Parser)]
#[command(name = "stagen", version, about, long_about = None)]
pub struct Config {
    /// Git repository path
    #[arg(long)]
    pub repo: PathBuf,

    /// Output directory for this repository; its parent holds the shared index
    #[arg(short, long)]
    pub out: PathBuf,

    /// Repository name
    #[arg(long)]
    pub name: String,

    /// Repository description
    #[arg(long, default_value = "")]
    pub desc: String,

    /// Repository URL
    #[arg(long, default_value = "")]
    pub url: String,

    /// Syntax highlighting theme for file pages
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Open the aggregate index in a browser when done
    #[arg(long)]
    pub open: bool,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the repository path does not exist, the name is
    /// blank, the output path has no directory name, or the output
    /// directory contains the repository (it is wiped before generation).
    pub fn validate(&self) -> Result<()> {
        if !self.repo.exists() {
            bail!("Repository path does not exist: {}", self.repo.display());
        }

        if self.name.trim().is_empty() {
            bail!("Repository name must not be empty");
        }

        self.identity_key()?;

        if self.out.exists() {
            let repo = self
                .repo
                .canonicalize()
                .with_context(|| format!("Cannot resolve {}", self.repo.display()))?;
            let out = self
                .out
                .canonicalize()
                .with_context(|| format!("Cannot resolve {}", self.out.display()))?;
            if repo.starts_with(&out) {
                bail!(
                    "Output directory {} contains the repository and would be erased",
                    self.out.display()
                );
            }
        }

        Ok(())
    }

    /// Returns the output directory basename, the key of this repository in
    /// the aggregate index.
    ///
    /// # Errors
    ///
    /// Returns error if the output path ends in `..`, is a bare root, or is
    /// not valid UTF8.
    pub fn identity_key(&self) -> Result<String> {
        self.out
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .with_context(|| {
                format!(
                    "Cannot derive directory name from output path: {}",
                    self.out.display()
                )
            })
            .map(String::from)
    }

    /// Returns the aggregate root: the parent of the output directory.
    pub fn index_root(&self) -> PathBuf {
        match self.out.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Returns the repository metadata supplied on the command line.
    ///
    /// # Errors
    ///
    /// Returns error if the identity key cannot be derived.
    pub fn metadata(&self) -> Result<RepoMetadata> {
        Ok(RepoMetadata {
            name: self.name.clone(),
            description: self.desc.clone(),
            url: self.url.clone(),
            dir: self.identity_key()?,
        })
    }
}

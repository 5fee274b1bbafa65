//! Site assembly: maps the repository model onto output files.

use anyhow::{Context, Result};
use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::stylesheet;
use crate::command::CommandRunner;
use crate::config::Config;
use crate::git::{Extractor, Repository};
use crate::highlight::Highlighter;
use crate::index::{RepoIndex, update_main_index};
use crate::markdown::MarkdownRenderer;
use crate::pages;

/// Counts of pages written for one repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Top level pages (files, log, commits, refs, README).
    pub top_level_pages: usize,
    /// Pages under `file/`.
    pub file_pages: usize,
    /// Pages under `commit/`.
    pub commit_pages: usize,
}

/// Writes every page of one repository below an output directory.
///
/// Holds the highlighting and markdown resources for the whole run so they
/// are loaded once, not per page.
pub struct Site<'a> {
    output: PathBuf,
    highlighter: &'a Highlighter,
    markdown: MarkdownRenderer<'a>,
}

impl<'a> Site<'a> {
    /// Creates site writer for `output`.
    pub fn new(output: impl Into<PathBuf>, highlighter: &'a Highlighter) -> Self {
        Self {
            output: output.into(),
            highlighter,
            markdown: MarkdownRenderer::with_link_resolver(""),
        }
    }

    /// Output directory of this repository.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Clears the output directory and writes all repository pages.
    ///
    /// File and commit pages need content beyond the model (file blobs,
    /// commit patches), fetched through `extractor`.
    ///
    /// # Errors
    ///
    /// Returns error if any git query or page write fails.
    pub fn generate<R: CommandRunner>(
        &self,
        repo: &Repository,
        extractor: &Extractor<'_, R>,
    ) -> Result<GenerationStats> {
        self.prepare_output()?;

        let mut stats = GenerationStats::default();

        self.write_page("index.html", pages::files::generate(repo))?;
        self.write_page("log.html", pages::log::generate(repo))?;
        self.write_page("commits.html", pages::commits::generate(repo))?;
        self.write_page("refs.html", pages::refs::generate(repo))?;
        self.write_page("readme.html", pages::readme::generate(repo, &self.markdown)?)?;
        stats.top_level_pages = 5;

        for file in repo.files().iter().filter(|f| f.is_blob()) {
            let content = extractor.file_content(file.path())?;
            let html = pages::file::generate(repo, file, &content, self.highlighter)?;
            self.write_page(&format!("file/{}.html", file.path()), html)?;
            stats.file_pages += 1;
        }
        tracing::info!(count = stats.file_pages, "generated file pages");

        for commit in repo.commits() {
            let diff = extractor.commit_diff(commit.hash())?;
            let html = pages::commit::generate(repo, commit, &diff);
            self.write_page(&format!("commit/{}.html", commit.hash()), html)?;
            stats.commit_pages += 1;
        }
        tracing::info!(count = stats.commit_pages, "generated commit pages");

        Ok(stats)
    }

    fn prepare_output(&self) -> Result<()> {
        if self.output.exists() {
            fs::remove_dir_all(&self.output).with_context(|| {
                format!("Failed to clear output directory {}", self.output.display())
            })?;
        }
        fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory {}", self.output.display())
        })
    }

    fn write_page(&self, relative: &str, html: Markup) -> Result<()> {
        let path = self.output.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, html.into_string())
            .with_context(|| format!("Failed to write page {}", path.display()))
    }
}

/// Result of a complete generation run.
#[derive(Debug)]
pub struct RunReport {
    pub repository: Repository,
    pub stats: GenerationStats,
    pub index: RepoIndex,
}

/// Runs extraction, page generation and the aggregate index update.
///
/// # Errors
///
/// Returns error if configuration is unusable, extraction fails, a page
/// cannot be written, or the index cannot be persisted.
pub fn run<R: CommandRunner>(config: &Config, runner: &R) -> Result<RunReport> {
    let highlighter = Highlighter::with_theme(&config.theme)?;

    let extractor = Extractor::new(runner, &config.repo);
    let repository = extractor
        .extract(config.metadata()?)
        .with_context(|| format!("Failed to extract {}", config.repo.display()))?;

    let site = Site::new(&config.out, &highlighter);
    let stats = site.generate(&repository, &extractor)?;

    let index = update_main_index(&config.index_root(), &repository, &stylesheet(&highlighter))
        .context("Failed to update aggregate index")?;

    Ok(RunReport {
        repository,
        stats,
        index,
    })
}

//! Cross repository index.
//!
//! The aggregate root (parent of every per repository output directory)
//! holds `index.json`, a JSON array with one summary per generated
//! repository, and the `index.html` page rendered from it. Entries are
//! keyed by output directory basename: regenerating a repository replaces
//! its entry in place, a new key is appended.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::git::Repository;
use crate::pages::main_index;

/// File name of the persisted index inside the aggregate root.
pub const INDEX_FILE: &str = "index.json";

/// File name of the rendered aggregate page.
pub const INDEX_PAGE: &str = "index.html";

/// File name of the shared stylesheet.
pub const STYLESHEET: &str = "style.css";

/// Persisted summary of one generated repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    #[serde(alias = "Name")]
    name: String,
    #[serde(default, alias = "Desc")]
    description: String,
    #[serde(default, alias = "Url")]
    url: String,
    #[serde(default, alias = "LastCommit")]
    last_commit: String,
    #[serde(alias = "Dir")]
    dir: String,
    #[serde(default)]
    commit_count: usize,
    #[serde(default)]
    file_count: usize,
    #[serde(default)]
    ref_count: usize,
}

impl RepoSummary {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// External URL, possibly empty.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Date of the last commit at generation time.
    pub fn last_commit(&self) -> &str {
        &self.last_commit
    }

    /// Identity key: output directory basename.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Number of retained commits.
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    /// Number of tree entries.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of references.
    pub fn ref_count(&self) -> usize {
        self.ref_count
    }
}

impl From<&Repository> for RepoSummary {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name().to_string(),
            description: repo.description().to_string(),
            url: repo.url().to_string(),
            last_commit: repo.last_commit().to_string(),
            dir: repo.dir().to_string(),
            commit_count: repo.commits().len(),
            file_count: repo.files().len(),
            ref_count: repo.refs().len(),
        }
    }
}

/// Outcome of [`RepoIndex::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An entry with the same key existed at this position and was replaced.
    Replaced(usize),
    /// No entry had the key; the summary was appended at this position.
    Appended(usize),
}

/// Ordered collection of repository summaries, unique by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoIndex {
    repos: Vec<RepoSummary>,
}

impl RepoIndex {
    /// Creates index from existing summaries in the given order.
    pub fn from_repos(repos: Vec<RepoSummary>) -> Self {
        Self { repos }
    }

    /// Loads the index stored at `path`.
    ///
    /// A missing, unreadable or unparsable file yields an empty index.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no readable index, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<RepoSummary>>(&data) {
            Ok(repos) => Self { repos },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable index");
                Self::default()
            }
        }
    }

    /// Summaries in display order.
    pub fn repos(&self) -> &[RepoSummary] {
        &self.repos
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Inserts `summary`, replacing the entry with the same key in place.
    ///
    /// If the loaded data already held several entries for the key, the
    /// first is replaced and the rest are removed.
    pub fn upsert(&mut self, summary: RepoSummary) -> Upsert {
        let Some(position) = self.repos.iter().position(|r| r.dir == summary.dir) else {
            self.repos.push(summary);
            return Upsert::Appended(self.repos.len() - 1);
        };

        let mut index = 0;
        self.repos.retain(|r| {
            let keep = index <= position || r.dir != summary.dir;
            index += 1;
            keep
        });
        self.repos[position] = summary;

        Upsert::Replaced(position)
    }

    /// Writes the full index to `path`, replacing any previous content.
    ///
    /// Data goes to a sibling temporary file first and is renamed into
    /// place, so readers never observe a partially written index.
    ///
    /// # Errors
    ///
    /// Returns error if serialization, writing or renaming fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.repos).context("Failed to serialize index")?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write index to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Merges `repo` into the aggregate index under `root` and refreshes the
/// aggregate page.
///
/// The index is persisted before anything is rendered. Writing the
/// stylesheet or the aggregate page afterwards may fail without error:
/// such failures are logged so the updated index data is never lost.
///
/// # Arguments
///
/// * `root`: Aggregate root directory (parent of the repository output)
/// * `repo`: Freshly extracted repository
/// * `stylesheet`: Stylesheet content shared by every generated page
///
/// # Returns
///
/// The index as persisted
///
/// # Errors
///
/// Returns error if the index cannot be persisted.
pub fn update_main_index(root: &Path, repo: &Repository, stylesheet: &str) -> Result<RepoIndex> {
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create index directory {}", root.display()))?;

    let index_path = root.join(INDEX_FILE);
    let mut index = RepoIndex::load(&index_path);

    match index.upsert(RepoSummary::from(repo)) {
        Upsert::Replaced(position) => {
            tracing::info!(dir = repo.dir(), position, "replaced index entry");
        }
        Upsert::Appended(position) => {
            tracing::info!(dir = repo.dir(), position, "appended index entry");
        }
    }

    index.save(&index_path)?;

    let style_path = root.join(STYLESHEET);
    if let Err(e) = fs::write(&style_path, stylesheet) {
        tracing::warn!(path = %style_path.display(), error = %e, "failed to write stylesheet");
    }

    let page_path = root.join(INDEX_PAGE);
    let html = main_index::generate(&index);
    if let Err(e) = fs::write(&page_path, html.into_string()) {
        tracing::warn!(path = %page_path.display(), error = %e, "failed to write aggregate index page");
    }

    Ok(index)
}

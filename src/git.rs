//! Git repository extraction.
//!
//! Every query goes through a [`CommandRunner`] issuing `git` commands in the
//! repository directory. Output is line (or record) oriented text which is
//! parsed field by field: a malformed record is dropped, never fatal.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::command::CommandRunner;

/// Number of most recent commits retained in the model.
pub const COMMIT_LIMIT: usize = 50;

/// Field separator used in formatted `git log` and `git for-each-ref` output.
pub const FIELD_DELIMITER: char = '|';

/// Size marker given to tree (directory) entries.
pub const DIRECTORY_SIZE: &str = "-";

/// Separates commit records in log output, since bodies span lines.
const RECORD_SEPARATOR: char = '\u{1e}';

const LOG_FORMAT: &str = "--format=%x1e%H|%h|%an|%ad|%s|%b";
const REF_FORMAT: &str = "--format=%(refname:short)|%(objectname)|%(objecttype)";

/// README filenames tried at HEAD, first match wins.
const README_CANDIDATES: &[&str] = &[
    "README.md",
    "README.txt",
    "README",
    "readme.md",
    "readme.txt",
    "readme",
];

/// Terminates path records in `-z` output, so paths are never quoted.
const PATH_TERMINATOR: char = '\0';

/// Entry in the HEAD tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    path: String,
    name: String,
    mode: String,
    kind: String,
    size: String,
}

impl FileEntry {
    /// Path relative to repository root, slash separated.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Octal mode string (e.g. `100644`).
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Git object kind (`blob`, `tree`, `commit`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Size in bytes as printed by git, or [`DIRECTORY_SIZE`] for trees.
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Whether the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind == "tree"
    }

    /// Whether the entry has readable content at HEAD.
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

/// Commit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    hash: String,
    short_hash: String,
    author: String,
    date: String,
    subject: String,
    body: String,
    files: Vec<String>,
    stats: String,
}

impl CommitEntry {
    /// Full commit hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Abbreviated commit hash.
    pub fn short_hash(&self) -> &str {
        &self.short_hash
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Author date, `YYYY-MM-DD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// First line of the message.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message after the subject, possibly empty.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Paths touched by the commit.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Diffstat summary as printed by `git show --stat`.
    pub fn stats(&self) -> &str {
        &self.stats
    }
}

/// Branch, tag or other reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefEntry {
    name: String,
    hash: String,
    kind: String,
}

impl RefEntry {
    /// Short reference name (e.g. `main`, `v1.0`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hash of the object the reference points at.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Object type of the target (`commit`, `tag`, ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Target hash shortened for display.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Identity and description supplied by the invoker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoMetadata {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Output directory basename, the key in the aggregate index.
    pub dir: String,
}

/// Everything extracted from one repository in one run.
///
/// Built once by [`Extractor::extract`] and not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    name: String,
    description: String,
    url: String,
    dir: String,
    last_commit: String,
    files: Vec<FileEntry>,
    commits: Vec<CommitEntry>,
    refs: Vec<RefEntry>,
    readme: String,
    readme_name: Option<String>,
}

impl Repository {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free text description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// External (clone or browse) URL, possibly empty.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Identity key: basename of the output directory.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Date of the HEAD commit, `YYYY-MM-DD`.
    pub fn last_commit(&self) -> &str {
        &self.last_commit
    }

    /// HEAD tree entries sorted by path.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Recent commits, newest first.
    pub fn commits(&self) -> &[CommitEntry] {
        &self.commits
    }

    /// References in `for-each-ref` order.
    pub fn refs(&self) -> &[RefEntry] {
        &self.refs
    }

    /// README content, empty when none was found.
    pub fn readme(&self) -> &str {
        &self.readme
    }

    /// Filename the README was read from.
    pub fn readme_name(&self) -> Option<&str> {
        self.readme_name.as_deref()
    }
}

/// Parses one commit record of the form `hash|short|author|date|subject|body`.
///
/// Returns None when fewer than five fields are present. Everything after
/// the fifth delimiter is body text, delimiters and inner whitespace included;
/// only the trailing newlines git appends are dropped. Changed files and
/// stats are left empty for the caller to fill in.
pub fn parse_log_record(record: &str) -> Option<CommitEntry> {
    if record.trim().is_empty() {
        return None;
    }

    let mut fields = record.trim_start().splitn(6, FIELD_DELIMITER);
    let hash = fields.next()?;
    let short_hash = fields.next()?;
    let author = fields.next()?;
    let date = fields.next()?;
    let subject = fields.next()?;
    let body = fields.next().unwrap_or("");

    if hash.is_empty() {
        return None;
    }

    Some(CommitEntry {
        hash: hash.to_string(),
        short_hash: short_hash.to_string(),
        author: author.to_string(),
        date: date.to_string(),
        subject: subject.trim_end_matches(['\n', '\r']).to_string(),
        body: body.trim_end_matches(['\n', '\r']).to_string(),
        files: Vec::new(),
        stats: String::new(),
    })
}

/// Parses one record of `git ls-tree -r -t -l -z` output.
///
/// Record shape is `<mode> <kind> <object> <size>\t<path>` with the path
/// taken verbatim after the first tab. The object id is ignored and tree
/// entries get [`DIRECTORY_SIZE`]. Returns None when a field is missing.
pub fn parse_tree_record(record: &str) -> Option<FileEntry> {
    let record = record.trim_start_matches('\n');
    if record.trim().is_empty() {
        return None;
    }

    let (meta, path): (Vec<&str>, String) = match record.split_once('\t') {
        Some((meta, path)) => (meta.split_whitespace().collect(), path.to_string()),
        None => {
            // Tab lost upstream: fall back to plain whitespace fields.
            let tokens: Vec<&str> = record.split_whitespace().collect();
            if tokens.len() < 5 {
                return None;
            }
            (tokens[..4].to_vec(), tokens[4..].join(" "))
        }
    };

    if meta.len() < 4 || path.is_empty() {
        return None;
    }
    let (mode, kind, size) = (meta[0], meta[1], meta[3]);

    let size = if kind == "tree" { DIRECTORY_SIZE } else { size };
    let name = path.rsplit('/').next().unwrap_or(&path).to_string();

    Some(FileEntry {
        name,
        mode: mode.to_string(),
        kind: kind.to_string(),
        size: size.to_string(),
        path,
    })
}

/// Parses one line of `git for-each-ref` output as `name|hash|kind`.
///
/// Returns None when fewer than three fields are present.
pub fn parse_ref_line(line: &str) -> Option<RefEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut fields = line.split(FIELD_DELIMITER);
    let name = fields.next()?;
    let hash = fields.next()?;
    let kind = fields.next()?;

    Some(RefEntry {
        name: name.to_string(),
        hash: hash.to_string(),
        kind: kind.to_string(),
    })
}

/// Splits NUL terminated path output, dropping empty records and the
/// newline git emits ahead of the first path.
fn split_path_records(output: &str) -> impl Iterator<Item = &str> {
    output
        .split(PATH_TERMINATOR)
        .map(|record| record.trim_start_matches('\n'))
        .filter(|record| !record.is_empty())
}

/// Issues git queries against one repository and builds the model.
pub struct Extractor<'a, R: CommandRunner> {
    runner: &'a R,
    repo_path: &'a Path,
}

impl<'a, R: CommandRunner> Extractor<'a, R> {
    /// Creates extractor for the repository at `repo_path`.
    pub fn new(runner: &'a R, repo_path: &'a Path) -> Self {
        Self { runner, repo_path }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.runner.run(self.repo_path, "git", args)
    }

    /// Extracts the complete repository model.
    ///
    /// # Errors
    ///
    /// Returns error if any mandatory git query fails. A missing README is
    /// not an error.
    pub fn extract(&self, metadata: RepoMetadata) -> Result<Repository> {
        let last_commit = self.last_commit()?;
        let files = self.files()?;
        let commits = self.commits()?;
        let refs = self.refs()?;
        let (readme_name, readme) = match self.readme() {
            Some((name, content)) => (Some(name), content),
            None => (None, String::new()),
        };

        tracing::info!(
            files = files.len(),
            commits = commits.len(),
            refs = refs.len(),
            readme = readme_name.as_deref().unwrap_or("none"),
            "extracted repository"
        );

        Ok(Repository {
            name: metadata.name,
            description: metadata.description,
            url: metadata.url,
            dir: metadata.dir,
            last_commit,
            files,
            commits,
            refs,
            readme,
            readme_name,
        })
    }

    /// Date of the HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns error if `git log` fails (including repositories without commits).
    pub fn last_commit(&self) -> Result<String> {
        self.git(&["log", "-1", "--format=%ad", "--date=short"])
            .context("Failed to read last commit date")
    }

    /// Lists up to [`COMMIT_LIMIT`] commits, each with its touched files and
    /// diffstat.
    ///
    /// # Errors
    ///
    /// Returns error if the log query or any per commit query fails.
    pub fn commits(&self) -> Result<Vec<CommitEntry>> {
        let limit = COMMIT_LIMIT.to_string();
        let output = self
            .git(&["log", LOG_FORMAT, "--date=short", "-n", &limit])
            .context("Failed to read commit log")?;

        let mut commits = Vec::new();
        let mut dropped = 0;

        for record in output.split(RECORD_SEPARATOR) {
            if record.trim().is_empty() {
                continue;
            }
            let Some(mut commit) = parse_log_record(record) else {
                dropped += 1;
                continue;
            };

            commit.stats = self
                .git(&["show", "--stat", "--format=", &commit.hash])
                .with_context(|| format!("Failed to read diffstat for {}", commit.hash))?;

            let names = self
                .git(&["show", "--name-only", "-z", "--format=", &commit.hash])
                .with_context(|| format!("Failed to read changed files for {}", commit.hash))?;
            commit.files = split_path_records(&names).map(String::from).collect();

            commits.push(commit);
        }

        if dropped > 0 {
            tracing::debug!(dropped, "skipped malformed log records");
        }

        Ok(commits)
    }

    /// Lists the HEAD tree recursively, directories included, sorted by
    /// path.
    ///
    /// # Errors
    ///
    /// Returns error if `git ls-tree` fails.
    pub fn files(&self) -> Result<Vec<FileEntry>> {
        let output = self
            .git(&["ls-tree", "-r", "-t", "-l", "-z", "HEAD"])
            .context("Failed to list repository tree")?;

        let mut files: Vec<FileEntry> = output
            .split(PATH_TERMINATOR)
            .filter_map(parse_tree_record)
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(files)
    }

    /// Lists all references.
    ///
    /// # Errors
    ///
    /// Returns error if `git for-each-ref` fails.
    pub fn refs(&self) -> Result<Vec<RefEntry>> {
        let output = self
            .git(&["for-each-ref", REF_FORMAT])
            .context("Failed to list references")?;

        Ok(output.lines().filter_map(parse_ref_line).collect())
    }

    /// Finds the README at HEAD.
    ///
    /// Returns the matched filename and its content, or None when no
    /// candidate exists or all candidates are empty.
    pub fn readme(&self) -> Option<(String, String)> {
        README_CANDIDATES.iter().find_map(|candidate| {
            let object = format!("HEAD:{}", candidate);
            match self.git(&["show", &object]) {
                Ok(content) if !content.is_empty() => Some((candidate.to_string(), content)),
                Ok(_) => None,
                Err(e) => {
                    tracing::trace!(candidate, error = %e, "README candidate not found");
                    None
                }
            }
        })
    }

    /// Content of a file at HEAD.
    ///
    /// # Errors
    ///
    /// Returns error if the path does not exist at HEAD.
    pub fn file_content(&self, path: &str) -> Result<String> {
        let object = format!("HEAD:{}", path);
        self.git(&["show", &object])
            .with_context(|| format!("Failed to read {} at HEAD", path))
    }

    /// Full `git show` output (header and patch) for a commit.
    ///
    /// # Errors
    ///
    /// Returns error if the commit cannot be shown.
    pub fn commit_diff(&self, hash: &str) -> Result<String> {
        self.git(&["show", hash])
            .with_context(|| format!("Failed to read diff for {}", hash))
    }
}

#[cfg(test)]
pub(crate) fn sample_repository(dir: &str, name: &str) -> Repository {
    let commit = |hash: &str, subject: &str, body: &str, files: &[&str]| CommitEntry {
        hash: hash.to_string(),
        short_hash: hash[..7].to_string(),
        author: "Alice".to_string(),
        date: "2025-02-01".to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        files: files.iter().map(|f| f.to_string()).collect(),
        stats: format!(" {} | 1 +\n 1 file changed, 1 insertion(+)", files[0]),
    };

    Repository {
        name: name.to_string(),
        description: "A sample repository".to_string(),
        url: "https://example.com/demo.git".to_string(),
        dir: dir.to_string(),
        last_commit: "2025-02-01".to_string(),
        files: ["100644 blob a1 12\tREADME.md", "040000 tree b2 -\tsrc", "100644 blob c3 30\tsrc/main.rs"]
            .into_iter()
            .filter_map(parse_tree_record)
            .collect(),
        commits: vec![
            commit("1111111aaaaaaa", "Add main", "Uses <stdio> & friends", &["src/main.rs"]),
            commit("2222222bbbbbbb", "Initial commit", "", &["README.md"]),
        ],
        refs: ["main|1111111aaaaaaa|commit", "v0.1|3333333ccccccc|tag"]
            .into_iter()
            .filter_map(parse_ref_line)
            .collect(),
        readme: "# Demo\n\nSee [main](src/main.rs).".to_string(),
        readme_name: Some("README.md".to_string()),
    }
}

#[cfg(test)]
impl Repository {
    pub(crate) fn with_readme(mut self, name: Option<&str>, content: &str) -> Self {
        self.readme_name = name.map(String::from);
        self.readme = content.to_string();
        self
    }

    pub(crate) fn with_files(mut self, records: &[&str]) -> Self {
        self.files = records.iter().copied().filter_map(parse_tree_record).collect();
        self
    }
}

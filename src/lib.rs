//! Static HTML snapshots of git repositories with a shared index.

mod assets;
pub mod command;
pub mod components;
mod config;
mod diff;
mod git;
mod highlight;
pub mod index;
pub mod logging;
mod markdown;
pub mod pages;
mod site;
mod util;

pub use assets::stylesheet;
pub use command::{CommandRunner, SystemRunner};
pub use config::{Config, DEFAULT_THEME};
pub use diff::highlight_diff;
pub use git::{
    COMMIT_LIMIT, CommitEntry, DIRECTORY_SIZE, Extractor, FileEntry, RefEntry, RepoMetadata,
    Repository, parse_log_record, parse_ref_line, parse_tree_record,
};
pub use highlight::Highlighter;
pub use index::{RepoIndex, RepoSummary, Upsert, update_main_index};
pub use markdown::{LinkResolver, MarkdownRenderer};
pub use site::{GenerationStats, RunReport, Site, run};

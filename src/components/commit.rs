//! Commit metadata display components

use maud::{Markup, html};

use crate::git::CommitEntry;

/// Renders author and date line for a commit.
pub fn commit_meta(commit: &CommitEntry) -> Markup {
    html! {
        span class="meta" {
            (commit.author()) " committed on " (commit.date())
        }
    }
}

/// Renders abbreviated hash linking to the commit page, full hash as tooltip.
pub fn commit_link(commit: &CommitEntry, base_path: &str) -> Markup {
    html! {
        a href=(format!("{}commit/{}.html", base_path, commit.hash())) title=(commit.hash()) {
            code { (commit.short_hash()) }
        }
    }
}

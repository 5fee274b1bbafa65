//! Commit log page

use maud::{Markup, html};

use crate::components::commit::{commit_link, commit_meta};
use crate::components::layout::page_wrapper;
use crate::components::nav::{Section, repo_header};
use crate::git::Repository;
use crate::pages::PageContext;

/// Generates the commit log with full messages and diffstats
///
/// # Arguments
///
/// * `repo`: Extracted repository
///
/// # Returns
///
/// Rendered HTML markup for `log.html`
pub fn generate(repo: &Repository) -> Markup {
    let ctx = PageContext::repo_page("Log", "");

    page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, Some(Section::Log)))
            main {
                @if repo.commits().is_empty() {
                    p class="empty-state" { "No commits found" }
                }
                @for commit in repo.commits() {
                    article class="log-entry" {
                        div {
                            (commit_link(commit, &ctx.base_path))
                            " "
                            span class="subject" { (commit.subject()) }
                        }
                        (commit_meta(commit))
                        @if !commit.body().is_empty() {
                            pre class="body" { (commit.body()) }
                        }
                        @if !commit.stats().is_empty() {
                            pre class="stats" { (commit.stats()) }
                        }
                    }
                }
            }
        },
    )
}

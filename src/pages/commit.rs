//! Single commit page

use maud::{Markup, PreEscaped, html};

use crate::components::commit::commit_meta;
use crate::components::layout::page_wrapper;
use crate::components::nav::repo_header;
use crate::diff::highlight_diff;
use crate::git::{CommitEntry, Repository};
use crate::pages::PageContext;

/// Generates the page for one commit with its highlighted diff
///
/// # Arguments
///
/// * `repo`: Extracted repository
/// * `commit`: Commit being rendered
/// * `diff`: Raw `git show` output for the commit
///
/// # Returns
///
/// Rendered HTML markup for `commit/<hash>.html`
pub fn generate(repo: &Repository, commit: &CommitEntry, diff: &str) -> Markup {
    let ctx = PageContext::repo_page(commit.short_hash(), "../");

    page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, None))
            main {
                h2 { (commit.subject()) }
                p { code { (commit.hash()) } }
                (commit_meta(commit))
                @if !commit.body().is_empty() {
                    pre class="body" { (commit.body()) }
                }
                @if !commit.files().is_empty() {
                    h3 { "Changed files" }
                    ul class="changed-files" {
                        @for path in commit.files() {
                            li { (path) }
                        }
                    }
                }
                @if !commit.stats().is_empty() {
                    pre class="stats" { (commit.stats()) }
                }
                pre class="diff" { (PreEscaped(highlight_diff(diff))) }
            }
        },
    )
}

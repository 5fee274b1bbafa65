//! Commits table page

use maud::{Markup, html};

use crate::components::commit::commit_link;
use crate::components::layout::page_wrapper;
use crate::components::nav::{Section, repo_header};
use crate::git::Repository;
use crate::pages::PageContext;

/// Generates a compact table of recent commits
///
/// Commits appear newest first, one row each with date, hash link,
/// author, subject and number of touched files.
///
/// # Arguments
///
/// * `repo`: Extracted repository
///
/// # Returns
///
/// Rendered HTML markup for `commits.html`
pub fn generate(repo: &Repository) -> Markup {
    let ctx = PageContext::repo_page("Commits", "");

    page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, Some(Section::Commits)))
            main {
                @if repo.commits().is_empty() {
                    p class="empty-state" { "No commits found" }
                } @else {
                    table class="commits" {
                        thead {
                            tr { th { "Date" } th { "Commit" } th { "Author" } th { "Subject" } th { "Files" } }
                        }
                        tbody {
                            @for commit in repo.commits() {
                                tr {
                                    td { (commit.date()) }
                                    td class="hash" { (commit_link(commit, &ctx.base_path)) }
                                    td { (commit.author()) }
                                    td { (commit.subject()) }
                                    td class="num" { (commit.files().len()) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

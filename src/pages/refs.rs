//! References page

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::{Section, repo_header};
use crate::git::Repository;
use crate::pages::PageContext;

/// Generates the list of branches and tags
///
/// # Arguments
///
/// * `repo`: Extracted repository
///
/// # Returns
///
/// Rendered HTML markup for `refs.html`
pub fn generate(repo: &Repository) -> Markup {
    let ctx = PageContext::repo_page("Refs", "");

    page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, Some(Section::Refs)))
            main {
                @if repo.refs().is_empty() {
                    p class="empty-state" { "No references" }
                } @else {
                    table class="refs" {
                        thead {
                            tr { th { "Name" } th { "Type" } th { "Target" } }
                        }
                        tbody {
                            @for entry in repo.refs() {
                                tr {
                                    td { (entry.name()) }
                                    td { (entry.kind()) }
                                    td class="hash" title=(entry.hash()) { (entry.short_hash()) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

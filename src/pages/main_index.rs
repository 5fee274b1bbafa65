//! Aggregate index page listing every generated repository

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::index::RepoIndex;
use crate::pages::PageContext;
use crate::util::encode_path;

/// Generates the aggregate `index.html` from the persisted index
///
/// # Arguments
///
/// * `index`: Repository summaries in display order
///
/// # Returns
///
/// Rendered HTML markup
pub fn generate(index: &RepoIndex) -> Markup {
    let ctx = PageContext::aggregate("Repositories");

    page_wrapper(
        &ctx,
        html! {
            header class="repo-header" {
                h1 { "Repositories" }
            }
            main {
                @if index.is_empty() {
                    p class="empty-state" { "No repositories generated yet" }
                } @else {
                    table class="repositories" {
                        thead {
                            tr { th { "Name" } th { "Description" } th { "Last commit" } th { "URL" } }
                        }
                        tbody {
                            @for repo in index.repos() {
                                tr {
                                    td { a href=(format!("{}/index.html", encode_path(repo.dir()))) { (repo.name()) } }
                                    td { (repo.description()) }
                                    td { (repo.last_commit()) }
                                    td {
                                        @if !repo.url().is_empty() {
                                            code { (repo.url()) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

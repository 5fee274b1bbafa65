//! File listing page (repository index)

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::{Section, repo_header};
use crate::git::Repository;
use crate::pages::PageContext;
use crate::util::encode_path;

/// Generates the repository landing page listing every tree entry
///
/// Blob entries link to their file page; directories and submodules are
/// listed without a link. Entries appear in model order (sorted by path).
///
/// # Arguments
///
/// * `repo`: Extracted repository
///
/// # Returns
///
/// Rendered HTML markup for `index.html`
pub fn generate(repo: &Repository) -> Markup {
    let ctx = PageContext::repo_page("Files", "");

    page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, Some(Section::Files)))
            main {
                @if repo.files().is_empty() {
                    p class="empty-state" { "No files in this repository" }
                } @else {
                    table class="files" {
                        thead {
                            tr { th { "Mode" } th { "Name" } th { "Size" } }
                        }
                        tbody {
                            @for file in repo.files() {
                                tr {
                                    td class="mode" { (file.mode()) }
                                    td {
                                        @if file.is_blob() {
                                            a href=(format!("{}file/{}.html", ctx.base_path, encode_path(file.path()))) { (file.path()) }
                                        } @else {
                                            (file.path())
                                        }
                                    }
                                    td class="num" { (file.size()) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

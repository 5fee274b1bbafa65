//! File content page

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::repo_header;
use crate::git::{FileEntry, Repository};
use crate::highlight::Highlighter;
use crate::pages::PageContext;
use crate::util::file_base_path;

/// Generates the page showing one file at HEAD
///
/// Content is syntax highlighted with line numbers. Content with NUL
/// bytes is treated as binary and not shown.
///
/// # Arguments
///
/// * `repo`: Extracted repository
/// * `file`: Entry being rendered
/// * `content`: File content at HEAD
/// * `highlighter`: Shared syntax highlighter
///
/// # Returns
///
/// Rendered HTML markup for `file/<path>.html`
///
/// # Errors
///
/// Returns error if syntax highlighting fails
pub fn generate(
    repo: &Repository,
    file: &FileEntry,
    content: &str,
    highlighter: &Highlighter,
) -> Result<Markup> {
    let ctx = PageContext::repo_page(file.path(), file_base_path(file.path()));

    let highlighted = if is_binary(content) {
        None
    } else {
        Some(
            highlighter
                .highlight(content, file.path())
                .with_context(|| format!("Failed to highlight {}", file.path()))?,
        )
    };

    let line_numbers = (1..=content.lines().count())
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, None))
            main {
                h2 { (file.path()) }
                p class="meta" { (file.mode()) " · " (file.size()) " bytes" }
                @match highlighted {
                    Some(code) => {
                        div class="blob" {
                            pre class="line-numbers" { (line_numbers) }
                            pre class="code" { (PreEscaped(code)) }
                        }
                    },
                    None => {
                        p class="empty-state" { "Binary file not shown" }
                    },
                }
            }
        },
    ))
}

fn is_binary(content: &str) -> bool {
    content.contains('\0')
}

//! README page

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::{Section, repo_header};
use crate::git::Repository;
use crate::markdown::MarkdownRenderer;
use crate::pages::PageContext;

/// Generates the README page
///
/// READMEs read from a `.md` file are rendered as GitHub Flavored
/// Markdown, anything else is shown as preformatted text. A repository
/// without README gets a page with an empty state note.
///
/// # Arguments
///
/// * `repo`: Extracted repository
/// * `renderer`: Markdown renderer with link resolution for top level pages
///
/// # Returns
///
/// Rendered HTML markup for `readme.html`
///
/// # Errors
///
/// Returns error if markdown rendering fails
pub fn generate(repo: &Repository, renderer: &MarkdownRenderer<'_>) -> Result<Markup> {
    let ctx = PageContext::repo_page("README", "");

    let rendered = match repo.readme_name() {
        Some(name) if is_markdown(name) && !repo.readme().is_empty() => Some(
            renderer
                .render(repo.readme())
                .with_context(|| format!("Failed to render {}", name))?,
        ),
        _ => None,
    };

    Ok(page_wrapper(
        &ctx,
        html! {
            (repo_header(repo, &ctx.base_path, Some(Section::Readme)))
            main {
                @if repo.readme().is_empty() {
                    p class="empty-state" { "No README found" }
                } @else {
                    @match rendered {
                        Some(html) => {
                            div class="readme markdown" { (PreEscaped(html)) }
                        },
                        None => {
                            div class="readme" { pre { (repo.readme()) } }
                        },
                    }
                }
            }
        },
    ))
}

fn is_markdown(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".md")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::sample_repository;

    #[test]
    fn test_markdown_readme_rendered() {
        // Arrange
        let repo = sample_repository("demo", "Demo");
        let renderer = MarkdownRenderer::with_link_resolver("");

        // Act
        let html = generate(&repo, &renderer).expect("Should render").into_string();

        // Assert
        assert!(html.contains("<h1>Demo</h1>"), "Got: {}", html);
        assert!(html.contains("href=\"file/src/main.rs.html\""), "Relative link resolved");
    }

    #[test]
    fn test_plain_readme_preformatted() {
        // Arrange
        let repo = sample_repository("demo", "Demo").with_readme(Some("README"), "# not a heading <b>");
        let renderer = MarkdownRenderer::new();

        // Act
        let html = generate(&repo, &renderer).expect("Should render").into_string();

        // Assert
        assert!(html.contains("<pre># not a heading &lt;b&gt;</pre>"), "Got: {}", html);
    }

    #[test]
    fn test_missing_readme_empty_page() {
        let repo = sample_repository("demo", "Demo").with_readme(None, "");
        let renderer = MarkdownRenderer::new();
        let html = generate(&repo, &renderer).expect("Should render").into_string();
        assert!(html.contains("No README found"));
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown("README.md"));
        assert!(is_markdown("readme.MD"));
        assert!(!is_markdown("README.txt"));
        assert!(!is_markdown("README"));
    }
}

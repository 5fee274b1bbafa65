//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use crate::pages::PageContext;

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, html, head, and container structure across
/// all page types. The caller provides page specific body content.
///
/// # Arguments
///
/// * `ctx`: Title and stylesheet location of the page
/// * `body`: Page specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(ctx: &PageContext, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (ctx.title) }
                link rel="stylesheet" href=(ctx.style_path);
            }
            body {
                div class="container" {
                    (body)
                }
                footer {
                    "Generated by stagen"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wrapper_structure() {
        // Arrange
        let ctx = PageContext::repo_page("Log", "");

        // Act
        let html = page_wrapper(&ctx, html! { p { "body text" } }).into_string();

        // Assert
        assert!(html.starts_with("<!DOCTYPE html>"), "Should start with doctype");
        assert!(html.contains("<title>Log</title>"));
        assert!(html.contains("href=\"../style.css\""));
        assert!(html.contains("<p>body text</p>"));
    }

    #[test]
    fn test_page_wrapper_escapes_title() {
        let ctx = PageContext::repo_page("a<b>", "");
        let html = page_wrapper(&ctx, html! {}).into_string();
        assert!(html.contains("<title>a&lt;b&gt;</title>"), "Got: {}", html);
    }
}

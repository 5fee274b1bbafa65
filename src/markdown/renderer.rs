//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::Options;
use syntect::html::ClassedHTMLGenerator;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::LinkResolver;
use crate::highlight::CLASS_STYLE;
use crate::util::escape_html;

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Provides GFM extensions including tables, strikethrough, autolinks,
/// task lists and footnotes. Raw HTML in the source is not passed through.
/// Fenced code blocks with a language are highlighted with syntect using
/// the same class names as file pages. Optionally resolves relative links
/// to generated file pages when configured with a [`LinkResolver`].
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    syntax_set: SyntaxSet,
    link_resolver: Option<LinkResolver>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        options.parse.smart = true;

        // README content comes from arbitrary repositories
        options.render.unsafe_ = false;

        Self {
            options,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            link_resolver: None,
        }
    }

    /// Creates renderer rewriting relative links for a page located
    /// `base_path` below the repository output root.
    pub fn with_link_resolver(base_path: impl Into<String>) -> Self {
        let mut renderer = Self::new();
        renderer.link_resolver = Some(LinkResolver::new(base_path));
        renderer
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting of a code block fails
    pub fn render(&self, content: &str) -> Result<String> {
        let mut html = comrak::markdown_to_html(content, &self.options);

        if let Some(resolver) = &self.link_resolver {
            html = rewrite_links(&html, resolver);
        }

        self.highlight_code_blocks(&html)
    }

    /// Replaces the text of `<code class="language-X">` blocks produced by
    /// comrak with syntect highlighted HTML.
    fn highlight_code_blocks(&self, html: &str) -> Result<String> {
        const OPEN: &str = "<code class=\"language-";
        const CLOSE: &str = "</code>";

        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;
        let mut search_pos = 0;

        while let Some(found) = html[search_pos..].find(OPEN) {
            let code_start = search_pos + found;
            let lang_start = code_start + OPEN.len();

            let Some(lang_len) = html[lang_start..].find('"') else {
                break;
            };
            let lang_end = lang_start + lang_len;
            let language = &html[lang_start..lang_end];

            let Some(tag_len) = html[lang_end..].find('>') else {
                break;
            };
            let content_start = lang_end + tag_len + 1;

            let Some(content_len) = html[content_start..].find(CLOSE) else {
                break;
            };
            let content_end = content_start + content_len;

            let code = html_decode(&html[content_start..content_end]);
            let highlighted = self
                .highlight_code(&code, language)
                .with_context(|| format!("Failed to highlight {} code block", language))?;

            result.push_str(&html[last_end..code_start]);
            result.push_str(OPEN);
            result.push_str(language);
            result.push_str("\">");
            result.push_str(&highlighted);
            result.push_str(CLOSE);

            last_end = content_end + CLOSE.len();
            search_pos = last_end;
        }

        result.push_str(&html[last_end..]);
        Ok(result)
    }

    fn highlight_code(&self, code: &str, language: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language));

        let Some(syntax) = syntax else {
            return Ok(escape_html(code));
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites `href` of `<a>` and `src` of `<img>` tags through `resolver`.
///
/// Links the resolver rejects are kept as written.
fn rewrite_links(html: &str, resolver: &LinkResolver) -> String {
    let mut result = String::with_capacity(html.len());
    let mut pos = 0;

    while pos < html.len() {
        let link_pos = html[pos..].find("<a ");
        let img_pos = html[pos..].find("<img ");

        let (tag_start, is_image) = match (link_pos, img_pos) {
            (Some(l), Some(i)) if l < i => (pos + l, false),
            (Some(l), None) => (pos + l, false),
            (_, Some(i)) => (pos + i, true),
            (None, None) => {
                result.push_str(&html[pos..]);
                break;
            }
        };

        result.push_str(&html[pos..tag_start]);

        let attr = if is_image { "src=\"" } else { "href=\"" };
        let tag_end = html[tag_start..]
            .find('>')
            .map_or(html.len(), |p| tag_start + p);
        let attr_start = match html[tag_start..tag_end].find(attr) {
            Some(p) => tag_start + p + attr.len(),
            None => {
                result.push_str(&html[tag_start..tag_start + 1]);
                pos = tag_start + 1;
                continue;
            }
        };

        let attr_end = match html[attr_start..].find('"') {
            Some(p) => attr_start + p,
            None => {
                result.push_str(&html[tag_start..]);
                break;
            }
        };

        let url = html_decode(&html[attr_start..attr_end]);
        let resolved = match resolver.resolve(&url, is_image) {
            Ok(resolved) => escape_html(&resolved),
            Err(_) => html[attr_start..attr_end].to_string(),
        };

        result.push_str(&html[tag_start..attr_start]);
        result.push_str(&resolved);

        pos = attr_end;
    }

    result
}

/// Decodes the entities comrak emits in text and attributes.
fn html_decode(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

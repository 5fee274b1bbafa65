//! Syntax highlighting for file pages with syntect.

use anyhow::{Context, Result};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::util::escape_html;

/// Class prefix shared by file pages and README code blocks.
pub(crate) const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Syntax highlighter holding loaded syntax and theme definitions.
///
/// Loading the definitions is the expensive part, so one instance is
/// created per run and shared by every page.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Creates highlighter using one of syntect's bundled themes.
    ///
    /// # Errors
    ///
    /// Returns error if `theme` is not a bundled theme name.
    pub fn with_theme(theme: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let names = themes.keys().cloned().collect::<Vec<_>>().join(", ");
        let theme = themes
            .remove(theme)
            .with_context(|| format!("Unknown theme '{}', available: {}", theme, names))?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlights `code` using the syntax matching `path`.
    ///
    /// The syntax is chosen by file extension, then by first line (shebangs,
    /// modelines). Unknown syntaxes fall back to escaped plain text.
    ///
    /// # Returns
    ///
    /// HTML fragment of `<span class="hl-...">` elements, newlines preserved
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails on a line.
    pub fn highlight(&self, code: &str, path: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let file_name = path.rsplit('/').next().unwrap_or(path);
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(file_name);
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .or_else(|| {
                let first_line = code.lines().next().unwrap_or("");
                self.syntax_set.find_syntax_by_first_line(first_line)
            });

        let Some(syntax) = syntax else {
            return Ok(escape_html(code));
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .with_context(|| format!("Failed to highlight {}", path))?;
        }

        Ok(generator.finalize())
    }

    /// Stylesheet rules for the highlight classes in the selected theme.
    ///
    /// # Errors
    ///
    /// Returns error if the theme cannot be converted to CSS.
    pub fn css(&self) -> Result<String> {
        css_for_theme_with_class_style(&self.theme, CLASS_STYLE)
            .context("Failed to generate theme stylesheet")
    }
}

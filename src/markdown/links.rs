//! Link resolution for repository internal references.

use anyhow::{Result, bail};
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

use crate::util::encode_path;

/// Resolves relative links in the README to generated file pages.
///
/// A README link such as `docs/guide.md` points at a file in the
/// repository; on the generated site that file lives at
/// `file/docs/guide.md.html`. External URLs, anchors and images are left
/// alone since only HTML pages are generated.
pub struct LinkResolver {
    base_path: String,
}

impl LinkResolver {
    /// Creates resolver for a page located `base_path` below the
    /// repository output root (empty for top level pages).
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolves link to a site relative URL.
    ///
    /// - Absolute URLs and other schemes (`mailto:`) are unchanged
    /// - Anchor links (`#section`) are unchanged
    /// - Image sources are unchanged
    /// - Directory links (`docs/`) resolve to the file listing
    /// - File links resolve to `file/<path>.html`, fragment preserved and
    ///   the path percent encoded (already encoded links are decoded first)
    ///
    /// # Errors
    ///
    /// Returns error if the link escapes the repository root.
    pub fn resolve(&self, link: &str, is_image: bool) -> Result<String> {
        if is_image || link.starts_with('#') || link.starts_with("//") || has_scheme(link) {
            return Ok(link.to_string());
        }

        let (path, fragment) = match link.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (link, None),
        };

        let decoded = percent_decode_str(path).decode_utf8_lossy();
        let normalized = normalize_path(Path::new(decoded.trim_start_matches('/')))?;
        let Some(path_str) = normalized.to_str() else {
            bail!("Link is not valid UTF8: {}", link);
        };

        let mut resolved = if path.ends_with('/') || path_str.is_empty() {
            format!("{}index.html", self.base_path)
        } else {
            format!("{}file/{}.html", self.base_path, encode_path(path_str))
        };

        if let Some(fragment) = fragment {
            resolved.push('#');
            resolved.push_str(fragment);
        }

        Ok(resolved)
    }
}

fn has_scheme(link: &str) -> bool {
    match link.split_once(':') {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Normalizes path by resolving `..` and `.` components.
///
/// # Errors
///
/// Returns error if path attempts to escape repository root.
fn normalize_path(path: &Path) -> Result<PathBuf> {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(c) => components.push(c),
            Component::ParentDir => {
                if components.pop().is_none() {
                    bail!("Path escapes repository root: {}", path.display());
                }
            }
            _ => {}
        }
    }

    Ok(components.iter().collect())
}

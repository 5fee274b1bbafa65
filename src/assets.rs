//! Stylesheet bundling

use crate::highlight::Highlighter;

const BASE: &str = include_str!("../assets/style.css");

/// Builds the shared stylesheet: base rules followed by the highlight
/// theme rules.
///
/// Theme conversion failures only drop the highlight colors; the base
/// rules are always present.
pub fn stylesheet(highlighter: &Highlighter) -> String {
    let theme = highlighter.css().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "highlight theme stylesheet unavailable");
        String::new()
    });

    [BASE, theme.as_str()].join("\n")
}

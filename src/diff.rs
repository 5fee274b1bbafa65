//! Unified diff highlighting.

use crate::util::escape_html;

/// CSS class wrapping added lines.
pub const ADDED_CLASS: &str = "i";

/// CSS class wrapping removed lines.
pub const REMOVED_CLASS: &str = "d";

/// Marks added and removed lines of a unified diff.
///
/// Every line is HTML escaped first. Lines starting with `+` are then
/// wrapped in `<span class="i">`, lines starting with `-` in
/// `<span class="d">`, and everything else is left unwrapped. Empty lines
/// pass through untouched. Line structure is preserved so the result can
/// be placed in a `<pre>` block as is.
///
/// # Arguments
///
/// * `diff`: Raw `git show` / `git diff` output
///
/// # Returns
///
/// HTML fragment with one output line per input line
///
/// # Examples
///
/// ```
/// use stagen::highlight_diff;
///
/// let html = highlight_diff("+<b>\n-x\n ctx");
/// assert_eq!(
///     html,
///     "<span class=\"i\">+&lt;b&gt;</span>\n<span class=\"d\">-x</span>\n ctx"
/// );
/// ```
pub fn highlight_diff(diff: &str) -> String {
    diff.split('\n')
        .map(highlight_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn highlight_line(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let escaped = escape_html(line);
    match line.as_bytes()[0] {
        b'+' => wrap(ADDED_CLASS, &escaped),
        b'-' => wrap(REMOVED_CLASS, &escaped),
        _ => escaped,
    }
}

fn wrap(class: &str, escaped: &str) -> String {
    format!("<span class=\"{}\">{}</span>", class, escaped)
}

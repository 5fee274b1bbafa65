//! Utility functions for stagen

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escapes HTML special characters.
///
/// Covers `&`, `<`, `>`, `"` and `'`, which makes the result safe both as
/// element content and inside quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent encodes each segment of a slash separated repository path for
/// use in an `href`.
///
/// Slashes are kept as separators; `#`, `?`, `%`, spaces and non ASCII
/// bytes inside segments are encoded, so the link reaches the page written
/// under the raw path.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative prefix leading from a file page back to the repository root.
///
/// A page for `a/b.rs` lives at `file/a/b.rs.html`, two levels below the
/// repository output directory, so it needs `../../`.
///
/// # Arguments
///
/// * `path`: Repository relative file path
///
/// # Returns
///
/// String of `../` segments, one per directory level plus the `file/` level
pub fn file_base_path(path: &str) -> String {
    let depth = path.matches('/').count() + 1;
    "../".repeat(depth)
}

//! Page generation modules for different view types
//!
//! Each page module turns the extracted [`Repository`](crate::git::Repository)
//! into Maud markup for one output file, using the shared components for
//! layout and navigation.

pub mod commit;
pub mod commits;
pub mod file;
pub mod files;
pub mod log;
pub mod main_index;
pub mod readme;
pub mod refs;

/// Presentation settings of a single page.
///
/// Computed per page and passed alongside the repository, which itself is
/// never modified for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Document title.
    pub title: String,
    /// Relative prefix from the page to the repository output root.
    pub base_path: String,
    /// Relative location of the shared stylesheet.
    pub style_path: String,
}

impl PageContext {
    /// Context for a page inside a repository output directory.
    ///
    /// The stylesheet lives in the aggregate root, one level above the
    /// repository root.
    pub fn repo_page(title: impl Into<String>, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        Self {
            title: title.into(),
            style_path: format!("{}../style.css", base_path),
            base_path,
        }
    }

    /// Context for the aggregate index page in the aggregate root.
    pub fn aggregate(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_path: String::new(),
            style_path: "style.css".to_string(),
        }
    }
}

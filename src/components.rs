//! Reusable HTML components for page generation
//!
//! Maud component functions shared by the repository pages and the
//! aggregate index: the document layout, the repository header with its
//! navigation bar, and commit metadata lines.

pub mod commit;
pub mod layout;
pub mod nav;

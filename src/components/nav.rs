//! Repository header and navigation component

use maud::{Markup, html};

use crate::git::Repository;

/// Top level repository page the navigation bar can mark as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Files,
    Log,
    Commits,
    Refs,
    Readme,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Files,
        Section::Log,
        Section::Commits,
        Section::Refs,
        Section::Readme,
    ];

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Files => "Files",
            Section::Log => "Log",
            Section::Commits => "Commits",
            Section::Refs => "Refs",
            Section::Readme => "README",
        }
    }

    /// Page file name relative to the repository output root.
    pub fn file_name(self) -> &'static str {
        match self {
            Section::Files => "index.html",
            Section::Log => "log.html",
            Section::Commits => "commits.html",
            Section::Refs => "refs.html",
            Section::Readme => "readme.html",
        }
    }
}

/// Renders repository name, description, clone URL and navigation bar
///
/// # Arguments
///
/// * `repo`: Repository being rendered
/// * `base_path`: Relative prefix from the current page to the repository root
/// * `active`: Section to highlight, None on file and commit pages
///
/// # Returns
///
/// Header markup
pub fn repo_header(repo: &Repository, base_path: &str, active: Option<Section>) -> Markup {
    html! {
        header class="repo-header" {
            div class="breadcrumb" {
                a href=(format!("{}../index.html", base_path)) { "Repositories" }
                " / "
            }
            h1 { (repo.name()) }
            @if !repo.description().is_empty() {
                p class="repo-desc" { (repo.description()) }
            }
            @if !repo.url().is_empty() {
                p class="repo-url" { "git clone " code { (repo.url()) } }
            }
            nav class="repo-nav" {
                @for section in Section::ALL {
                    @let href = format!("{}{}", base_path, section.file_name());
                    @if Some(section) == active {
                        a class="active" href=(href) { (section.label()) }
                    } @else {
                        a href=(href) { (section.label()) }
                    }
                }
            }
        }
    }
}

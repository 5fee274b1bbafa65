//! Integration tests for stagen.
//!
//! Tests extraction and generation against real git repositories.

mod common;

use anyhow::Result;
use stagen::{Extractor, RepoIndex, RepoMetadata, SystemRunner, run};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn metadata(dir: &str) -> RepoMetadata {
    RepoMetadata {
        name: "Demo".to_string(),
        description: String::new(),
        url: String::new(),
        dir: dir.to_string(),
    }
}

fn count_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            count += count_files(&path)?;
        } else {
            count += 1;
        }
    }
    Ok(count)
}

/// Tests extraction of files, commits, refs and README from a real repository.
#[test]
fn test_extract_demo_repository() -> Result<()> {
    // Arrange
    let (repo, hashes) = common::create_demo_repo()?;
    let runner = SystemRunner;
    let extractor = Extractor::new(&runner, repo.path());

    // Act
    let model = extractor.extract(metadata("demo"))?;

    // Assert
    let paths: Vec<&str> = model.files().iter().map(|f| f.path()).collect();
    assert_eq!(paths, vec!["README.md", "a.txt", "src", "src/lib.rs"]);
    assert_eq!(model.files().iter().filter(|f| f.is_blob()).count(), 3);

    let src = &model.files()[2];
    assert!(src.is_directory(), "src should be a tree entry");
    assert_eq!(src.size(), stagen::DIRECTORY_SIZE);
    assert_eq!(model.files()[1].size(), "6", "a.txt holds six bytes");

    assert_eq!(model.commits().len(), 2);
    let newest = &model.commits()[0];
    assert_eq!(newest.hash(), hashes[1], "Newest commit first");
    assert_eq!(newest.subject(), "Add library");
    assert_eq!(newest.body(), "First body line\nSecond | piped line");
    assert_eq!(newest.author(), "Test User");
    assert_eq!(newest.files(), ["src/lib.rs".to_string()]);
    assert!(newest.stats().contains("src/lib.rs"), "Stats: {}", newest.stats());
    assert_eq!(model.commits()[1].hash(), hashes[0]);
    assert!(model.commits()[1].body().is_empty());

    assert!(model.refs().iter().any(|r| r.name() == "main" && r.hash() == hashes[1]));
    assert!(model.refs().iter().any(|r| r.name() == "v0.1"));

    assert_eq!(model.readme_name(), Some("README.md"));
    assert!(model.readme().starts_with("# Demo"));
    assert!(!model.last_commit().is_empty());

    Ok(())
}

/// Tests README lookup falls back through candidate names.
#[test]
fn test_extract_readme_fallback() -> Result<()> {
    // Arrange
    let repo = common::create_test_repo()?;
    common::write_file(repo.path(), "readme.txt", "plain readme")?;
    common::write_file(repo.path(), "main.c", "int main(void) { return 0; }\n")?;
    common::git_add(repo.path(), &["."])?;
    common::git_commit(repo.path(), "Initial")?;
    let runner = SystemRunner;

    // Act
    let model = Extractor::new(&runner, repo.path()).extract(metadata("c"))?;

    // Assert
    assert_eq!(model.readme_name(), Some("readme.txt"));
    assert_eq!(model.readme(), "plain readme");

    Ok(())
}

/// Tests a repository without README still extracts.
#[test]
fn test_extract_without_readme() -> Result<()> {
    // Arrange
    let repo = common::create_test_repo()?;
    common::write_file(repo.path(), "notes.txt", "nothing here")?;
    common::git_add(repo.path(), &["."])?;
    common::git_commit(repo.path(), "Initial")?;
    let runner = SystemRunner;

    // Act
    let model = Extractor::new(&runner, repo.path()).extract(metadata("bare"))?;

    // Assert
    assert_eq!(model.readme_name(), None);
    assert!(model.readme().is_empty());

    Ok(())
}

/// Tests extraction fails for a repository without commits.
#[test]
fn test_extract_empty_repository_fails() -> Result<()> {
    let repo = common::create_test_repo()?;
    let runner = SystemRunner;

    let result = Extractor::new(&runner, repo.path()).extract(metadata("empty"));

    assert!(result.is_err(), "HEAD does not exist yet");
    Ok(())
}

/// Tests non ASCII paths are listed unescaped.
#[test]
fn test_extract_unicode_path() -> Result<()> {
    // Arrange
    let repo = common::create_test_repo()?;
    common::write_file(repo.path(), "docs/café.md", "menu")?;
    common::git_add(repo.path(), &["."])?;
    common::git_commit(repo.path(), "Add menu")?;
    let runner = SystemRunner;
    let extractor = Extractor::new(&runner, repo.path());

    // Act
    let model = extractor.extract(metadata("unicode"))?;

    // Assert
    assert!(model.files().iter().any(|f| f.path() == "docs/café.md"));
    assert_eq!(model.commits()[0].files(), ["docs/café.md".to_string()]);
    assert_eq!(extractor.file_content("docs/café.md")?, "menu");

    Ok(())
}

/// Tests paths git would quote (quotes, backslashes, `#`) survive extraction
/// and generation.
#[test]
fn test_run_with_special_character_paths() -> Result<()> {
    // Arrange
    let repo = common::create_test_repo()?;
    common::write_file(repo.path(), "say \"hi\".txt", "hi")?;
    common::write_file(repo.path(), "back\\slash.txt", "slash")?;
    common::write_file(repo.path(), "notes/a#b.md", "hash")?;
    common::write_file(repo.path(), "ok.txt", "ok")?;
    common::git_add(repo.path(), &["."])?;
    common::git_commit(repo.path(), "Add tricky names")?;
    let site = TempDir::new()?;
    let out = site.path().join("tricky");
    let config = common::config(repo.path(), &out, "Tricky");

    // Act
    let report = run(&config, &SystemRunner)?;

    // Assert
    let paths: Vec<&str> = report.repository.files().iter().map(|f| f.path()).collect();
    assert_eq!(
        paths,
        vec!["back\\slash.txt", "notes", "notes/a#b.md", "ok.txt", "say \"hi\".txt"]
    );
    let mut changed = report.repository.commits()[0].files().to_vec();
    changed.sort();
    assert_eq!(changed, ["back\\slash.txt", "notes/a#b.md", "ok.txt", "say \"hi\".txt"]);
    assert_eq!(report.stats.file_pages, 4);
    assert!(out.join("file/say \"hi\".txt.html").is_file());
    assert!(out.join("file/back\\slash.txt.html").is_file());
    assert!(out.join("file/notes/a#b.md.html").is_file());

    let listing = fs::read_to_string(out.join("index.html"))?;
    assert!(listing.contains("href=\"file/notes/a%23b.md.html\""), "Links are encoded");

    Ok(())
}

/// Tests a full run writes the repository layout and a single index entry.
#[test]
fn test_run_generates_site() -> Result<()> {
    // Arrange
    let (repo, hashes) = common::create_demo_repo()?;
    let site = TempDir::new()?;
    let out = site.path().join("demo");
    let config = common::config(repo.path(), &out, "Demo");

    // Act
    let report = run(&config, &SystemRunner)?;

    // Assert
    assert_eq!(report.stats.file_pages, 3);
    assert_eq!(report.stats.commit_pages, 2);

    for page in ["index.html", "log.html", "commits.html", "refs.html", "readme.html"] {
        assert!(out.join(page).is_file(), "{} should exist", page);
    }
    assert_eq!(count_files(&out.join("file"))?, 3);
    assert!(out.join("file/src/lib.rs.html").is_file());
    assert_eq!(count_files(&out.join("commit"))?, 2);
    for hash in &hashes {
        assert!(out.join(format!("commit/{}.html", hash)).is_file());
    }

    let nested = fs::read_to_string(out.join("file/src/lib.rs.html"))?;
    assert!(nested.contains("href=\"../../../style.css\""), "Nested page styles resolve");

    let readme = fs::read_to_string(out.join("readme.html"))?;
    assert!(readme.contains("href=\"file/src/lib.rs.html\""), "README links resolve");

    let index = RepoIndex::load(&site.path().join("index.json"));
    assert_eq!(index.len(), 1);
    assert_eq!(index.repos()[0].dir(), "demo");
    assert_eq!(index.repos()[0].name(), "Demo");
    assert_eq!(index.repos()[0].commit_count(), 2);
    assert!(site.path().join("index.html").is_file());
    assert!(site.path().join("style.css").is_file());

    Ok(())
}

/// Tests rerunning replaces the entry and a new key is appended.
#[test]
fn test_run_upserts_index() -> Result<()> {
    // Arrange
    let (repo, _) = common::create_demo_repo()?;
    let site = TempDir::new()?;
    let demo = common::config(repo.path(), &site.path().join("demo"), "Demo");
    let other = common::config(repo.path(), &site.path().join("other"), "Other");

    // Act
    run(&demo, &SystemRunner)?;
    run(&demo, &SystemRunner)?;
    let after_rerun = RepoIndex::load(&site.path().join("index.json"));
    let report = run(&other, &SystemRunner)?;

    // Assert
    assert_eq!(after_rerun.len(), 1, "Rerun must not duplicate");
    let dirs: Vec<&str> = report.index.repos().iter().map(|r| r.dir()).collect();
    assert_eq!(dirs, vec!["demo", "other"]);
    assert_eq!(RepoIndex::load(&site.path().join("index.json")), report.index);

    let page = fs::read_to_string(site.path().join("index.html"))?;
    assert!(page.contains("demo/index.html"));
    assert!(page.contains("other/index.html"));

    Ok(())
}

/// Tests a run clears stale pages from a previous generation.
#[test]
fn test_run_replaces_previous_output() -> Result<()> {
    // Arrange
    let (repo, _) = common::create_demo_repo()?;
    let site = TempDir::new()?;
    let out = site.path().join("demo");
    common::write_file(&out, "file/removed.txt.html", "stale")?;
    let config = common::config(repo.path(), &out, "Demo");

    // Act
    run(&config, &SystemRunner)?;

    // Assert
    assert!(!out.join("file/removed.txt.html").exists());
    Ok(())
}

/// Tests an unknown highlight theme fails before anything is written.
#[test]
fn test_run_unknown_theme_fails() -> Result<()> {
    // Arrange
    let (repo, _) = common::create_demo_repo()?;
    let site = TempDir::new()?;
    let mut config = common::config(repo.path(), &site.path().join("demo"), "Demo");
    config.theme = "no-such-theme".to_string();

    // Act
    let result = run(&config, &SystemRunner);

    // Assert
    assert!(result.is_err());
    assert!(!site.path().join("index.json").exists(), "Nothing persisted");
    Ok(())
}

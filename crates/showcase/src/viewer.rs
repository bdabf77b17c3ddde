//! Read-only access to extracted project trees.
//!
//! Every entry point is blocking; async callers run them on the blocking
//! pool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::analysis::walk::{self, SourceFile};

/// Files considered for the source listing, in enumeration order.
pub const MAX_LISTED_FILES: usize = 20;

/// Files at or above this size are left out of the listing.
pub const MAX_VIEWABLE_BYTES: u64 = 100 * 1024;

/// Demo entry candidates in priority order.
const DEMO_ENTRIES: &[&str] = &["index.html", "app.html", "main.html", "demo.html", "home.html"];

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Project files are not available; re-analyze the project to extract them")]
    NotExtracted,

    #[error("No demo page found in the project files")]
    NoDemo,

    #[error("Cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// A source file ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewableFile {
    pub name: String,
    pub path: String,
    pub content: String,
    pub language: &'static str,
    pub size: u64,
}

/// Syntax-highlighting label for a file extension.
pub fn language_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("jsx") => "jsx",
        Some("ts") => "typescript",
        Some("tsx") => "tsx",
        Some("py") => "python",
        Some("html" | "htm") => "html",
        Some("css") => "css",
        Some("scss" | "sass") => "scss",
        Some("json") => "json",
        Some("md") => "markdown",
        Some("java") => "java",
        Some("cs") => "csharp",
        Some("php") => "php",
        Some("go") => "go",
        Some("rs") => "rust",
        Some("rb") => "ruby",
        Some("kt") => "kotlin",
        Some("swift") => "swift",
        Some("dart") => "dart",
        Some("vue") => "vue",
        Some("svelte") => "svelte",
        Some("sql") => "sql",
        Some("sh" | "bash") => "bash",
        Some("yml" | "yaml") => "yaml",
        Some("xml") => "xml",
        Some("toml") => "toml",
        _ => "text",
    }
}

fn enumerate(root: &Path) -> Result<Vec<SourceFile>, ViewerError> {
    walk::enumerate(root).map_err(|e| {
        tracing::debug!(root = %root.display(), error = %e, "Extracted tree unavailable");
        ViewerError::NotExtracted
    })
}

/// Text files from the first [`MAX_LISTED_FILES`] enumerated under `root`.
///
/// Oversized, unreadable and non-UTF-8 files are left out.
pub fn list_files(root: &Path) -> Result<Vec<ViewableFile>, ViewerError> {
    let files = enumerate(root)?;

    Ok(files
        .into_iter()
        .take(MAX_LISTED_FILES)
        .filter(|file| file.size < MAX_VIEWABLE_BYTES)
        .filter_map(|file| {
            let content = fs::read_to_string(&file.absolute).ok()?;
            let extension = file.extension();
            Some(ViewableFile {
                name: file.file_name().to_string(),
                language: language_for(extension.as_deref()),
                size: file.size,
                path: file.relative,
                content,
            })
        })
        .collect())
}

/// The demo page to serve for a project, if it has one.
///
/// Candidates are ranked by [`DEMO_ENTRIES`] priority, then by depth.
pub fn find_demo_entry(root: &Path) -> Result<Option<PathBuf>, ViewerError> {
    let files = enumerate(root)?;

    Ok(DEMO_ENTRIES.iter().find_map(|candidate| {
        files
            .iter()
            .filter(|file| file.file_name().eq_ignore_ascii_case(candidate))
            .min_by_key(|file| file.relative.matches('/').count())
            .map(|file| file.absolute.clone())
    }))
}

/// Read the demo page's HTML.
pub fn read_demo(root: &Path) -> Result<String, ViewerError> {
    let entry = find_demo_entry(root)?.ok_or(ViewerError::NoDemo)?;
    fs::read_to_string(&entry).map_err(|source| ViewerError::Read {
        path: entry,
        source,
    })
}

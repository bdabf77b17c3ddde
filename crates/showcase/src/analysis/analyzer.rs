//! Whole-tree project analysis.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::describe::describe;
use super::detector::{DetectedTechnology, detect};
use super::walk::{self, SourceFile};

/// Entry points, checked first, in priority order.
const ENTRY_POINTS: &[&str] = &[
    "index.html",
    "main.py",
    "app.py",
    "server.js",
    "index.js",
    "main.js",
    "App.jsx",
    "App.tsx",
];

/// Manifests and build files, checked after the entry points.
const MANIFESTS: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "Dockerfile",
];

const MAX_MAIN_FILES: usize = 5;

const PREVIEW_EXTENSIONS: &[&str] = &["html", "htm", "md", "txt", "png", "jpg", "jpeg", "gif", "svg"];

const MAX_PREVIEW_FILES: usize = 10;

/// Files larger than this are not read for content detection.
const MAX_CAPTURED_BYTES: u64 = 1024 * 1024;

/// Errors raised by [`analyze`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Cannot enumerate {path}: {source}")]
    Enumerate { path: PathBuf, source: io::Error },
}

/// Everything learned from an extracted source tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub description: String,
    pub technologies: Vec<DetectedTechnology>,
    pub main_files: Vec<String>,
    pub preview_files: Vec<String>,
    pub readme: Option<String>,
    pub package_manifest: Option<serde_json::Value>,
    pub requirements: Option<Vec<String>>,
    /// Every enumerated file, relative to the root.
    pub files: Vec<String>,
}

impl ProjectAnalysis {
    /// Detected technology names in ranking order.
    pub fn technology_names(&self) -> Vec<String> {
        self.technologies.iter().map(|t| t.name.clone()).collect()
    }
}

/// Analyze the tree rooted at `root`.
///
/// Blocking; run it on a blocking thread from async code.
pub fn analyze(root: &Path) -> Result<ProjectAnalysis, AnalysisError> {
    let files = walk::enumerate(root).map_err(|source| AnalysisError::Enumerate {
        path: root.to_path_buf(),
        source,
    })?;
    let paths: Vec<String> = files.iter().map(|f| f.relative.clone()).collect();

    let contents = capture_contents(&files);
    let technologies = detect(&paths, &contents);
    let description = describe(&technologies, &paths);

    let readme = top_level(&files, |name| name.eq_ignore_ascii_case("readme.md"))
        .and_then(|f| contents.get(&f.relative).cloned());
    let package_manifest = top_level(&files, |name| name == "package.json")
        .and_then(|f| contents.get(&f.relative))
        .and_then(|raw| match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "package.json is not valid JSON");
                None
            }
        });
    let requirements = top_level(&files, |name| name == "requirements.txt")
        .and_then(|f| contents.get(&f.relative))
        .map(|raw| {
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        });

    Ok(ProjectAnalysis {
        description,
        main_files: main_files(&paths),
        preview_files: preview_files(&paths),
        technologies,
        readme,
        package_manifest,
        requirements,
        files: paths,
    })
}

fn top_level(files: &[SourceFile], pred: impl Fn(&str) -> bool) -> Option<&SourceFile> {
    files
        .iter()
        .find(|f| f.is_top_level() && pred(f.file_name()))
}

/// Read every important file, skipping (and logging) the ones that fail.
fn capture_contents(files: &[SourceFile]) -> BTreeMap<String, String> {
    let mut contents = BTreeMap::new();
    for file in files.iter().filter(|f| walk::is_important(f)) {
        if file.size > MAX_CAPTURED_BYTES {
            tracing::debug!(path = %file.relative, size = file.size, "Skipping oversized file");
            continue;
        }
        match fs::read_to_string(&file.absolute) {
            Ok(text) => {
                contents.insert(file.relative.clone(), text);
            }
            Err(e) => {
                tracing::warn!(path = %file.relative, error = %e, "Cannot read file for analysis");
            }
        }
    }
    contents
}

fn main_files(paths: &[String]) -> Vec<String> {
    ENTRY_POINTS
        .iter()
        .chain(MANIFESTS)
        .filter(|candidate| paths.iter().any(|p| p.as_str() == **candidate))
        .take(MAX_MAIN_FILES)
        .map(|candidate| candidate.to_string())
        .collect()
}

fn preview_files(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter(|p| {
            walk::extension_of(p).is_some_and(|ext| PREVIEW_EXTENSIONS.contains(&ext.as_str()))
        })
        .take(MAX_PREVIEW_FILES)
        .cloned()
        .collect()
}

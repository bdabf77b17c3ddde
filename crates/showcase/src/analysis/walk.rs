//! Source tree enumeration shared by the analyzer and the source viewer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Directory names pruned from every walk: VCS metadata, dependency caches,
/// IDE state and build output.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "__pycache__",
    ".vscode",
    ".idea",
    ".next",
    "dist",
    "build",
    "target",
    "vendor",
];

/// Extensions whose contents are read for content-based detection.
pub const IMPORTANT_EXTENSIONS: &[&str] = &[
    "md", "txt", "json", "js", "ts", "jsx", "tsx", "py", "java", "cs", "php", "html", "css",
    "scss", "sass", "xml", "yaml", "yml", "toml", "ini", "cfg",
];

/// File names read regardless of extension (compared case-insensitively).
pub const IMPORTANT_FILE_NAMES: &[&str] = &[
    "readme.md",
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "pom.xml",
    "build.gradle",
    "dockerfile",
    "docker-compose.yml",
    "makefile",
    "index.html",
    "main.py",
    "app.py",
    "server.js",
    "index.js",
];

/// A regular file found under the walked root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the root, `/`-separated.
    pub relative: String,
    pub absolute: PathBuf,
    pub size: u64,
}

impl SourceFile {
    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.relative
            .rsplit('/')
            .next()
            .unwrap_or(self.relative.as_str())
    }

    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.relative)
    }

    /// Whether the file sits directly in the root.
    pub fn is_top_level(&self) -> bool {
        !self.relative.contains('/')
    }
}

pub(crate) fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether a directory name is on the ignore-list.
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}

/// Whether a file's contents are worth capturing for detection.
pub fn is_important(file: &SourceFile) -> bool {
    let name = file.file_name().to_ascii_lowercase();
    if IMPORTANT_FILE_NAMES.contains(&name.as_str()) {
        return true;
    }
    file.extension()
        .is_some_and(|ext| IMPORTANT_EXTENSIONS.contains(&ext.as_str()))
}

/// Enumerate regular files under `root`, sorted by name within each
/// directory, pruning ignored directories.
///
/// Fails only when `root` itself cannot be read; unreadable entries deeper in
/// the tree are logged and skipped.
pub fn enumerate(root: &Path) -> io::Result<Vec<SourceFile>> {
    let meta = fs::metadata(root)?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", root.display()),
        ));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_ignored_dir(&entry.file_name().to_string_lossy())
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable path during enumeration");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(SourceFile {
            relative,
            absolute: entry.path().to_path_buf(),
            size,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, body).expect("write");
    }

    #[test]
    fn test_prunes_ignored_directories_recursively() {
        let tmp = tempfile::tempdir().expect("tempdir");
        touch(tmp.path(), "src/app.js", "");
        touch(tmp.path(), "node_modules/react/index.js", "");
        touch(tmp.path(), "src/node_modules/x.js", "");
        touch(tmp.path(), ".git/HEAD", "");

        let files = enumerate(tmp.path()).expect("enumerate");
        let names: Vec<_> = files.iter().map(|f| f.relative.as_str()).collect();

        assert_eq!(names, vec!["src/app.js"]);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let tmp = tempfile::tempdir().expect("tempdir");
        touch(tmp.path(), "b.txt", "");
        touch(tmp.path(), "a.txt", "");
        touch(tmp.path(), "c/d.txt", "");

        let names: Vec<_> = enumerate(tmp.path())
            .expect("enumerate")
            .into_iter()
            .map(|f| f.relative)
            .collect();

        assert_eq!(names, vec!["a.txt", "b.txt", "c/d.txt"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        assert!(enumerate(&tmp.path().join("absent")).is_err());
    }

    #[test]
    fn test_important_files_by_name_or_extension() {
        let file = |relative: &str| SourceFile {
            relative: relative.to_string(),
            absolute: PathBuf::from(relative),
            size: 0,
        };
        assert!(is_important(&file("Dockerfile")));
        assert!(is_important(&file("web/App.TSX")));
        assert!(is_important(&file("Makefile")));
        assert!(!is_important(&file("logo.png")));
        assert!(!is_important(&file("bin/tool")));
    }

    #[test]
    fn test_extension_ignores_dotfiles() {
        assert_eq!(extension_of(".gitignore"), None);
        assert_eq!(extension_of("dir.v2/file"), None);
        assert_eq!(extension_of("a/b/Main.JAVA"), Some("java".to_string()));
    }
}

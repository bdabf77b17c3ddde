//! ZIP archive extraction.
//!
//! Archives are decompressed into a staging directory next to the
//! destination and swapped into place only once every entry was written, so a
//! corrupt archive never leaves a half-populated tree behind.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::ZipArchive;

/// Upper bound on the decompressed size of one archive.
pub const MAX_EXTRACTED_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Errors raised while extracting an archive.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Cannot open archive {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("Invalid archive: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("Cannot extract entry {name}: {source}")]
    Entry { name: String, source: io::Error },

    #[error("Archive expands beyond {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Cannot prepare destination {path}: {source}")]
    Destination { path: PathBuf, source: io::Error },
}

impl ExtractionError {
    fn destination(path: &Path, source: io::Error) -> Self {
        Self::Destination {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Extract `archive` into `dest`, replacing whatever `dest` held before.
///
/// Returns every entry name in archive order, directory markers included.
/// Entries whose names would escape `dest` are skipped. Extraction fails once
/// the decompressed total passes [`MAX_EXTRACTED_BYTES`].
pub fn extract(archive: &Path, dest: &Path) -> Result<Vec<String>, ExtractionError> {
    extract_within(archive, dest, MAX_EXTRACTED_BYTES)
}

fn extract_within(
    archive: &Path,
    dest: &Path,
    limit: u64,
) -> Result<Vec<String>, ExtractionError> {
    let file = File::open(archive).map_err(|source| ExtractionError::Open {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = ZipArchive::new(file)?;

    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| ExtractionError::destination(&parent, e))?;

    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(&parent)
        .map_err(|e| ExtractionError::destination(&parent, e))?;

    let mut names = Vec::with_capacity(zip.len());
    let mut remaining = limit;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let name = entry.name().to_string();

        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!(entry = %name, "Skipping archive entry outside the extraction root");
            continue;
        };
        let target = staging.path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|source| ExtractionError::Entry {
                name: name.clone(),
                source,
            })?;
        } else {
            let written = write_entry(&mut entry, &target, remaining).map_err(|source| {
                ExtractionError::Entry {
                    name: name.clone(),
                    source,
                }
            })?;
            // Declared entry sizes are not trusted; the copy itself is bounded.
            remaining = remaining
                .checked_sub(written)
                .ok_or(ExtractionError::TooLarge { limit })?;
        }

        names.push(name);
    }

    replace_dir(dest)?;
    let staged = staging.keep();
    if let Err(e) = fs::rename(&staged, dest) {
        let _ = fs::remove_dir_all(&staged);
        return Err(ExtractionError::destination(dest, e));
    }

    tracing::debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        entries = names.len(),
        "Archive extracted"
    );
    Ok(names)
}

/// Copy at most `budget + 1` bytes, so an overrun is visible to the caller.
fn write_entry(entry: &mut impl Read, target: &Path, budget: u64) -> io::Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = File::create(target)?;
    io::copy(&mut entry.take(budget.saturating_add(1)), &mut out)
}

/// Clear `dest` so the staged tree can be renamed onto it.
fn replace_dir(dest: &Path) -> Result<(), ExtractionError> {
    let removed = match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest),
        Ok(_) => fs::remove_file(dest),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };
    removed.map_err(|e| ExtractionError::destination(dest, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).expect("create zip");
        let mut writer = ZipWriter::new(file);
        for (name, body) in entries {
            if name.ends_with('/') {
                writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .expect("add dir");
            } else {
                writer
                    .start_file(*name, SimpleFileOptions::default())
                    .expect("start file");
                writer.write_all(body.as_bytes()).expect("write body");
            }
        }
        writer.finish().expect("finish zip");
    }

    #[test]
    fn test_extracts_tree_and_lists_entries() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let archive = tmp.path().join("site.zip");
        write_zip(
            &archive,
            &[
                ("src/", ""),
                ("src/main.py", "print('hi')"),
                ("README.md", "# Site"),
            ],
        );
        let dest = tmp.path().join("extracted").join("site");

        let names = extract(&archive, &dest).expect("extract");

        assert_eq!(names, vec!["src/", "src/main.py", "README.md"]);
        assert_eq!(
            fs::read_to_string(dest.join("src/main.py")).expect("read"),
            "print('hi')"
        );
        assert!(dest.join("README.md").is_file());
    }

    #[test]
    fn test_re_extraction_replaces_previous_tree() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let archive = tmp.path().join("a.zip");
        write_zip(&archive, &[("index.html", "<html></html>")]);
        let dest = tmp.path().join("out");
        fs::create_dir_all(&dest).expect("mkdir");
        fs::write(dest.join("stale.txt"), "old").expect("write stale");

        extract(&archive, &dest).expect("first");
        extract(&archive, &dest).expect("second");

        assert!(!dest.join("stale.txt").exists());
        assert!(dest.join("index.html").is_file());
    }

    #[test]
    fn test_corrupt_archive_is_invalid_and_leaves_destination_alone() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let archive = tmp.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip").expect("write");
        let dest = tmp.path().join("out");
        fs::create_dir_all(&dest).expect("mkdir");
        fs::write(dest.join("keep.txt"), "keep").expect("write keep");

        let err = extract(&archive, &dest).expect_err("corrupt archive");

        assert!(matches!(err, ExtractionError::InvalidArchive(_)));
        assert!(dest.join("keep.txt").exists());
    }

    #[test]
    fn test_missing_archive_is_open_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = extract(&tmp.path().join("nope.zip"), &tmp.path().join("out"))
            .expect_err("missing archive");
        assert!(matches!(err, ExtractionError::Open { .. }));
    }

    #[test]
    fn test_expansion_past_the_budget_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let archive = tmp.path().join("bomb.zip");
        let padding = "0".repeat(4096);
        write_zip(&archive, &[("a.txt", &padding), ("b.txt", &padding)]);
        let dest = tmp.path().join("out");

        let err = extract_within(&archive, &dest, 6000).expect_err("over budget");

        assert!(matches!(err, ExtractionError::TooLarge { limit: 6000 }));
        assert!(!dest.exists());

        let names = extract_within(&archive, &dest, 8192).expect("exact budget fits");
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_entries_escaping_the_root_are_skipped() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let archive = tmp.path().join("evil.zip");
        write_zip(&archive, &[("../escaped.txt", "x"), ("ok.txt", "fine")]);
        let dest = tmp.path().join("nested").join("out");

        let names = extract(&archive, &dest).expect("extract");

        assert_eq!(names, vec!["ok.txt"]);
        assert!(!tmp.path().join("nested").join("escaped.txt").exists());
        assert!(dest.join("ok.txt").is_file());
    }
}

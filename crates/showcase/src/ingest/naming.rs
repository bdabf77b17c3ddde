//! Stored-file naming and title derivation.

const ZIP_SUFFIX: &str = ".zip";

const UNTITLED: &str = "Untitled project";

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Name under which an upload is stored: `{unix_millis}_{sanitized}`.
pub fn stored_file_name(unix_millis: i64, sanitized: &str) -> String {
    format!("{unix_millis}_{sanitized}")
}

pub(crate) fn has_zip_suffix(name: &str) -> bool {
    name.len() >= ZIP_SUFFIX.len()
        && name
            .get(name.len() - ZIP_SUFFIX.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(ZIP_SUFFIX))
}

/// Human title for a sanitized upload name.
pub fn title_from_file_name(sanitized: &str) -> String {
    let stem = if has_zip_suffix(sanitized) {
        &sanitized[..sanitized.len() - ZIP_SUFFIX.len()]
    } else {
        sanitized
    };
    let title = stem.replace('_', " ");
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitizes_unsafe_characters() {
        assert_eq!(sanitize_file_name("my project (v2).zip"), "my_project__v2_.zip");
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("ok-name.1.zip"), "ok-name.1.zip");
        assert_eq!(sanitize_file_name("café.zip"), "caf_.zip");
    }

    #[test]
    fn test_stored_name_is_prefixed_with_timestamp() {
        assert_eq!(stored_file_name(1700000000123, "a.zip"), "1700000000123_a.zip");
    }

    #[test]
    fn test_titles_drop_the_zip_suffix() {
        assert_eq!(title_from_file_name("broken.zip"), "broken");
        assert_eq!(title_from_file_name("My_Shop.ZIP"), "My Shop");
        assert_eq!(title_from_file_name("notes.tar"), "notes.tar");
        assert_eq!(title_from_file_name("_.zip"), UNTITLED);
    }

    #[test]
    fn test_zip_suffix_is_case_insensitive() {
        assert!(has_zip_suffix("a.zip"));
        assert!(has_zip_suffix("A.Zip"));
        assert!(!has_zip_suffix("zip"));
        assert!(!has_zip_suffix("a.zipx"));
    }
}

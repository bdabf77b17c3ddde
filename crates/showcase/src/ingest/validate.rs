use super::IngestError;
use super::naming::has_zip_suffix;
use crate::settings::UploadSettings;

/// Content types accepted in place of a `.zip` file name.
const ZIP_CONTENT_TYPES: &[&str] = &["application/zip", "application/x-zip-compressed"];

/// An upload as received from the transport layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    fn is_zip(&self) -> bool {
        has_zip_suffix(&self.file_name)
            || self.content_type.as_deref().is_some_and(|ct| {
                let essence = ct.split(';').next().unwrap_or(ct).trim();
                ZIP_CONTENT_TYPES
                    .iter()
                    .any(|accepted| essence.eq_ignore_ascii_case(accepted))
            })
    }
}

/// Reject uploads that are unnamed, not ZIP archives, empty, or over the limit.
pub(crate) fn validate(file: &UploadedFile, limits: &UploadSettings) -> Result<(), IngestError> {
    if file.file_name.trim().is_empty() {
        return Err(IngestError::validation("No file uploaded"));
    }
    if !file.is_zip() {
        return Err(IngestError::validation("Only ZIP files are allowed"));
    }
    if file.bytes.is_empty() {
        return Err(IngestError::validation("Uploaded file is empty"));
    }
    if file.bytes.len() as u64 > limits.max_file_size {
        return Err(IngestError::validation(format!(
            "File too large. Maximum size is {}MB",
            limits.max_file_size_mb
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>, len: usize) -> UploadedFile {
        UploadedFile::new(name, content_type.map(String::from), vec![0u8; len])
    }

    fn message(err: IngestError) -> String {
        match err {
            IngestError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_zip_by_name_or_content_type() {
        let limits = UploadSettings::from_mb(1);
        assert!(validate(&upload("a.ZIP", None, 10), &limits).is_ok());
        assert!(validate(&upload("archive", Some("application/zip"), 10), &limits).is_ok());
        assert!(
            validate(
                &upload("archive", Some("application/x-zip-compressed; charset=binary"), 10),
                &limits
            )
            .is_ok()
        );
    }

    #[test]
    fn test_rejects_other_files() {
        let limits = UploadSettings::from_mb(1);
        let err = validate(&upload("a.tar.gz", Some("application/gzip"), 10), &limits)
            .expect_err("not a zip");
        assert_eq!(message(err), "Only ZIP files are allowed");
    }

    #[test]
    fn test_rejects_missing_name_and_empty_body() {
        let limits = UploadSettings::from_mb(1);
        assert_eq!(
            message(validate(&upload("  ", None, 10), &limits).expect_err("no name")),
            "No file uploaded"
        );
        assert_eq!(
            message(validate(&upload("a.zip", None, 0), &limits).expect_err("empty")),
            "Uploaded file is empty"
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let limits = UploadSettings::from_mb(1);
        let max = limits.max_file_size as usize;

        assert!(validate(&upload("a.zip", None, max), &limits).is_ok());

        let err = validate(&upload("a.zip", None, max + 1), &limits).expect_err("too large");
        assert_eq!(message(err), "File too large. Maximum size is 1MB");
    }
}

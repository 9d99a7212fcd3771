//! Validated document upload.

use super::DocumentError;
use camino::Utf8Path;
use std::fmt;

/// Largest accepted upload, 20 MiB.
pub const MAX_DOCUMENT_BYTES: usize = 20 * 1024 * 1024;

/// Accepted file extensions, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// File name and content of a document awaiting storage.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl DocumentUpload {
    /// Validates an upload.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyFileName`] or
    /// [`DocumentError::InvalidFileName`] for unusable names,
    /// [`DocumentError::UnsupportedExtension`] for anything but PDF and Word
    /// files and [`DocumentError::TooLarge`] above [`MAX_DOCUMENT_BYTES`].
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DocumentError> {
        let raw = file_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::EmptyFileName);
        }
        if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
            return Err(DocumentError::InvalidFileName(raw));
        }

        let extension = Utf8Path::new(trimmed)
            .extension()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DocumentError::UnsupportedExtension(extension));
        }

        if bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(DocumentError::TooLarge {
                size: bytes.len(),
                limit: MAX_DOCUMENT_BYTES,
            });
        }

        Ok(Self {
            file_name: trimmed.to_owned(),
            bytes,
        })
    }

    /// Returns the validated file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the file content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the MIME type implied by the extension.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        let extension = Utf8Path::new(&self.file_name)
            .extension()
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdf") => "application/pdf",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/msword",
        }
    }
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

//! Uploaded contract documents and the text recovered from them

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

/// Media type of PDF uploads
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type of Office Open XML word-processing uploads
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the extractor can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolve a declared media type. Parameters such as `; charset=...` are ignored.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MEDIA_TYPE => Some(DocumentFormat::Pdf),
            DOCX_MEDIA_TYPE => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("pdf"),
            DocumentFormat::Docx => f.write_str("docx"),
        }
    }
}

/// An uploaded document staged in transient storage.
///
/// The backing file is removed when the document is dropped, so every
/// code path that consumes a `Document` releases its scratch space.
#[derive(Debug)]
pub struct Document {
    media_type: String,
    file: NamedTempFile,
}

impl Document {
    pub fn new(media_type: impl Into<String>, file: NamedTempFile) -> Self {
        Self {
            media_type: media_type.into(),
            file,
        }
    }

    /// Stage in-memory bytes into a scratch file
    #[cfg(test)]
    pub fn from_bytes(media_type: impl Into<String>, bytes: &[u8]) -> std::io::Result<Self> {
        use std::io::Write;

        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self::new(media_type, file))
    }

    /// Declared media type, as sent by the client
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Location of the staged bytes
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Best-effort plain text recovered from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub format: DocumentFormat,
}

impl ExtractedText {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

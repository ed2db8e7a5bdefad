use std::path::Path;

use crate::error::{TaskdeskError, TaskdeskResult};

/// A file picked for upload (task attachment or profile picture).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageFile {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> TaskdeskResult<Self> {
        let bytes = std::fs::read(path)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                TaskdeskError::InvalidInput(format!("Not a file: {}", path.display()))
            })?
            .to_string();

        Ok(ImageFile::new(file_name, mime_for_path(path), bytes))
    }
}

fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

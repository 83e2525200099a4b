//! HTTP handlers for the Files domain

pub mod files;
pub mod translate;

use axum::{body::Bytes, extract::Multipart};
use filechat_common::{Error, Result};

use crate::domain::entities::StoredFile;
use crate::domain::filename::Filename;

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

/// Multipart field carrying the translation language
const LANGUAGE_FIELD: &str = "target_language";

/// Parts of a multipart form this domain understands
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    file: Option<(Option<String>, Bytes)>,
    pub target_language: Option<String>,
}

impl UploadForm {
    /// Drain the multipart stream, keeping the first `file` part
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::Validation(e.body_text()))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FILE_FIELD) if form.file.is_none() => {
                    let filename = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| Error::Validation(e.body_text()))?;
                    form.file = Some((filename, bytes));
                }
                Some(LANGUAGE_FIELD) => {
                    let language = field
                        .text()
                        .await
                        .map_err(|e| Error::Validation(e.body_text()))?;
                    form.target_language = Some(language);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Turn the `file` part into a candidate for validation
    pub fn into_stored_file(self) -> Result<StoredFile> {
        let (filename, bytes) = self.file.ok_or_else(|| {
            Error::Validation("No file was found in the request".to_string())
        })?;

        let filename = filename
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::Validation("The file has no valid name".to_string()))?;
        let filename = Filename::parse(filename)?;

        let content = String::from_utf8(bytes.to_vec()).map_err(|_| {
            Error::Validation("File content is not valid UTF-8 text".to_string())
        })?;

        Ok(StoredFile::new(filename, content))
    }
}

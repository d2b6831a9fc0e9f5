use actix_multipart::form::{MultipartForm, tempfile::TempFile};

use crate::domain::file::FileUpload;
use crate::forms::FormError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(MultipartForm)]
pub struct UploadForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

impl UploadForm {
    /// Reads the spooled upload back into memory for forwarding.
    pub fn into_upload(self) -> Result<FileUpload, FormError> {
        let file = self.file;
        let file_name = file
            .file_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(FormError::MissingFile)?;
        let content_type = file
            .content_type
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        let bytes = std::fs::read(file.file.path())?;
        Ok(FileUpload {
            file_name,
            content_type,
            bytes,
        })
    }
}

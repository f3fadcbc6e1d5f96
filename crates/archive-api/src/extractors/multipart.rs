//! Multipart form helpers
//!
//! Shared by the upload endpoints (teacher registration proof, profile
//! image, material files).

use axum::extract::multipart::Field;
use archive_service::UploadedFile;

use crate::response::ApiError;

/// Read a multipart file field into an `UploadedFile`
///
/// # Errors
/// Fails if the field body cannot be read.
pub async fn read_file_field(field: Field<'_>) -> Result<UploadedFile, ApiError> {
    let file_name = field
        .file_name()
        .unwrap_or("upload.bin")
        .to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?;

    Ok(UploadedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

/// Read a multipart text field
///
/// # Errors
/// Fails if the field body cannot be read as UTF-8 text.
pub async fn read_text_field(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))
}

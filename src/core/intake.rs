//! Image intake: decode a selected file's dimensions and gate it on pixel count.

use crate::core::error::IntakeError;
use crate::utils::constants::MIN_PIXELS;
use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadCandidate {
    file_name: String,
    bytes: Bytes,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl UploadCandidate {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

pub fn meets_min_pixels(width: u32, height: u32) -> bool {
    width as u64 * height as u64 >= MIN_PIXELS
}

fn read_header(bytes: &[u8]) -> Result<(ImageFormat, u32, u32), IntakeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| IntakeError::Undecodable(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| IntakeError::Undecodable("unknown image format".into()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| IntakeError::Undecodable(e.to_string()))?;
    Ok((format, width, height))
}

/// Decodes the file header off the async runtime and checks the pixel count.
pub async fn validate(file: SelectedFile) -> Result<UploadCandidate, IntakeError> {
    let bytes = file.bytes.clone();
    let (format, width, height) = tokio::task::spawn_blocking(move || read_header(&bytes))
        .await
        .map_err(|e| IntakeError::Undecodable(e.to_string()))??;

    if !meets_min_pixels(width, height) {
        tracing::debug!(width, height, file = %file.file_name, "image below minimum resolution");
        return Err(IntakeError::TooSmall { width, height });
    }

    Ok(UploadCandidate {
        file_name: file.file_name,
        bytes: file.bytes,
        format,
        width,
        height,
    })
}

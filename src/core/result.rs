use crate::core::error::GenerationError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use image::RgbaImage;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    data_uri: String,
    generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn from_base64(mime_type: &str, base64_image: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", mime_type, base64_image),
            generated_at: Utc::now(),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    fn payload(&self) -> Result<&str, GenerationError> {
        self.data_uri
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .ok_or_else(|| GenerationError::MalformedResponse("not a base64 data URI".into()))
    }

    pub fn image_bytes(&self) -> Result<Vec<u8>, GenerationError> {
        STANDARD
            .decode(self.payload()?)
            .map_err(|e| GenerationError::Image(e.to_string()))
    }

    /// Decodes the payload into RGBA pixels for upload to a GPU texture.
    pub fn decode_texture(&self) -> Result<RgbaImage, GenerationError> {
        let bytes = self.image_bytes()?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

#[cfg(test)]
mod cfg_tests {
    use super::*;
    use crate::testing::png_bytes;

    #[test]
    fn test_data_uri_and_texture() {
        let encoded = STANDARD.encode(png_bytes(4, 3));
        let result = GenerationResult::from_base64("image/png", &encoded);

        assert!(result.data_uri().starts_with("data:image/png;base64,"));
        assert!(result.generated_at() <= Utc::now());
        let texture = result.decode_texture().unwrap();
        assert_eq!(texture.dimensions(), (4, 3));
    }

    #[test]
    fn test_bad_payload() {
        let result = GenerationResult::from_base64("image/jpeg", "***");
        assert!(matches!(
            result.decode_texture(),
            Err(GenerationError::Image(_))
        ));
    }
}

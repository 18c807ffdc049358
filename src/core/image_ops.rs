use crate::core::error::GenerationError;
use crate::utils::constants::{PROXY_IMAGE_SIZE, PROXY_JPEG_QUALITY};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;

/// Cover-fits the image into a `size`x`size` square, cropping the overflow.
pub fn resize_square(img: &DynamicImage, size: u32) -> DynamicImage {
    img.resize_to_fill(size, size, FilterType::Lanczos3)
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, GenerationError> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.to_rgb8().write_with_encoder(encoder)?;
    Ok(buf.into_inner())
}

/// Decodes an uploaded image and prepares it as the legacy `init_image`.
pub fn prepare_init_image(raw: &[u8]) -> Result<Vec<u8>, GenerationError> {
    let img = image::load_from_memory(raw)?;
    let resized = resize_square(&img, PROXY_IMAGE_SIZE);
    encode_jpeg(&resized, PROXY_JPEG_QUALITY)
}

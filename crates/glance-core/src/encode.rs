//! JPEG + base64 encoding of in-memory images for transport.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use std::io::Cursor;

use crate::config::EncoderConfig;
use crate::error::EncodeError;

/// Base64-encoded JPEG ready to embed in a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data: String,
}

impl EncodedImage {
    /// MIME type of the encoded bytes.
    pub const MEDIA_TYPE: &'static str = "image/jpeg";

    /// Wrap an already base64-encoded JPEG.
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// The base64 text.
    pub fn as_base64(&self) -> &str {
        &self.data
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MEDIA_TYPE, self.data)
    }
}

/// Serializes images to JPEG and then to standard base64.
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    config: EncoderConfig,
}

impl ImageEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Encode an image as JPEG bytes.
    ///
    /// JPEG has no alpha channel and only 8-bit samples, so anything other
    /// than 8-bit gray or RGB is flattened to RGB first.
    pub fn jpeg_bytes(&self, image: &DynamicImage) -> Result<Vec<u8>, EncodeError> {
        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.config.jpeg_quality);

        let result = match image.color() {
            ColorType::Rgb8 | ColorType::L8 => image.write_with_encoder(encoder),
            _ => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder),
        };
        result.map_err(|e| EncodeError::Encode(e.to_string()))?;

        Ok(buffer.into_inner())
    }

    /// Encode an image as JPEG, then as base64 text.
    pub fn encode(&self, image: &DynamicImage) -> Result<EncodedImage, EncodeError> {
        let bytes = self.jpeg_bytes(image)?;
        tracing::trace!(
            "Encoded {}x{} image to {} JPEG bytes",
            image.width(),
            image.height(),
            bytes.len()
        );
        Ok(EncodedImage {
            data: BASE64.encode(bytes),
        })
    }
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

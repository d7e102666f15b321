//! Loading a user-picked image: format and size checks, then decode.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::config::UploadConfig;
use crate::error::EncodeError;

/// A decoded image picked by the user.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    name: String,
    image: DynamicImage,
    format: ImageFormat,
}

impl ImageUpload {
    /// Read and decode an image file.
    ///
    /// Checks, in order:
    /// - the file exists
    /// - its extension is an accepted upload format
    /// - its size is within `max_file_size_mb`
    ///
    /// The actual format is then detected from content, so a PNG saved as
    /// `.jpg` still decodes.
    pub fn from_path(path: &Path, config: &UploadConfig) -> Result<Self, EncodeError> {
        if !path.exists() {
            return Err(EncodeError::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        if !config.accepts(&extension) {
            return Err(EncodeError::UnsupportedFormat {
                path: path.to_path_buf(),
                format: if extension.is_empty() {
                    "unknown".to_string()
                } else {
                    extension
                },
            });
        }

        let metadata = std::fs::metadata(path).map_err(|e| EncodeError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let max_bytes = config.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(EncodeError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: config.max_file_size_mb,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| EncodeError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self::from_bytes(bytes, &name)
    }

    /// Decode an image held in memory.
    pub fn from_bytes(bytes: Vec<u8>, name: &str) -> Result<Self, EncodeError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| EncodeError::Decode {
                name: name.to_string(),
                message: format!("Cannot detect image format: {e}"),
            })?;
        let format = reader.format().ok_or_else(|| EncodeError::Decode {
            name: name.to_string(),
            message: "Unrecognized image data".to_string(),
        })?;
        let image = reader.decode().map_err(|e| EncodeError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            "Loaded {name} ({}x{}, {:?})",
            image.width(),
            image.height(),
            format
        );

        Ok(Self {
            name: name.to_string(),
            image,
            format,
        })
    }

    /// File name shown to the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Format detected from the file content.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

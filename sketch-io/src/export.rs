//! PNG export for finished drawings.
//!
//! Encodes an RGBA8 buffer as PNG and names the output after the moment it
//! was saved: `drawing-2026-10-17T09-41-07.png`. Colons from the ISO 8601
//! timestamp are replaced with hyphens so the name is valid on every
//! filesystem.

use chrono::{DateTime, Utc};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output file extension.
pub const PNG_EXTENSION: &str = "png";

/// Bytes per RGBA8 pixel.
const CHANNELS: usize = 4;

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    "drawing".into()
}

/// Where exports go and how they are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_prefix")]
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_prefix(),
        }
    }
}

impl ExportConfig {
    /// Generate the file name for an export taken at `now`.
    pub fn file_name(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}-{}.{}",
            self.file_prefix,
            now.format("%Y-%m-%dT%H-%M-%S"),
            PNG_EXTENSION
        )
    }

    /// Full output path for an export taken at `now`.
    pub fn output_path(&self, now: DateTime<Utc>) -> PathBuf {
        self.directory.join(self.file_name(now))
    }

    /// Check the prefix for characters that cannot appear in file names.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.file_prefix.is_empty() {
            tracing::error!("export file prefix is empty");
            return Err(ExportError::InvalidPrefix {
                reason: "prefix must not be empty".into(),
            });
        }

        let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
        for ch in invalid_chars {
            if self.file_prefix.contains(ch) {
                tracing::error!(
                    prefix = %self.file_prefix,
                    invalid_char = %ch,
                    "prefix contains invalid filename character"
                );
                return Err(ExportError::InvalidPrefix {
                    reason: format!("prefix contains invalid character '{}'", ch),
                });
            }
        }

        Ok(())
    }
}

/// Encode a row-major, unpremultiplied RGBA8 buffer as PNG bytes.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        tracing::error!(width, height, "refusing to export an empty image");
        return Err(ExportError::EmptyImage { width, height });
    }

    let expected = width as usize * height as usize * CHANNELS;
    if rgba.len() != expected {
        tracing::error!(expected, actual = rgba.len(), "pixel buffer size mismatch");
        return Err(ExportError::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(rgba, width, height, ExtendedColorType::Rgba8)?;
    tracing::debug!(width, height, bytes = out.len(), "encoded png");
    Ok(out)
}

/// Encode and write a PNG into `config.directory`, returning the written path.
pub fn write_png(
    config: &ExportConfig,
    rgba: &[u8],
    width: u32,
    height: u32,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    config.validate()?;
    let bytes = encode_png(rgba, width, height)?;

    fs::create_dir_all(&config.directory).map_err(|source| ExportError::Io {
        path: config.directory.clone(),
        source,
    })?;

    let path = config.output_path(now);
    write_bytes(&path, &bytes)?;

    tracing::info!(path = %path.display(), width, height, "drawing exported");
    Ok(path)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Export failures. None of these touch drawing history.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot export an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("invalid export naming: {reason}")]
    InvalidPrefix { reason: String },

    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 41, 7).unwrap()
    }

    #[test]
    fn test_file_name_replaces_colons() {
        let config = ExportConfig::default();
        let name = config.file_name(fixed_time());
        assert_eq!(name, "drawing-2026-10-17T09-41-07.png");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_output_path_joins_directory() {
        let config = ExportConfig {
            directory: PathBuf::from("out"),
            file_prefix: "sketch".into(),
        };
        assert_eq!(
            config.output_path(fixed_time()),
            PathBuf::from("out").join("sketch-2026-10-17T09-41-07.png")
        );
    }

    #[test]
    fn test_prefix_validation() {
        assert!(ExportConfig::default().validate().is_ok());

        let bad = ExportConfig {
            file_prefix: "a/b".into(),
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ExportError::InvalidPrefix { .. })));

        let empty = ExportConfig {
            file_prefix: String::new(),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_encode_png_has_signature() {
        let rgba = vec![255u8; 2 * 2 * 4];
        let bytes = encode_png(&rgba, 2, 2).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_rejects_bad_buffer() {
        let err = encode_png(&[0u8; 7], 2, 1).unwrap_err();
        assert!(matches!(
            err,
            ExportError::BufferSize {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_encode_png_rejects_empty() {
        assert!(matches!(
            encode_png(&[], 0, 5),
            Err(ExportError::EmptyImage { width: 0, height: 5 })
        ));
    }
}

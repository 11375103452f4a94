// ABOUTME: Encoded image input for the recognition pipeline
// ABOUTME: Data URI construction from bytes or files, validation, and base64 decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use food_scan_core::errors::{AppError, AppResult};

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Self-contained encoded image, normally a base64 data URI
///
/// The recognizer never looks inside the encoding except to hash it; only the
/// remote classifier needs the decoded bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    encoded: String,
}

/// Raw image bytes and their media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Media type from the data URI, e.g. `image/jpeg`
    pub mime_type: String,
    /// Decoded image bytes
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Wrap an arbitrary encoded representation
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidInput` if `encoded` is empty
    pub fn from_encoded(encoded: impl Into<String>) -> AppResult<Self> {
        let encoded = encoded.into();
        if encoded.is_empty() {
            return Err(AppError::invalid_input("Image data cannot be empty"));
        }
        Ok(Self { encoded })
    }

    /// Parse a `data:<mime>;base64,<payload>` URI
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidFormat` if the prefix, the base64 marker, or
    /// the payload is missing
    pub fn from_data_uri(uri: impl Into<String>) -> AppResult<Self> {
        let encoded = uri.into();
        split_data_uri(&encoded)?;
        Ok(Self { encoded })
    }

    /// Encode raw bytes as a data URI
    #[must_use]
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            encoded: format!(
                "{DATA_URI_PREFIX}{mime_type}{BASE64_MARKER}{}",
                STANDARD.encode(bytes)
            ),
        }
    }

    /// Read an image file and encode it, guessing the media type from the extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is empty
    pub async fn from_file(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::invalid_input(format!("Cannot read image {}: {e}", path.display()))
                .with_source(e)
        })?;
        if bytes.is_empty() {
            return Err(AppError::invalid_input(format!(
                "Image {} is empty",
                path.display()
            )));
        }
        Ok(Self::from_bytes(mime_type_for(path), &bytes))
    }

    /// The encoded representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Whether this is a base64 data URI
    #[must_use]
    pub fn is_data_uri(&self) -> bool {
        split_data_uri(&self.encoded).is_ok()
    }

    /// Decode the base64 payload of a data URI
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidFormat` if the image is not a base64 data URI
    /// or the payload is not valid base64
    pub fn decode(&self) -> AppResult<DecodedImage> {
        let (mime_type, payload) = split_data_uri(&self.encoded)?;
        let bytes = STANDARD.decode(payload).map_err(|e| {
            AppError::invalid_format(format!("Image payload is not valid base64: {e}"))
                .with_source(e)
        })?;
        Ok(DecodedImage {
            mime_type: mime_type.to_owned(),
            bytes,
        })
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads run to megabytes; keep logs readable
        f.debug_struct("ImageData")
            .field("encoded_len", &self.encoded.len())
            .field("prefix", &self.encoded.chars().take(32).collect::<String>())
            .finish()
    }
}

fn split_data_uri(encoded: &str) -> AppResult<(&str, &str)> {
    let rest = encoded
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| AppError::invalid_format("Image is not a data URI"))?;
    let (mime_type, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| AppError::invalid_format("Data URI is not base64 encoded"))?;
    if payload.is_empty() {
        return Err(AppError::invalid_format("Data URI has no payload"));
    }
    Ok((mime_type, payload))
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use food_scan_core::errors::ErrorCode;

    #[test]
    fn test_bytes_survive_encoding() {
        let bytes = [0xFF_u8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let image = ImageData::from_bytes("image/jpeg", &bytes);
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));

        let decoded = image.decode().unwrap();
        assert_eq!(decoded.mime_type, "image/jpeg");
        assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn test_data_uri_validation() {
        assert!(ImageData::from_data_uri("data:image/png;base64,iVBORw0KGgo=").is_ok());

        let error = ImageData::from_data_uri("https://example.com/pie.jpg").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
        assert!(ImageData::from_data_uri("data:image/png,rawdata").is_err());
        assert!(ImageData::from_data_uri("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_non_data_uri_is_accepted_but_not_decodable() {
        let image = ImageData::from_encoded("opaque-handle-1234").unwrap();
        assert!(!image.is_data_uri());
        assert_eq!(image.decode().unwrap_err().code, ErrorCode::InvalidFormat);
        assert_eq!(
            ImageData::from_encoded("").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[test]
    fn test_bad_base64_payload() {
        let image = ImageData::from_data_uri("data:image/png;base64,@@@").unwrap();
        assert_eq!(image.decode().unwrap_err().code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_mime_type_guess() {
        assert_eq!(mime_type_for(Path::new("lunch.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("lunch.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("lunch")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.png");
        std::fs::write(&path, b"\x89PNG\r\n").unwrap();

        let image = ImageData::from_file(&path).await.unwrap();
        assert_eq!(image.decode().unwrap().bytes, b"\x89PNG\r\n");
        assert!(image.as_str().starts_with("data:image/png;base64,"));

        let missing = ImageData::from_file(&dir.path().join("nope.png")).await;
        assert_eq!(missing.unwrap_err().code, ErrorCode::InvalidInput);
    }
}

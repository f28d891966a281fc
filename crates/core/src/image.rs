//! Image attachment ingestion.
//!
//! Raw uploads are accepted only when their MIME type starts with `image/`;
//! anything else is silently ignored (no error is surfaced, matching the
//! browser file-picker behaviour). Accepted payloads are base64-encoded for
//! the model request and paired with a `data:` URL for local preview.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

const IMAGE_MIME_PREFIX: &str = "image/";

/// A single uploaded raster image, ready to embed in a model request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Base64 payload without the data-URL prefix.
    pub data: String,
    pub mime_type: String,
    /// Full `data:<mime>;base64,<data>` URL for rendering a preview.
    pub preview_url: String,
}

impl ImageAttachment {
    /// Encode raw bytes. Returns `None` for non-image MIME types.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Option<Self> {
        let mime_type = mime_type.trim();
        if !is_image_mime(mime_type) {
            return None;
        }
        let data = STANDARD.encode(bytes);
        Some(Self::from_parts(data, mime_type.to_string()))
    }

    /// Parse a browser `data:<mime>;base64,<payload>` URL.
    ///
    /// Returns `None` when the URL is not base64 data, the MIME type is not
    /// an image, or the payload does not decode.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.trim().strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        if !is_image_mime(mime_type) || STANDARD.decode(payload).is_err() {
            return None;
        }
        Some(Self::from_parts(payload.to_string(), mime_type.to_string()))
    }

    /// Size of the decoded payload in bytes.
    pub fn decoded_len(&self) -> usize {
        // Every 4 base64 chars carry 3 bytes, minus trailing padding.
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        ((self.data.len() / 4) * 3).saturating_sub(padding)
    }

    fn from_parts(data: String, mime_type: String) -> Self {
        let preview_url = format!("data:{mime_type};base64,{data}");
        Self {
            data,
            mime_type,
            preview_url,
        }
    }
}

/// True when `mime_type` starts with `image/` (case-insensitive).
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .get(..IMAGE_MIME_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_MIME_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_image_bytes_and_builds_preview() {
        let img = ImageAttachment::from_bytes(b"\x89PNG", "image/png").unwrap();
        assert_eq!(img.data, "iVBORw==");
        assert_eq!(img.mime_type, "image/png");
        assert_eq!(img.preview_url, "data:image/png;base64,iVBORw==");
        assert_eq!(img.decoded_len(), 4);
    }

    #[test]
    fn image_mime_prefix_is_case_insensitive() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("img"));
    }

    #[test]
    fn non_image_mime_is_ignored() {
        assert!(ImageAttachment::from_bytes(b"%PDF", "application/pdf").is_none());
        assert!(ImageAttachment::from_bytes(b"hi", "text/plain").is_none());
        assert!(ImageAttachment::from_bytes(b"hi", "").is_none());
    }

    #[test]
    fn parses_data_url() {
        let img = ImageAttachment::from_data_url("data:image/jpeg;base64,AAEC").unwrap();
        assert_eq!(img.data, "AAEC");
        assert_eq!(img.mime_type, "image/jpeg");
        assert_eq!(img.decoded_len(), 3);
    }

    #[test]
    fn rejects_bad_data_urls() {
        assert!(ImageAttachment::from_data_url("http://example.com/a.png").is_none());
        assert!(ImageAttachment::from_data_url("data:text/plain;base64,AAEC").is_none());
        assert!(ImageAttachment::from_data_url("data:image/png,rawtext").is_none());
        assert!(ImageAttachment::from_data_url("data:image/png;base64,@@@").is_none());
    }
}

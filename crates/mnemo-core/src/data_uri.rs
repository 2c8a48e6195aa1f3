//! Data-URI handling for pasted or loaded image payloads.

use base64::Engine;

use crate::defaults::DEFAULT_IMAGE_MIME;
use crate::{Error, Result};

/// An image split into its MIME type and base64 payload.
///
/// The remote service takes the payload without the `data:<mime>;base64,`
/// prefix, so the prefix is stripped here and the MIME type kept separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Parse a data URI such as `data:image/png;base64,iVBORw0...`.
    ///
    /// Strings without a `data:` prefix are treated as a bare base64 payload
    /// of [`DEFAULT_IMAGE_MIME`].
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let Some(rest) = input.strip_prefix("data:") else {
            return Self {
                mime_type: DEFAULT_IMAGE_MIME.to_string(),
                data: input.to_string(),
            };
        };

        let (header, data) = rest.split_once(',').unwrap_or((rest, ""));
        let mime_type = header
            .split(';')
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);

        Self {
            mime_type: mime_type.to_string(),
            data: data.trim().to_string(),
        }
    }

    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// True when there is no payload after the prefix.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check that the payload is non-empty, decodable base64.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidInput("Image payload is empty".to_string()));
        }
        base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| Error::InvalidInput(format!("Image payload is not base64: {}", e)))?;
        Ok(())
    }

    /// Reassemble the `data:` URI form stored on items.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

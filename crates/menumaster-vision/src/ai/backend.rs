//! Backend seam between the analysis pipeline and a multimodal model

use base64::{engine::general_purpose, Engine as _};
use menumaster_types::{MenuImage, Result};
use std::future::Future;

/// Menu image in transport-safe form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Standard base64, no data-URL prefix
    pub data: String,
}

/// Base64-encode an image for inline transport
pub fn encode_image(image: &MenuImage) -> EncodedImage {
    EncodedImage {
        mime_type: image.mime_type().to_string(),
        data: general_purpose::STANDARD.encode(image.data()),
    }
}

/// A model that accepts one image plus instruction text and replies with
/// text constrained to `response_schema`.
///
/// Implementations make exactly one outbound request per call.
pub trait AiBackend: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Model identifier, for logs and output
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_image_keeps_mime() {
        let heic = b"\x00\x00\x00\x18ftypheic\x00\x00\x00\x00mif1heic".to_vec();
        let image = MenuImage::from_bytes(heic.clone(), None).unwrap();
        let encoded = encode_image(&image);
        assert_eq!(encoded.mime_type, "image/heic");
        assert_eq!(
            general_purpose::STANDARD.decode(&encoded.data).unwrap(),
            heic
        );
        assert!(!encoded.data.starts_with("data:"));
    }
}

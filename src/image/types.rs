//! Types for the synchronous image endpoint.

use crate::task::GenerationRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How generated images are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Hosted URL.
    #[default]
    Url,
    /// Inline base64 JSON payload.
    B64Json,
}

impl ResponseFormat {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::B64Json => "b64_json",
        }
    }
}

/// A request to the synchronous image generation endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationRequest {
    /// Model, prompt and any model-specific parameters.
    pub base: GenerationRequest,
    /// Number of images to generate.
    pub n: Option<u32>,
    /// Output size, e.g. `"1024x1024"`.
    pub size: Option<String>,
    /// URL or inline base64 output.
    pub response_format: Option<ResponseFormat>,
}

impl ImageGenerationRequest {
    /// Creates a new request for `model` with the given prompt.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            base: GenerationRequest::new(model, prompt),
            n: None,
            size: None,
            response_format: None,
        }
    }

    /// Sets the number of images.
    pub fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    /// Sets the output size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Sets the response format.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Adds a model-specific parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base = self.base.with_param(key, value);
        self
    }

    /// Builds the JSON body.
    pub fn to_body(&self) -> Value {
        let mut body = self.base.to_body();
        if let Some(obj) = body.as_object_mut() {
            if let Some(n) = self.n {
                obj.insert("n".into(), n.into());
            }
            if let Some(size) = &self.size {
                obj.insert("size".into(), size.clone().into());
            }
            if let Some(format) = self.response_format {
                obj.insert("response_format".into(), format.as_str().into());
            }
        }
        body
    }
}

/// One generated image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// Hosted image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64 image payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    /// Prompt as rewritten by the model, if it did so.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Reply from the synchronous image endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    /// Creation time (epoch seconds).
    #[serde(default)]
    pub created: i64,
    /// Generated images.
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_includes_optional_fields() {
        let req = ImageGenerationRequest::new("flux-t2i", "A lighthouse")
            .with_n(2)
            .with_size("1024x768")
            .with_response_format(ResponseFormat::B64Json)
            .with_param("guidance", 3.5);
        let body = req.to_body();

        assert_eq!(body["model"], "flux-t2i");
        assert_eq!(body["n"], 2);
        assert_eq!(body["size"], "1024x768");
        assert_eq!(body["response_format"], "b64_json");
        assert_eq!(body["guidance"], 3.5);
    }

    #[test]
    fn test_structured_param_passed_through() {
        let body = ImageGenerationRequest::new("m", "p")
            .with_param("style", serde_json::json!({"preset": "noir", "strength": 2}))
            .to_body();
        assert_eq!(body["style"]["preset"], "noir");
        assert_eq!(body["style"]["strength"], 2);
    }

    #[test]
    fn test_body_omits_unset_fields() {
        let body = ImageGenerationRequest::new("m", "p").to_body();
        assert!(body.get("n").is_none());
        assert!(body.get("size").is_none());
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "created": 1700000000,
            "data": [
                {"url": "https://cdn.siray.ai/1.png", "revised_prompt": "A tall lighthouse"},
                {"b64_json": "iVBORw=="}
            ]
        }"#;
        let resp: ImageGenerationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.created, 1_700_000_000);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[0].url.as_deref(), Some("https://cdn.siray.ai/1.png"));
        assert_eq!(resp.data[0].revised_prompt.as_deref(), Some("A tall lighthouse"));
        assert_eq!(resp.data[1].b64_json.as_deref(), Some("iVBORw=="));
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let resp: ImageGenerationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, ImageGenerationResponse::default());
    }
}

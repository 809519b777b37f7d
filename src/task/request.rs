//! Generation request sent to the task submission endpoints.

use serde_json::{Map, Value};

/// A request to start an asynchronous generation task.
///
/// `model` and `prompt` are always sent; anything model-specific goes into
/// [`params`](Self::params) and is merged into the same JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    /// Model identifier, e.g. `black-forest-labs/flux-1.1-pro-ultra-t2i`.
    pub model: String,
    /// The text prompt.
    pub prompt: String,
    /// Extra model-specific parameters.
    pub params: Map<String, Value>,
}

impl GenerationRequest {
    /// Creates a new request for `model` with the given prompt.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            params: Map::new(),
        }
    }

    /// Adds a model-specific parameter.
    ///
    /// Structured values can be built with `serde_json::json!` or
    /// `serde_json::to_value`, which surfaces serialization errors to the caller.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Builds the JSON body. Typed fields win over same-named params.
    pub fn to_body(&self) -> Value {
        let mut body = self.params.clone();
        body.insert("model".into(), Value::String(self.model.clone()));
        body.insert("prompt".into(), Value::String(self.prompt.clone()));
        Value::Object(body)
    }
}

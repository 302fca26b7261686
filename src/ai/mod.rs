mod gemini;
mod openai;

pub use gemini::*;
pub use openai::*;

use serde_json::Value;
use std::future::Future;

use crate::error::AIError;
use crate::settings::{Provider, Settings};

/// A structured text generation call: the model must answer with JSON matching `schema`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub schema_name: &'static str,
    /// JSON Schema with lowercase type names; backends translate it as needed.
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub count: u8,
    pub mime_type: &'static str,
    pub aspect_ratio: &'static str,
}

/// One generated picture, still base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

pub trait GenerativeBackend: Send + Sync {
    /// Returns the raw JSON text produced by the model.
    fn generate_json(
        &self,
        request: &TextRequest,
    ) -> impl Future<Output = Result<String, AIError>> + Send;

    /// Returns every image the service produced, which may be none.
    fn generate_images(
        &self,
        request: &ImageRequest,
    ) -> impl Future<Output = Result<Vec<GeneratedImage>, AIError>> + Send;
}

#[derive(Debug)]
pub enum Backend {
    Gemini(GeminiClient),
    OpenAI(OpenAIBackend),
}

impl Backend {
    pub fn from_settings(settings: &Settings) -> Result<Self, AIError> {
        let api_key = settings.api_key()?.to_string();
        let backend = match settings.provider {
            Provider::Gemini => Backend::Gemini(GeminiClient::new(
                api_key,
                settings.api_base.clone(),
                settings.text_model().to_string(),
                settings.image_model().to_string(),
            )),
            Provider::OpenAI => Backend::OpenAI(OpenAIBackend::new(
                &api_key,
                settings.api_base.as_deref(),
                settings.text_model().to_string(),
                settings.image_model().to_string(),
            )),
        };
        log::info!(
            "Using {} backend ({} / {})",
            settings.provider,
            settings.text_model(),
            settings.image_model()
        );
        Ok(backend)
    }
}

impl GenerativeBackend for Backend {
    async fn generate_json(&self, request: &TextRequest) -> Result<String, AIError> {
        match self {
            Backend::Gemini(client) => client.generate_json(request).await,
            Backend::OpenAI(client) => client.generate_json(request).await,
        }
    }

    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, AIError> {
        match self {
            Backend::Gemini(client) => client.generate_images(request).await,
            Backend::OpenAI(client) => client.generate_images(request).await,
        }
    }
}

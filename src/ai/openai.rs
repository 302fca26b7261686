use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateImageRequestArgs, Image, ImageModel,
        ImageResponseFormat, ImageSize, ResponseFormat, ResponseFormatJsonSchema,
    },
};

use super::{GeneratedImage, GenerativeBackend, ImageRequest, TextRequest};
use crate::error::AIError;

// DALL-E only answers with PNG, and 1792x1024 is its closest size to 16:9.
const OPENAI_IMAGE_MIME: &str = "image/png";

#[derive(Debug, Clone)]
pub struct OpenAIBackend {
    client: Client<OpenAIConfig>,
    text_model: String,
    image_model: String,
}

impl OpenAIBackend {
    pub fn new(
        api_key: &str,
        api_base: Option<&str>,
        text_model: String,
        image_model: String,
    ) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }
        Self {
            client: Client::with_config(config),
            text_model,
            image_model,
        }
    }

    fn image_model(&self) -> ImageModel {
        match self.image_model.as_str() {
            "dall-e-3" => ImageModel::DallE3,
            "dall-e-2" => ImageModel::DallE2,
            other => ImageModel::Other(other.to_string()),
        }
    }
}

impl GenerativeBackend for OpenAIBackend {
    async fn generate_json(&self, request: &TextRequest) -> Result<String, AIError> {
        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.text_model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(request.system_instruction.as_str())
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(request.prompt.as_str())
                    .build()?
                    .into(),
            ])
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: request.schema_name.to_string(),
                    schema: Some(request.schema.clone()),
                    strict: None,
                },
            })
            .build()?;

        let response = self.client.chat().create(chat_request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AIError::EmptyResponse)
    }

    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, AIError> {
        let image_request = CreateImageRequestArgs::default()
            .prompt(request.prompt.as_str())
            .model(self.image_model())
            .n(request.count)
            .response_format(ImageResponseFormat::B64Json)
            .size(ImageSize::S1792x1024)
            .build()?;

        let response = self.client.images().create(image_request).await?;
        Ok(response
            .data
            .iter()
            .filter_map(|image| match image.as_ref() {
                Image::B64Json { b64_json, .. } => Some(GeneratedImage {
                    mime_type: OPENAI_IMAGE_MIME.to_string(),
                    data: b64_json.to_string(),
                }),
                Image::Url { url, .. } => {
                    log::warn!("Ignoring image URL returned instead of base64: {url}");
                    None
                }
            })
            .collect())
    }
}

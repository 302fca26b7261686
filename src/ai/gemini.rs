use serde::Deserialize;
use serde_json::{Value, json};

use super::{GeneratedImage, GenerativeBackend, ImageRequest, TextRequest};
use crate::error::AIError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Talks to the Generative Language REST API directly.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

// Filtered images come back as a prediction without bytes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        api_base: Option<String>,
        text_model: String,
        image_model: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: api_base
                .unwrap_or_else(|| GEMINI_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            text_model,
            image_model,
        }
    }

    pub fn text_request_body(request: &TextRequest) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": gemini_schema(&request.schema),
            }
        })
    }

    pub fn image_request_body(request: &ImageRequest) -> Value {
        json!({
            "instances": [{ "prompt": request.prompt }],
            "parameters": {
                "sampleCount": request.count,
                "aspectRatio": request.aspect_ratio,
                "outputMimeType": request.mime_type,
            }
        })
    }

    /// Joins the text parts of the first candidate.
    pub fn parse_text_response(body: &str) -> Result<String, AIError> {
        let response: GenerateContentResponse = serde_json::from_str(body)?;
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AIError::EmptyResponse);
        }
        Ok(text)
    }

    pub fn parse_image_response(body: &str, default_mime: &str) -> Result<Vec<GeneratedImage>, AIError> {
        let response: PredictResponse = serde_json::from_str(body)?;
        Ok(response
            .predictions
            .into_iter()
            .filter_map(|prediction| {
                let data = prediction.bytes_base64_encoded.filter(|d| !d.is_empty())?;
                Some(GeneratedImage {
                    mime_type: prediction
                        .mime_type
                        .unwrap_or_else(|| default_mime.to_string()),
                    data,
                })
            })
            .collect())
    }

    async fn post(&self, model: &str, method: &str, body: &Value) -> Result<String, AIError> {
        let url = format!("{}/models/{}:{}", self.api_base, model, method);
        log::debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }
        Ok(text)
    }
}

impl GenerativeBackend for GeminiClient {
    async fn generate_json(&self, request: &TextRequest) -> Result<String, AIError> {
        let body = Self::text_request_body(request);
        let response = self.post(&self.text_model, "generateContent", &body).await?;
        Self::parse_text_response(&response)
    }

    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, AIError> {
        let body = Self::image_request_body(request);
        let response = self.post(&self.image_model, "predict", &body).await?;
        Self::parse_image_response(&response, request.mime_type)
    }
}

/// Builds an error from a failed response, preferring the `error.message` field of the body.
pub fn api_error(status: u16, body: &str) -> AIError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string());
    AIError::Api { status, message }
}

// Gemini spells schema types in upper case (OBJECT, STRING, ARRAY).
fn gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("type", Value::String(kind)) => Value::String(kind.to_uppercase()),
                        _ => gemini_schema(value),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(gemini_schema).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_request() -> TextRequest {
        TextRequest {
            system_instruction: "You are a storyteller.".into(),
            prompt: "Begin.".into(),
            schema_name: "next_scene",
            schema: json!({
                "type": "object",
                "properties": {
                    "choices": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["choices"]
            }),
        }
    }

    #[test]
    fn text_body_carries_persona_prompt_and_schema() {
        let body = GeminiClient::text_request_body(&text_request());
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a storyteller."
        );
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Begin.");
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["choices"]["items"]["type"],
            "STRING"
        );
        // Property names are left alone.
        assert_eq!(config["responseSchema"]["required"][0], "choices");
    }

    #[test]
    fn image_body_asks_for_one_wide_jpeg() {
        let body = GeminiClient::image_request_body(&ImageRequest {
            prompt: "An alley.".into(),
            count: 1,
            mime_type: "image/jpeg",
            aspect_ratio: "16:9",
        });
        assert_eq!(body["instances"][0]["prompt"], "An alley.");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "16:9");
        assert_eq!(body["parameters"]["outputMimeType"], "image/jpeg");
    }

    #[test]
    fn text_parts_are_joined() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        assert_eq!(GeminiClient::parse_text_response(body).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn no_candidates_is_empty_response() {
        assert!(matches!(
            GeminiClient::parse_text_response(r#"{"candidates":[]}"#),
            Err(AIError::EmptyResponse)
        ));
    }

    #[test]
    fn filtered_predictions_are_skipped() {
        let body = r#"{"predictions":[{"raiFilteredReason":"blocked"},{"bytesBase64Encoded":"QUJD"}]}"#;
        let images = GeminiClient::parse_image_response(body, "image/jpeg").unwrap();
        assert_eq!(
            images,
            vec![GeneratedImage {
                mime_type: "image/jpeg".into(),
                data: "QUJD".into()
            }]
        );
    }

    #[test]
    fn empty_prediction_list_is_not_an_error() {
        assert!(GeminiClient::parse_image_response("{}", "image/jpeg")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn api_error_prefers_the_service_message() {
        let err = api_error(403, r#"{"error":{"code":403,"message":"API key not valid"}}"#);
        assert!(matches!(err, AIError::Api { status: 403, ref message } if message == "API key not valid"));
        let err = api_error(502, "Bad Gateway\n");
        assert!(matches!(err, AIError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }
}

use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI error: {0}")]
    AI(#[from] AIError), // Errors coming back from a generative backend.

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to settings serialization.

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError), // The scene image bytes could not be decoded.

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Thread join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Settings error: {0}")]
    Settings(String),
}

// Errors related to the generative services are separated into their own enum.
#[derive(Debug, Error)]
pub enum AIError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error), // Transport errors from the Gemini backend.

    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String }, // Non-success status returned by the endpoint.

    #[error("The service returned no content")]
    EmptyResponse,

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response does not match the scene schema: {0}")]
    Schema(String),

    #[error("No API key configured")]
    MissingApiKey,
}

/// The two ways a scene transition can fail. Each wraps whatever went wrong underneath.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("Failed to start game: {0}")]
    Start(#[source] AIError),

    #[error("Failed to advance story: {0}")]
    Advance(#[source] AIError),
}

impl OrchestrationError {
    pub fn source_error(&self) -> &AIError {
        match self {
            OrchestrationError::Start(e) | OrchestrationError::Advance(e) => e,
        }
    }
}

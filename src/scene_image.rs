use base64::{Engine, engine::general_purpose::STANDARD};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AIError, Result};

pub const FALLBACK_IMAGE_URL: &str = "https://picsum.photos/seed/fallback/1280/720";

/// Where the picture for the current scene comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SceneImage {
    #[default]
    None,
    /// Base64 payload returned by the image service.
    DataUri { mime_type: String, data: String },
    Url(String),
}

impl SceneImage {
    pub fn jpeg(data: impl Into<String>) -> Self {
        SceneImage::DataUri {
            mime_type: "image/jpeg".to_string(),
            data: data.into(),
        }
    }

    pub fn fallback() -> Self {
        SceneImage::Url(FALLBACK_IMAGE_URL.to_string())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SceneImage::None)
    }

    /// Fetches or decodes the raw bytes, then decodes them into an image.
    pub async fn load(&self, http: &reqwest::Client) -> Result<Option<DynamicImage>> {
        let bytes = match self {
            SceneImage::None => return Ok(None),
            SceneImage::DataUri { data, .. } => STANDARD.decode(data.as_bytes())?,
            SceneImage::Url(url) => {
                let response = http.get(url).send().await.map_err(AIError::from)?;
                let response = response.error_for_status().map_err(AIError::from)?;
                response.bytes().await.map_err(AIError::from)?.to_vec()
            }
        };
        let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
        Ok(Some(image))
    }
}

// The displayable reference: a data URI or a plain URL.
impl fmt::Display for SceneImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneImage::None => Ok(()),
            SceneImage::DataUri { mime_type, data } => write!(f, "data:{mime_type};base64,{data}"),
            SceneImage::Url(url) => f.write_str(url),
        }
    }
}

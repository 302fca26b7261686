// Settings are read once at startup and written back so the user has a file to edit.
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

use crate::error::{AIError, AppError, Result};

pub const DATA_DIR_NAME: &str = "times_square_noir";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAI,
}

impl Provider {
    pub fn default_text_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn default_image_model(self) -> &'static str {
        match self {
            Provider::Gemini => "imagen-3.0-generate-002",
            Provider::OpenAI => "dall-e-3",
        }
    }

    // Provider specific key, checked after the generic API_KEY variable.
    fn api_key_var(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub provider: Provider,
    pub api_key: Option<String>,
    /// Unset models fall back to the provider's defaults.
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub api_base: Option<String>, // Override for proxies or compatible endpoints.
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            provider: Provider::default(),
            api_key: None,
            text_model: None,
            image_model: None,
            api_base: None,
            debug_mode: false,
        }
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let home = dir::home_dir()
        .ok_or_else(|| AppError::Settings("Could not determine the home directory".into()))?;
    Ok(home.join(DATA_DIR_NAME).join("data"))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("settings.json"))
}

impl Settings {
    /// Reads the settings file, writing the defaults first when it does not exist yet.
    /// The flag tells whether the file was just created.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            return Ok((Self::load_settings_from_file(path)?, false));
        }
        let settings = Self::default();
        settings.save_to_file(path)?;
        Ok((settings, true))
    }

    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    /// Environment variables win over the file. `API_KEY` is checked first.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let key = var("API_KEY")
            .or_else(|| var(self.provider.api_key_var()))
            .filter(|key| !key.trim().is_empty());
        if let Some(key) = key {
            self.api_key = Some(key);
        }
    }

    pub fn text_model(&self) -> &str {
        self.text_model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(self.provider.default_text_model())
    }

    pub fn image_model(&self) -> &str {
        self.image_model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(self.provider.default_image_model())
    }

    pub fn api_key(&self) -> std::result::Result<&str, AIError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AIError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn env_key_overrides_file_key() {
        let mut settings = Settings {
            api_key: Some("from-file".into()),
            ..Settings::default()
        };
        settings.apply_env(|name| (name == "GEMINI_API_KEY").then(|| "from-env".to_string()));
        assert_eq!(settings.api_key().unwrap(), "from-env");
    }

    #[test]
    fn generic_key_wins_over_provider_key() {
        let mut settings = Settings::default();
        settings.apply_env(|name| match name {
            "API_KEY" => Some("generic".into()),
            "GEMINI_API_KEY" => Some("specific".into()),
            _ => None,
        });
        assert_eq!(settings.api_key.as_deref(), Some("generic"));
    }

    #[test]
    fn blank_key_is_missing() {
        let settings = Settings {
            api_key: Some("   ".into()),
            ..Settings::default()
        };
        assert!(matches!(settings.api_key(), Err(AIError::MissingApiKey)));
    }

    #[test]
    fn models_follow_the_provider_unless_set() {
        let mut settings = Settings {
            provider: Provider::OpenAI,
            ..Settings::default()
        };
        assert_eq!(settings.text_model(), "gpt-4o-mini");
        assert_eq!(settings.image_model(), "dall-e-3");

        settings.text_model = Some("gpt-4o".into());
        assert_eq!(settings.text_model(), "gpt-4o");
    }

    #[test]
    fn provider_parses_from_its_name() {
        assert_eq!(Provider::from_str("OpenAI").unwrap(), Provider::OpenAI);
        assert_eq!(Provider::Gemini.to_string(), "Gemini");
    }
}

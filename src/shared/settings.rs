use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;

use crate::shared::error::{AppError, AppResult};

pub const DEFAULT_ENDPOINT: &str = "https://microsoft-translator-text.p.rapidapi.com/translate";
pub const DEFAULT_API_HOST: &str = "microsoft-translator-text.p.rapidapi.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub preferences: UserPreferences,
    pub api: ApiSettings,
    pub speech: SpeechSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub default_source_lang: String,
    pub default_target_lang: String,
    /// The one language offered for dictation and playback
    pub speakable_lang: String,
}

/// Non-secret API settings. The key itself never lands in this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub endpoint: String,
    pub host: String,
    pub api_version: String,
    pub profanity_action: String,
    pub text_type: String,
}

/// External commands backing speech on desktop platforms.
///
/// Arguments may contain `{text}` and `{lang}` placeholders. An empty
/// recognizer command means dictation is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub synthesizer_command: Vec<String>,
    pub recognizer_command: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            preferences: UserPreferences::default(),
            api: ApiSettings::default(),
            speech: SpeechSettings::default(),
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_source_lang: "en".to_string(),
            default_target_lang: "ta".to_string(),
            speakable_lang: "en".to_string(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            host: DEFAULT_API_HOST.to_string(),
            api_version: "3.0".to_string(),
            profanity_action: "NoAction".to_string(),
            text_type: "plain".to_string(),
        }
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        let synthesizer_command = if cfg!(target_os = "macos") {
            vec!["say".to_string(), "{text}".to_string()]
        } else {
            vec![
                "espeak-ng".to_string(),
                "-v".to_string(),
                "{lang}".to_string(),
                "{text}".to_string(),
            ]
        };

        Self {
            synthesizer_command,
            recognizer_command: Vec::new(),
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "translator-widget")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Load from the per-user config dir, writing defaults on first run
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path).await?;
            log::info!("[Settings] Wrote default settings to {}", path.display());
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| AppError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))
    }

    pub async fn save(&self) -> AppResult<()> {
        let path = Self::get_settings_path()?;
        self.save_to(&path).await
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await
                .map_err(|e| AppError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).await
            .map_err(|e| AppError::Io(format!("Failed to write settings file: {}", e)))
    }
}

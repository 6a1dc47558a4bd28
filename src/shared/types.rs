use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Literal shown in the output pane before any successful translation.
pub const PLACEHOLDER_TRANSLATION: &str = "Translation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "translator/")]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "translator/")]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient toast shown by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "translator/")]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Visual state of the translate action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "translator/")]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    Idle,
    Busy,
}

/// Everything a front end needs to render the translator form.
///
/// Affordance flags already fold in the speakable-language policy and the
/// platform capabilities detected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "translator/")]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub source_language: String,
    pub target_language: String,
    pub input_text: String,
    pub translated_text: String,
    pub has_translation: bool,
    pub translate_action: ActionState,
    pub is_listening: bool,
    pub show_clear: bool,
    pub show_microphone: bool,
    pub show_speaker: bool,
}

// Module declarations
pub mod shared;
pub mod core;
pub mod config;
pub mod app;

pub use crate::app::run;
pub use crate::config::{ApiCredentials, TranslatorConfig};
pub use crate::core::catalog::LanguageCatalog;
pub use crate::core::features::translator::{
    FormState, PendingTranslation, Translate, TranslationClient, TranslationOutcome,
    TranslatorFormController,
};
pub use crate::shared::error::{AppError, AppResult};
pub use crate::shared::settings::AppSettings;
pub use crate::shared::types::{FormView, Language, Notice, NoticeLevel, PLACEHOLDER_TRANSLATION};

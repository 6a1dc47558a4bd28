//! Translator feature
//!
//! Language pickers, text input, one outbound translation request per
//! action, and playback / copy of the result.

pub mod client;
pub mod controller;
pub mod form;
pub mod types;

pub use client::{Translate, TranslationClient};
pub use controller::{PendingTranslation, TranslationOutcome, TranslatorFormController};
pub use form::FormState;

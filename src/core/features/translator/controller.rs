//! Translator form controller
//!
//! Owns the form state and drives the translation client, speech adapters
//! and clipboard in response to user actions. Everything runs on the one UI
//! task; the only suspension point is the outstanding translation request,
//! which is split into `begin_translation` / `finish_translation` so the
//! event loop stays responsive while it is in flight.

use std::sync::Arc;

use super::client::Translate;
use super::form::FormState;
use crate::core::catalog::LanguageCatalog;
use crate::core::clipboard::{ClipboardAdapter, ClipboardWriter, CopyOutcome};
use crate::core::notify::NotificationCenter;
use crate::core::speech::{
    ListeningState, RecognitionEvent, RecognitionReceiver, SpeechInputAdapter, SpeechOutputAdapter,
    SpeechRecognizer, SpeechSynthesizer,
};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::UserPreferences;
use crate::shared::types::{ActionState, FormView, Notice};

pub const MSG_PROVIDE_TEXT: &str = "Provide the text for translation";
pub const MSG_TRANSLATION_FAILED: &str = "Error Occurred! Try again";
pub const MSG_COPIED: &str = "Text copied";
pub const MSG_NOTHING_TO_COPY: &str = "No text to be copied";
pub const MSG_COPY_FAILED: &str = "Unable to copy text";
pub const MSG_PLAYBACK_UNSUPPORTED: &str = "Speech playback is not supported on this device";
pub const MSG_PLAYBACK_FAILED: &str = "Unable to play the translation";
pub const MSG_DICTATION_UNSUPPORTED: &str = "Speech recognition is not supported on this device";
pub const MSG_DICTATION_FAILED: &str = "Unable to start listening";

/// A translation request that has been admitted but not yet sent
pub struct PendingTranslation {
    seq: u64,
    text: String,
    target: String,
    client: Arc<dyn Translate>,
}

impl PendingTranslation {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Perform the request. Safe to run on a spawned task.
    pub async fn run(self) -> TranslationOutcome {
        let result = self.client.translate(&self.text, &self.target).await;
        TranslationOutcome { seq: self.seq, result }
    }
}

#[derive(Debug)]
pub struct TranslationOutcome {
    pub seq: u64,
    pub result: AppResult<String>,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: u64,
    /// Target, input or languages changed after the request went out
    superseded: bool,
}

pub struct TranslatorFormController {
    catalog: LanguageCatalog,
    speakable: String,
    state: FormState,
    client: Arc<dyn Translate>,
    speech_input: SpeechInputAdapter,
    speech_output: SpeechOutputAdapter,
    clipboard: ClipboardAdapter,
    notices: NotificationCenter,
    next_seq: u64,
    in_flight: Option<InFlight>,
    dictation_disabled: bool,
    playback_disabled: bool,
}

impl TranslatorFormController {
    pub fn new(
        catalog: LanguageCatalog,
        preferences: &UserPreferences,
        client: Arc<dyn Translate>,
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        clipboard: Box<dyn ClipboardWriter>,
    ) -> AppResult<Self> {
        for code in [&preferences.default_source_lang, &preferences.default_target_lang] {
            if !catalog.contains(code) {
                return Err(AppError::Config(format!("Default language '{}' is not in the catalog", code)));
            }
        }

        Ok(Self {
            state: FormState::new(&preferences.default_source_lang, &preferences.default_target_lang),
            speakable: preferences.speakable_lang.clone(),
            catalog,
            client,
            speech_input: SpeechInputAdapter::new(recognizer),
            speech_output: SpeechOutputAdapter::new(synthesizer),
            clipboard: ClipboardAdapter::new(clipboard),
            notices: NotificationCenter::new(),
            next_seq: 0,
            in_flight: None,
            dictation_disabled: false,
            playback_disabled: false,
        })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn speakable_language(&self) -> &str {
        &self.speakable
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Recognition event stream for the event loop; available once
    pub fn take_recognition_events(&mut self) -> Option<RecognitionReceiver> {
        self.speech_input.take_events()
    }

    // -- Language selection --

    pub fn set_source_language(&mut self, code: &str) -> AppResult<()> {
        self.ensure_known(code)?;
        self.state.source_language = code.to_string();
        Ok(())
    }

    pub fn set_target_language(&mut self, code: &str) -> AppResult<()> {
        self.ensure_known(code)?;
        self.state.target_language = code.to_string();
        self.reset_translation();
        Ok(())
    }

    /// Swap source and target; also clears the input and the translation.
    /// Identical codes are allowed.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.state.source_language, &mut self.state.target_language);
        self.state.input_text.clear();
        self.reset_translation();
    }

    fn ensure_known(&mut self, code: &str) -> AppResult<()> {
        if self.catalog.contains(code) {
            return Ok(());
        }
        self.notices.warning(format!("Unknown language: {}", code));
        Err(AppError::Validation(format!("Unknown language code '{}'", code)))
    }

    // -- Input --

    /// Replace the input. A changed text supersedes any outstanding request.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.state.input_text {
            return;
        }
        self.state.input_text = text;
        if let Some(flight) = self.in_flight.as_mut() {
            flight.superseded = true;
        }
    }

    pub fn clear_input(&mut self) {
        self.state.input_text.clear();
        self.reset_translation();
    }

    fn reset_translation(&mut self) {
        self.state.reset_translation();
        if let Some(flight) = self.in_flight.as_mut() {
            flight.superseded = true;
        }
    }

    // -- Translation --

    /// Admit a translation request for the current input.
    ///
    /// Returns `None` when the input is empty (a warning is raised) or while
    /// another request is still outstanding (the call is ignored).
    pub fn begin_translation(&mut self) -> Option<PendingTranslation> {
        if let Some(flight) = self.in_flight {
            log::debug!("[Translator] Request #{} still outstanding, ignoring translate", flight.seq);
            return None;
        }

        if self.state.input_text.is_empty()
            || self.state.source_language.is_empty()
            || self.state.target_language.is_empty()
        {
            self.notices.warning(MSG_PROVIDE_TEXT);
            return None;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight = Some(InFlight { seq, superseded: false });
        self.state.is_translating = true;

        log::debug!(
            "[Translator] Request #{} {} -> {}",
            seq,
            self.state.source_language,
            self.state.target_language
        );

        Some(PendingTranslation {
            seq,
            text: self.state.input_text.clone(),
            target: self.state.target_language.clone(),
            client: Arc::clone(&self.client),
        })
    }

    /// Apply a finished request. Returns `true` when the translated text was
    /// updated.
    pub fn finish_translation(&mut self, outcome: TranslationOutcome) -> bool {
        let flight = match self.in_flight {
            Some(flight) if flight.seq == outcome.seq => flight,
            _ => {
                log::debug!("[Translator] Dropping response for unknown request #{}", outcome.seq);
                return false;
            }
        };

        self.in_flight = None;
        self.state.is_translating = false;

        if flight.superseded {
            log::info!("[Translator] Discarding response #{}: form changed while in flight", flight.seq);
            return false;
        }

        match outcome.result {
            Ok(translated) => {
                self.state.translated_text = translated;
                true
            }
            Err(e) => {
                log::warn!("[Translator] Request #{} failed: {}", flight.seq, e);
                self.notices.error(MSG_TRANSLATION_FAILED);
                false
            }
        }
    }

    /// Admit, perform and apply one translation in place
    pub async fn translate(&mut self) -> bool {
        match self.begin_translation() {
            Some(pending) => {
                let outcome = pending.run().await;
                self.finish_translation(outcome)
            }
            None => false,
        }
    }

    // -- Speech --

    /// Start dictation in the source language, or stop it if active.
    pub fn toggle_listening(&mut self) -> AppResult<()> {
        if self.speech_input.state() == ListeningState::Listening {
            let result = self.speech_input.stop();
            self.sync_listening();
            return result;
        }

        if self.state.source_language != self.speakable {
            return Err(AppError::Validation(format!(
                "Dictation is only offered for '{}'",
                self.speakable
            )));
        }
        if self.dictation_disabled {
            return Err(AppError::Unsupported("Speech recognition is not available".to_string()));
        }

        let result = self.speech_input.start(&self.state.source_language);
        match &result {
            Ok(()) => log::debug!("[Speech] Listening in '{}'", self.state.source_language),
            Err(AppError::Unsupported(_)) => {
                self.notices.error(MSG_DICTATION_UNSUPPORTED);
                self.dictation_disabled = true;
            }
            Err(e) => {
                log::warn!("[Speech] Could not start dictation: {}", e);
                self.notices.error(MSG_DICTATION_FAILED);
            }
        }
        self.sync_listening();
        result
    }

    /// Feed a platform recognition event; a recognized utterance replaces
    /// the input text and is returned.
    pub fn handle_recognition_event(&mut self, event: RecognitionEvent) -> Option<String> {
        let text = self.speech_input.handle_event(event)?;
        self.set_input_text(text.clone());
        Some(text)
    }

    fn sync_listening(&mut self) {
        self.state.is_listening = self.speech_input.state() == ListeningState::Listening;
    }

    /// Read the translation aloud in the target language
    pub fn speak_translation(&mut self) -> AppResult<()> {
        if self.state.target_language != self.speakable {
            return Err(AppError::Validation(format!(
                "Playback is only offered for '{}'",
                self.speakable
            )));
        }
        if self.playback_disabled {
            return Err(AppError::Unsupported("Speech synthesis is not available".to_string()));
        }

        let result = self
            .speech_output
            .speak(&self.state.translated_text, &self.state.target_language);
        match &result {
            Ok(()) => {}
            Err(AppError::Unsupported(_)) => {
                self.notices.error(MSG_PLAYBACK_UNSUPPORTED);
                self.playback_disabled = true;
            }
            Err(e) => {
                log::warn!("[Speech] Playback failed: {}", e);
                self.notices.error(MSG_PLAYBACK_FAILED);
            }
        }
        result
    }

    // -- Clipboard --

    pub fn copy_translation(&mut self) -> AppResult<CopyOutcome> {
        let result = self.clipboard.copy(&self.state.translated_text);
        match &result {
            Ok(CopyOutcome::Copied) => self.notices.success(MSG_COPIED),
            Ok(CopyOutcome::NothingToCopy) => self.notices.warning(MSG_NOTHING_TO_COPY),
            Err(e) => {
                log::warn!("[Clipboard] {}", e);
                self.notices.error(MSG_COPY_FAILED);
            }
        }
        result
    }

    // -- View --

    pub fn view(&self) -> FormView {
        let state = &self.state;
        FormView {
            source_language: state.source_language.clone(),
            target_language: state.target_language.clone(),
            input_text: state.input_text.clone(),
            translated_text: state.translated_text.clone(),
            has_translation: state.has_translation(),
            translate_action: if state.is_translating { ActionState::Busy } else { ActionState::Idle },
            is_listening: state.is_listening,
            show_clear: !state.input_text.is_empty(),
            show_microphone: state.is_listening
                || (state.source_language == self.speakable && !self.dictation_disabled),
            show_speaker: state.target_language == self.speakable && !self.playback_disabled,
        }
    }
}

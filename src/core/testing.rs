//! Capability test doubles shared by the unit tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::core::clipboard::ClipboardWriter;
use crate::core::features::translator::Translate;
use crate::core::speech::{
    RecognitionConfig, RecognitionEvent, SpeechRecognizer, SpeechSynthesizer, Utterance,
};
use crate::core::speech::input::RecognitionSender;
use crate::shared::error::{AppError, AppResult};

/// Records every call and answers with a canned translation
pub struct FakeTranslator {
    reply: String,
    calls: Mutex<Vec<(String, String)>>,
    fail_next: Mutex<bool>,
}

impl FakeTranslator {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(false),
        }
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translate for FakeTranslator {
    async fn translate(&self, text: &str, target: &str) -> AppResult<String> {
        self.calls.lock().unwrap().push((text.to_string(), target.to_string()));

        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(AppError::TranslationFailed);
        }
        Ok(self.reply.clone())
    }
}

#[derive(Default)]
struct RecognizerInner {
    last_config: Option<RecognitionConfig>,
    sender: Option<RecognitionSender>,
    stop_calls: usize,
}

#[derive(Clone)]
pub struct FakeRecognizer {
    supported: bool,
    inner: Arc<Mutex<RecognizerInner>>,
}

impl FakeRecognizer {
    pub fn supported() -> Self {
        Self { supported: true, inner: Arc::default() }
    }

    pub fn unsupported() -> Self {
        Self { supported: false, inner: Arc::default() }
    }

    pub fn last_config(&self) -> Option<RecognitionConfig> {
        self.inner.lock().unwrap().last_config.clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.inner.lock().unwrap().stop_calls
    }

    /// Push an event as the platform would
    pub fn emit(&self, event: RecognitionEvent) {
        if let Some(sender) = self.inner.lock().unwrap().sender.as_ref() {
            sender.send(event).unwrap();
        }
    }
}

impl SpeechRecognizer for FakeRecognizer {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn start(&mut self, config: &RecognitionConfig, events: RecognitionSender) -> AppResult<()> {
        if !self.supported {
            return Err(AppError::Unsupported("no recognizer".to_string()));
        }
        let mut inner = self.inner.lock().unwrap();
        inner.last_config = Some(config.clone());
        inner.sender = Some(events);
        Ok(())
    }

    fn stop(&mut self) -> AppResult<()> {
        self.inner.lock().unwrap().stop_calls += 1;
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeSynthesizer {
    available: bool,
    spoken: Arc<Mutex<Vec<Utterance>>>,
}

impl FakeSynthesizer {
    pub fn available() -> Self {
        Self { available: true, spoken: Arc::default() }
    }

    pub fn unavailable() -> Self {
        Self { available: false, spoken: Arc::default() }
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSynthesizer for FakeSynthesizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&mut self, utterance: &Utterance) -> AppResult<()> {
        self.spoken.lock().unwrap().push(utterance.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeClipboard {
    fail: bool,
    writes: Arc<Mutex<Vec<String>>>,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        Self { fail: true, writes: Arc::default() }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&mut self, text: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Clipboard("permission denied".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

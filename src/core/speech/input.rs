//! Speech-to-text input
//!
//! `Idle -> Listening -> Idle`. A recognized utterance does not end the
//! session: the adapter stays Listening until `stop()` is called.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use std::process::Stdio;

use super::program_on_path;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub lang: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionConfig {
    /// One final utterance, no interim hypotheses
    pub fn single_utterance(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            continuous: false,
            interim_results: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub is_final: bool,
    /// Best hypothesis first
    pub alternatives: Vec<String>,
}

impl RecognitionResult {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            is_final: true,
            alternatives: vec![text.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Full result list of the session so far; the last entry is the newest
    Result(Vec<RecognitionResult>),
    Error(String),
    End,
}

pub type RecognitionSender = UnboundedSender<RecognitionEvent>;
pub type RecognitionReceiver = UnboundedReceiver<RecognitionEvent>;

/// Platform speech recognition capability
pub trait SpeechRecognizer: Send {
    fn is_supported(&self) -> bool;

    fn start(&mut self, config: &RecognitionConfig, events: RecognitionSender) -> AppResult<()>;

    fn stop(&mut self) -> AppResult<()>;
}

/// Platforms without any speech recognition
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _config: &RecognitionConfig, _events: RecognitionSender) -> AppResult<()> {
        Err(AppError::Unsupported("Speech recognition is not available".to_string()))
    }

    fn stop(&mut self) -> AppResult<()> {
        Ok(())
    }
}

/// Runs an external dictation command; each non-empty stdout line is one
/// final utterance. Needs a Tokio runtime.
#[derive(Debug)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandRecognizer {
    pub fn new(command: &[String]) -> Self {
        let (program, args) = match command.split_first() {
            Some((program, args)) => (program.clone(), args.to_vec()),
            None => (String::new(), Vec::new()),
        };
        Self { program, args, child: None }
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn is_supported(&self) -> bool {
        !self.program.is_empty() && program_on_path(&self.program)
    }

    fn start(&mut self, config: &RecognitionConfig, events: RecognitionSender) -> AppResult<()> {
        if !self.is_supported() {
            return Err(AppError::Unsupported("Speech recognition is not available".to_string()));
        }
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(AppError::Unsupported("Speech recognition needs an async runtime".to_string()));
        }

        let args: Vec<String> = self.args.iter().map(|a| a.replace("{lang}", &config.lang)).collect();
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Io(format!("Failed to start {}: {}", self.program, e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AppError::Io("Dictation command has no stdout".to_string()))?;

        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            let mut results = Vec::new();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        results.push(RecognitionResult::final_text(line));
                        if events.send(RecognitionEvent::Result(results.clone())).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        let _ = events.send(RecognitionEvent::End);
                        break;
                    }
                    Err(e) => {
                        let _ = events.send(RecognitionEvent::Error(e.to_string()));
                        break;
                    }
                }
            }
        });

        log::info!("[Speech] Dictation started ({}, lang {})", self.program, config.lang);
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> AppResult<()> {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                // Already exited on its own
                log::debug!("[Speech] Dictation process not killed: {}", e);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningState {
    Idle,
    Listening,
}

pub struct SpeechInputAdapter {
    recognizer: Box<dyn SpeechRecognizer>,
    state: ListeningState,
    events_tx: RecognitionSender,
    events_rx: Option<RecognitionReceiver>,
}

impl SpeechInputAdapter {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            recognizer,
            state: ListeningState::Idle,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    pub fn state(&self) -> ListeningState {
        self.state
    }

    /// The event stream; handed out once to whoever runs the event loop
    pub fn take_events(&mut self) -> Option<RecognitionReceiver> {
        self.events_rx.take()
    }

    pub fn start(&mut self, lang: &str) -> AppResult<()> {
        if self.state != ListeningState::Idle {
            return Err(AppError::Validation("Speech recognition already active".to_string()));
        }

        let config = RecognitionConfig::single_utterance(lang);
        self.recognizer.start(&config, self.events_tx.clone())?;
        self.state = ListeningState::Listening;
        Ok(())
    }

    pub fn stop(&mut self) -> AppResult<()> {
        if self.state != ListeningState::Listening {
            return Err(AppError::Validation("Speech recognition is not active".to_string()));
        }

        self.recognizer.stop()?;
        self.state = ListeningState::Idle;
        Ok(())
    }

    /// Returns the recognized utterance carried by `event`, if any.
    ///
    /// Only the newest result counts, and only when it is final; its best
    /// alternative is the utterance. Errors are logged and leave the state
    /// untouched.
    pub fn handle_event(&mut self, event: RecognitionEvent) -> Option<String> {
        match event {
            RecognitionEvent::Result(results) => {
                if self.state != ListeningState::Listening {
                    log::debug!("[Speech] Dropping result that arrived after stop");
                    return None;
                }
                let latest = results.last()?;
                if !latest.is_final {
                    return None;
                }
                latest.alternatives.first().cloned()
            }
            RecognitionEvent::Error(reason) => {
                log::warn!("[Speech] Recognition error: {}", reason);
                None
            }
            RecognitionEvent::End => {
                log::debug!("[Speech] Recognition session ended by platform");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeRecognizer;

    #[test]
    fn test_start_stop_cycle() {
        let recognizer = FakeRecognizer::supported();
        let mut adapter = SpeechInputAdapter::new(Box::new(recognizer.clone()));

        assert_eq!(adapter.state(), ListeningState::Idle);
        adapter.start("en").unwrap();
        assert_eq!(adapter.state(), ListeningState::Listening);
        assert_eq!(recognizer.last_config(), Some(RecognitionConfig::single_utterance("en")));

        adapter.stop().unwrap();
        assert_eq!(adapter.state(), ListeningState::Idle);
        assert_eq!(recognizer.stop_calls(), 1);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut adapter = SpeechInputAdapter::new(Box::new(FakeRecognizer::supported()));

        assert!(adapter.stop().is_err());
        adapter.start("en").unwrap();
        assert!(adapter.start("en").is_err());
        assert_eq!(adapter.state(), ListeningState::Listening);
    }

    #[test]
    fn test_unsupported_stays_idle() {
        let mut adapter = SpeechInputAdapter::new(Box::new(UnsupportedRecognizer));

        let err = adapter.start("en").unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
        assert_eq!(adapter.state(), ListeningState::Idle);
    }

    #[test]
    fn test_result_keeps_listening() {
        let mut adapter = SpeechInputAdapter::new(Box::new(FakeRecognizer::supported()));
        adapter.start("en").unwrap();

        let text = adapter.handle_event(RecognitionEvent::Result(vec![
            RecognitionResult::final_text("first"),
            RecognitionResult {
                is_final: true,
                alternatives: vec!["hello world".to_string(), "hello word".to_string()],
            },
        ]));

        assert_eq!(text.as_deref(), Some("hello world"));
        assert_eq!(adapter.state(), ListeningState::Listening);
    }

    #[test]
    fn test_interim_and_late_results_ignored() {
        let mut adapter = SpeechInputAdapter::new(Box::new(FakeRecognizer::supported()));
        adapter.start("en").unwrap();

        let interim = RecognitionEvent::Result(vec![RecognitionResult {
            is_final: false,
            alternatives: vec!["hel".to_string()],
        }]);
        assert_eq!(adapter.handle_event(interim), None);

        adapter.stop().unwrap();
        let late = RecognitionEvent::Result(vec![RecognitionResult::final_text("hello")]);
        assert_eq!(adapter.handle_event(late), None);
    }

    #[test]
    fn test_error_does_not_change_state() {
        let mut adapter = SpeechInputAdapter::new(Box::new(FakeRecognizer::supported()));
        adapter.start("en").unwrap();

        assert_eq!(adapter.handle_event(RecognitionEvent::Error("no-speech".to_string())), None);
        assert_eq!(adapter.state(), ListeningState::Listening);
    }

    #[test]
    fn test_events_taken_once() {
        let mut adapter = SpeechInputAdapter::new(Box::new(FakeRecognizer::supported()));
        assert!(adapter.take_events().is_some());
        assert!(adapter.take_events().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_recognizer_emits_lines() {
        let mut recognizer = CommandRecognizer::new(&["echo".to_string(), "{lang}".to_string()]);
        assert!(recognizer.is_supported());

        let (tx, mut rx) = mpsc::unbounded_channel();
        recognizer.start(&RecognitionConfig::single_utterance("ta"), tx).unwrap();

        assert_eq!(
            rx.recv().await,
            Some(RecognitionEvent::Result(vec![RecognitionResult::final_text("ta")]))
        );
        assert_eq!(rx.recv().await, Some(RecognitionEvent::End));
        recognizer.stop().unwrap();
    }

    #[test]
    fn test_command_recognizer_without_program() {
        let mut recognizer = CommandRecognizer::new(&[]);
        assert!(!recognizer.is_supported());

        let (tx, _rx) = mpsc::unbounded_channel();
        let err = recognizer.start(&RecognitionConfig::single_utterance("en"), tx).unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
    }
}

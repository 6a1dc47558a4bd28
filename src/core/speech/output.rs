//! Text-to-speech output
//!
//! One utterance per call, queued on the platform engine and never awaited.

use enum_dispatch::enum_dispatch;
use std::process::Stdio;
use tokio::process::Command;

use super::program_on_path;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    /// BCP 47 / catalog code; the engine decides whether it can voice it
    pub lang: String,
}

/// Platform text-to-speech capability
#[enum_dispatch]
pub trait SpeechSynthesizer: Send {
    fn is_available(&self) -> bool;

    /// Queue the utterance and return without waiting for playback
    fn speak(&mut self, utterance: &Utterance) -> AppResult<()>;
}

/// Shells out to a desktop speech command (`say`, `espeak-ng`, ...).
/// Needs a Tokio runtime.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
    available: bool,
}

impl CommandSynthesizer {
    /// `command[0]` is the program, the rest an argument template with
    /// `{text}` and `{lang}` placeholders.
    pub fn new(command: &[String]) -> Self {
        let (program, args) = match command.split_first() {
            Some((program, args)) => (program.clone(), args.to_vec()),
            None => (String::new(), Vec::new()),
        };
        let available = !program.is_empty() && program_on_path(&program);
        if !available {
            log::info!("[Speech] Synthesizer '{}' not found, playback disabled", program);
        }

        Self { program, args, available }
    }

    fn render_args(&self, utterance: &Utterance) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace("{lang}", &utterance.lang).replace("{text}", &utterance.text))
            .collect()
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&mut self, utterance: &Utterance) -> AppResult<()> {
        if !self.available {
            return Err(AppError::Unsupported("Speech synthesis is not available".to_string()));
        }

        if tokio::runtime::Handle::try_current().is_err() {
            return Err(AppError::Unsupported("Speech synthesis needs an async runtime".to_string()));
        }

        let mut child = Command::new(&self.program)
            .args(self.render_args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::Io(format!("Failed to start {}: {}", self.program, e)))?;

        log::debug!("[Speech] Speaking {} chars as '{}'", utterance.text.chars().count(), utterance.lang);

        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    log::warn!("[Speech] {} exited with {}", program, status);
                }
                Ok(_) => {}
                Err(e) => log::warn!("[Speech] Failed waiting on {}: {}", program, e),
            }
        });

        Ok(())
    }
}

/// Used where no speech engine exists at all
#[derive(Debug, Clone, Default)]
pub struct UnsupportedSynthesizer;

impl SpeechSynthesizer for UnsupportedSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&mut self, _utterance: &Utterance) -> AppResult<()> {
        Err(AppError::Unsupported("Speech synthesis is not available".to_string()))
    }
}

#[enum_dispatch(SpeechSynthesizer)]
#[derive(Debug, Clone)]
pub enum SynthesizerBackend {
    Command(CommandSynthesizer),
    Unsupported(UnsupportedSynthesizer),
}

impl SynthesizerBackend {
    pub fn from_command(command: &[String]) -> Self {
        if command.is_empty() {
            return SynthesizerBackend::Unsupported(UnsupportedSynthesizer);
        }
        SynthesizerBackend::Command(CommandSynthesizer::new(command))
    }
}

pub struct SpeechOutputAdapter {
    synthesizer: Box<dyn SpeechSynthesizer>,
}

impl SpeechOutputAdapter {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub fn speak(&mut self, text: &str, lang: &str) -> AppResult<()> {
        if !self.synthesizer.is_available() {
            return Err(AppError::Unsupported("Speech synthesis is not available".to_string()));
        }

        self.synthesizer.speak(&Utterance {
            text: text.to_string(),
            lang: lang.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeSynthesizer;

    #[test]
    fn test_adapter_tags_language() {
        let synth = FakeSynthesizer::available();
        let mut adapter = SpeechOutputAdapter::new(Box::new(synth.clone()));

        adapter.speak("Hello", "en").unwrap();

        assert_eq!(
            synth.spoken(),
            vec![Utterance { text: "Hello".to_string(), lang: "en".to_string() }]
        );
    }

    #[test]
    fn test_adapter_accepts_any_language() {
        let synth = FakeSynthesizer::available();
        let mut adapter = SpeechOutputAdapter::new(Box::new(synth.clone()));

        adapter.speak("வணக்கம்", "ta").unwrap();
        assert_eq!(synth.spoken()[0].lang, "ta");
    }

    #[test]
    fn test_unavailable_reports_unsupported() {
        let synth = FakeSynthesizer::unavailable();
        let mut adapter = SpeechOutputAdapter::new(Box::new(synth.clone()));

        let err = adapter.speak("Hello", "en").unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
        assert!(synth.spoken().is_empty());
    }

    #[test]
    fn test_render_args_template() {
        let synth = CommandSynthesizer {
            program: "espeak-ng".to_string(),
            args: vec!["-v".to_string(), "{lang}".to_string(), "{text}".to_string()],
            available: true,
        };
        let args = synth.render_args(&Utterance { text: "Hi there".to_string(), lang: "en".to_string() });
        assert_eq!(args, vec!["-v", "en", "Hi there"]);
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let backend = SynthesizerBackend::from_command(&["definitely-not-a-speech-engine-xyz".to_string()]);
        assert!(!backend.is_available());

        let empty = SynthesizerBackend::from_command(&[]);
        assert!(matches!(empty, SynthesizerBackend::Unsupported(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_program_is_unsupported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let engine = dir.path().join("tts-engine");
        std::fs::write(&engine, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o644)).unwrap();

        let backend = SynthesizerBackend::from_command(&[engine.to_string_lossy().into_owned()]);
        assert!(!backend.is_available());

        let mut adapter = SpeechOutputAdapter::new(Box::new(backend));
        let err = adapter.speak("Hello", "en").unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_synthesizer_spawns() {
        let mut synth = CommandSynthesizer::new(&["true".to_string(), "{text}".to_string()]);
        assert!(synth.is_available());

        synth
            .speak(&Utterance { text: "Hello".to_string(), lang: "en".to_string() })
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_command_synthesizer_needs_runtime() {
        let mut synth = CommandSynthesizer::new(&["true".to_string()]);

        let err = synth
            .speak(&Utterance { text: "Hello".to_string(), lang: "en".to_string() })
            .unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
    }
}

//! Speech capabilities
//!
//! Wraps the platform speech-to-text and text-to-speech engines behind
//! capability traits so the form controller can run against test doubles.

pub mod input;
pub mod output;

pub use input::{
    CommandRecognizer, ListeningState, RecognitionConfig, RecognitionEvent, RecognitionReceiver,
    RecognitionResult, SpeechInputAdapter, SpeechRecognizer, UnsupportedRecognizer,
};
pub use output::{
    CommandSynthesizer, SpeechOutputAdapter, SpeechSynthesizer, SynthesizerBackend,
    UnsupportedSynthesizer, Utterance,
};

/// Whether `program` resolves to an executable, either as a path or via `PATH`
pub(crate) fn program_on_path(program: &str) -> bool {
    match which::which(program) {
        Ok(path) => {
            log::debug!("[Speech] Found {} at {}", program, path.display());
            true
        }
        Err(e) => {
            log::debug!("[Speech] {} not usable: {}", program, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        assert!(!program_on_path("definitely-not-a-speech-engine-xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn test_requires_execute_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let engine = dir.path().join("tts-engine");
        std::fs::write(&engine, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o644)).unwrap();
        let engine = engine.to_str().unwrap();

        assert!(!program_on_path(engine));

        std::fs::set_permissions(engine, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(program_on_path(engine));
    }
}

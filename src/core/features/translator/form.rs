use crate::shared::types::PLACEHOLDER_TRANSLATION;

/// Session state of one translator form. Created on mount, dropped on
/// unmount; nothing survives a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub source_language: String,
    pub target_language: String,
    pub input_text: String,
    /// Either the placeholder or the last successful translation
    pub translated_text: String,
    pub is_translating: bool,
    pub is_listening: bool,
}

impl FormState {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            input_text: String::new(),
            translated_text: PLACEHOLDER_TRANSLATION.to_string(),
            is_translating: false,
            is_listening: false,
        }
    }

    pub fn has_translation(&self) -> bool {
        self.translated_text != PLACEHOLDER_TRANSLATION
    }

    pub(crate) fn reset_translation(&mut self) {
        self.translated_text = PLACEHOLDER_TRANSLATION.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_placeholder() {
        let state = FormState::new("en", "ta");
        assert_eq!(state.translated_text, "Translation");
        assert!(!state.has_translation());
        assert!(!state.is_translating);
        assert!(!state.is_listening);
    }

    #[test]
    fn test_reset_translation() {
        let mut state = FormState::new("en", "ta");
        state.translated_text = "வணக்கம்".to_string();
        assert!(state.has_translation());

        state.reset_translation();
        assert!(!state.has_translation());
    }
}

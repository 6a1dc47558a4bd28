//! Clipboard module
//!
//! Copies the current translation to the system clipboard. The placeholder
//! sentinel is never copied verbatim.

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::PLACEHOLDER_TRANSLATION;

/// Write-text capability of the host environment
pub trait ClipboardWriter: Send {
    fn write_text(&mut self, text: &str) -> AppResult<()>;
}

/// System clipboard via `cli-clipboard`
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> AppResult<()> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| AppError::Clipboard(format!("Failed to write to clipboard: {}", e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Only the placeholder was showing; an empty string was written instead
    NothingToCopy,
}

pub struct ClipboardAdapter {
    writer: Box<dyn ClipboardWriter>,
}

impl ClipboardAdapter {
    pub fn new(writer: Box<dyn ClipboardWriter>) -> Self {
        Self { writer }
    }

    pub fn copy(&mut self, text: &str) -> AppResult<CopyOutcome> {
        if text == PLACEHOLDER_TRANSLATION {
            self.writer.write_text("")?;
            return Ok(CopyOutcome::NothingToCopy);
        }

        self.writer.write_text(text)?;
        log::debug!("[Clipboard] Copied {} chars", text.chars().count());
        Ok(CopyOutcome::Copied)
    }
}

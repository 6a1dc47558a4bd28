//! Transient notification surface
//!
//! Collects toasts raised by the form controller until a front end drains
//! them. Bounded: older notices are dropped once the queue is full.

use std::collections::VecDeque;

use crate::shared::types::{Notice, NoticeLevel};

/// Maximum number of undisplayed notices kept
const MAX_PENDING_NOTICES: usize = 5;

#[derive(Debug, Default)]
pub struct NotificationCenter {
    pending: VecDeque<Notice>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice::new(level, message);
        log::debug!("[Notify] {:?}: {}", notice.level, notice.message);

        self.pending.push_back(notice);
        while self.pending.len() > MAX_PENDING_NOTICES {
            self.pending.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Hand all pending notices to the renderer, oldest first
    pub fn drain(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

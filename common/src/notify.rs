//! Toast notification service
//!
//! A single shared toast. Each `show` replaces the message and starts a new
//! generation; the dismissal timer carries the generation it was scheduled
//! for, so only the latest timer can hide the toast.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    /// Unrecognised kinds fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "exclamation-circle",
            NotificationKind::Warning => "exclamation-triangle",
            NotificationKind::Info => "info-circle",
        }
    }
}

/// Handle for one scheduled dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifier {
    message: String,
    kind: NotificationKind,
    visible: bool,
    generation: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the toast content and make it visible.
    ///
    /// The caller schedules `expire(ticket)` after the configured timeout.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> ToastTicket {
        self.generation += 1;
        self.message = message.into();
        self.kind = kind;
        self.visible = true;
        ToastTicket(self.generation)
    }

    /// Hide the toast if `ticket` belongs to the latest `show`.
    /// Returns whether the toast was hidden.
    pub fn expire(&mut self, ticket: ToastTicket) -> bool {
        if ticket.0 != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }
}

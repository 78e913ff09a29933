//! "Are you sure?" dialog holding one deferred action

#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirm<A> {
    pub title: String,
    pub message: String,
    action: A,
}

/// At most one confirmation is pending. Opening a new one drops the
/// previous action without running it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog<A> {
    pending: Option<PendingConfirm<A>>,
}

impl<A> Default for ConfirmDialog<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmDialog<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog. Returns the action that was discarded, if any.
    pub fn open(&mut self, title: impl Into<String>, message: impl Into<String>, action: A) -> Option<A> {
        let previous = self.pending.take().map(|p| p.action);
        self.pending = Some(PendingConfirm {
            title: title.into(),
            message: message.into(),
            action,
        });
        previous
    }

    /// Hide the dialog and hand the stored action to the caller.
    ///
    /// The action is moved out, so a second `accept` yields `None`.
    pub fn accept(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    /// Cancel button, backdrop click or Escape.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn title(&self) -> &str {
        self.pending.as_ref().map(|p| p.title.as_str()).unwrap_or("")
    }

    pub fn message(&self) -> &str {
        self.pending.as_ref().map(|p| p.message.as_str()).unwrap_or("")
    }
}

//! Global keyboard shortcuts

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Escape: close every open modal
    CloseModals,
    /// Ctrl+S: submit the open edit form
    SaveForm,
    /// Ctrl+N: open the post-job modal
    NewJob,
}

impl Shortcut {
    /// `key` is `KeyboardEvent.key`. Shortcuts with Ctrl suppress the
    /// browser default.
    pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
        match (key, ctrl) {
            ("Escape", _) => Some(Shortcut::CloseModals),
            ("s" | "S", true) => Some(Shortcut::SaveForm),
            ("n" | "N", true) => Some(Shortcut::NewJob),
            _ => None,
        }
    }

    pub fn prevents_default(&self) -> bool {
        !matches!(self, Shortcut::CloseModals)
    }
}

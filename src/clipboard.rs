//! Clipboard capability seam.
//!
//! The system clipboard is an external collaborator: the store only needs
//! `copy(text) -> success|failure`. Hosts plug in their platform clipboard
//! (e.g. a Tauri clipboard plugin); tests and headless use get the in-memory
//! implementations below.

use std::sync::Mutex;

use crate::error::Result;

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Clipboard that accepts and discards everything. For hosts without a
/// clipboard (CI, daemons).
#[derive(Debug, Default)]
pub struct NullClipboard;

impl Clipboard for NullClipboard {
    fn copy(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Clipboard that keeps the last copied value in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().expect("clipboard lock poisoned").clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        *self.contents.lock().expect("clipboard lock poisoned") = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails. Test double for the failure notification path.
#[cfg(test)]
pub(crate) struct FailingClipboard;

#[cfg(test)]
impl Clipboard for FailingClipboard {
    fn copy(&self, _text: &str) -> Result<()> {
        Err(crate::error::PassVaultError::Clipboard(
            "clipboard unavailable".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_value() {
        let clipboard = MemoryClipboard::new();
        clipboard.copy("first").unwrap();
        clipboard.copy("p@ss1").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("p@ss1"));
    }
}

use std::fmt;
use serde::Serialize;

use crate::clipboard::{Clipboard, ClipboardError};

/// A transient user-facing message. Reset and copy each produce exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    ResetDone,
    Copied { text: String },
    CopyFailed { reason: String },
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::ResetDone => "Reset complete",
            Notice::Copied { .. } => "Copied",
            Notice::CopyFailed { .. } => "Copy failed",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::ResetDone => "All assignments have been cleared.".to_string(),
            Notice::Copied { text } => text.clone(),
            Notice::CopyFailed { reason } => {
                format!("Check clipboard access ({}).", reason)
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::CopyFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.description())
    }
}

/// Writes `text` to the clipboard and reports the outcome as a notice.
/// A failed write is logged and reported, never propagated.
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, text: String) -> Notice {
    match clipboard.write_text(&text) {
        Ok(()) => {
            tracing::debug!(bytes = text.len(), "result copied to clipboard");
            Notice::Copied { text }
        }
        Err(err) => copy_failed(err),
    }
}

fn copy_failed(err: ClipboardError) -> Notice {
    tracing::warn!(error = %err, "clipboard write failed");
    Notice::CopyFailed { reason: err.to_string() }
}

//! Clipboard access for the formatted result.
//!
//! The system backend shells out to the platform's clipboard tool
//! (pbcopy, clip, wl-copy, xclip/xsel), picked from the OS and `PATH`.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    NotAvailable,
    #[error("clipboard write failed: {0}")]
    WriteError(String),
}

/// Anything the result text can be copied into
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// External clipboard tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalBackend {
    MacOS,
    Windows,
    Wayland,
    X11,
}

/// The host clipboard, reached through an external tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClipboard {
    backend: Option<ExternalBackend>,
}

impl SystemClipboard {
    pub fn detect() -> Self {
        let backend = detect_external_backend();
        tracing::debug!(backend = ?backend, "clipboard backend detected");
        Self { backend }
    }

    pub fn backend(&self) -> Option<ExternalBackend> {
        self.backend
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.backend {
            Some(ExternalBackend::MacOS) => run_command_with_input("pbcopy", &[], text),
            Some(ExternalBackend::Windows) => run_command_with_input("clip", &[], text),
            Some(ExternalBackend::Wayland) => run_command_with_input("wl-copy", &[], text),
            Some(ExternalBackend::X11) => {
                if run_command_with_input("xclip", &["-selection", "clipboard"], text).is_ok() {
                    Ok(())
                } else {
                    run_command_with_input("xsel", &["--clipboard", "--input"], text)
                }
            }
            None => Err(ClipboardError::NotAvailable),
        }
    }
}

/// In-process clipboard for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail: bool,
}

impl MemoryClipboard {
    /// A clipboard whose every write fails
    pub fn failing() -> Self {
        Self { contents: None, fail: true }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::WriteError("write rejected".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

fn detect_external_backend() -> Option<ExternalBackend> {
    [
        ExternalBackend::MacOS,
        ExternalBackend::Windows,
        ExternalBackend::Wayland,
        ExternalBackend::X11,
    ]
    .into_iter()
    .find(|b| external_backend_available(*b))
}

fn external_backend_available(backend: ExternalBackend) -> bool {
    match backend {
        ExternalBackend::MacOS => cfg!(target_os = "macos") && command_exists("pbcopy"),
        ExternalBackend::Windows => cfg!(target_os = "windows") && command_exists("clip"),
        ExternalBackend::Wayland => {
            env::var_os("WAYLAND_DISPLAY").is_some() && command_exists("wl-copy")
        }
        ExternalBackend::X11 => {
            env::var_os("DISPLAY").is_some()
                && (command_exists("xclip") || command_exists("xsel"))
        }
    }
}

fn command_exists(command: &str) -> bool {
    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&path_var).any(|dir| {
        dir.join(command).is_file()
            || (cfg!(target_os = "windows") && dir.join(format!("{command}.exe")).is_file())
    })
}

fn run_command_with_input(cmd: &str, args: &[&str], content: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| ClipboardError::WriteError(err.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|err| ClipboardError::WriteError(err.to_string()))?;
    }

    let status = child
        .wait()
        .map_err(|err| ClipboardError::WriteError(err.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::WriteError(format!("clipboard command failed: {cmd}")))
    }
}

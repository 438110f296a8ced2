//! Hand-off of URIs to the platform's external-open facility.
//!
//! The engine never inspects whether a URI resolved; unregistered schemes
//! are the platform's problem.

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

pub trait ExternalOpener {
    fn open(&mut self, uri: &str);
}

/// Opens URIs with the desktop's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(uri: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(uri);
            cmd
        }
        // Not `cmd /C start`: cmd would split query strings at `&`.
        #[cfg(windows)]
        {
            let mut cmd = Command::new("rundll32");
            cmd.arg("url.dll,FileProtocolHandler").arg(uri);
            cmd
        }
        #[cfg(not(any(target_os = "macos", windows)))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(uri);
            cmd
        }
    }
}

impl ExternalOpener for SystemOpener {
    fn open(&mut self, uri: &str) {
        let spawned = Self::command(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(mut child) => {
                tracing::info!(uri, "Opened external link");
                // Reap the helper off the UI thread.
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(err) => tracing::warn!(uri, "Failed to open external link: {err}"),
        }
    }
}

/// Records URIs instead of opening them. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExternalOpener for RecordingOpener {
    fn open(&mut self, uri: &str) {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri.to_string());
    }
}

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use vin_capture_core::SESSION_TARGET;

/// Which recognition loop a session runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    Text,
    Barcode,
}

impl ScanMode {
    pub fn label(self) -> &'static str {
        match self {
            ScanMode::Text => "text",
            ScanMode::Barcode => "barcode",
        }
    }
}

/// Lifecycle of a session.
///
/// `Idle -> Opening -> Streaming -> Scanning`, with `Paused` toggled by the
/// host and `Succeeded`/`Failed` as terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Idle,
    Opening,
    Streaming,
    Scanning,
    Paused,
    Succeeded,
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanStatus::Succeeded | ScanStatus::Failed)
    }
}

/// One human-readable diagnostic line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub at: SystemTime,
    pub message: String,
}

/// State of one scanning session, from open to close.
#[derive(Clone, Debug)]
pub struct ScanSession {
    mode: ScanMode,
    status: ScanStatus,
    has_flash: bool,
    flash_on: bool,
    log: Vec<LogEntry>,
}

impl ScanSession {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            status: ScanStatus::Idle,
            has_flash: false,
            flash_on: false,
            log: Vec::new(),
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn has_flash(&self) -> bool {
        self.has_flash
    }

    pub fn is_flash_on(&self) -> bool {
        self.flash_on
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.log
    }

    pub(crate) fn set_status(&mut self, status: ScanStatus) {
        log::trace!(target: SESSION_TARGET, "{:?} -> {:?}", self.status, status);
        self.status = status;
    }

    pub(crate) fn set_has_flash(&mut self, has_flash: bool) {
        self.has_flash = has_flash;
    }

    pub(crate) fn set_flash_on(&mut self, on: bool) {
        self.flash_on = on;
    }

    /// Append a diagnostic line. Dropped while the session is paused.
    pub fn log(&mut self, message: impl Into<String>) {
        if self.status == ScanStatus::Paused {
            return;
        }
        let message = message.into();
        log::debug!(target: SESSION_TARGET, "[{}] {}", self.mode.label(), message);
        self.log.push(LogEntry {
            at: SystemTime::now(),
            message,
        });
    }
}

/// Cancellation flag shared between a session and whatever drives its loop.
///
/// Every open gets a fresh handle; closing the session flips it so an
/// in-flight attempt discards its result when it resumes.
#[derive(Clone, Debug)]
pub struct SessionHandle(Arc<AtomicBool>);

impl SessionHandle {
    pub(crate) fn live() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub(crate) fn closed() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark the session closed. Idempotent.
    pub fn close(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_session_drops_log_lines() {
        let mut s = ScanSession::new(ScanMode::Text);
        s.log("one");
        s.set_status(ScanStatus::Paused);
        s.log("dropped");
        s.set_status(ScanStatus::Scanning);
        s.log("two");
        let msgs: Vec<_> = s.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, ["one", "two"]);
    }

    #[test]
    fn handles_are_independent() {
        let a = SessionHandle::live();
        let a2 = a.clone();
        let b = SessionHandle::live();
        a.close();
        assert!(!a2.is_live());
        assert!(b.is_live());
        assert!(!SessionHandle::closed().is_live());
    }
}

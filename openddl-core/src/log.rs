//! Diagnostic callback.
//!
//! A parser instance routes its diagnostics through an optional
//! `Fn(LogSeverity, &str)` hook. Each message is also emitted as a
//! `tracing` event at the matching level, so a subscriber sees it even when
//! no hook is installed.

use std::fmt;

/// Severity of a parser diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogSeverity::Debug => "debug",
            LogSeverity::Info => "info",
            LogSeverity::Warn => "warn",
            LogSeverity::Error => "error",
        })
    }
}

/// Diagnostic hook stored on a parser.
pub type LogCallback = Box<dyn Fn(LogSeverity, &str) + Send + Sync>;

/// Deliver `message` to the hook (if any) and to `tracing`.
pub(crate) fn emit(callback: Option<&LogCallback>, severity: LogSeverity, message: &str) {
    match severity {
        LogSeverity::Debug => tracing::debug!(target: "openddl", "{}", message),
        LogSeverity::Info => tracing::info!(target: "openddl", "{}", message),
        LogSeverity::Warn => tracing::warn!(target: "openddl", "{}", message),
        LogSeverity::Error => tracing::error!(target: "openddl", "{}", message),
    }
    if let Some(callback) = callback {
        callback(severity, message);
    }
}

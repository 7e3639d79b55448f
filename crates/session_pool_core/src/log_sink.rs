use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Destination for diagnostic events. Pool construction threads one sink from
/// the caller down to every factory call.
pub trait LogSink: Send + Sync {
    fn record(&self, level: LogLevel, event: &str, details: Value);

    fn info(&self, event: &str, details: Value) {
        self.record(LogLevel::Info, event, details);
    }

    fn error(&self, event: &str, details: Value) {
        self.record(LogLevel::Error, event, details);
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn record(&self, _level: LogLevel, _event: &str, _details: Value) {}
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    component: String,
    writer: Mutex<W>,
}

impl JsonLinesSink<io::Stderr> {
    pub fn stderr(component: impl Into<String>) -> Self {
        Self::new(component, io::stderr())
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(component: impl Into<String>, writer: W) -> Self {
        Self {
            component: component.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> LogSink for JsonLinesSink<W> {
    fn record(&self, level: LogLevel, event: &str, details: Value) {
        let line = json!({
            "component": self.component,
            "level": level.as_str(),
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        });
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Logging must never fail a session build.
        let _ = writeln!(writer, "{line}");
    }
}

/// Forwards events to the `tracing` dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, level: LogLevel, event: &str, details: Value) {
        match level {
            LogLevel::Debug => tracing::debug!(event = event, details = %details),
            LogLevel::Info => tracing::info!(event = event, details = %details),
            LogLevel::Warn => tracing::warn!(event = event, details = %details),
            LogLevel::Error => tracing::error!(event = event, details = %details),
        }
    }
}

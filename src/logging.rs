//! Structured logging for host diagnostics
//!
//! This module provides:
//! - A leveled [`Logger`] with console, JSON and compact formats
//! - A builder API for attaching structured fields to an entry
//! - Session IDs shared by all loggers of one run
//! - [`TraceSink`], the hook the ping parser uses to expose raw utility output
//!
//! All output goes to stderr so that stdout only carries the report.

use crate::error::{AppError, Result};
use crate::models::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - detailed information for debugging
    Debug = 1,
    /// Info level - general application information
    Info = 2,
    /// Warning level - potentially harmful situations
    Warn = 3,
    /// Error level - error events but application can continue
    Error = 4,
    /// Fatal level - severe error events that cause application termination
    Fatal = 5,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m",    // White
            LogLevel::Debug => "\x1b[36m",    // Cyan
            LogLevel::Info => "\x1b[32m",     // Green
            LogLevel::Warn => "\x1b[33m",     // Yellow
            LogLevel::Error => "\x1b[31m",    // Red
            LogLevel::Fatal => "\x1b[35m",    // Magenta
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
    /// Compact single-line format
    Compact,
}

/// Logger implementation with multiple output formats
#[derive(Clone)]
pub struct Logger {
    /// Minimum log level to output
    min_level: LogLevel,
    /// Whether to use colored output
    use_color: bool,
    /// Output format
    format: LogFormat,
    /// Logger name
    name: String,
    /// Session ID shared with sibling loggers
    session_id: Option<String>,
}

impl Logger {
    /// Create a new logger
    pub fn new(name: &str) -> Self {
        Self {
            min_level: LogLevel::Warn,
            use_color: true,
            format: LogFormat::Console,
            name: name.to_string(),
            session_id: None,
        }
    }

    /// Create a logger with specific configuration
    pub fn with_config(name: &str, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name: name.to_string(),
            session_id: None,
        }
    }

    /// Set minimum log level
    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Set output format
    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    /// Enable or disable colored output
    pub fn set_color(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    /// Attach a session ID to every entry of this logger
    pub fn set_session_id(&mut self, session_id: &str) {
        self.session_id = Some(session_id.to_string());
    }

    /// Logger name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    /// Convenience methods for different log levels
    pub fn trace(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    pub fn fatal(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Fatal, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Render an entry in this logger's format
    pub fn render(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => self.format_json(entry),
            LogFormat::Compact => self.format_compact(entry),
        }
    }

    fn write_entry(&self, mut entry: LogEntry) {
        if !self.would_log(entry.level) {
            return;
        }

        if let Some(session_id) = &self.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }

        let output = self.render(&entry);
        let _ = writeln!(io::stderr(), "{}", output);
    }

    /// Format log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}",
            timestamp,
            formatted_level,
            entry.logger,
            entry.message
        );

        if !entry.fields.is_empty() {
            let mut fields_str: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields_str.sort();
            output.push_str(&format!(" {{{}}}", fields_str.join(", ")));
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }

    /// Format log entry in compact format
    fn format_compact(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S");
        format!("{} {} {}: {}",
            timestamp,
            entry.level.as_str().chars().next().unwrap_or('?'),
            entry.logger,
            entry.message
        )
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                fields: HashMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// Take the entry without writing it
    pub fn build(self) -> LogEntry {
        self.entry
    }

    /// Finalize and write the log entry
    pub fn log(self) {
        self.logger.write_entry(self.entry);
    }
}

/// Receives raw text captured from external tools before it is parsed
pub trait TraceSink: Send + Sync {
    /// Record `payload` produced by `source` (e.g. "ping")
    fn trace(&self, source: &str, payload: &str);
}

impl TraceSink for Logger {
    fn trace(&self, source: &str, payload: &str) {
        self.debug(&format!("raw {} output:\n{}", source, payload.trim_end()))
            .field("source", source)
            .field("bytes", payload.len())
            .log();
    }
}

/// Sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn trace(&self, _source: &str, _payload: &str) {}
}

/// Sink that keeps every trace in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryTraceSink {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded `(source, payload)` pairs
    pub fn entries(&self) -> Vec<(String, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TraceSink for MemoryTraceSink {
    fn trace(&self, source: &str, payload: &str) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((source.to_string(), payload.to_string()));
    }
}

/// Factory for creating loggers that share one session ID
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    /// Create a new logger factory
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger for one component
    pub fn create_logger(&self, name: &str) -> Logger {
        let mut logger = Logger::with_config(name, &self.config);
        logger.set_session_id(&self.session_id);
        logger
    }

    /// Create the sink that receives raw ping output
    ///
    /// Enabled unless `trace_ping_output` is off; the sink always logs at
    /// Debug level regardless of `--verbose`/`--debug`.
    pub fn create_trace_sink(&self) -> Arc<dyn TraceSink> {
        if self.config.trace_ping_output {
            let mut logger = self.create_logger("PING");
            logger.set_level(LogLevel::Debug);
            Arc::new(logger)
        } else {
            Arc::new(NullTraceSink)
        }
    }

    /// Session ID shared by all created loggers
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

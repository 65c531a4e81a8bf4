//! Name-prefixed logger
//!
//! A [`Logger`] tags every line with the component that produced it:
//! `[data-store] Listener subscribed. 2`. Arguments are rendered as JSON and
//! appended after the message. Lines are emitted through `tracing`.

use serde_json::Value;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    name: Cow<'static, str>,
}

impl Logger {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render `[name] message arg1 arg2`
    pub fn format_message(&self, message: &str, args: &[Value]) -> String {
        let mut line = format!("[{}] {}", self.name, message);
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string());
        }
        line
    }

    pub fn debug(&self, message: &str) {
        self.debug_with(message, &[]);
    }

    pub fn debug_with(&self, message: &str, args: &[Value]) {
        let line = self.format_message(message, args);
        tracing::debug!("{line}");
    }

    /// General-purpose output, recorded at info level
    pub fn log(&self, message: &str) {
        self.log_with(message, &[]);
    }

    pub fn log_with(&self, message: &str, args: &[Value]) {
        self.info_with(message, args);
    }

    pub fn info(&self, message: &str) {
        self.info_with(message, &[]);
    }

    pub fn info_with(&self, message: &str, args: &[Value]) {
        let line = self.format_message(message, args);
        tracing::info!("{line}");
    }

    pub fn warn(&self, message: &str) {
        self.warn_with(message, &[]);
    }

    pub fn warn_with(&self, message: &str, args: &[Value]) {
        let line = self.format_message(message, args);
        tracing::warn!("{line}");
    }

    pub fn error(&self, message: &str) {
        self.error_with(message, &[]);
    }

    pub fn error_with(&self, message: &str, args: &[Value]) {
        let line = self.format_message(message, args);
        tracing::error!("{line}");
    }
}

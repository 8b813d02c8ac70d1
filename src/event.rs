//! Trace events delivered by the host interpreter
//!
//! The wire form is one JSON object per line:
//!
//! ```json
//! {"kind":"line","module":"myapp.views","file":"myapp/views.py","line":11}
//! ```
//!
//! `module` and `file` may be absent or null.

use serde::{Deserialize, Serialize};

/// Label used when the runtime reports no module name
pub const UNKNOWN_MODULE: &str = "<unknown-module>";

/// Label used when the runtime reports no source file
pub const UNKNOWN_FILE: &str = "<unknown-file>";

/// Kind of interpreter notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Call,
    Line,
    Return,
}

/// A single call/line/return notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: u32,
}

impl TraceEvent {
    pub fn new(
        kind: EventKind,
        module: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            module: Some(module.into()),
            file: Some(file.into()),
            line,
        }
    }

    pub fn call(module: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self::new(EventKind::Call, module, file, line)
    }

    pub fn line(module: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self::new(EventKind::Line, module, file, line)
    }

    pub fn ret(module: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self::new(EventKind::Return, module, file, line)
    }

    /// Module name, or [`UNKNOWN_MODULE`] when the runtime gave none
    pub fn module_name(&self) -> &str {
        self.module.as_deref().unwrap_or(UNKNOWN_MODULE)
    }

    /// Source file, or [`UNKNOWN_FILE`] when the runtime gave none
    pub fn file_name(&self) -> &str {
        self.file.as_deref().unwrap_or(UNKNOWN_FILE)
    }

    /// Parse one JSON-lines record
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

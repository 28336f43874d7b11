//! Structured diagnostics raised while the application is being set up.
//!
//! Diagnostics are not errors: they record conditions an operator should
//! see (insecure defaults, suspicious configuration) without failing setup.
//! Each event is also mirrored to `tracing`.

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Component that raised the event, e.g. an addon name.
    pub source: String,
    /// Stable machine-readable code.
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(
        source: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            source: source.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn info(
        source: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            ..Self::warning(source, code, message)
        }
    }
}

/// Append-only diagnostic log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Warning => warn!(
                source = %diagnostic.source,
                code = %diagnostic.code,
                "{}",
                diagnostic.message
            ),
            DiagnosticLevel::Info => info!(
                source = %diagnostic.source,
                code = %diagnostic.code,
                "{}",
                diagnostic.message
            ),
        }
        self.events.push(diagnostic);
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Number of events carrying `code`.
    pub fn count(&self, code: &str) -> usize {
        self.events.iter().filter(|d| d.code == code).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
    }
}

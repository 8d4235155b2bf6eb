//! Non-fatal notes collected while generating.
//!
//! Anything that makes the output unusable is an error returned from the
//! phase instead.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Output was produced but may not be what the user expects.
    Warning,
    /// Informational message about generation.
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
    /// Type id or namespace path the message is about, e.g. `v1.Pod`.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {loc})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::info("build", "property 'error' emitted as 'errorCondition'")
            .at("v1.Status");
        assert_eq!(
            diag.to_string(),
            "info: property 'error' emitted as 'errorCondition' (at v1.Status)"
        );
        assert_eq!(diag.severity, Severity::Info);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_diagnostic_serializes() {
        let diag = Diagnostic::warning("mixins", "empty").at("v1.Pod");
        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["severity"], "Warning");
        assert_eq!(value["location"], "v1.Pod");
    }
}

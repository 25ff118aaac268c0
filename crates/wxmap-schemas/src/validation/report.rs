//! Issue accumulation and per-file validation reports
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use std::fmt;

/// Severity of a validation issue.
///
/// Only errors affect a file's validity (and the process exit status);
/// warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A single validation issue at a document path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Document path the issue is anchored to (`grid.bbox`, `styles.temp.stops[1]`)
    pub path: String,
    /// Human-readable description
    pub message: String,
    /// Error or warning
    pub severity: Severity,
}

impl Issue {
    /// Location-qualified message without the severity tag.
    ///
    /// File-scoped issues carry an empty path and render as the bare message.
    pub fn text(&self) -> String {
        if self.path.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", self.path, self.message)
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text())
    }
}

/// Accumulator for the issues found in a single document.
///
/// Checks never fail fast: every rule appends its findings here and
/// validation continues, so one run surfaces the complete defect list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error at the given path
    pub fn add_error<P: Into<String>, M: Into<String>>(&mut self, path: P, message: M) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        });
    }

    /// Record a warning at the given path
    pub fn add_warning<P: Into<String>, M: Into<String>>(&mut self, path: P, message: M) {
        self.issues.push(Issue {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    /// All issues, in the order they were recorded
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Errors only
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    /// Warnings only
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// A document is valid iff it produced zero errors; warnings don't count
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Absorb another report's issues
    pub fn merge(&mut self, other: Report) {
        self.issues.extend(other.issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = Report::new();
        assert!(report.is_valid());
        assert!(report.is_empty());

        report.add_warning("retention", "missing section");
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 1);

        report.add_error("source.type", "missing required field 'type'");
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.issues().len(), 2);
    }

    #[test]
    fn test_issue_display() {
        let mut report = Report::new();
        report.add_error("grid.bbox", "min_lon must be less than max_lon");
        let rendered = report.issues()[0].to_string();
        assert_eq!(
            rendered,
            "[ERROR] grid.bbox: min_lon must be less than max_lon"
        );
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut first = Report::new();
        first.add_error("a", "one");
        let mut second = Report::new();
        second.add_warning("b", "two");
        first.merge(second);
        assert_eq!(first.issues().len(), 2);
        assert_eq!(first.issues()[1].path, "b");
    }
}

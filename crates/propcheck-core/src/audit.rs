//! Empty-value auditing.
//!
//! [`audit`] is a pure pass over one [`PropertySet`]; what happens to the
//! findings is decided by an [`AuditSink`]. Strategies run the pass once per
//! produced set (see [`LoaderStrategy::load_property_source`]).
//!
//! [`LoaderStrategy::load_property_source`]: crate::LoaderStrategy::load_property_source

use std::fmt;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

use crate::foundation::{PropertySet, PropertyValue};

/// An entry whose value is absent or blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Name of the property set the entry came from.
    pub source_name: String,
    /// Configuration key.
    pub key: String,
    /// The value as loaded.
    pub raw_value: PropertyValue,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "empty attr: [{}={}]", self.key, self.raw_value)
    }
}

/// Scans a property set and returns one finding per empty entry, in entry
/// order.
pub fn audit(set: &PropertySet) -> Vec<Finding> {
    set.iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, value)| Finding {
            source_name: set.name().to_string(),
            key: key.to_string(),
            raw_value: value.clone(),
        })
        .collect()
}

// =============================================================================
// Sinks
// =============================================================================

/// Receives findings as they are discovered.
pub trait AuditSink: Send + Sync {
    /// Called once per finding.
    fn report(&self, finding: &Finding);
}

/// Default sink: logs every finding at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AuditSink for LogSink {
    fn report(&self, finding: &Finding) {
        warn!(
            source = %finding.source_name,
            key = %finding.key,
            "{finding}"
        );
    }
}

/// Discards every finding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn report(&self, _finding: &Finding) {}
}

/// Collects findings so they can be inspected after a load.
#[derive(Debug, Default)]
pub struct CollectingSink {
    findings: Mutex<Vec<Finding>>,
}

impl CollectingSink {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything collected so far.
    pub fn findings(&self) -> Vec<Finding> {
        self.findings.lock().clone()
    }

    /// Drains the collected findings.
    pub fn take(&self) -> Vec<Finding> {
        std::mem::take(&mut *self.findings.lock())
    }

    /// Number of findings collected so far.
    pub fn len(&self) -> usize {
        self.findings.lock().len()
    }

    /// Returns `true` if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.findings.lock().is_empty()
    }
}

impl AuditSink for CollectingSink {
    fn report(&self, finding: &Finding) {
        self.findings.lock().push(finding.clone());
    }
}

/// Audits `set` and hands every finding to `sink`.
pub fn audit_into(set: &PropertySet, sink: &dyn AuditSink) -> usize {
    let findings = audit(set);
    for finding in &findings {
        sink.report(finding);
    }
    findings.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_flags_blank_and_null() {
        let set = PropertySet::from_entries(
            "mixed",
            [
                ("a", PropertyValue::from("")),
                ("b", PropertyValue::from("x")),
                ("c", PropertyValue::Null),
            ],
        );

        let findings = audit(&set);
        assert_eq!(keys(&findings), vec!["a", "c"]);
        assert_eq!(findings[0].source_name, "mixed");
        assert_eq!(findings[1].raw_value, PropertyValue::Null);
    }

    #[test]
    fn test_falsy_values_are_not_flagged() {
        let set = PropertySet::from_entries(
            "falsy",
            [
                ("d", PropertyValue::from("0")),
                ("e", PropertyValue::from(false)),
            ],
        );
        assert!(audit(&set).is_empty());
    }

    #[test]
    fn test_display_format() {
        let finding = Finding {
            source_name: "app.properties".into(),
            key: "name".into(),
            raw_value: PropertyValue::from(""),
        };
        assert_eq!(finding.to_string(), "empty attr: [name=]");
    }

    #[test]
    fn test_collecting_sink() {
        let set = PropertySet::from_entries("s", [("name", ""), ("age", "30")]);
        let sink = CollectingSink::new();

        assert_eq!(audit_into(&set, &sink), 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(keys(&sink.take()), vec!["name"]);
        assert!(sink.is_empty());
    }
}

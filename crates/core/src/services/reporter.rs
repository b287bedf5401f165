use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::model::MethodDescriptor;

/// Sink for listener failures.
///
/// Used for both classification violations and internal faults. The
/// implementation owns whatever synchronization it needs.
pub trait ViolationReporter: Send + Sync {
    fn report(&self, source: &str, message: &str);
}

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerFailure {
    pub source: String,
    pub message: String,
}

/// Reporter that keeps every failure in memory, in report order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Mutex<Vec<ListenerFailure>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<ListenerFailure> {
        self.failures.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.failures.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ViolationReporter for CollectingReporter {
    fn report(&self, source: &str, message: &str) {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(ListenerFailure { source: source.to_string(), message: message.to_string() });
    }
}

/// Reporter that emits each failure as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ViolationReporter for TracingReporter {
    fn report(&self, source: &str, message: &str) {
        tracing::error!(source, "{message}");
    }
}

/// Failure message listing the unannotated methods of a class, one per
/// indented line.
pub fn format_violation_message(class_name: &str, methods: &[&MethodDescriptor]) -> String {
    let mut message = format!(
        "Test class {class_name} has methods which are public but not explicitly annotated. Are they missing @Test?"
    );
    for method in methods {
        message.push_str("\n\t\t");
        message.push_str(&method.to_string());
    }
    message
}

/// Failure message for an internal fault while processing a class.
pub fn format_fault_message(class_name: &str, diagnostic: &str) -> String {
    format!("Failed to process {class_name}: \n{diagnostic}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_message_lists_methods_on_indented_lines() {
        let a = MethodDescriptor::new("helper", Vec::<String>::new())
            .returning("void")
            .declared_by("com.acme.PlainTest");
        let b = MethodDescriptor::new("other", ["int"]).declared_by("com.acme.PlainTest");
        let message = format_violation_message("com.acme.PlainTest", &[&a, &b]);
        assert_eq!(
            message,
            "Test class com.acme.PlainTest has methods which are public but not explicitly annotated. \
             Are they missing @Test?\n\t\tpublic void com.acme.PlainTest.helper()\n\t\tpublic com.acme.PlainTest.other(int)"
        );
    }

    #[test]
    fn collecting_reporter_preserves_order() {
        let reporter = CollectingReporter::new();
        reporter.report("a", "first");
        reporter.report("b", "second");
        let failures = reporter.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].message, "first");
        assert_eq!(failures[1].source, "b");
    }
}

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::MethodClassifier;
use crate::model::{MethodDescriptor, TypeDescriptor};
use crate::rules::RuleSet;
use crate::services::metadata::MetadataProvider;
use crate::services::reporter::{format_fault_message, format_violation_message, ViolationReporter};

/// Source component name attached to every report.
pub const LISTENER_SOURCE: &str = "UnannotatedMethodsListener";

/// What happened when one class was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClassOutcome {
    Clean,
    /// Generated proxy class, skipped whole.
    Excluded,
    Violations { methods: Vec<String> },
    Fault { diagnostic: String },
}

/// Host-facing adapter, invoked once per class before its tests run.
///
/// Violations and internal faults both go to the injected reporter; nothing
/// is propagated back into the host.
pub struct UnannotatedMethodsListener<'a> {
    provider: &'a dyn MetadataProvider,
    rules: &'a RuleSet,
    reporter: &'a dyn ViolationReporter,
}

impl<'a> UnannotatedMethodsListener<'a> {
    pub fn new(
        provider: &'a dyn MetadataProvider,
        rules: &'a RuleSet,
        reporter: &'a dyn ViolationReporter,
    ) -> Self {
        Self { provider, rules, reporter }
    }

    /// Exclusion check, then classification. Excluded classes yield nothing.
    pub fn analyze_before_tests_run<'t>(&self, ty: &'t TypeDescriptor) -> Vec<&'t MethodDescriptor> {
        if self.rules.exclusion.is_excluded(ty) {
            tracing::debug!(class = %ty.name, "skipping generated proxy class");
            return Vec::new();
        }
        MethodClassifier::new(self.provider, self.rules).classify(ty)
    }

    /// Process one class by name and report what was found.
    ///
    /// Errors and panics raised while resolving metadata or classifying are
    /// caught here and reported with their diagnostic text.
    pub fn on_before_class(&self, class_name: &str) -> ClassOutcome {
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| self.report_unannotated_methods(class_name)));
        let diagnostic = match result {
            Ok(Ok(outcome)) => return outcome,
            Ok(Err(err)) => format!("{err:?}"),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };
        tracing::warn!(class = class_name, "failed to process class");
        self.reporter.report(LISTENER_SOURCE, &format_fault_message(class_name, &diagnostic));
        ClassOutcome::Fault { diagnostic }
    }

    fn report_unannotated_methods(&self, class_name: &str) -> Result<ClassOutcome> {
        let ty = self
            .provider
            .resolve(class_name)
            .with_context(|| format!("Failed to resolve metadata for {class_name}"))?;

        if self.rules.exclusion.is_excluded(ty) {
            tracing::debug!(class = class_name, "skipping generated proxy class");
            return Ok(ClassOutcome::Excluded);
        }

        let violations = MethodClassifier::new(self.provider, self.rules).classify(ty);
        if violations.is_empty() {
            return Ok(ClassOutcome::Clean);
        }

        self.reporter.report(LISTENER_SOURCE, &format_violation_message(&ty.name, &violations));
        Ok(ClassOutcome::Violations { methods: violations.iter().map(|m| m.to_string()).collect() })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

//! Method classification.
//!
//! Decides, method by method, whether a public method of a test class is
//! recognized by the test framework:
//! - annotated with a recognized annotation, on itself or on any method it
//!   overrides up the superclass chain
//! - an override of a root-type method
//! - a structural match of a method on a service-provider interface that its
//!   declaring type implements directly
//!
//! Everything else is a violation.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{AnnotationType, MethodDescriptor, TypeDescriptor};
use crate::rules::RuleSet;
use crate::services::metadata::MetadataProvider;

/// Why a method is not a candidate at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    RootDeclared,
    Static,
    Bridge,
}

/// Why a candidate counts as recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recognition {
    /// A recognized annotation sits on the method declared by `declaring_type`,
    /// which is the method itself or one it overrides.
    Annotated { declaring_type: String, annotation: String },
    /// The override chain reaches a method declared by the root type.
    RootOverride,
    /// The method matches a method of a directly implemented service interface.
    ServiceInterface { interface: String },
}

/// Classification of one public method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Skipped { reason: SkipReason },
    Recognized { recognition: Recognition },
    Violation,
}

impl Verdict {
    pub fn is_violation(&self) -> bool {
        matches!(self, Verdict::Violation)
    }
}

/// Classifies the public methods of one type at a time.
///
/// Holds only shared references, so one classifier can serve many threads.
#[derive(Clone, Copy)]
pub struct MethodClassifier<'a> {
    provider: &'a dyn MetadataProvider,
    rules: &'a RuleSet,
}

impl<'a> MethodClassifier<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, rules: &'a RuleSet) -> Self {
        Self { provider, rules }
    }

    /// Violating methods of `ty`, in the order of its public-method list.
    ///
    /// Callers check `ClassExclusionRule` first; excluded classes are never
    /// classified.
    pub fn classify<'t>(&self, ty: &'t TypeDescriptor) -> Vec<&'t MethodDescriptor> {
        ty.public_methods
            .iter()
            .filter(|m| self.skip_reason(m).is_none())
            .filter(|m| !self.is_recognized(m))
            .collect()
    }

    /// Verdict for every public method of `ty`, in list order.
    pub fn explain_all<'t>(&self, ty: &'t TypeDescriptor) -> Vec<(&'t MethodDescriptor, Verdict)> {
        ty.public_methods.iter().map(|m| (m, self.explain(m))).collect()
    }

    pub fn explain(&self, method: &MethodDescriptor) -> Verdict {
        if let Some(reason) = self.skip_reason(method) {
            return Verdict::Skipped { reason };
        }
        match self.framework_recognition(method).or_else(|| self.service_interface_match(method)) {
            Some(recognition) => Verdict::Recognized { recognition },
            None => Verdict::Violation,
        }
    }

    /// `None` for candidates.
    pub fn skip_reason(&self, method: &MethodDescriptor) -> Option<SkipReason> {
        if method.declaring_type == self.provider.root_type() {
            Some(SkipReason::RootDeclared)
        } else if method.is_static {
            Some(SkipReason::Static)
        } else if method.is_bridge {
            Some(SkipReason::Bridge)
        } else {
            None
        }
    }

    pub fn is_recognized(&self, method: &MethodDescriptor) -> bool {
        self.is_framework_recognized(method) || self.is_service_interface_match(method)
    }

    pub fn is_framework_recognized(&self, method: &MethodDescriptor) -> bool {
        self.framework_recognition(method).is_some()
    }

    pub fn is_service_interface_match(&self, method: &MethodDescriptor) -> bool {
        self.service_interface_match(method).is_some()
    }

    /// Walk the override chain: the method itself, then the method with the
    /// same signature on the declaring type's superclass, and so on.
    fn framework_recognition(&self, method: &MethodDescriptor) -> Option<Recognition> {
        let root = self.provider.root_type();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = method;

        loop {
            if current.declaring_type == root {
                return Some(Recognition::RootOverride);
            }
            if let Some(annotation) = self.recognized_annotation(current) {
                return Some(Recognition::Annotated {
                    declaring_type: current.declaring_type.clone(),
                    annotation: annotation.name.clone(),
                });
            }
            if !visited.insert(current.declaring_type.as_str()) {
                tracing::debug!(
                    method = %method.signature,
                    declaring_type = %current.declaring_type,
                    "override chain revisits a declaring type"
                );
                return None;
            }

            let declaring = match self.provider.resolve(&current.declaring_type) {
                Ok(ty) => ty,
                Err(err) => {
                    tracing::debug!(error = %err, "declaring type not resolvable");
                    return None;
                }
            };
            let superclass = declaring.superclass.as_deref()?;
            current = self.provider.find_method(superclass, &current.signature)?;
        }
    }

    fn recognized_annotation<'m>(&self, method: &'m MethodDescriptor) -> Option<&'m AnnotationType> {
        method.annotations.iter().find(|a| self.rules.annotations.recognizes(a))
    }

    /// Only the interfaces the declaring type implements directly are scanned.
    fn service_interface_match(&self, method: &MethodDescriptor) -> Option<Recognition> {
        let declaring = self.provider.resolve(&method.declaring_type).ok()?;
        declaring
            .interfaces
            .iter()
            .filter_map(|name| match self.provider.resolve(name) {
                Ok(interface) => Some(interface),
                Err(err) => {
                    tracing::debug!(error = %err, "implemented interface not resolvable");
                    None
                }
            })
            .filter(|interface| self.rules.service_interfaces.is_service_interface(interface))
            .find(|interface| interface.find_method(&method.signature).is_some())
            .map(|interface| Recognition::ServiceInterface { interface: interface.name.clone() })
    }
}

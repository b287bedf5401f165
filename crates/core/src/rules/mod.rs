//! Predicates deciding which annotations, interfaces and classes the test
//! framework treats specially.
//!
//! All rule sets are plain data plus pure functions, so they are `Send + Sync`
//! and can be shared freely between threads.

use crate::config::RuleConfig;
use crate::model::{AnnotationType, TypeDescriptor};

/// Classifies annotation types as test-recognizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRuleSet {
    benchmark_annotations: Vec<String>,
    framework_namespace: String,
    companion_namespace: String,
}

impl AnnotationRuleSet {
    pub fn new(
        benchmark_annotations: Vec<String>,
        framework_namespace: impl Into<String>,
        companion_namespace: impl Into<String>,
    ) -> Self {
        Self {
            benchmark_annotations,
            framework_namespace: framework_namespace.into(),
            companion_namespace: companion_namespace.into(),
        }
    }

    /// First match wins: benchmark identity, then framework namespace, then
    /// companion namespace.
    pub fn recognizes(&self, annotation: &AnnotationType) -> bool {
        if self.benchmark_annotations.iter().any(|b| b == &annotation.name) {
            return true;
        }
        let namespace = annotation.namespace();
        // @Test, @BeforeMethod, @DataProvider and friends share one namespace
        if namespace == self.framework_namespace {
            return true;
        }
        namespace == self.companion_namespace
    }
}

/// Classifies interfaces as framework service-provider interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiInterfaceRuleSet {
    companion_namespace: String,
}

impl SpiInterfaceRuleSet {
    pub fn new(companion_namespace: impl Into<String>) -> Self {
        Self { companion_namespace: companion_namespace.into() }
    }

    pub fn is_service_interface(&self, ty: &TypeDescriptor) -> bool {
        ty.namespace() == self.companion_namespace
    }
}

/// Skips classes generated by the companion library's proxy generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassExclusionRule {
    proxy_markers: Vec<String>,
}

impl ClassExclusionRule {
    pub fn new(proxy_markers: Vec<String>) -> Self {
        Self { proxy_markers }
    }

    pub fn is_excluded(&self, ty: &TypeDescriptor) -> bool {
        ty.superclass
            .as_deref()
            .is_some_and(|superclass| self.proxy_markers.iter().any(|m| m == superclass))
    }
}

/// The three rule sets bundled together, as built from one `RuleConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub annotations: AnnotationRuleSet,
    pub service_interfaces: SpiInterfaceRuleSet,
    pub exclusion: ClassExclusionRule,
}

impl RuleSet {
    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            annotations: AnnotationRuleSet::new(
                config.benchmark_annotations.clone(),
                &config.framework_annotation_namespace,
                &config.companion_namespace,
            ),
            service_interfaces: SpiInterfaceRuleSet::new(&config.companion_namespace),
            exclusion: ClassExclusionRule::new(config.proxy_superclass_markers.clone()),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_config(&RuleConfig::default())
    }
}

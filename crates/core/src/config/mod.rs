//! Rule configuration.
//!
//! The built-in defaults describe a TestNG suite that also uses the Tempto
//! companion library and JMH benchmarks. A `.json` / `.yaml` file can override
//! any of them; missing fields keep their default.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BENCHMARK_ANNOTATION: &str = "org.openjdk.jmh.annotations.Benchmark";
pub const DEFAULT_FRAMEWORK_ANNOTATION_NAMESPACE: &str = "org.testng.annotations";
pub const DEFAULT_COMPANION_NAMESPACE: &str = "io.prestosql.tempto";
pub const DEFAULT_PROXY_MARKER: &str =
    "io.prestosql.tempto.internal.convention.ConventionBasedTestProxyGenerator$ConventionBasedTestProxy";

/// Serializable rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Schema/config version. This is about the config format only.
    pub config_version: String,
    /// Annotations recognized by exact name (benchmark entry points).
    pub benchmark_annotations: Vec<String>,
    /// Namespace holding the test framework's lifecycle annotations.
    pub framework_annotation_namespace: String,
    /// Namespace of the companion test library (annotations and service interfaces).
    pub companion_namespace: String,
    /// Superclass names marking generated proxy classes that are skipped whole.
    pub proxy_superclass_markers: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            config_version: "0.1.0".to_string(),
            benchmark_annotations: vec![DEFAULT_BENCHMARK_ANNOTATION.to_string()],
            framework_annotation_namespace: DEFAULT_FRAMEWORK_ANNOTATION_NAMESPACE.to_string(),
            companion_namespace: DEFAULT_COMPANION_NAMESPACE.to_string(),
            proxy_superclass_markers: vec![DEFAULT_PROXY_MARKER.to_string()],
        }
    }
}

/// Load a rule configuration from a `.json`, `.yaml` or `.yml` file.
pub fn load_rule_config(path: &Path) -> Result<RuleConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule config at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let config = match ext {
        "json" => serde_json::from_str(&body).context("Failed to parse rule config JSON")?,
        "yaml" | "yml" => serde_yaml::from_str(&body).context("Failed to parse rule config YAML")?,
        other => {
            return Err(anyhow!(
                "Unsupported rule config format '{other}' (expected json, yaml or yml): {}",
                path.display()
            ))
        }
    };
    Ok(config)
}

/// Load the config at `path` if given, otherwise return the defaults.
pub fn load_rule_config_or_default(path: Option<&Path>) -> Result<RuleConfig> {
    match path {
        Some(p) => load_rule_config(p),
        None => Ok(RuleConfig::default()),
    }
}

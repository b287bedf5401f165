use anyhow::{Context, Result};
use serde::Serialize;
use unannotated_core::analysis::{MethodClassifier, Recognition, SkipReason, Verdict};
use unannotated_core::services::MetadataProvider;

use crate::commands::{load_rules, open_snapshot};

#[derive(Debug, Serialize)]
pub struct MethodExplanation {
    pub method: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

#[derive(Debug, Serialize)]
pub struct ClassExplanation {
    pub class: String,
    pub excluded: bool,
    pub methods: Vec<MethodExplanation>,
}

/// Per-method verdicts for one class.
pub fn explain_class(snapshot: &str, class: &str, config: Option<&str>) -> Result<ClassExplanation> {
    let (_path, provider) = open_snapshot(snapshot)?;
    let (_config, rules) = load_rules(config)?;
    let ty = provider.resolve(class).with_context(|| format!("Failed to resolve class {class}"))?;

    let classifier = MethodClassifier::new(&provider, &rules);
    let methods = classifier
        .explain_all(ty)
        .into_iter()
        .map(|(m, verdict)| MethodExplanation { method: m.to_string(), verdict })
        .collect();

    Ok(ClassExplanation { class: ty.name.clone(), excluded: rules.exclusion.is_excluded(ty), methods })
}

pub fn explain_command(snapshot: &str, class: &str, config: Option<&str>, json: bool) -> Result<()> {
    let explanation = explain_class(snapshot, class, config)?;

    if json {
        let serialized = serde_json::to_string_pretty(&explanation)
            .context("Failed to serialize explanation to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Class: {}", explanation.class);
    if explanation.excluded {
        println!("  (generated proxy class; skipped by `check`)");
    }
    println!("Methods ({}):", explanation.methods.len());
    if explanation.methods.is_empty() {
        println!("  (none)");
    }
    for entry in &explanation.methods {
        println!("  - {} => {}", entry.method, describe(&entry.verdict));
    }

    Ok(())
}

fn describe(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Skipped { reason: SkipReason::RootDeclared } => "skipped (declared by root type)".into(),
        Verdict::Skipped { reason: SkipReason::Static } => "skipped (static)".into(),
        Verdict::Skipped { reason: SkipReason::Bridge } => "skipped (bridge)".into(),
        Verdict::Recognized { recognition: Recognition::Annotated { declaring_type, annotation } } => {
            format!("recognized (@{annotation} on {declaring_type})")
        }
        Verdict::Recognized { recognition: Recognition::RootOverride } => {
            "recognized (overrides root type method)".into()
        }
        Verdict::Recognized { recognition: Recognition::ServiceInterface { interface } } => {
            format!("recognized (implements {interface})")
        }
        Verdict::Violation => "VIOLATION (not annotated)".into(),
    }
}

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::Serialize;
use unannotated_core::services::{
    ClassOutcome, CollectingReporter, ListenerFailure, UnannotatedMethodsListener,
};

use crate::commands::{load_rules, open_snapshot};
use crate::sha256_file;

#[derive(Debug, Serialize)]
pub struct ClassReport {
    pub class: String,
    #[serde(flatten)]
    pub outcome: ClassOutcome,
}

/// Everything a `check` run found, in processing order.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub snapshot: String,
    pub snapshot_sha256: String,
    pub generated_at: String,
    pub classes_checked: usize,
    pub classes: Vec<ClassReport>,
    pub failures: Vec<ListenerFailure>,
}

impl CheckReport {
    fn count(&self, pred: impl Fn(&ClassOutcome) -> bool) -> usize {
        self.classes.iter().filter(|c| pred(&c.outcome)).count()
    }
}

/// Run every requested class through the listener and collect the results.
///
/// With no explicit classes, the snapshot's own test-class list is used.
pub fn run_check(snapshot: &str, classes: &[String], config: Option<&str>) -> Result<CheckReport> {
    let (snapshot_path, provider) = open_snapshot(snapshot)?;
    let (_config, rules) = load_rules(config)?;
    let reporter = CollectingReporter::new();
    let listener = UnannotatedMethodsListener::new(&provider, &rules, &reporter);

    let targets = if classes.is_empty() { provider.test_classes() } else { classes.to_vec() };

    let mut reports = Vec::with_capacity(targets.len());
    for class in targets {
        let outcome = listener.on_before_class(&class);
        reports.push(ClassReport { class, outcome });
    }
    tracing::info!(classes = reports.len(), failures = reporter.len(), "check finished");

    Ok(CheckReport {
        snapshot: snapshot_path.display().to_string(),
        snapshot_sha256: sha256_file(&snapshot_path)?,
        generated_at: Utc::now().to_rfc3339(),
        classes_checked: reports.len(),
        classes: reports,
        failures: reporter.failures(),
    })
}

/// Check a snapshot; fails when any listener failure was reported.
pub fn check_command(
    snapshot: &str,
    classes: &[String],
    config: Option<&str>,
    json: bool,
) -> Result<()> {
    let report = run_check(snapshot, classes, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for failure in &report.failures {
            println!("[{}] {}", failure.source, failure.message);
        }
        println!(
            "Checked {} classes: {} clean, {} excluded, {} with violations, {} failed",
            report.classes_checked,
            report.count(|o| matches!(o, ClassOutcome::Clean)),
            report.count(|o| matches!(o, ClassOutcome::Excluded)),
            report.count(|o| matches!(o, ClassOutcome::Violations { .. })),
            report.count(|o| matches!(o, ClassOutcome::Fault { .. })),
        );
    }

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} listener failure(s) reported", report.failures.len()))
    }
}

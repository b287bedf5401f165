use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use unannotated_core::config::{load_rule_config_or_default, RuleConfig};
use unannotated_core::rules::RuleSet;
use unannotated_core::services::{load_snapshot, SnapshotProvider};

/// Load and validate the snapshot at `path` (delegates to core helper).
pub fn open_snapshot(path: &str) -> Result<(PathBuf, SnapshotProvider)> {
    let snapshot_path = PathBuf::from(path);
    if !snapshot_path.is_file() {
        return Err(anyhow!("Snapshot file does not exist: {}", snapshot_path.display()));
    }
    let provider = load_snapshot(&snapshot_path)?;
    Ok((snapshot_path, provider))
}

/// Load the rule config (or defaults) and build the rule sets from it.
pub fn load_rules(config: Option<&str>) -> Result<(RuleConfig, RuleSet)> {
    let config = load_rule_config_or_default(config.map(Path::new))?;
    let rules = RuleSet::from_config(&config);
    Ok((config, rules))
}

use anyhow::{Context, Result};

use crate::commands::load_rules;

/// Print the effective rule configuration (file overrides merged over defaults).
pub fn show_rules_command(config: Option<&str>, json: bool) -> Result<()> {
    let (config, _rules) = load_rules(config)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&config).context("Failed to serialize rules to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Rule configuration (version {})", config.config_version);
    println!("  Framework annotation namespace: {}", config.framework_annotation_namespace);
    println!("  Companion namespace: {}", config.companion_namespace);
    println!("  Benchmark annotations:");
    print_list(&config.benchmark_annotations);
    println!("  Proxy superclass markers:");
    print_list(&config.proxy_superclass_markers);

    Ok(())
}

fn print_list(items: &[String]) {
    if items.is_empty() {
        println!("    (none)");
    }
    for item in items {
        println!("    - {item}");
    }
}

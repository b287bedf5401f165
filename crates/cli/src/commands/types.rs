use anyhow::{Context, Result};
use serde::Serialize;
use unannotated_core::model::TypeKind;
use unannotated_core::services::MetadataProvider;

use crate::commands::open_snapshot;

#[derive(Debug, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub kind: TypeKind,
    pub superclass: Option<String>,
    pub interfaces: usize,
    pub methods: usize,
    pub test_class: bool,
}

/// Summaries of every type in the snapshot, in snapshot order.
pub fn collect_type_summaries(snapshot: &str) -> Result<(String, Vec<TypeSummary>)> {
    let (_path, provider) = open_snapshot(snapshot)?;
    let test_classes = provider.test_classes();
    let summaries = provider
        .types()
        .map(|t| TypeSummary {
            name: t.name.clone(),
            kind: t.kind,
            superclass: t.superclass.clone(),
            interfaces: t.interfaces.len(),
            methods: t.public_methods.len(),
            test_class: test_classes.contains(&t.name),
        })
        .collect();
    Ok((provider.root_type().to_string(), summaries))
}

/// List all types in a snapshot.
pub fn list_types_command(snapshot: &str, json: bool) -> Result<()> {
    let (root_type, types) = collect_type_summaries(snapshot)?;

    if json {
        let serialized =
            serde_json::to_string_pretty(&types).context("Failed to serialize types to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Types ({}), root {}:", types.len(), root_type);
    for t in types {
        let kind = match t.kind {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        };
        let superclass = t.superclass.as_deref().unwrap_or("-");
        let marker = if t.test_class { " [test]" } else { "" };
        println!(
            "  - {} ({kind}){marker} extends={} interfaces={} methods={}",
            t.name, superclass, t.interfaces, t.methods
        );
    }

    Ok(())
}

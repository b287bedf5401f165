use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{MethodDescriptor, Signature, TypeDescriptor, TypeKind, DEFAULT_ROOT_TYPE};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Type not found in metadata: {0}")]
    UnknownType(String),
    #[error("Type {type_name} names unknown superclass {superclass}")]
    UnknownSuperclass { type_name: String, superclass: String },
    #[error("Method {method} on {type_name} is declared by unknown type {declaring_type}")]
    UnknownDeclaringType { type_name: String, method: String, declaring_type: String },
    #[error("Superclass chain of {0} is cyclic")]
    CyclicHierarchy(String),
    #[error("Type {0} is listed more than once")]
    DuplicateType(String),
    #[error("Unsupported snapshot format '{extension}': {path}")]
    UnsupportedFormat { extension: String, path: PathBuf },
}

/// Source of type metadata for classification.
///
/// Implementations are read-only for the duration of a run and must be safe
/// to query from several threads at once.
pub trait MetadataProvider: Send + Sync {
    /// Fully-qualified name of the universal root type.
    fn root_type(&self) -> &str;

    fn resolve(&self, name: &str) -> Result<&TypeDescriptor, MetadataError>;

    /// Given a type and a signature, find the most-derived declaring method.
    ///
    /// Unresolvable types simply have no methods.
    fn find_method(&self, type_name: &str, signature: &Signature) -> Option<&MethodDescriptor> {
        self.resolve(type_name).ok()?.find_method(signature)
    }
}

/// On-disk snapshot of a set of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_root_type")]
    pub root_type: String,
    /// Classes a run should process; empty means every concrete class.
    #[serde(default)]
    pub test_classes: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

fn default_root_type() -> String {
    DEFAULT_ROOT_TYPE.to_string()
}

impl Snapshot {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self { root_type: default_root_type(), test_classes: Vec::new(), types }
    }
}

/// In-memory provider backed by a validated `Snapshot`.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    root_type: String,
    test_classes: Vec<String>,
    order: Vec<String>,
    types: HashMap<String, TypeDescriptor>,
}

impl SnapshotProvider {
    /// Normalize and validate a snapshot.
    ///
    /// - the root type is synthesized when absent
    /// - classes without a superclass extend the root type
    /// - methods without a declaring type are declared by the listing type
    /// - superclasses and declaring types must exist; superclass chains must
    ///   end at the root
    pub fn new(snapshot: Snapshot) -> Result<Self, MetadataError> {
        let Snapshot { root_type, test_classes, types: raw_types } = snapshot;
        let mut order = Vec::with_capacity(raw_types.len() + 1);
        let mut types = HashMap::with_capacity(raw_types.len() + 1);

        for mut ty in raw_types {
            if ty.kind == TypeKind::Class && ty.superclass.is_none() && ty.name != root_type {
                ty.superclass = Some(root_type.clone());
            }
            if ty.name == root_type {
                ty.superclass = None;
            }
            for method in &mut ty.public_methods {
                if method.declaring_type.is_empty() {
                    method.declaring_type = ty.name.clone();
                }
            }
            if types.contains_key(&ty.name) {
                return Err(MetadataError::DuplicateType(ty.name));
            }
            order.push(ty.name.clone());
            types.insert(ty.name.clone(), ty);
        }

        if !types.contains_key(&root_type) {
            order.push(root_type.clone());
            types.insert(root_type.clone(), TypeDescriptor::class(root_type.clone()));
        }

        let provider = Self { root_type, test_classes, order, types };
        provider.validate()?;
        Ok(provider)
    }

    pub fn from_types(types: Vec<TypeDescriptor>) -> Result<Self, MetadataError> {
        Self::new(Snapshot::new(types))
    }

    fn validate(&self) -> Result<(), MetadataError> {
        for ty in self.types() {
            if let Some(superclass) = &ty.superclass {
                if !self.types.contains_key(superclass) {
                    return Err(MetadataError::UnknownSuperclass {
                        type_name: ty.name.clone(),
                        superclass: superclass.clone(),
                    });
                }
            }
            for method in &ty.public_methods {
                if !self.types.contains_key(&method.declaring_type) {
                    return Err(MetadataError::UnknownDeclaringType {
                        type_name: ty.name.clone(),
                        method: method.signature.to_string(),
                        declaring_type: method.declaring_type.clone(),
                    });
                }
            }
            self.check_acyclic(ty)?;
        }
        Ok(())
    }

    fn check_acyclic(&self, ty: &TypeDescriptor) -> Result<(), MetadataError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = Some(ty);
        while let Some(t) = current {
            if !seen.insert(t.name.as_str()) {
                return Err(MetadataError::CyclicHierarchy(ty.name.clone()));
            }
            current = t.superclass.as_deref().and_then(|s| self.types.get(s));
        }
        Ok(())
    }

    /// Types in snapshot order (the synthesized root, if any, comes last).
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    /// Classes a run should process by default.
    pub fn test_classes(&self) -> Vec<String> {
        if !self.test_classes.is_empty() {
            return self.test_classes.clone();
        }
        self.types()
            .filter(|t| !t.is_interface() && t.name != self.root_type)
            .map(|t| t.name.clone())
            .collect()
    }
}

impl MetadataProvider for SnapshotProvider {
    fn root_type(&self) -> &str {
        &self.root_type
    }

    fn resolve(&self, name: &str) -> Result<&TypeDescriptor, MetadataError> {
        self.types.get(name).ok_or_else(|| MetadataError::UnknownType(name.to_string()))
    }
}

/// Parse a snapshot from a `.json`, `.yaml` or `.yml` file.
pub fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot at {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let snapshot = match ext {
        "json" => serde_json::from_str(&body).context("Failed to parse snapshot JSON")?,
        "yaml" | "yml" => serde_yaml::from_str(&body).context("Failed to parse snapshot YAML")?,
        other => {
            return Err(MetadataError::UnsupportedFormat {
                extension: other.to_string(),
                path: path.to_path_buf(),
            }
            .into())
        }
    };
    Ok(snapshot)
}

/// Read and validate a snapshot into a provider.
pub fn load_snapshot(path: &Path) -> anyhow::Result<SnapshotProvider> {
    let snapshot = read_snapshot(path)?;
    let provider = SnapshotProvider::new(snapshot)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    tracing::debug!(path = %path.display(), types = provider.order.len(), "loaded snapshot");
    Ok(provider)
}

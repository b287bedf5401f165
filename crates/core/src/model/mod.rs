//! Core data model for type metadata snapshots.
//!
//! These are immutable descriptors handed to the classifier:
//! - `TypeDescriptor`: a class or interface with its flattened public methods
//! - `MethodDescriptor`: one public method and its annotations
//! - `AnnotationType`: an annotation identity plus its containing namespace
//! - `Signature`: name + ordered parameter types, the only equality key used
//!   during classification
//!
//! Types reference each other by fully-qualified name. Resolving a name to a
//! descriptor is the job of a `MetadataProvider`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully-qualified name of the universal root type.
pub const DEFAULT_ROOT_TYPE: &str = "java.lang.Object";

/// Return the containing namespace of a fully-qualified name.
///
/// `com.acme.Foo` and `com.acme.Foo$Inner` both live in `com.acme`. A name
/// without any dot lives in the empty namespace.
pub fn namespace_of(qualified_name: &str) -> &str {
    qualified_name.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
}

/// Method signature: name plus ordered, fully-qualified parameter type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl Signature {
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), parameters: parameters.into_iter().map(Into::into).collect() }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.join(","))
    }
}

/// Identity of an annotation type.
///
/// Snapshots may spell an annotation as a bare string (`"org.testng.annotations.Test"`)
/// or as an object with an explicit namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "AnnotationRepr")]
pub struct AnnotationType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl AnnotationType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), namespace: None }
    }

    /// Containing namespace, either stated explicitly or derived from the name.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_else(|| namespace_of(&self.name))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnnotationRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        namespace: Option<String>,
    },
}

impl From<AnnotationRepr> for AnnotationType {
    fn from(repr: AnnotationRepr) -> Self {
        match repr {
            AnnotationRepr::Name(name) => AnnotationType::new(name),
            AnnotationRepr::Full { name, namespace } => AnnotationType { name, namespace },
        }
    }
}

/// A public method visible on some type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    #[serde(flatten)]
    pub signature: Signature,
    /// Display only; never part of signature equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Fully-qualified name of the declaring type. Empty means "the type
    /// listing this method" and is filled in when a snapshot is loaded.
    #[serde(default)]
    pub declaring_type: String,
    #[serde(default)]
    pub is_static: bool,
    /// Compiler-synthesized duplicate of a real signature.
    #[serde(default)]
    pub is_bridge: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationType>,
}

impl MethodDescriptor {
    /// A plain instance method with no annotations and no declaring type yet.
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signature: Signature::new(name, parameters),
            return_type: None,
            declaring_type: String::new(),
            is_static: false,
            is_bridge: false,
            annotations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn declared_by(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = declaring_type.into();
        self
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(AnnotationType::new(annotation));
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn bridge(mut self) -> Self {
        self.is_bridge = true;
        self
    }
}

/// Renders the way the host runtime prints a method, e.g.
/// `public void com.acme.FooTest.setUp(java.lang.String)`.
impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("public ")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        if let Some(return_type) = &self.return_type {
            write!(f, "{return_type} ")?;
        }
        write!(f, "{}.{}", self.declaring_type, self.signature)
    }
}

/// Whether a type is a class or an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// Snapshot of one type's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Absent only for the root type and for interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    /// Directly implemented interfaces, in declaration order.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Flattened, most-derived public methods (one entry per signature).
    #[serde(default, rename = "methods")]
    pub public_methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            namespace: None,
            superclass: None,
            interfaces: Vec::new(),
            public_methods: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self { kind: TypeKind::Interface, ..Self::class(name) }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a method; an empty declaring type is taken to be this type.
    pub fn with_method(mut self, mut method: MethodDescriptor) -> Self {
        if method.declaring_type.is_empty() {
            method.declaring_type = self.name.clone();
        }
        self.public_methods.push(method);
        self
    }

    /// Containing namespace, either stated explicitly or derived from the name.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_else(|| namespace_of(&self.name))
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Look up the public method with exactly this signature.
    pub fn find_method(&self, signature: &Signature) -> Option<&MethodDescriptor> {
        self.public_methods.iter().find(|m| &m.signature == signature)
    }
}

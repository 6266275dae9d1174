//! Property schema resources
//!
//! Schemas are RON documents embedded in the crate and resolved by resource
//! name. Each schema declares a namespace and a set of types; each type is
//! an ordered list of property descriptors. Loading validates that every
//! declared default matches its declared kind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::context::{GetAndSetProperties, PropertyContext, PropertyValue};

/// The kind of value a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Bool,
    Int,
    Float,
    Text,
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyKind::Bool => "Bool",
            PropertyKind::Int => "Int",
            PropertyKind::Float => "Float",
            PropertyKind::Text => "Text",
        };
        write!(f, "{}", name)
    }
}

/// One declared property of a settings surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name, as used by the get/set surface
    pub name: String,
    /// Declared value kind
    pub kind: PropertyKind,
    /// Default value, shown when the source has no answer
    pub default: PropertyValue,
    /// Display category for a property grid
    #[serde(default)]
    pub category: Option<String>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

/// A parsed schema resource
///
/// Types are addressed by qualified name (`namespace:LocalName`), mirroring
/// the schema-qualified type names of the original resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Namespace prefix qualifying every type in this schema
    pub namespace: String,
    /// Property descriptors per local type name
    pub types: BTreeMap<String, Vec<PropertyDescriptor>>,
}

/// Embedded schema resources, resolved by name
fn resource(name: &str) -> Option<&'static str> {
    match name {
        "cfd" => Some(include_str!("../schemas/cfd.ron")),
        _ => None,
    }
}

impl PropertySchema {
    /// Load an embedded schema resource by name
    ///
    /// Fails if the resource does not exist or does not parse. Callers treat
    /// this as fatal; a debugger without its settings schema cannot start.
    pub fn load(name: &str) -> Result<Self, SchemaError> {
        let source = resource(name).ok_or_else(|| SchemaError::NotFound(name.to_string()))?;
        let schema = Self::from_ron(source)?;
        log::debug!(
            "Loaded schema '{}' (namespace '{}', {} types)",
            name,
            schema.namespace,
            schema.types.len()
        );
        Ok(schema)
    }

    /// Parse a schema from RON source
    pub fn from_ron(source: &str) -> Result<Self, SchemaError> {
        let schema: PropertySchema = ron::from_str(source)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check that every declared default matches its declared kind
    fn validate(&self) -> Result<(), SchemaError> {
        for (type_name, descriptors) in &self.types {
            for descriptor in descriptors {
                if descriptor.default.kind() != descriptor.kind {
                    return Err(SchemaError::BadDefault {
                        type_name: type_name.clone(),
                        property: descriptor.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up the descriptors for a qualified type name
    pub fn descriptors(&self, qualified: &str) -> Result<&[PropertyDescriptor], SchemaError> {
        let (namespace, local) = qualified
            .split_once(':')
            .ok_or_else(|| SchemaError::UnknownType(qualified.to_string()))?;
        if namespace != self.namespace {
            return Err(SchemaError::UnknownType(qualified.to_string()));
        }
        self.types
            .get(local)
            .map(Vec::as_slice)
            .ok_or_else(|| SchemaError::UnknownType(qualified.to_string()))
    }

    /// Build a property context for a qualified type name, bound to a
    /// caller-supplied get/set source
    pub fn create_property_context<S>(
        &self,
        qualified: &str,
        source: Rc<RefCell<S>>,
    ) -> Result<PropertyContext, SchemaError>
    where
        S: GetAndSetProperties + 'static,
    {
        let descriptors = self.descriptors(qualified)?;
        Ok(PropertyContext::bind(descriptors, source))
    }
}

/// Error loading or querying a schema
#[derive(Debug)]
pub enum SchemaError {
    /// No embedded resource with the requested name
    NotFound(String),
    /// Resource exists but is not valid RON
    Parse(ron::error::SpannedError),
    /// A declared default does not match its declared kind
    BadDefault { type_name: String, property: String },
    /// Qualified type name not present in the schema
    UnknownType(String),
}

impl From<ron::error::SpannedError> for SchemaError {
    fn from(e: ron::error::SpannedError) -> Self {
        SchemaError::Parse(e)
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::NotFound(name) => write!(f, "Schema resource not found: {}", name),
            SchemaError::Parse(e) => write!(f, "Schema parse error: {}", e),
            SchemaError::BadDefault { type_name, property } => write!(
                f,
                "Schema default for {}.{} does not match its declared kind",
                type_name, property
            ),
            SchemaError::UnknownType(name) => write!(f, "Unknown schema type: {}", name),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

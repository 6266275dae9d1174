//! Bound property contexts
//!
//! A [`PropertyContext`] is the live half of a schema: one entry per
//! declared property, each holding typed get/set accessors over a shared
//! [`GetAndSetProperties`] source. The table is built once at bind time and
//! is read-mostly afterwards; all sharing is single-threaded
//! (`Rc<RefCell<_>>`), matching the UI-thread confinement of the host.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::schema::{PropertyDescriptor, PropertyKind};

/// A typed property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Text(String),
}

impl PropertyValue {
    /// The kind this value belongs to
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Text(_) => PropertyKind::Text,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// The get/set surface a simulation handle supplies
///
/// `get_property` returns `None` for names the source does not answer;
/// `set_property` returns false when the source refuses a value.
pub trait GetAndSetProperties {
    fn get_property(&self, name: &str) -> Option<PropertyValue>;
    fn set_property(&mut self, name: &str, value: PropertyValue) -> bool;
}

/// One bound property: descriptor plus typed accessors
struct PropertyEntry {
    descriptor: PropertyDescriptor,
    get: Box<dyn Fn() -> Option<PropertyValue>>,
    set: Box<dyn Fn(PropertyValue) -> bool>,
}

/// A table of typed accessors bound to a shared source
pub struct PropertyContext {
    entries: Vec<PropertyEntry>,
}

impl PropertyContext {
    /// Build a context from a descriptor list and a shared source
    ///
    /// Each entry captures its own handle to the source; the context keeps
    /// the source alive for its own lifetime but never inspects its state
    /// outside the get/set surface.
    pub fn bind<S>(descriptors: &[PropertyDescriptor], source: Rc<RefCell<S>>) -> Self
    where
        S: GetAndSetProperties + 'static,
    {
        let entries: Vec<PropertyEntry> = descriptors
            .iter()
            .map(|d| {
                let get_source = source.clone();
                let get_name = d.name.clone();
                let set_source = source.clone();
                let set_name = d.name.clone();
                PropertyEntry {
                    descriptor: d.clone(),
                    get: Box::new(move || get_source.borrow().get_property(&get_name)),
                    set: Box::new(move |value| {
                        set_source.borrow_mut().set_property(&set_name, value)
                    }),
                }
            })
            .collect();
        log::debug!("Bound property context with {} entries", entries.len());
        Self { entries }
    }

    /// Number of bound properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no properties are bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the bound descriptors in declaration order
    pub fn descriptors(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    fn entry(&self, name: &str) -> Result<&PropertyEntry, PropertyError> {
        self.entries
            .iter()
            .find(|e| e.descriptor.name == name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))
    }

    /// Read a property through the bound source
    ///
    /// Falls back to the schema default when the source has no answer, so a
    /// property grid always has a total view.
    pub fn get(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        let entry = self.entry(name)?;
        Ok((entry.get)().unwrap_or_else(|| entry.descriptor.default.clone()))
    }

    /// Write a property through the bound source
    ///
    /// The value must match the declared kind; an `Int` is widened into a
    /// `Float` slot. Any other mismatch, and any refusal by the source, is
    /// an error.
    pub fn set(&self, name: &str, value: PropertyValue) -> Result<(), PropertyError> {
        let entry = self.entry(name)?;
        let expected = entry.descriptor.kind;
        let value = match (expected, value) {
            (PropertyKind::Float, PropertyValue::Int(i)) => PropertyValue::Float(i as f32),
            (_, value) if value.kind() == expected => value,
            (_, value) => {
                return Err(PropertyError::KindMismatch {
                    name: name.to_string(),
                    expected,
                    got: value.kind(),
                })
            }
        };
        if (entry.set)(value) {
            Ok(())
        } else {
            Err(PropertyError::Rejected(name.to_string()))
        }
    }
}

/// Error accessing a bound property
#[derive(Debug)]
pub enum PropertyError {
    /// Name not declared by the bound schema type
    UnknownProperty(String),
    /// Value kind does not match the declared kind
    KindMismatch {
        name: String,
        expected: PropertyKind,
        got: PropertyKind,
    },
    /// The source refused the value
    Rejected(String),
}

impl std::fmt::Display for PropertyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyError::UnknownProperty(name) => write!(f, "Unknown property: {}", name),
            PropertyError::KindMismatch {
                name,
                expected,
                got,
            } => write!(f, "Property {} expects {}, got {}", name, expected, got),
            PropertyError::Rejected(name) => write!(f, "Property {} rejected the value", name),
        }
    }
}

impl std::error::Error for PropertyError {}

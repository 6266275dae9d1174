//! Schema-driven property contexts
//!
//! This crate maps declarative property schemas to live property-editing
//! contexts:
//!
//! - [`PropertySchema`] - a parsed schema resource describing, per qualified
//!   type name, the properties a settings surface exposes
//! - [`PropertyDescriptor`] / [`PropertyKind`] - one declared property
//! - [`GetAndSetProperties`] - the get/set surface a simulation handle
//!   supplies
//! - [`PropertyContext`] - a table of typed accessors built once from a
//!   descriptor list and a shared source
//!
//! Schema resources are RON documents embedded in the crate and resolved by
//! name. A missing or malformed resource is a construction-time failure;
//! there is no recovery path.

mod context;
mod schema;

pub use context::{GetAndSetProperties, PropertyContext, PropertyError, PropertyValue};
pub use schema::{PropertyDescriptor, PropertyKind, PropertySchema, SchemaError};

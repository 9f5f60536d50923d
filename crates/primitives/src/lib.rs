//! Core types for shadow resolution: version levels, real-type metadata,
//! object identity, and zero-value allocation.
//!
//! Nothing in this crate knows about the shadow catalog. It only describes the
//! shape of the world the catalog and runtime operate on:
//!
//! - [`ApiLevel`] / [`VersionRange`]: the platform level a run targets and the
//!   inclusive ranges shadows declare.
//! - [`TypeDef`]: static tagged data standing in for a real type, its parent
//!   chain, and how to allocate it.
//! - [`ObjectHeader`]: per-instance identity plus the interception hook slot.
//! - [`Blank`]: allocation of a value without running any declared initializer.
//! - [`Real`] / [`ShadowObject`]: the two sides of an association.

/// Constructor argument lists.
pub mod args;
/// Zero-value allocation.
pub mod blank;
/// Object identity and the interception hook.
pub mod header;
/// Real and shadow object traits.
pub mod object;
/// Real-type metadata.
pub mod types;
/// Platform version levels and ranges.
pub mod version;

pub use args::{ArgError, ArgList, ConstructError};
pub use blank::{Blank, allocate_shadow, blank_real};
pub use header::{ObjectHeader, ObjectId, RunId};
pub use object::{Real, RealObject, RealType, ShadowObject};
pub use types::{Ancestors, Constructor, TypeDef, TypeKind};
pub use version::{ApiLevel, VersionError, VersionRange};

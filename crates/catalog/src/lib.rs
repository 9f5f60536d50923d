//! Shadow catalog and resolver.
//!
//! Maps each real type to the shadow types that substitute for it, each tagged
//! with the inclusive [`VersionRange`] it applies to, and selects exactly one
//! shadow for a real type at a given [`ApiLevel`].
//!
//! # Sub-modules
//!
//! - [`descriptor`] - shadow type metadata and catalog entries
//! - [`index`] - build phase, snapshots, and the published catalog
//! - [`resolve`] - hierarchy walk and version-range selection
//! - [`error`] - catalog error taxonomy
//!
//! # Registering shadows
//!
//! Shadows are registered statically through `inventory`:
//!
//! ```rust,ignore
//! pub static SHADOW_CAMERA_V1: ShadowTypeDef = shadow_type!(ShadowCameraV1, "ShadowCameraV1");
//! shadow!(camera_v1: &SHADOW_CAMERA_V1 => &CAMERA, range: VersionRange::between(0, 20));
//! ```
//!
//! Real types that configuration names by string but that no shadow covers
//! are declared with [`real_type!`]:
//!
//! ```rust,ignore
//! real_type!(&INSTRUMENTATION);
//! ```
//!
//! [`global`] builds the process-wide catalog from every submitted descriptor
//! on first use.

pub mod descriptor;
pub mod error;
pub mod index;
pub mod resolve;

mod macros;

pub use descriptor::{DescriptorSource, Implementation, RealTypeReg, ShadowDescriptor, ShadowReg, ShadowTypeDef};
pub use error::CatalogError;
pub use index::{Candidate, CatalogBuilder, ShadowCatalog, Snapshot, global};
pub use resolve::Resolution;
pub use umbra_primitives::{ApiLevel, ShadowObject, TypeDef, VersionRange, allocate_shadow};
#[doc(hidden)]
pub use {inventory, paste};

#[cfg(any(test, doc))]
pub(crate) mod test_fixtures;

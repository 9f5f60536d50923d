//! Run configuration.
//!
//! A [`RunConfig`] is usually built in code, but can be loaded from TOML:
//!
//! ```toml
//! api_level = 28
//! lazy_application = true
//! application = "android.app.Application"
//! plan_cache_capacity = 128
//!
//! [[overrides]]
//! real_type = "android.hardware.Camera"
//! shadow = "ShadowCameraStub"
//! ```

use std::num::NonZeroUsize;

use serde::Deserialize;
use umbra_catalog::{CatalogError, ShadowDescriptor, ShadowTypeDef, Snapshot};
use umbra_primitives::{ApiLevel, TypeDef};

use crate::error::Result;

/// Level used when a configuration does not name one.
pub const DEFAULT_API_LEVEL: u32 = 34;

/// Dispatch plans cached per runtime when not configured otherwise.
pub const DEFAULT_PLAN_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(500) {
	Some(capacity) => capacity,
	None => unreachable!(),
};

/// Per-run override naming a real type and the shadow to force for it.
///
/// Both names are looked up in the catalog snapshot the run pins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadowOverride {
	pub real_type: String,
	pub shadow: String,
}

/// Settings applied at the start of every run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
	/// API level targeted by [`Runtime::begin_configured_run`](crate::Runtime::begin_configured_run).
	#[serde(default = "default_api_level")]
	pub api_level: u32,
	/// Defer building the application until first accessed.
	#[serde(default)]
	pub lazy_application: bool,
	/// Real type name of the application object.
	#[serde(default)]
	pub application: Option<String>,
	/// Application type given as static metadata. Takes precedence over `application`.
	#[serde(skip)]
	pub application_type: Option<&'static TypeDef>,
	#[serde(default)]
	pub overrides: Vec<ShadowOverride>,
	#[serde(default = "default_plan_cache_capacity")]
	pub plan_cache_capacity: NonZeroUsize,
	/// Overrides given as static metadata, for shadows the catalog never saw.
	#[serde(skip)]
	pub forced: Vec<ShadowDescriptor>,
}

fn default_api_level() -> u32 {
	DEFAULT_API_LEVEL
}

fn default_plan_cache_capacity() -> NonZeroUsize {
	DEFAULT_PLAN_CACHE_CAPACITY
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			api_level: DEFAULT_API_LEVEL,
			lazy_application: false,
			application: None,
			application_type: None,
			overrides: Vec::new(),
			plan_cache_capacity: DEFAULT_PLAN_CACHE_CAPACITY,
			forced: Vec::new(),
		}
	}
}

impl RunConfig {
	/// Parses a configuration from TOML.
	pub fn from_toml_str(src: &str) -> Result<Self> {
		Ok(toml::from_str(src)?)
	}

	/// Returns the configured API level.
	pub fn level(&self) -> ApiLevel {
		ApiLevel(self.api_level)
	}

	pub fn with_api_level(mut self, level: u32) -> Self {
		self.api_level = level;
		self
	}

	pub fn lazy_application(mut self, lazy: bool) -> Self {
		self.lazy_application = lazy;
		self
	}

	pub fn with_application(mut self, real_type: impl Into<String>) -> Self {
		self.application = Some(real_type.into());
		self
	}

	/// Names the application type without a catalog lookup.
	pub fn with_application_type(mut self, real_type: &'static TypeDef) -> Self {
		self.application_type = Some(real_type);
		self
	}

	/// Forces `shadow` for `real_type` by name.
	pub fn with_override(mut self, real_type: impl Into<String>, shadow: impl Into<String>) -> Self {
		self.overrides.push(ShadowOverride {
			real_type: real_type.into(),
			shadow: shadow.into(),
		});
		self
	}

	/// Forces `shadow` for `real_type` without a catalog lookup.
	pub fn force_shadow(mut self, real_type: &'static TypeDef, shadow: &'static ShadowTypeDef) -> Self {
		self.forced.push(ShadowDescriptor::override_of(real_type, shadow));
		self
	}

	pub fn with_plan_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
		self.plan_cache_capacity = capacity;
		self
	}

	/// Resolves every override against `snapshot`.
	pub(crate) fn overrides_for(&self, snapshot: &Snapshot) -> Result<Vec<ShadowDescriptor>, CatalogError> {
		let mut resolved = Vec::with_capacity(self.overrides.len() + self.forced.len());
		for entry in &self.overrides {
			let real_type = snapshot
				.real_type(&entry.real_type)
				.ok_or_else(|| CatalogError::UnknownRealType {
					name: entry.real_type.clone(),
				})?;
			let shadow = snapshot
				.shadow_type(&entry.shadow)
				.ok_or_else(|| CatalogError::UnknownShadow {
					name: entry.shadow.clone(),
				})?;
			resolved.push(ShadowDescriptor::override_of(real_type, shadow));
		}
		resolved.extend(self.forced.iter().copied());
		Ok(resolved)
	}

	/// Resolves the configured application type against `snapshot`.
	pub(crate) fn application_for(&self, snapshot: &Snapshot) -> Result<Option<&'static TypeDef>, CatalogError> {
		if let Some(real_type) = self.application_type {
			return Ok(Some(real_type));
		}
		let Some(name) = &self.application else {
			return Ok(None);
		};
		snapshot
			.real_type(name)
			.map(Some)
			.ok_or_else(|| CatalogError::UnknownRealType { name: name.clone() })
	}
}

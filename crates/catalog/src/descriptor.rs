//! Shadow type metadata and catalog entries.

use std::fmt;

use umbra_primitives::{ApiLevel, ShadowObject, TypeDef, VersionRange};

/// One method a shadow type implements, gated by its own version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Implementation {
	pub method: &'static str,
	pub range: VersionRange,
}

/// Static metadata of one shadow type.
pub struct ShadowTypeDef {
	/// Unique shadow type name.
	pub name: &'static str,
	/// Zero-value allocator for the shadow.
	pub allocate: fn() -> Box<dyn ShadowObject>,
	/// Clears process-wide state the shadow keeps between runs.
	pub resetter: Option<fn()>,
	/// Methods routed to the shadow instead of the real body.
	pub implementations: &'static [Implementation],
	/// Whether methods the shadow does not implement run the real body.
	///
	/// When false such calls do nothing and return a default value.
	pub call_through_by_default: bool,
}

impl ShadowTypeDef {
	/// Returns the implementation of `method` applicable at `level`.
	pub fn implementation(&self, method: &str, level: ApiLevel) -> Option<&'static Implementation> {
		self.implementations
			.iter()
			.find(|imp| imp.method == method && imp.range.contains(level))
	}
}

impl fmt::Debug for ShadowTypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ShadowTypeDef")
			.field("name", &self.name)
			.field("implementations", &self.implementations.len())
			.field("call_through_by_default", &self.call_through_by_default)
			.finish()
	}
}

/// Where a descriptor was registered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorSource {
	/// Shipped with the engine.
	Builtin,
	/// Submitted by a library crate.
	Crate(&'static str),
	/// Force-registered for a single run.
	Override,
}

impl DescriptorSource {
	/// Precedence tier. Overrides outrank every catalog entry.
	pub(crate) const fn tier(self) -> u8 {
		match self {
			Self::Builtin | Self::Crate(_) => 0,
			Self::Override => 1,
		}
	}
}

impl fmt::Display for DescriptorSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Builtin => write!(f, "builtin"),
			Self::Crate(name) => write!(f, "crate:{name}"),
			Self::Override => write!(f, "override"),
		}
	}
}

/// Catalog entry binding a real type to a candidate shadow type.
#[derive(Debug, Clone, Copy)]
pub struct ShadowDescriptor {
	pub real_type: &'static TypeDef,
	pub shadow: &'static ShadowTypeDef,
	pub range: VersionRange,
	/// Fallback used when no candidate's range covers the active level.
	pub is_default: bool,
	pub source: DescriptorSource,
}

impl ShadowDescriptor {
	/// Creates a builtin descriptor covering every level.
	pub const fn new(real_type: &'static TypeDef, shadow: &'static ShadowTypeDef) -> Self {
		Self {
			real_type,
			shadow,
			range: VersionRange::ALL,
			is_default: false,
			source: DescriptorSource::Builtin,
		}
	}

	/// Creates a per-run override descriptor covering every level.
	pub const fn override_of(real_type: &'static TypeDef, shadow: &'static ShadowTypeDef) -> Self {
		Self::new(real_type, shadow).with_source(DescriptorSource::Override)
	}

	pub const fn with_range(mut self, range: VersionRange) -> Self {
		self.range = range;
		self
	}

	pub const fn with_source(mut self, source: DescriptorSource) -> Self {
		self.source = source;
		self
	}

	/// Marks this descriptor as the fallback for its real type.
	pub const fn as_default(mut self) -> Self {
		self.is_default = true;
		self
	}
}

impl fmt::Display for ShadowDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} -> {} {} ({})",
			self.real_type.name, self.shadow.name, self.range, self.source
		)?;
		if self.is_default {
			write!(f, " default")?;
		}
		Ok(())
	}
}

/// Registry wrapper for statically submitted descriptors.
pub struct ShadowReg(pub &'static ShadowDescriptor);
inventory::collect!(ShadowReg);

/// Registry wrapper for real types named in configuration but never shadowed.
pub struct RealTypeReg(pub &'static TypeDef);
inventory::collect!(RealTypeReg);

use std::fmt;

use thiserror::Error;

/// Platform API level targeted by a run.
///
/// Totally ordered. [`ApiLevel::MAX`] is the open upper bound used by ranges
/// that apply to every later level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
	/// Lowest representable level.
	pub const MIN: ApiLevel = ApiLevel(0);
	/// Unbounded upper level.
	pub const MAX: ApiLevel = ApiLevel(u32::MAX);
}

impl From<u32> for ApiLevel {
	fn from(level: u32) -> Self {
		Self(level)
	}
}

impl fmt::Display for ApiLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if *self == Self::MAX {
			write!(f, "latest")
		} else {
			write!(f, "{}", self.0)
		}
	}
}

/// Errors building a [`VersionRange`] at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
	/// Lower bound lies above the upper bound.
	#[error("invalid version range: min {min} is above max {max}")]
	InvalidRange { min: ApiLevel, max: ApiLevel },
}

/// Inclusive `[min, max]` range of API levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
	min: ApiLevel,
	max: ApiLevel,
}

impl VersionRange {
	/// Range covering every level.
	pub const ALL: VersionRange = VersionRange {
		min: ApiLevel::MIN,
		max: ApiLevel::MAX,
	};

	/// Creates `[min, max]`, rejecting inverted bounds at compile time when
	/// used in a `static` or `const`.
	///
	/// # Panics
	///
	/// If `min > max`. Outside a const context that panic happens at runtime;
	/// use [`VersionRange::try_new`] for bounds that are not known statically.
	pub const fn between(min: u32, max: u32) -> Self {
		assert!(min <= max, "version range min is above max");
		Self {
			min: ApiLevel(min),
			max: ApiLevel(max),
		}
	}

	/// Creates the open-ended range `[min, latest]`.
	pub const fn from_level(min: u32) -> Self {
		Self {
			min: ApiLevel(min),
			max: ApiLevel::MAX,
		}
	}

	/// Creates `[min, max]` from runtime values.
	pub fn try_new(min: ApiLevel, max: ApiLevel) -> Result<Self, VersionError> {
		if min > max {
			return Err(VersionError::InvalidRange { min, max });
		}
		Ok(Self { min, max })
	}

	#[inline]
	pub const fn min(self) -> ApiLevel {
		self.min
	}

	#[inline]
	pub const fn max(self) -> ApiLevel {
		self.max
	}

	/// Returns true if `level` lies within the inclusive bounds.
	#[inline]
	pub fn contains(self, level: ApiLevel) -> bool {
		self.min <= level && level <= self.max
	}

	/// Returns true if both ranges share at least one level.
	#[inline]
	pub fn overlaps(self, other: VersionRange) -> bool {
		self.min <= other.max && other.min <= self.max
	}

	/// Number of levels covered minus one. Narrower ranges are more specific.
	#[inline]
	pub fn width(self) -> u32 {
		self.max.0 - self.min.0
	}
}

impl Default for VersionRange {
	fn default() -> Self {
		Self::ALL
	}
}

impl fmt::Display for VersionRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}]", self.min, self.max)
	}
}

//! Interception dispatch.
//!
//! When an intercepted method runs on a real instance, the runtime decides
//! where control goes. The decision depends only on the instance's runtime
//! type, the method name, and the run's pinned catalog state, so it is
//! computed once per `(type, method)` and cached for the rest of the run.

use std::fmt;
use std::num::NonZeroUsize;
use std::ptr;

use lru::LruCache;
use umbra_catalog::{CatalogError, ShadowTypeDef, Snapshot};
use umbra_primitives::{ApiLevel, TypeDef};

/// Where an intercepted call goes.
#[derive(Clone, Copy)]
pub enum Plan {
	/// Run the real body. Chosen when the type has no shadow, or its shadow
	/// does not implement the method and calls through by default.
	CallReal,
	/// Skip the real body and return the default value.
	DoNothing,
	/// Run the shadow's implementation.
	Shadow(&'static ShadowTypeDef),
}

impl Plan {
	/// Computes the plan for `method` on instances of `real_type`.
	///
	/// Only the single shadow resolved for `real_type` is consulted. Shadow
	/// types carry no parent link, so once a subtype gets a shadow of its own,
	/// methods implemented only by an ancestor's shadow fall back to that
	/// shadow's default (`CallReal` or `DoNothing`). A subtype shadow that
	/// should keep them must list them in its own implementations.
	pub fn compute(
		snapshot: &Snapshot,
		real_type: &'static TypeDef,
		method: &str,
		level: ApiLevel,
	) -> Result<Plan, CatalogError> {
		let shadow = match snapshot.resolve(real_type, level) {
			Ok(resolution) => resolution.descriptor.shadow,
			Err(CatalogError::NoShadowFound { .. }) => return Ok(Plan::CallReal),
			Err(err) => return Err(err),
		};

		let plan = if shadow.implementation(method, level).is_some() {
			Plan::Shadow(shadow)
		} else if shadow.call_through_by_default {
			Plan::CallReal
		} else {
			Plan::DoNothing
		};
		tracing::trace!(real_type = real_type.name, method, %plan, "computed dispatch plan");
		Ok(plan)
	}
}

impl PartialEq for Plan {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::CallReal, Self::CallReal) | (Self::DoNothing, Self::DoNothing) => true,
			(Self::Shadow(a), Self::Shadow(b)) => ptr::eq(*a, *b) || a.name == b.name,
			_ => false,
		}
	}
}

impl Eq for Plan {}

impl fmt::Debug for Plan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl fmt::Display for Plan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CallReal => f.write_str("call-real"),
			Self::DoNothing => f.write_str("do-nothing"),
			Self::Shadow(shadow) => write!(f, "shadow:{}", shadow.name),
		}
	}
}

/// Bounded per-run cache of dispatch plans.
pub(crate) struct PlanCache {
	plans: LruCache<(&'static str, &'static str), Plan>,
}

impl PlanCache {
	pub(crate) fn new(capacity: NonZeroUsize) -> Self {
		Self {
			plans: LruCache::new(capacity),
		}
	}

	pub(crate) fn get(&mut self, real_type: &'static str, method: &'static str) -> Option<Plan> {
		self.plans.get(&(real_type, method)).copied()
	}

	pub(crate) fn put(&mut self, real_type: &'static str, method: &'static str, plan: Plan) {
		self.plans.put((real_type, method), plan);
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.plans.len()
	}

	pub(crate) fn clear(&mut self) {
		self.plans.clear();
	}
}

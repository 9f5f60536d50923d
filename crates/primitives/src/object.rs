use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::header::ObjectHeader;
use crate::types::TypeDef;

/// A real platform object whose behavior may be substituted.
///
/// The runtime type of an instance is given by [`Real::type_def`], which may
/// name a subtype of whatever static type the caller holds.
pub trait Real: Any {
	/// Returns the identity header embedded in this instance.
	fn header(&self) -> &ObjectHeader;

	/// Returns the metadata of this instance's runtime type.
	fn type_def(&self) -> &'static TypeDef;
}

/// A [`Real`] type with statically known metadata.
pub trait RealType: Real + Sized {
	/// Returns the metadata describing `Self`.
	fn static_type() -> &'static TypeDef;
}

/// A shadow: the substitute that receives routed calls for a real instance.
pub trait ShadowObject: Any {
	/// Receives the back-reference to the real instance this shadow serves.
	///
	/// Called exactly once, before the shadow becomes visible to anyone.
	fn bind_real(&mut self, _real: Weak<dyn Real>) {}
}

/// Back-reference slot a shadow keeps to its real instance.
///
/// Holds a weak reference so a real instance and its shadow never keep each
/// other alive.
#[derive(Default)]
pub struct RealObject {
	real: Option<Weak<dyn Real>>,
}

impl RealObject {
	/// Stores the back-reference.
	pub fn bind(&mut self, real: Weak<dyn Real>) {
		self.real = Some(real);
	}

	/// Returns true once a real instance has been bound.
	pub fn is_bound(&self) -> bool {
		self.real.is_some()
	}

	/// Returns the real instance if it is still alive.
	pub fn get(&self) -> Option<Rc<dyn Real>> {
		self.real.as_ref()?.upgrade()
	}

	/// Returns the real instance downcast to its concrete type.
	pub fn downcast<T: Real>(&self) -> Option<Rc<T>> {
		let any: Rc<dyn Any> = self.get()?;
		any.downcast::<T>().ok()
	}
}

impl fmt::Debug for RealObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.get() {
			Some(real) => f
				.debug_struct("RealObject")
				.field("type", &real.type_def().name)
				.field("id", &real.header().id())
				.finish(),
			None => f.write_str("RealObject(unbound)"),
		}
	}
}

/// Implements [`Real`] and [`RealType`] for a struct with an [`ObjectHeader`] field.
///
/// The header field defaults to `header`.
///
/// ```rust,ignore
/// pub static APPLICATION: TypeDef = concrete_type!(Application, "android.app.Application");
/// impl_real!(Application => APPLICATION);
/// ```
#[macro_export]
macro_rules! impl_real {
	($ty:ty => $def:path) => {
		$crate::impl_real!($ty => $def, header: header);
	};
	($ty:ty => $def:path, header: $field:ident) => {
		impl $crate::Real for $ty {
			fn header(&self) -> &$crate::ObjectHeader {
				&self.$field
			}

			fn type_def(&self) -> &'static $crate::TypeDef {
				&$def
			}
		}

		impl $crate::RealType for $ty {
			fn static_type() -> &'static $crate::TypeDef {
				&$def
			}
		}
	};
}

/// Implements [`ShadowObject`], optionally binding a [`RealObject`] field.
#[macro_export]
macro_rules! impl_shadow {
	($ty:ty) => {
		impl $crate::ShadowObject for $ty {}
	};
	($ty:ty, real: $field:ident) => {
		impl $crate::ShadowObject for $ty {
			fn bind_real(&mut self, real: ::std::rc::Weak<dyn $crate::Real>) {
				self.$field.bind(real);
			}
		}
	};
}

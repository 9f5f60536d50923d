//! Instance Builder.
//!
//! Two ways of producing a real instance:
//!
//! - [`allocate`]: zero-value allocation through the type's [`Blank`]
//!   allocator. No declared initializer ever runs, so types whose constructors
//!   perform I/O or reject test inputs are still allocatable.
//! - [`allocate_with_args`]: the type's declared constructor, for callers who
//!   want its side effects.
//!
//! [`Blank`]: umbra_primitives::Blank

use std::any::{Any, type_name};
use std::rc::Rc;

use umbra_catalog::ShadowTypeDef;
use umbra_primitives::{ArgList, ConstructError, Real, RealType, ShadowObject, TypeDef, TypeKind};

use crate::error::{Result, RuntimeError};

/// Allocates a zero-valued instance of `ty` without running any initializer.
pub fn allocate(ty: &'static TypeDef) -> Result<Rc<dyn Real>> {
	let blank = match (ty.kind, ty.blank) {
		(TypeKind::Concrete, Some(blank)) => blank,
		(kind, _) => {
			return Err(RuntimeError::Uninstantiable {
				type_name: ty.name,
				kind,
			});
		}
	};
	let real = blank();
	tracing::trace!(real_type = ty.name, id = %real.header().id(), "allocated blank instance");
	Ok(real)
}

/// Typed form of [`allocate`].
pub fn allocate_as<T: RealType>() -> Result<Rc<T>> {
	downcast_real(allocate(T::static_type())?)
}

/// Builds an instance of `ty` through its declared constructor.
///
/// Every argument must be consumed. Failures of the constructor body are
/// returned as [`RuntimeError::Construct`] without further wrapping.
pub fn allocate_with_args(ty: &'static TypeDef, mut args: ArgList) -> Result<Rc<dyn Real>> {
	if ty.kind != TypeKind::Concrete {
		return Err(RuntimeError::Uninstantiable {
			type_name: ty.name,
			kind: ty.kind,
		});
	}
	let construct = ty
		.construct
		.ok_or(RuntimeError::NoConstructor { type_name: ty.name })?;

	let real = construct(&mut args).map_err(|err| match err {
		ConstructError::Args(source) => RuntimeError::ArgumentMismatch {
			type_name: ty.name,
			source,
		},
		ConstructError::Failed(err) => RuntimeError::Construct(err),
	})?;
	args.finish().map_err(|source| RuntimeError::ArgumentMismatch {
		type_name: ty.name,
		source,
	})?;

	tracing::trace!(real_type = ty.name, id = %real.header().id(), "constructed instance");
	Ok(real)
}

/// Allocates a fresh shadow of `shadow`'s type. Shadows are always blank.
pub fn allocate_shadow(shadow: &'static ShadowTypeDef) -> Box<dyn ShadowObject> {
	(shadow.allocate)()
}

/// Recovers the concrete type of a real instance.
pub fn downcast_real<T: RealType>(real: Rc<dyn Real>) -> Result<Rc<T>> {
	let actual = real.type_def().name;
	let any: Rc<dyn Any> = real;
	any.downcast::<T>().map_err(|_| RuntimeError::RealTypeMismatch {
		expected: T::static_type().name,
		actual,
	})
}

/// Recovers the concrete type of a shadow.
pub(crate) fn downcast_shadow<S: ShadowObject>(
	shadow: Rc<dyn ShadowObject>,
	real_type: &'static str,
	actual: &'static str,
) -> Result<Rc<S>> {
	let any: Rc<dyn Any> = shadow;
	any.downcast::<S>().map_err(|_| RuntimeError::ShadowTypeMismatch {
		real_type,
		expected: short_type_name::<S>(),
		actual,
	})
}

fn short_type_name<T>() -> &'static str {
	let full = type_name::<T>();
	full.rsplit("::").next().unwrap_or(full)
}

/// Builds a [`ShadowTypeDef`](crate::ShadowTypeDef) for a type implementing
/// [`ShadowObject`](crate::ShadowObject) and `Blank`.
///
/// Implemented methods default to every level; append `in <range>` to gate one.
///
/// ```rust,ignore
/// pub static SHADOW_CAMERA: ShadowTypeDef = shadow_type!(
///     ShadowCamera,
///     "ShadowCamera",
///     implements: ["open", "preview_size" in VersionRange::from_level(14)],
///     call_through: false,
///     resetter: ShadowCamera::reset,
/// );
/// ```
#[macro_export]
macro_rules! shadow_type {
	(
		$ty:ty, $name:expr
		$(, implements: [$($method:literal $(in $range:expr)?),* $(,)?])?
		$(, call_through: $call_through:expr)?
		$(, resetter: $reset:expr)?
		$(,)?
	) => {
		$crate::ShadowTypeDef {
			name: $name,
			allocate: $crate::allocate_shadow::<$ty>
				as fn() -> ::std::boxed::Box<dyn $crate::ShadowObject>,
			resetter: $crate::__shadow_opt!($($reset as fn())?),
			implementations: &[$($($crate::Implementation {
				method: $method,
				range: $crate::__shadow_or!($(, $range)?, $crate::VersionRange::ALL),
			}),*)?],
			call_through_by_default: $crate::__shadow_or!($(, $call_through)?, true),
		}
	};
}

/// Submits a [`ShadowDescriptor`](crate::ShadowDescriptor) to the global catalog.
///
/// ```rust,ignore
/// shadow!(camera_v1: &SHADOW_CAMERA_V1 => &CAMERA, range: VersionRange::between(0, 10));
/// shadow!(camera_fallback: &SHADOW_CAMERA_LEGACY => &CAMERA, default: true);
/// ```
#[macro_export]
macro_rules! shadow {
	(
		$name:ident: $shadow:expr => $real:expr
		$(, range: $range:expr)?
		$(, default: $default:expr)?
		$(,)?
	) => {
		$crate::paste::paste! {
			#[allow(non_upper_case_globals)]
			pub static [<SHADOW_DESC_ $name:upper>]: $crate::ShadowDescriptor = $crate::ShadowDescriptor {
				real_type: $real,
				shadow: $shadow,
				range: $crate::__shadow_or!($(, $range)?, $crate::VersionRange::ALL),
				is_default: $crate::__shadow_or!($(, $default)?, false),
				source: $crate::DescriptorSource::Crate(env!("CARGO_PKG_NAME")),
			};

			$crate::inventory::submit! { $crate::ShadowReg(&[<SHADOW_DESC_ $name:upper>]) }
		}
	};
}

/// Submits a real type to the global catalog so it resolves by name.
///
/// Types that appear in a [`shadow!`] descriptor, or are ancestors of one,
/// are known already.
#[macro_export]
macro_rules! real_type {
	($real:expr $(,)?) => {
		$crate::inventory::submit! { $crate::RealTypeReg($real) }
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __shadow_opt {
	() => {
		None
	};
	($value:expr) => {
		Some($value)
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __shadow_or {
	(, $value:expr, $default:expr) => {
		$value
	};
	(, $default:expr) => {
		$default
	};
}

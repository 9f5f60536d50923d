//! Zero-value allocation.
//!
//! [`Blank`] produces a value whose every field holds its zero value without
//! calling any constructor the type declares. It is deliberately separate from
//! [`Default`]: `Default` is a declared initializer and may perform I/O or
//! platform calls, while `blank` only lays out storage.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::header::ObjectHeader;
use crate::object::{Real, RealObject, ShadowObject};

/// Allocation of a zero-initialized value.
pub trait Blank: Sized {
	/// Returns the zero value of `Self`.
	fn blank() -> Self;
}

macro_rules! blank_zero {
	($($ty:ty => $zero:expr),* $(,)?) => {
		$(impl Blank for $ty {
			#[inline]
			fn blank() -> Self {
				$zero
			}
		})*
	};
}

blank_zero! {
	u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
	i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
	f32 => 0.0, f64 => 0.0,
	bool => false,
	char => '\0',
	() => (),
	String => String::new(),
	&'static str => "",
	Duration => Duration::ZERO,
	ObjectHeader => ObjectHeader::new(),
	RealObject => RealObject::default(),
}

impl<T> Blank for Option<T> {
	fn blank() -> Self {
		None
	}
}

impl<T> Blank for Vec<T> {
	fn blank() -> Self {
		Vec::new()
	}
}

impl<T> Blank for VecDeque<T> {
	fn blank() -> Self {
		VecDeque::new()
	}
}

impl<K, V> Blank for BTreeMap<K, V> {
	fn blank() -> Self {
		BTreeMap::new()
	}
}

impl<T> Blank for BTreeSet<T> {
	fn blank() -> Self {
		BTreeSet::new()
	}
}

impl<K, V, S: BuildHasher + Default> Blank for HashMap<K, V, S> {
	fn blank() -> Self {
		HashMap::with_hasher(S::default())
	}
}

impl<T, S: BuildHasher + Default> Blank for HashSet<T, S> {
	fn blank() -> Self {
		HashSet::with_hasher(S::default())
	}
}

impl<T: Blank> Blank for Cell<T> {
	fn blank() -> Self {
		Cell::new(T::blank())
	}
}

impl<T: Blank> Blank for RefCell<T> {
	fn blank() -> Self {
		RefCell::new(T::blank())
	}
}

impl<T: Blank> Blank for Box<T> {
	fn blank() -> Self {
		Box::new(T::blank())
	}
}

impl<T: Blank> Blank for Rc<T> {
	fn blank() -> Self {
		Rc::new(T::blank())
	}
}

impl<T: Blank> Blank for Arc<T> {
	fn blank() -> Self {
		Arc::new(T::blank())
	}
}

impl<T: ?Sized> Blank for PhantomData<T> {
	fn blank() -> Self {
		PhantomData
	}
}

impl<T: Blank, const N: usize> Blank for [T; N] {
	fn blank() -> Self {
		std::array::from_fn(|_| T::blank())
	}
}

macro_rules! blank_tuple {
	($($name:ident),+) => {
		impl<$($name: Blank),+> Blank for ($($name,)+) {
			fn blank() -> Self {
				($($name::blank(),)+)
			}
		}
	};
}

blank_tuple!(A);
blank_tuple!(A, B);
blank_tuple!(A, B, C);
blank_tuple!(A, B, C, D);

/// Zero-value allocator stored in [`TypeDef::blank`](crate::TypeDef::blank).
pub fn blank_real<T: Real + Blank>() -> Rc<dyn Real> {
	Rc::new(T::blank())
}

/// Zero-value allocator for shadow types.
pub fn allocate_shadow<S: ShadowObject + Blank>() -> Box<dyn ShadowObject> {
	Box::new(S::blank())
}

/// Implements [`Blank`] for a struct by blanking each listed field.
///
/// Every field must be listed; the struct literal fails to compile otherwise.
///
/// ```rust,ignore
/// impl_blank!(Application { header, package_name, started });
/// ```
#[macro_export]
macro_rules! impl_blank {
	($ty:ident { $($field:ident),* $(,)? }) => {
		impl $crate::Blank for $ty {
			fn blank() -> Self {
				Self {
					$($field: $crate::Blank::blank(),)*
				}
			}
		}
	};
}

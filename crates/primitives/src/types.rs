use std::fmt;
use std::rc::Rc;

use crate::args::{ArgList, ConstructError};
use crate::object::Real;

/// Initializer-driven constructor for a real type.
pub type Constructor = fn(&mut ArgList) -> Result<Rc<dyn Real>, ConstructError>;

/// Layout category of a real type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// Has a concrete layout and can be allocated.
	Concrete,
	/// Declares shared behavior but cannot be allocated on its own.
	Abstract,
	/// Pure contract with no layout.
	Interface,
}

impl fmt::Display for TypeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Concrete => write!(f, "concrete"),
			Self::Abstract => write!(f, "abstract"),
			Self::Interface => write!(f, "interface"),
		}
	}
}

/// Static metadata describing a real type.
///
/// Replaces runtime reflection: the parent chain, layout kind, and the two
/// ways of producing an instance are plain data. Identity is the `name`.
pub struct TypeDef {
	/// Fully qualified type name (e.g. "android.app.Application").
	pub name: &'static str,
	/// Direct supertype, if any.
	pub parent: Option<&'static TypeDef>,
	pub kind: TypeKind,
	/// Zero-value allocator. Never runs declared initializers.
	pub blank: Option<fn() -> Rc<dyn Real>>,
	/// Declared constructor, for callers that want initialization side effects.
	pub construct: Option<Constructor>,
}

impl TypeDef {
	/// Describes an abstract type.
	pub const fn abstract_type(name: &'static str, parent: Option<&'static TypeDef>) -> Self {
		Self {
			name,
			parent,
			kind: TypeKind::Abstract,
			blank: None,
			construct: None,
		}
	}

	/// Describes an interface.
	pub const fn interface(name: &'static str) -> Self {
		Self {
			name,
			parent: None,
			kind: TypeKind::Interface,
			blank: None,
			construct: None,
		}
	}

	/// Returns true if instances of this type can be allocated.
	#[inline]
	pub fn is_concrete(&self) -> bool {
		self.kind == TypeKind::Concrete && self.blank.is_some()
	}

	/// Iterates this type followed by each ancestor, nearest first.
	pub fn ancestors(&'static self) -> Ancestors {
		Ancestors { next: Some(self) }
	}

	/// Returns true if `other` is this type or one of its ancestors.
	pub fn is_subtype_of(&'static self, other: &TypeDef) -> bool {
		self.ancestors().any(|t| t.name == other.name)
	}
}

impl PartialEq for TypeDef {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for TypeDef {}

impl fmt::Debug for TypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDef")
			.field("name", &self.name)
			.field("parent", &self.parent.map(|p| p.name))
			.field("kind", &self.kind)
			.finish()
	}
}

impl fmt::Display for TypeDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Iterator over a type and its ancestors.
pub struct Ancestors {
	next: Option<&'static TypeDef>,
}

impl Iterator for Ancestors {
	type Item = &'static TypeDef;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = current.parent;
		Some(current)
	}
}

/// Builds a [`TypeDef`] for a concrete real type.
///
/// The type must implement [`Real`](crate::Real) and [`Blank`](crate::Blank).
///
/// ```rust,ignore
/// pub static ACTIVITY: TypeDef = concrete_type!(
///     Activity,
///     "android.app.Activity",
///     parent: &CONTEXT_WRAPPER,
///     construct: Activity::construct,
/// );
/// ```
#[macro_export]
macro_rules! concrete_type {
	($ty:ty, $name:literal $(, parent: $parent:expr)? $(, construct: $ctor:expr)? $(,)?) => {
		$crate::TypeDef {
			name: $name,
			parent: $crate::__type_def_opt!($($parent)?),
			kind: $crate::TypeKind::Concrete,
			blank: Some($crate::blank_real::<$ty> as fn() -> ::std::rc::Rc<dyn $crate::Real>),
			construct: $crate::__type_def_opt!($($ctor as $crate::Constructor)?),
		}
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __type_def_opt {
	() => {
		None
	};
	($value:expr) => {
		Some($value)
	};
}

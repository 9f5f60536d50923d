use std::any::{Any, type_name};
use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

/// Argument list errors raised while a constructor consumes its inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
	/// Fewer arguments were supplied than the constructor consumes.
	#[error("missing argument {index}: expected {expected}")]
	Missing { index: usize, expected: &'static str },
	/// The argument at `index` has a different type.
	#[error("argument {index}: expected {expected}, found {found}")]
	TypeMismatch {
		index: usize,
		expected: &'static str,
		found: &'static str,
	},
	/// The constructor returned without consuming every argument.
	#[error("{count} unconsumed argument(s)")]
	Unconsumed { count: usize },
}

/// Failure of a declared constructor.
#[derive(Error, Debug)]
pub enum ConstructError {
	#[error(transparent)]
	Args(#[from] ArgError),
	/// The constructor body itself failed; propagated unchanged.
	#[error(transparent)]
	Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl ConstructError {
	/// Wraps an arbitrary constructor failure.
	pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		Self::Failed(err.into())
	}
}

struct Arg {
	type_name: &'static str,
	value: Box<dyn Any>,
}

/// Ordered, typed argument values handed to a declared constructor.
///
/// Constructors pull values positionally with [`ArgList::take`].
#[derive(Default)]
pub struct ArgList {
	args: VecDeque<Arg>,
	consumed: usize,
}

impl ArgList {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a value, builder style.
	pub fn with<T: Any>(mut self, value: T) -> Self {
		self.push(value);
		self
	}

	/// Appends a value.
	pub fn push<T: Any>(&mut self, value: T) {
		self.args.push_back(Arg {
			type_name: type_name::<T>(),
			value: Box::new(value),
		});
	}

	/// Number of arguments not yet consumed.
	pub fn len(&self) -> usize {
		self.args.len()
	}

	pub fn is_empty(&self) -> bool {
		self.args.is_empty()
	}

	/// Consumes the next argument as a `T`.
	pub fn take<T: Any>(&mut self) -> Result<T, ArgError> {
		let index = self.consumed;
		let Some(arg) = self.args.pop_front() else {
			return Err(ArgError::Missing {
				index,
				expected: type_name::<T>(),
			});
		};
		match arg.value.downcast::<T>() {
			Ok(value) => {
				self.consumed += 1;
				Ok(*value)
			}
			Err(value) => {
				let found = arg.type_name;
				self.args.push_front(Arg {
					type_name: found,
					value,
				});
				Err(ArgError::TypeMismatch {
					index,
					expected: type_name::<T>(),
					found,
				})
			}
		}
	}

	/// Fails if any argument was left unconsumed.
	pub fn finish(&self) -> Result<(), ArgError> {
		match self.args.len() {
			0 => Ok(()),
			count => Err(ArgError::Unconsumed { count }),
		}
	}
}

impl fmt::Debug for ArgList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.args.iter().map(|a| a.type_name)).finish()
	}
}

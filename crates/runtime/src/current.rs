//! Thread-current runtime and the global accessors built on it.
//!
//! Platform code that has no runtime handle at hand (static accessors,
//! intercepted method bodies) reaches the runtime entered on its thread.

use std::cell::RefCell;
use std::rc::Rc;

use umbra_primitives::{Real, RealType, ShadowObject, TypeDef};

use crate::error::{Result, RuntimeError};
use crate::runtime::Runtime;

thread_local! {
	static CURRENT: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Restores the previously entered runtime when dropped.
#[must_use = "the runtime is only current while the guard is alive"]
pub struct EnterGuard {
	previous: Option<Runtime>,
}

impl Drop for EnterGuard {
	fn drop(&mut self) {
		let previous = self.previous.take();
		CURRENT.with(|current| *current.borrow_mut() = previous);
	}
}

impl Runtime {
	/// Makes this runtime current on the calling thread until the guard drops.
	pub fn enter(&self) -> EnterGuard {
		let previous = CURRENT.with(|current| current.replace(Some(self.clone())));
		EnterGuard { previous }
	}
}

/// Returns the runtime entered on this thread.
pub fn current() -> Result<Runtime> {
	CURRENT
		.with(|current| current.borrow().clone())
		.ok_or(RuntimeError::NoCurrentRuntime)
}

/// [`Runtime::shadow_of`] on the current runtime.
pub fn shadow_of<S: ShadowObject, T: Real>(real: &Rc<T>) -> Result<Rc<S>> {
	current()?.shadow_of(real)
}

/// [`Runtime::extract`] on the current runtime.
pub fn extract<S: ShadowObject, T: Real>(real: &Rc<T>) -> Result<Rc<S>> {
	current()?.extract(real)
}

/// [`Runtime::new_instance_of`] on the current runtime.
pub fn new_instance_of(ty: &'static TypeDef) -> Result<Rc<dyn Real>> {
	current()?.new_instance_of(ty)
}

/// [`Runtime::application`] on the current runtime.
///
/// Under lazy application this is the call that builds it.
pub fn application() -> Result<Rc<dyn Real>> {
	current()?.application()
}

/// [`Runtime::application_as`] on the current runtime.
pub fn application_as<T: RealType>() -> Result<Rc<T>> {
	current()?.application_as()
}

/// Routes an intercepted call through the current runtime.
///
/// With no runtime entered the real body runs, as it would without
/// instrumentation.
pub fn intercept<T, S, R>(
	real: &Rc<T>,
	method: &'static str,
	shadow_body: impl FnOnce(&S) -> R,
	real_body: impl FnOnce(&T) -> R,
) -> Result<R>
where
	T: Real,
	S: ShadowObject,
	R: Default,
{
	match current() {
		Ok(runtime) => runtime.invoke(real, method, shadow_body, real_body),
		Err(_) => Ok(real_body(real.as_ref())),
	}
}

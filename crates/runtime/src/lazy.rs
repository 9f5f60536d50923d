//! Deferred application construction.

use std::cell::RefCell;
use std::rc::Rc;

use umbra_primitives::Real;

use crate::error::Result;
use crate::runtime::Runtime;

/// Produces the application object for a run.
pub type ApplicationSupplier = Rc<dyn Fn(&Runtime) -> Result<Rc<dyn Real>>>;

/// Application slot of one runtime.
///
/// Holds at most one instance per run. The supplier survives across runs.
#[derive(Default)]
pub(crate) struct LazyApplication {
	supplier: RefCell<Option<ApplicationSupplier>>,
	instance: RefCell<Option<Rc<dyn Real>>>,
}

impl LazyApplication {
	pub(crate) fn set_supplier(&self, supplier: ApplicationSupplier) {
		*self.supplier.borrow_mut() = Some(supplier);
	}

	pub(crate) fn supplier(&self) -> Option<ApplicationSupplier> {
		self.supplier.borrow().clone()
	}

	pub(crate) fn get(&self) -> Option<Rc<dyn Real>> {
		self.instance.borrow().clone()
	}

	/// Stores `app` unless an instance was stored meanwhile; returns the stored one.
	pub(crate) fn store(&self, app: Rc<dyn Real>) -> Rc<dyn Real> {
		self.instance.borrow_mut().get_or_insert(app).clone()
	}

	pub(crate) fn is_loaded(&self) -> bool {
		self.instance.borrow().is_some()
	}

	pub(crate) fn unload(&self) -> Option<Rc<dyn Real>> {
		self.instance.borrow_mut().take()
	}
}

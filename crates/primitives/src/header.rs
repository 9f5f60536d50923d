use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::object::ShadowObject;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a real instance.
///
/// Assigned when the instance's [`ObjectHeader`] is created and never reused,
/// so two value-equal instances always carry distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
	fn next() -> Self {
		Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Identity of one test run, unique across every runtime in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

impl RunId {
	/// Allocates a fresh run id.
	pub fn next() -> Self {
		Self(NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for RunId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "run-{}", self.0)
	}
}

struct HookBinding {
	run: RunId,
	shadow: Weak<dyn ShadowObject>,
}

/// Identity and interception slot embedded in every real instance.
///
/// The hook is primed by the runtime once a shadow is linked. It holds only a
/// weak reference tagged with the run that primed it; a binding from another
/// run is never routed.
///
/// Cloning produces a fresh identity and an empty hook. Headers compare equal
/// to each other so a derived `PartialEq` on the enclosing type compares
/// values only.
pub struct ObjectHeader {
	id: ObjectId,
	hook: RefCell<Option<HookBinding>>,
}

impl ObjectHeader {
	/// Creates a header with a fresh identity.
	pub fn new() -> Self {
		Self {
			id: ObjectId::next(),
			hook: RefCell::new(None),
		}
	}

	/// Returns this instance's identity.
	#[inline]
	pub fn id(&self) -> ObjectId {
		self.id
	}

	/// Routes calls on this instance to `shadow` for the duration of `run`.
	pub fn prime(&self, run: RunId, shadow: &Rc<dyn ShadowObject>) {
		*self.hook.borrow_mut() = Some(HookBinding {
			run,
			shadow: Rc::downgrade(shadow),
		});
	}

	/// Returns the shadow primed for `run`, if it is still alive.
	pub fn routed(&self, run: RunId) -> Option<Rc<dyn ShadowObject>> {
		let hook = self.hook.borrow();
		let binding = hook.as_ref()?;
		if binding.run != run {
			return None;
		}
		binding.shadow.upgrade()
	}

	/// Returns true if the hook is primed for `run`.
	pub fn is_primed_for(&self, run: RunId) -> bool {
		self.hook.borrow().as_ref().is_some_and(|b| b.run == run)
	}

	/// Disarms the hook.
	pub fn clear(&self) {
		self.hook.borrow_mut().take();
	}
}

impl Default for ObjectHeader {
	fn default() -> Self {
		Self::new()
	}
}

impl Clone for ObjectHeader {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl PartialEq for ObjectHeader {
	fn eq(&self, _other: &Self) -> bool {
		true
	}
}

impl Eq for ObjectHeader {}

impl Hash for ObjectHeader {
	fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl fmt::Debug for ObjectHeader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectHeader")
			.field("id", &self.id)
			.field("primed", &self.hook.borrow().is_some())
			.finish()
	}
}

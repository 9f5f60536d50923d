//! Lifecycle Manager.
//!
//! # Purpose
//!
//! A [`Runtime`] owns everything scoped to one run: the pinned catalog
//! snapshot, the active API level, the association store, cached dispatch
//! plans, and the application object.
//!
//! # Mental Model
//!
//! 1. **Begin:** [`Runtime::begin_run`] pins the catalog snapshot, layers the
//!    configured overrides onto a private copy, and assigns a fresh [`RunId`].
//! 2. **Serve:** [`Runtime::shadow_of`] pairs each real instance with its
//!    shadow on first request and returns the same shadow afterwards.
//! 3. **End:** [`Runtime::end_run`] drops every pairing and the application,
//!    then pulls each registered resetter.
//!
//! # Invariants
//!
//! - Must allocate at most one shadow per real instance per run.
//!   - Enforced in: `Runtime::associate`.
//!   - Failure symptom: state written through one shadow handle is missing
//!     from another.
//!
//! - Must never route through a hook primed by an earlier run.
//!   - Enforced in: [`ObjectHeader::routed`](umbra_primitives::ObjectHeader::routed) (run id check).
//!   - Failure symptom: a fresh run observes shadow state left by a previous test.
//!
//! - Must not observe catalog registrations made after the run began.
//!   - Enforced in: [`Runtime::begin_run`] (snapshot pinning).
//!   - Failure symptom: concurrently running tests affect each other's resolution.
//!
//! A runtime is single-threaded. Parallel test workers each build their own.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use umbra_catalog::{CatalogError, ShadowCatalog, Snapshot};
use umbra_primitives::{ApiLevel, ArgList, Real, RealType, RunId, ShadowObject, TypeDef};

use crate::builder;
use crate::config::RunConfig;
use crate::dispatch::{Plan, PlanCache};
use crate::error::{Result, RuntimeError};
use crate::lazy::{ApplicationSupplier, LazyApplication};
use crate::store::{Association, AssociationStore};

#[derive(Clone)]
struct ActiveRun {
	id: RunId,
	level: ApiLevel,
	snapshot: Arc<Snapshot>,
	application_type: Option<&'static TypeDef>,
}

#[derive(Clone)]
struct Resetter {
	name: &'static str,
	reset: Rc<dyn Fn()>,
}

struct Inner {
	catalog: Arc<ShadowCatalog>,
	config: RunConfig,
	run: RefCell<Option<ActiveRun>>,
	store: AssociationStore,
	plans: RefCell<PlanCache>,
	resetters: RefCell<Vec<Resetter>>,
	application: LazyApplication,
}

/// One isolated shadow runtime. Cloning yields another handle to the same runtime.
#[derive(Clone)]
pub struct Runtime {
	inner: Rc<Inner>,
}

impl Runtime {
	/// Creates a runtime over the process-wide catalog.
	pub fn new(config: RunConfig) -> Self {
		Self::with_catalog(config, umbra_catalog::global())
	}

	/// Creates a runtime over `catalog`.
	pub fn with_catalog(config: RunConfig, catalog: Arc<ShadowCatalog>) -> Self {
		let plans = PlanCache::new(config.plan_cache_capacity);
		Self {
			inner: Rc::new(Inner {
				catalog,
				config,
				run: RefCell::new(None),
				store: AssociationStore::default(),
				plans: RefCell::new(plans),
				resetters: RefCell::new(Vec::new()),
				application: LazyApplication::default(),
			}),
		}
	}

	pub fn config(&self) -> &RunConfig {
		&self.inner.config
	}

	pub fn catalog(&self) -> &Arc<ShadowCatalog> {
		&self.inner.catalog
	}

	/// Returns the active run's id.
	pub fn run_id(&self) -> Option<RunId> {
		self.inner.run.borrow().as_ref().map(|run| run.id)
	}

	/// Returns the active run's API level.
	pub fn api_level(&self) -> Option<ApiLevel> {
		self.inner.run.borrow().as_ref().map(|run| run.level)
	}

	/// Returns the catalog snapshot pinned by the active run, overrides included.
	pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
		self.inner.run.borrow().as_ref().map(|run| run.snapshot.clone())
	}

	pub fn is_running(&self) -> bool {
		self.inner.run.borrow().is_some()
	}

	/// Number of real instances paired with a shadow in the active run.
	pub fn shadow_count(&self) -> usize {
		self.inner.store.len()
	}

	fn active(&self) -> Result<ActiveRun> {
		self.inner.run.borrow().clone().ok_or(RuntimeError::NoActiveRun)
	}

	/// Begins a run at the configured API level.
	pub fn begin_configured_run(&self) -> Result<RunId> {
		self.begin_run(self.inner.config.level())
	}

	/// Begins a run targeting `level`.
	///
	/// Builds the application immediately unless lazy application is
	/// configured. If that fails the run is abandoned and the error returned.
	pub fn begin_run(&self, level: ApiLevel) -> Result<RunId> {
		if let Some(active) = self.inner.run.borrow().as_ref() {
			return Err(RuntimeError::RunActive { run: active.id });
		}

		let config = &self.inner.config;
		let base = self.inner.catalog.snapshot();
		let overrides = config.overrides_for(&base)?;
		let override_count = overrides.len();
		let snapshot = if overrides.is_empty() {
			base
		} else {
			Arc::new(base.with_overrides(overrides)?)
		};
		let application_type = config.application_for(&snapshot)?;

		let id = RunId::next();
		self.inner.store.clear();
		self.inner.plans.borrow_mut().clear();
		self.inner.application.unload();
		*self.inner.run.borrow_mut() = Some(ActiveRun {
			id,
			level,
			snapshot,
			application_type,
		});
		tracing::debug!(
			run = %id,
			%level,
			overrides = override_count,
			lazy_application = config.lazy_application,
			"began run"
		);

		let has_application = application_type.is_some() || self.inner.application.supplier().is_some();
		if !config.lazy_application
			&& has_application
			&& let Err(err) = self.application()
		{
			self.abandon_run();
			return Err(err);
		}
		Ok(id)
	}

	fn abandon_run(&self) {
		if let Some(run) = self.inner.run.borrow_mut().take() {
			tracing::debug!(run = %run.id, "abandoned run");
		}
		self.inner.store.clear();
		self.inner.application.unload();
		self.inner.plans.borrow_mut().clear();
	}

	/// Ends the active run.
	///
	/// Drops every pairing, the application, and cached plans, then runs the
	/// resetters of every shadow type in the pinned snapshot followed by those
	/// registered with [`Runtime::on_reset`].
	pub fn end_run(&self) -> Result<()> {
		let run = self.inner.run.borrow_mut().take().ok_or(RuntimeError::NoActiveRun)?;

		let released = self.inner.store.clear();
		drop(self.inner.application.unload());
		self.inner.plans.borrow_mut().clear();

		let shadow_resetters = run.snapshot.resetters();
		for (shadow, reset) in &shadow_resetters {
			tracing::trace!(run = %run.id, shadow, "resetting shadow state");
			reset();
		}
		let resetters = self.inner.resetters.borrow().clone();
		for resetter in &resetters {
			tracing::trace!(run = %run.id, resetter = resetter.name, "running resetter");
			(resetter.reset)();
		}

		tracing::debug!(
			run = %run.id,
			released,
			resetters = shadow_resetters.len() + resetters.len(),
			"ended run"
		);
		Ok(())
	}

	/// Registers a callback pulled at the end of every run.
	pub fn on_reset(&self, name: &'static str, reset: impl Fn() + 'static) {
		self.inner.resetters.borrow_mut().push(Resetter {
			name,
			reset: Rc::new(reset),
		});
	}

	/// Returns the shadow paired with `real`, creating it on first request.
	pub fn shadow_of<S: ShadowObject, T: Real>(&self, real: &Rc<T>) -> Result<Rc<S>> {
		let dyn_real: Rc<dyn Real> = real.clone();
		let association = self.associate(&dyn_real)?;
		builder::downcast_shadow(
			association.shadow,
			dyn_real.type_def().name,
			association.shadow_type.name,
		)
	}

	/// Untyped form of [`Runtime::shadow_of`].
	pub fn shadow_of_dyn(&self, real: &Rc<dyn Real>) -> Result<Rc<dyn ShadowObject>> {
		Ok(self.associate(real)?.shadow)
	}

	/// Returns the shadow of an instance expected to be shadowed already.
	///
	/// A missing shadow is created, exactly as [`Runtime::shadow_of`] does.
	pub fn extract<S: ShadowObject, T: Real>(&self, real: &Rc<T>) -> Result<Rc<S>> {
		self.shadow_of(real)
	}

	fn associate(&self, real: &Rc<dyn Real>) -> Result<Association> {
		let run = self.active()?;
		let id = real.header().id();
		if let Some(found) = self.inner.store.get(id) {
			tracing::trace!(run = %run.id, %id, shadow = found.shadow_type.name, "association hit");
			return Ok(found);
		}

		let real_type = real.type_def();
		let resolution = run.snapshot.resolve(real_type, run.level)?;
		let shadow_type = resolution.descriptor.shadow;

		let mut shadow = builder::allocate_shadow(shadow_type);
		shadow.bind_real(Rc::downgrade(real));
		let association = self.inner.store.insert(
			id,
			Association {
				shadow: Rc::from(shadow),
				shadow_type,
				real: Rc::downgrade(real),
			},
		);
		real.header().prime(run.id, &association.shadow);

		tracing::debug!(
			run = %run.id,
			real_type = real_type.name,
			%id,
			shadow = shadow_type.name,
			via_default = resolution.via_default,
			"created shadow"
		);
		Ok(association)
	}

	/// Pairs `real` with its shadow if its type has one.
	fn link_if_shadowed(&self, real: &Rc<dyn Real>) -> Result<()> {
		match self.associate(real) {
			Ok(_) => Ok(()),
			Err(RuntimeError::Catalog(CatalogError::NoShadowFound { real_type, version })) => {
				tracing::trace!(real_type, %version, "left unshadowed");
				Ok(())
			}
			Err(err) => Err(err),
		}
	}

	/// Allocates a zero-valued fixture of `ty`. No initializer runs and no
	/// shadow is created until one is requested.
	pub fn new_instance_of(&self, ty: &'static TypeDef) -> Result<Rc<dyn Real>> {
		builder::allocate(ty)
	}

	/// Typed form of [`Runtime::new_instance_of`].
	pub fn new_instance<T: RealType>(&self) -> Result<Rc<T>> {
		builder::allocate_as()
	}

	/// Builds `ty` through its declared constructor and pairs it with its
	/// shadow immediately.
	pub fn construct(&self, ty: &'static TypeDef, args: ArgList) -> Result<Rc<dyn Real>> {
		let real = builder::allocate_with_args(ty, args)?;
		self.link_if_shadowed(&real)?;
		Ok(real)
	}

	/// Typed form of [`Runtime::construct`].
	pub fn construct_as<T: RealType>(&self, args: ArgList) -> Result<Rc<T>> {
		builder::downcast_real(self.construct(T::static_type(), args)?)
	}

	/// Replaces the configured application type with a custom supplier.
	pub fn set_application_supplier(&self, supplier: impl Fn(&Runtime) -> Result<Rc<dyn Real>> + 'static) {
		let supplier: ApplicationSupplier = Rc::new(supplier);
		self.inner.application.set_supplier(supplier);
	}

	/// Returns the run's application, building and shadowing it on first access.
	pub fn application(&self) -> Result<Rc<dyn Real>> {
		if let Some(app) = self.inner.application.get() {
			return Ok(app);
		}
		let run = self.active()?;

		let app = match self.inner.application.supplier() {
			Some(supplier) => supplier(self)?,
			None => builder::allocate(run.application_type.ok_or(RuntimeError::NoApplication)?)?,
		};
		self.link_if_shadowed(&app)?;
		let app = self.inner.application.store(app);

		tracing::debug!(run = %run.id, real_type = app.type_def().name, "loaded application");
		Ok(app)
	}

	/// Typed form of [`Runtime::application`].
	pub fn application_as<T: RealType>(&self) -> Result<Rc<T>> {
		builder::downcast_real(self.application()?)
	}

	pub fn is_application_loaded(&self) -> bool {
		self.inner.application.is_loaded()
	}

	/// Returns the dispatch plan for `method` on instances of `real_type`.
	pub fn plan(&self, real_type: &'static TypeDef, method: &'static str) -> Result<Plan> {
		let run = self.active()?;
		if let Some(plan) = self.inner.plans.borrow_mut().get(real_type.name, method) {
			tracing::trace!(real_type = real_type.name, method, %plan, "plan cache hit");
			return Ok(plan);
		}
		let plan = Plan::compute(&run.snapshot, real_type, method, run.level)?;
		self.inner.plans.borrow_mut().put(real_type.name, method, plan);
		Ok(plan)
	}

	/// Dispatches an intercepted call of `method` on `real`.
	///
	/// Outside a run every call goes to `real_body`. Inside a run the cached
	/// [`Plan`] decides between `real_body`, `shadow_body`, and returning
	/// `R::default()`. Whatever either body returns is passed through.
	pub fn invoke<T, S, R>(
		&self,
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
		let Ok(run) = self.active() else {
			return Ok(real_body(real.as_ref()));
		};
		let real_type = real.type_def();
		match self.plan(real_type, method)? {
			Plan::CallReal => Ok(real_body(real.as_ref())),
			Plan::DoNothing => Ok(R::default()),
			Plan::Shadow(shadow_type) => {
				let shadow = match real.header().routed(run.id) {
					Some(shadow) => shadow,
					None => {
						let dyn_real: Rc<dyn Real> = real.clone();
						self.associate(&dyn_real)?.shadow
					}
				};
				let shadow = builder::downcast_shadow::<S>(shadow, real_type.name, shadow_type.name)?;
				Ok(shadow_body(shadow.as_ref()))
			}
		}
	}
}

impl fmt::Debug for Runtime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Runtime")
			.field("run", &self.run_id())
			.field("level", &self.api_level())
			.field("store", &self.inner.store)
			.field("application_loaded", &self.is_application_loaded())
			.finish()
	}
}

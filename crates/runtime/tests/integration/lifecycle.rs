use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use umbra_catalog::{CatalogError, ShadowDescriptor, VersionRange};
use umbra_primitives::{ApiLevel, ArgList, Real, TypeKind};
use umbra_runtime::{RunConfig, Runtime, RuntimeError, application, application_as};

use crate::common::*;

#[test]
fn end_run_empties_store_and_next_run_gets_new_shadow() {
	let runtime = begin(RunConfig::default(), 28);
	let view = runtime.new_instance::<View>().unwrap();
	let before: Rc<ShadowView> = runtime.shadow_of(&view).unwrap();
	assert_eq!(runtime.shadow_count(), 1);

	runtime.end_run().unwrap();
	assert_eq!(runtime.shadow_count(), 0);
	assert!(!runtime.is_running());

	runtime.begin_run(ApiLevel(28)).unwrap();
	let after: Rc<ShadowView> = runtime.shadow_of(&view).unwrap();
	assert!(!Rc::ptr_eq(&before, &after));
	assert_eq!(after.clicks.get(), 0);
}

#[test]
fn stale_hook_is_not_routed() {
	let runtime = begin(RunConfig::default(), 28);
	let _guard = runtime.enter();
	let view = runtime.new_instance::<View>().unwrap();
	view.perform_click().unwrap();
	let old: Rc<ShadowView> = runtime.shadow_of(&view).unwrap();
	runtime.end_run().unwrap();

	runtime.begin_run(ApiLevel(28)).unwrap();
	view.perform_click().unwrap();
	assert_eq!(old.clicks.get(), 1);
	let fresh: Rc<ShadowView> = runtime.shadow_of(&view).unwrap();
	assert_eq!(fresh.clicks.get(), 1);
}

#[test]
fn allocation_skips_failing_initializer() {
	let runtime = begin(RunConfig::default(), 15);
	let before = CAMERA_OPEN_ATTEMPTS.with(Cell::get);

	let camera = runtime.new_instance::<Camera>().unwrap();
	assert_eq!(CAMERA_OPEN_ATTEMPTS.with(Cell::get), before);
	assert_eq!(camera.id, 0);

	let err = runtime.construct(&CAMERA, ArgList::new()).err().expect("opening the camera fails");
	assert_eq!(CAMERA_OPEN_ATTEMPTS.with(Cell::get), before + 1);
	assert_eq!(err.to_string(), "camera service unavailable");
}

#[test]
fn abstract_types_are_uninstantiable() {
	let runtime = begin(RunConfig::default(), 28);
	assert!(matches!(
		runtime.new_instance_of(&CONTEXT),
		Err(RuntimeError::Uninstantiable {
			type_name: "android.content.Context",
			kind: TypeKind::Abstract,
		})
	));
}

#[test]
fn constructed_pair_is_linked() {
	let runtime = begin(RunConfig::default(), 28);
	let app = runtime
		.construct_as::<Application>(ArgList::new().with(String::from("com.example")))
		.unwrap();
	assert!(app.created);
	assert_eq!(runtime.shadow_count(), 1);
	assert!(app.header().is_primed_for(runtime.run_id().unwrap()));
}

#[test]
fn lazy_application_builds_on_first_global_query() {
	let config = RunConfig::default()
		.with_application("android.app.Application")
		.lazy_application(true);
	let runtime = begin(config, 28);
	let _guard = runtime.enter();

	assert!(!runtime.is_application_loaded());
	assert_eq!(runtime.shadow_count(), 0);

	let app = application_as::<Application>().unwrap();
	assert!(runtime.is_application_loaded());
	assert_eq!(runtime.shadow_count(), 1);
	assert!(!app.created, "default application is allocated, not constructed");

	let again = application().unwrap();
	assert_eq!(again.header().id(), app.header().id());
}

#[test]
fn eager_application_builds_at_begin() {
	let runtime = begin(RunConfig::default().with_application("android.app.Application"), 28);
	assert!(runtime.is_application_loaded());
	let app = runtime.application_as::<Application>().unwrap();
	let shadow: Rc<ShadowApplication> = runtime.shadow_of(&app).unwrap();
	assert!(shadow.package_name.borrow().is_empty());
}

#[test]
fn supplier_can_construct_application() {
	init_tracing();
	let runtime = Runtime::new(RunConfig::default().lazy_application(true));
	runtime.set_application_supplier(|rt| rt.construct(&APPLICATION, ArgList::new().with(String::from("com.example.app"))));
	runtime.begin_run(ApiLevel(28)).unwrap();
	let _guard = runtime.enter();

	let app = application_as::<Application>().unwrap();
	assert!(app.created);
	assert_eq!(app.package_name, "com.example.app");

	let shadow: Rc<ShadowApplication> = runtime.shadow_of(&app).unwrap();
	*shadow.package_name.borrow_mut() = "com.shadowed".into();
	assert_eq!(app.package_name().unwrap(), "com.shadowed");
}

#[test]
fn unknown_application_type_fails_begin() {
	init_tracing();
	let runtime = Runtime::new(RunConfig::default().with_application("android.app.Missing"));
	let err = runtime.begin_run(ApiLevel(28)).unwrap_err();
	assert!(matches!(
		err,
		RuntimeError::Catalog(CatalogError::UnknownRealType { ref name }) if name == "android.app.Missing"
	));
}

#[test]
fn shadow_resetters_run_at_end() {
	let runtime = begin(RunConfig::default().with_application("android.app.Application"), 28);
	let _guard = runtime.enter();
	let app = application_as::<Application>().unwrap();
	app.send_broadcast("android.intent.action.BOOT_COMPLETED").unwrap();
	assert_eq!(SENT_BROADCASTS.with(|sent| sent.borrow().len()), 1);

	runtime.end_run().unwrap();
	assert!(SENT_BROADCASTS.with(|sent| sent.borrow().is_empty()));
	assert!(!runtime.is_application_loaded());
}

#[test]
fn later_subtype_registration_applies_to_new_runs() {
	init_tracing();
	let catalog = isolated_catalog();
	let runtime = Runtime::with_catalog(RunConfig::default(), catalog.clone());

	runtime.begin_run(ApiLevel(28)).unwrap();
	let button = runtime.new_instance::<Button>().unwrap();
	assert!(runtime.shadow_of::<ShadowTextView, _>(&button).is_ok());

	catalog
		.register(ShadowDescriptor::new(&BUTTON, &SHADOW_BUTTON))
		.unwrap();

	// The running test keeps the catalog it started with.
	let other = runtime.new_instance::<Button>().unwrap();
	assert!(runtime.shadow_of::<ShadowTextView, _>(&other).is_ok());
	runtime.end_run().unwrap();

	runtime.begin_run(ApiLevel(28)).unwrap();
	assert!(runtime.shadow_of::<ShadowButton, _>(&button).is_ok());
}

#[test]
fn overlapping_registration_fails_immediately() {
	let catalog = isolated_catalog();
	let before = catalog.len();
	let err = catalog
		.register(ShadowDescriptor::new(&CAMERA, &SHADOW_CAMERA_STUB).with_range(VersionRange::between(5, 15)))
		.unwrap_err();
	assert!(matches!(
		err,
		CatalogError::ConflictingRange {
			real_type: "android.hardware.Camera",
			incoming: "ShadowCameraStub",
			..
		}
	));
	assert_eq!(catalog.len(), before);
}

#[test]
fn config_override_forces_named_shadow() {
	let config = RunConfig::from_toml_str(
		r#"
		api_level = 5

		[[overrides]]
		real_type = "android.hardware.Camera"
		shadow = "ShadowCamera2"
		"#,
	)
	.unwrap();
	init_tracing();
	let runtime = Runtime::new(config);
	runtime.begin_configured_run().unwrap();

	let camera = runtime.new_instance::<Camera>().unwrap();
	assert!(runtime.shadow_of::<ShadowCamera2, _>(&camera).is_ok());
	assert_eq!(umbra_catalog::global().snapshot().len(), runtime.snapshot().unwrap().len() - 1);
}

#[test]
fn forced_shadow_outside_catalog() {
	let runtime = begin(RunConfig::default().force_shadow(&CAMERA, &SHADOW_CAMERA_STUB), 15);
	let camera = runtime.new_instance::<Camera>().unwrap();
	assert!(runtime.shadow_of::<ShadowCameraStub, _>(&camera).is_ok());
}

#[test]
fn resolution_error_message_is_diagnosable() {
	let runtime = begin(RunConfig::default(), 25);
	let camera = runtime.new_instance::<Camera>().unwrap();
	let err = runtime.shadow_of::<ShadowCamera2, _>(&camera).err().expect("no camera shadow at level 25");
	assert_eq!(err.to_string(), "no shadow for android.hardware.Camera at API level 25");
}

#[test]
fn unshadowed_application_resolves_by_name() {
	for lazy in [false, true] {
		let config = RunConfig::default()
			.with_application("android.app.Instrumentation")
			.lazy_application(lazy);
		let runtime = begin(config, 28);
		let _guard = runtime.enter();
		assert_eq!(runtime.is_application_loaded(), !lazy);

		let app = application_as::<Instrumentation>().unwrap();
		assert!(!app.started.get());
		assert_eq!(runtime.shadow_count(), 0);
		runtime.end_run().unwrap();
	}
}

#[test]
fn named_override_applies_to_unshadowed_type() {
	let runtime = begin(RunConfig::default().with_override("android.os.SystemClock", "ShadowView"), 28);
	let clock = runtime.new_instance::<SystemClock>().unwrap();
	assert!(runtime.shadow_of::<ShadowView, _>(&clock).is_ok());
}

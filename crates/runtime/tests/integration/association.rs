use std::rc::Rc;

use pretty_assertions::assert_eq;
use umbra_catalog::CatalogError;
use umbra_primitives::{ApiLevel, Real};
use umbra_runtime::{RunConfig, RuntimeError, extract, new_instance_of, shadow_of};

use crate::common::*;

#[test]
fn repeated_lookups_return_the_same_shadow() {
	let runtime = begin(RunConfig::default(), 28);
	let _guard = runtime.enter();
	let view = runtime.new_instance::<View>().unwrap();

	let first: Rc<ShadowView> = shadow_of(&view).unwrap();
	for _ in 0..3 {
		let again: Rc<ShadowView> = shadow_of(&view).unwrap();
		assert!(Rc::ptr_eq(&first, &again));
	}
	assert_eq!(runtime.shadow_count(), 1);
}

#[test]
fn value_equal_reals_never_share_a_shadow() {
	let runtime = begin(RunConfig::default(), 28);
	let a = runtime.new_instance::<TextView>().unwrap();
	let b = runtime.new_instance::<TextView>().unwrap();
	assert_eq!(*a, *b);

	let sa: Rc<ShadowTextView> = runtime.shadow_of(&a).unwrap();
	let sb: Rc<ShadowTextView> = runtime.shadow_of(&b).unwrap();
	assert!(!Rc::ptr_eq(&sa, &sb));
	assert_eq!(runtime.shadow_count(), 2);
}

#[test]
fn extract_creates_missing_shadow() {
	let runtime = begin(RunConfig::default(), 28);
	let _guard = runtime.enter();
	let view = runtime.new_instance::<View>().unwrap();
	assert_eq!(runtime.shadow_count(), 0);

	let extracted: Rc<ShadowView> = extract(&view).unwrap();
	let looked_up: Rc<ShadowView> = shadow_of(&view).unwrap();
	assert!(Rc::ptr_eq(&extracted, &looked_up));
}

#[test]
fn shadow_holds_back_reference() {
	let runtime = begin(RunConfig::default(), 28);
	let view = runtime.new_instance::<View>().unwrap();
	let shadow: Rc<ShadowView> = runtime.shadow_of(&view).unwrap();

	let back = shadow.real.downcast::<View>().unwrap();
	assert!(Rc::ptr_eq(&back, &view));
	assert_eq!(back.header().id(), view.header().id());
}

#[test]
fn subtype_without_shadow_inherits_ancestor() {
	let runtime = begin(RunConfig::default(), 28);
	let button = runtime.new_instance::<Button>().unwrap();
	let shadow: Rc<ShadowTextView> = runtime.shadow_of(&button).unwrap();
	assert!(shadow.text.borrow().is_empty());
}

#[test]
fn missing_shadow_names_type_and_level() {
	let runtime = begin(RunConfig::default(), 28);
	let clock = runtime.new_instance::<SystemClock>().unwrap();
	let err = runtime.shadow_of::<ShadowView, _>(&clock).err().expect("SystemClock has no shadow");
	assert!(matches!(
		err,
		RuntimeError::Catalog(CatalogError::NoShadowFound {
			real_type: "android.os.SystemClock",
			version: ApiLevel(28),
		})
	));
}

#[test]
fn version_selects_camera_shadow() {
	let legacy = begin(RunConfig::default(), 5);
	let camera = legacy.new_instance::<Camera>().unwrap();
	assert!(legacy.shadow_of::<ShadowCameraLegacy, _>(&camera).is_ok());

	let modern = begin(RunConfig::default(), 15);
	let camera = modern.new_instance::<Camera>().unwrap();
	assert!(modern.shadow_of::<ShadowCamera2, _>(&camera).is_ok());

	let future = begin(RunConfig::default(), 25);
	let camera = future.new_instance::<Camera>().unwrap();
	assert!(matches!(
		future.shadow_of::<ShadowCamera2, _>(&camera),
		Err(RuntimeError::Catalog(CatalogError::NoShadowFound { .. }))
	));
}

#[test]
fn global_accessors_need_an_entered_runtime() {
	let view = umbra_runtime::builder::allocate_as::<View>().unwrap();
	assert!(matches!(shadow_of::<ShadowView, _>(&view), Err(RuntimeError::NoCurrentRuntime)));
	assert!(matches!(new_instance_of(&VIEW), Err(RuntimeError::NoCurrentRuntime)));
}

#[test]
fn enter_guards_nest() {
	let outer = begin(RunConfig::default(), 28);
	let inner = begin(RunConfig::default(), 5);
	let _outer_guard = outer.enter();
	{
		let _inner_guard = inner.enter();
		assert_eq!(umbra_runtime::current().unwrap().api_level(), Some(ApiLevel(5)));
	}
	assert_eq!(umbra_runtime::current().unwrap().api_level(), Some(ApiLevel(28)));
}

#[test]
fn parallel_runtimes_are_isolated() {
	let handles: Vec<_> = [5u32, 15]
		.into_iter()
		.map(|level| {
			std::thread::spawn(move || {
				let runtime = begin(RunConfig::default(), level);
				let _guard = runtime.enter();
				let camera = runtime.new_instance::<Camera>().unwrap();
				let shadow = runtime.shadow_of_dyn(&(camera as Rc<dyn Real>)).unwrap();
				let any: Rc<dyn std::any::Any> = shadow;
				(level, any.is::<ShadowCameraLegacy>(), runtime.shadow_count())
			})
		})
		.collect();

	for handle in handles {
		let (level, legacy, count) = handle.join().unwrap();
		assert_eq!(legacy, level <= 10);
		assert_eq!(count, 1);
	}
}

#![allow(dead_code)]

use std::sync::Arc;

use umbra_primitives::{ApiLevel, VersionRange};

use crate::error::CatalogError;
use crate::index::{CatalogBuilder, ShadowCatalog};
use crate::test_fixtures::*;
use crate::{DescriptorSource, ShadowDescriptor};

/// Invariant: Overlapping non-default ranges for one exact type are rejected
/// when registered, not when first resolved.
pub(crate) fn inv_conflict_detected_at_registration() {
	let catalog = ShadowCatalog::empty("test");
	catalog.register(camera(&SHADOW_CAMERA_LOW, 0, 10)).unwrap();

	let err = catalog.register(camera(&SHADOW_CAMERA_MID, 5, 15)).unwrap_err();
	assert!(matches!(
		err,
		CatalogError::ConflictingRange {
			real_type: "android.hardware.Camera",
			existing: "ShadowCameraLow",
			incoming: "ShadowCameraMid",
			..
		}
	));
	assert_eq!(catalog.len(), 1, "rejected descriptor must not be published");

	let build = CatalogBuilder::new("test")
		.push(camera(&SHADOW_CAMERA_LOW, 0, 10))
		.push(camera(&SHADOW_CAMERA_MID, 10, 12))
		.build();
	assert!(matches!(build, Err(CatalogError::ConflictingRange { .. })));
}

#[cfg_attr(test, test)]
pub(crate) fn test_conflict_detected_at_registration() {
	inv_conflict_detected_at_registration()
}

/// Invariant: A snapshot pinned before a registration never observes it.
pub(crate) fn inv_pinned_snapshot_isolated_from_register() {
	let catalog = ShadowCatalog::new(
		"test",
		CatalogBuilder::new("test")
			.push(ShadowDescriptor::new(&TEXT_VIEW, &SHADOW_TEXT_VIEW))
			.build()
			.unwrap(),
	);

	let pinned = catalog.snapshot();
	catalog
		.register(ShadowDescriptor::new(&EDIT_TEXT, &SHADOW_EDIT_TEXT))
		.unwrap();

	let old = pinned.resolve(&EDIT_TEXT, ApiLevel(21)).unwrap();
	assert_eq!(old.descriptor.shadow.name, "ShadowTextView");

	let fresh = catalog.snapshot().resolve(&EDIT_TEXT, ApiLevel(21)).unwrap();
	assert_eq!(fresh.descriptor.shadow.name, "ShadowEditText");
}

#[cfg_attr(test, test)]
pub(crate) fn test_pinned_snapshot_isolated_from_register() {
	inv_pinned_snapshot_isolated_from_register()
}

/// Invariant: Concurrent registrations are linearizable; none are lost.
pub(crate) fn inv_no_lost_updates() {
	use std::thread;

	const THREADS: u32 = 8;
	let catalog = Arc::new(ShadowCatalog::empty("test"));

	let handles: Vec<_> = (0..THREADS)
		.map(|i| {
			let catalog = Arc::clone(&catalog);
			thread::spawn(move || {
				catalog
					.register(camera(&SHADOW_CAMERA_LOW, i * 10, i * 10 + 9))
					.unwrap()
			})
		})
		.collect();

	let mut ordinals: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	ordinals.sort_unstable();

	assert_eq!(catalog.len(), THREADS as usize);
	assert_eq!(ordinals, (0..THREADS).collect::<Vec<_>>());
}

#[cfg_attr(test, test)]
pub(crate) fn test_no_lost_updates() {
	inv_no_lost_updates()
}

/// Invariant: A per-run override wins over a catalog entry even when the
/// catalog entry's range is narrower.
pub(crate) fn inv_override_outranks_narrower_range() {
	let base = CatalogBuilder::new("test")
		.push(camera(&SHADOW_CAMERA_LOW, 5, 5))
		.build()
		.unwrap();

	let run = base
		.with_overrides([ShadowDescriptor::new(&CAMERA, &SHADOW_CAMERA_TEST)])
		.unwrap();
	let resolved = run.resolve(&CAMERA, ApiLevel(5)).unwrap();
	assert_eq!(resolved.descriptor.shadow.name, "ShadowCameraTest");
	assert_eq!(resolved.descriptor.source, DescriptorSource::Override);

	assert_eq!(
		base.resolve(&CAMERA, ApiLevel(5)).unwrap().descriptor.shadow.name,
		"ShadowCameraLow",
		"overrides must not leak into the source snapshot"
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_override_outranks_narrower_range() {
	inv_override_outranks_narrower_range()
}

/// Invariant: Within the catalog tier the narrower range wins; equal widths
/// fall to the later registration.
pub(crate) fn inv_specificity_then_recency() {
	let snapshot = CatalogBuilder::new("test")
		.push(camera(&SHADOW_CAMERA_LEGACY, 0, 30).as_default())
		.push(camera(&SHADOW_CAMERA_LOW, 0, 10))
		.push(ShadowDescriptor::new(&CAMERA, &SHADOW_CAMERA_MID).with_range(VersionRange::between(0, 10)).as_default())
		.build()
		.unwrap();

	// LOW and MID share width; MID registered later.
	let at_five = snapshot.resolve(&CAMERA, ApiLevel(5)).unwrap();
	assert_eq!(at_five.descriptor.shadow.name, "ShadowCameraMid");

	// Only the wide default covers 25.
	let at_25 = snapshot.resolve(&CAMERA, ApiLevel(25)).unwrap();
	assert_eq!(at_25.descriptor.shadow.name, "ShadowCameraLegacy");
	assert!(!at_25.via_default);
}

#[cfg_attr(test, test)]
pub(crate) fn test_specificity_then_recency() {
	inv_specificity_then_recency()
}

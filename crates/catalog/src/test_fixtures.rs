#![allow(dead_code)]

use umbra_primitives::{ObjectHeader, TypeDef, VersionRange, concrete_type, impl_blank, impl_real, impl_shadow};

use crate::{ShadowDescriptor, ShadowTypeDef, shadow_type};

pub(crate) static VIEW: TypeDef = TypeDef::abstract_type("android.view.View", None);
pub(crate) static TEXT_VIEW: TypeDef = concrete_type!(TextView, "android.widget.TextView", parent: &VIEW);
pub(crate) static EDIT_TEXT: TypeDef = concrete_type!(EditText, "android.widget.EditText", parent: &TEXT_VIEW);
pub(crate) static CAMERA: TypeDef = concrete_type!(Camera, "android.hardware.Camera");
pub(crate) static SENSOR: TypeDef = TypeDef::interface("android.hardware.Sensor");

pub(crate) struct TextView {
	header: ObjectHeader,
	text: String,
}
impl_blank!(TextView { header, text });
impl_real!(TextView => TEXT_VIEW);

pub(crate) struct EditText {
	header: ObjectHeader,
	text: String,
	editable: bool,
}
impl_blank!(EditText { header, text, editable });
impl_real!(EditText => EDIT_TEXT);

pub(crate) struct Camera {
	header: ObjectHeader,
	id: u32,
}
impl_blank!(Camera { header, id });
impl_real!(Camera => CAMERA);

macro_rules! fixture_shadows {
	($($ty:ident => $def:ident),* $(,)?) => {
		$(
			pub(crate) struct $ty;
			impl_blank!($ty {});
			impl_shadow!($ty);
			pub(crate) static $def: ShadowTypeDef = shadow_type!($ty, stringify!($ty));
		)*
	};
}

fixture_shadows! {
	ShadowView => SHADOW_VIEW,
	ShadowTextView => SHADOW_TEXT_VIEW,
	ShadowEditText => SHADOW_EDIT_TEXT,
	ShadowCameraLow => SHADOW_CAMERA_LOW,
	ShadowCameraHigh => SHADOW_CAMERA_HIGH,
	ShadowCameraMid => SHADOW_CAMERA_MID,
	ShadowCameraLegacy => SHADOW_CAMERA_LEGACY,
	ShadowCameraTest => SHADOW_CAMERA_TEST,
}

pub(crate) fn camera(shadow: &'static ShadowTypeDef, min: u32, max: u32) -> ShadowDescriptor {
	ShadowDescriptor::new(&CAMERA, shadow).with_range(VersionRange::between(min, max))
}

/// Camera shadows covering `[0, 10]` and `[11, 20]`.
pub(crate) fn split_camera() -> [ShadowDescriptor; 2] {
	[camera(&SHADOW_CAMERA_LOW, 0, 10), camera(&SHADOW_CAMERA_HIGH, 11, 20)]
}

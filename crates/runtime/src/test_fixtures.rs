#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use umbra_catalog::{CatalogBuilder, ShadowCatalog, ShadowDescriptor, ShadowTypeDef, shadow_type};
use umbra_primitives::{
	ArgList, ConstructError, ObjectHeader, Real, RealObject, TypeDef, VersionRange, concrete_type, impl_blank,
	impl_real, impl_shadow,
};

thread_local! {
	pub(crate) static LABEL_INITS: Cell<usize> = const { Cell::new(0) };
	pub(crate) static WIDGET_RESETS: Cell<usize> = const { Cell::new(0) };
}

pub(crate) static WIDGET: TypeDef = TypeDef::abstract_type("test.Widget", None);
pub(crate) static LABEL: TypeDef = concrete_type!(Label, "test.Label", parent: &WIDGET, construct: Label::new);
pub(crate) static THERMOMETER: TypeDef = concrete_type!(Thermometer, "test.Thermometer", construct: Thermometer::open);
pub(crate) static GAUGE: TypeDef = concrete_type!(Gauge, "test.Gauge", parent: &WIDGET);
pub(crate) static LISTENER: TypeDef = TypeDef::interface("test.Listener");

#[derive(Debug, PartialEq)]
pub(crate) struct Label {
	pub(crate) header: ObjectHeader,
	pub(crate) text: RefCell<String>,
}
impl_blank!(Label { header, text });
impl_real!(Label => LABEL);

impl Label {
	fn new(args: &mut ArgList) -> Result<Rc<dyn Real>, ConstructError> {
		LABEL_INITS.with(|c| c.set(c.get() + 1));
		let text: String = args.take()?;
		Ok(Rc::new(Label {
			header: ObjectHeader::new(),
			text: RefCell::new(text),
		}))
	}
}

pub(crate) struct Thermometer {
	header: ObjectHeader,
	pub(crate) reading: f64,
}
impl_blank!(Thermometer { header, reading });
impl_real!(Thermometer => THERMOMETER);

impl Thermometer {
	fn open(_args: &mut ArgList) -> Result<Rc<dyn Real>, ConstructError> {
		Err(ConstructError::failed("thermometer hardware unavailable"))
	}
}

pub(crate) struct Gauge {
	header: ObjectHeader,
	pub(crate) value: Cell<i64>,
}
impl_blank!(Gauge { header, value });
impl_real!(Gauge => GAUGE);

pub(crate) struct ShadowLabel {
	pub(crate) real: RealObject,
	pub(crate) text: RefCell<String>,
}
impl_blank!(ShadowLabel { real, text });
impl_shadow!(ShadowLabel, real: real);

pub(crate) struct ShadowWidget {
	pub(crate) real: RealObject,
}
impl_blank!(ShadowWidget { real });
impl_shadow!(ShadowWidget, real: real);

pub(crate) struct ShadowLabelStub;
impl_blank!(ShadowLabelStub {});
impl_shadow!(ShadowLabelStub);

pub(crate) static SHADOW_LABEL: ShadowTypeDef = shadow_type!(
	ShadowLabel,
	"ShadowLabel",
	implements: ["set_text", "measure" in VersionRange::from_level(20)],
);
pub(crate) static SHADOW_WIDGET: ShadowTypeDef = shadow_type!(
	ShadowWidget,
	"ShadowWidget",
	call_through: false,
	resetter: reset_widgets,
);
pub(crate) static SHADOW_LABEL_STUB: ShadowTypeDef = shadow_type!(ShadowLabelStub, "ShadowLabelStub");

fn reset_widgets() {
	WIDGET_RESETS.with(|c| c.set(c.get() + 1));
}

/// Label has its own shadow; Gauge inherits Widget's.
pub(crate) fn catalog() -> Arc<ShadowCatalog> {
	let snapshot = CatalogBuilder::new("fixtures")
		.push(ShadowDescriptor::new(&WIDGET, &SHADOW_WIDGET))
		.push(ShadowDescriptor::new(&LABEL, &SHADOW_LABEL))
		.build()
		.unwrap();
	Arc::new(ShadowCatalog::new("fixtures", snapshot))
}

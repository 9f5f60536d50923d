//! A small fake platform registered with the process-wide catalog.
//!
//! | Real type | Shadow | Levels |
//! |-----------|--------|--------|
//! | `android.app.Application` | `ShadowApplication` | all |
//! | `android.view.View` | `ShadowView` | all |
//! | `android.widget.TextView` | `ShadowTextView` | all |
//! | `android.widget.Button` | inherits `ShadowTextView` | all |
//! | `android.hardware.Camera` | `ShadowCameraLegacy` | `[0, 10]` |
//! | `android.hardware.Camera` | `ShadowCamera2` | `[11, 20]` |
//! | `android.os.SystemClock` | none | |
//! | `android.app.Instrumentation` | none | |
//!
//! The unshadowed types are declared with `real_type!` so configuration can
//! name them.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use umbra_catalog::{ShadowCatalog, ShadowTypeDef, real_type, shadow, shadow_type};
use umbra_primitives::{
	ArgList, ConstructError, ObjectHeader, Real, RealObject, TypeDef, VersionRange, concrete_type, impl_blank,
	impl_real, impl_shadow,
};
use umbra_runtime::{Result, RunConfig, Runtime, intercept};

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

/// A runtime over the process-wide catalog with a run already begun.
pub fn begin(config: RunConfig, level: u32) -> Runtime {
	init_tracing();
	let runtime = Runtime::new(config);
	runtime.begin_run(umbra_primitives::ApiLevel(level)).unwrap();
	runtime
}

/// A private catalog seeded with everything the process-wide one holds.
pub fn isolated_catalog() -> Arc<ShadowCatalog> {
	let snapshot = umbra_catalog::global().snapshot();
	Arc::new(ShadowCatalog::new("isolated", (*snapshot).clone()))
}

thread_local! {
	pub static CAMERA_OPEN_ATTEMPTS: Cell<usize> = const { Cell::new(0) };
	pub static SENT_BROADCASTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

pub static CONTEXT: TypeDef = TypeDef::abstract_type("android.content.Context", None);
pub static APPLICATION: TypeDef = concrete_type!(
	Application,
	"android.app.Application",
	parent: &CONTEXT,
	construct: Application::create,
);
pub static VIEW: TypeDef = concrete_type!(View, "android.view.View");
pub static TEXT_VIEW: TypeDef = concrete_type!(TextView, "android.widget.TextView", parent: &VIEW);
pub static BUTTON: TypeDef = concrete_type!(Button, "android.widget.Button", parent: &TEXT_VIEW);
pub static CAMERA: TypeDef = concrete_type!(Camera, "android.hardware.Camera", construct: Camera::open);
pub static SYSTEM_CLOCK: TypeDef = concrete_type!(SystemClock, "android.os.SystemClock");
pub static INSTRUMENTATION: TypeDef = concrete_type!(Instrumentation, "android.app.Instrumentation");

#[derive(Debug, PartialEq)]
pub struct Application {
	header: ObjectHeader,
	pub package_name: String,
	pub created: bool,
}
impl_blank!(Application { header, package_name, created });
impl_real!(Application => APPLICATION);

impl Application {
	fn create(args: &mut ArgList) -> std::result::Result<Rc<dyn Real>, ConstructError> {
		let package_name: String = args.take()?;
		Ok(Rc::new(Application {
			header: ObjectHeader::new(),
			package_name,
			created: true,
		}))
	}

	pub fn package_name(self: &Rc<Self>) -> Result<String> {
		intercept(
			self,
			"get_package_name",
			|shadow: &ShadowApplication| shadow.package_name.borrow().clone(),
			|real| real.package_name.clone(),
		)
	}

	pub fn send_broadcast(self: &Rc<Self>, action: &str) -> Result<()> {
		intercept(
			self,
			"send_broadcast",
			|_: &ShadowApplication| SENT_BROADCASTS.with(|sent| sent.borrow_mut().push(action.to_owned())),
			|_| panic!("broadcasts need a running platform"),
		)
	}
}

#[derive(Debug, PartialEq)]
pub struct View {
	header: ObjectHeader,
	pub clicks: Cell<u32>,
}
impl_blank!(View { header, clicks });
impl_real!(View => VIEW);

impl View {
	pub fn perform_click(self: &Rc<Self>) -> Result<bool> {
		intercept(
			self,
			"perform_click",
			|shadow: &ShadowView| {
				shadow.clicks.set(shadow.clicks.get() + 1);
				true
			},
			|real| {
				real.clicks.set(real.clicks.get() + 1);
				true
			},
		)
	}
}

#[derive(Debug, PartialEq)]
pub struct TextView {
	header: ObjectHeader,
	pub text: RefCell<String>,
}
impl_blank!(TextView { header, text });
impl_real!(TextView => TEXT_VIEW);

impl TextView {
	pub fn set_text(self: &Rc<Self>, text: &str) -> Result<()> {
		intercept(
			self,
			"set_text",
			|shadow: &ShadowTextView| *shadow.text.borrow_mut() = text.to_owned(),
			|real| *real.text.borrow_mut() = text.to_owned(),
		)
	}

	pub fn text(self: &Rc<Self>) -> Result<String> {
		intercept(
			self,
			"get_text",
			|shadow: &ShadowTextView| shadow.text.borrow().clone(),
			|real| real.text.borrow().clone(),
		)
	}
}

#[derive(Debug, PartialEq)]
pub struct Button {
	header: ObjectHeader,
	pub text: RefCell<String>,
}
impl_blank!(Button { header, text });
impl_real!(Button => BUTTON);

impl Button {
	pub fn set_text(self: &Rc<Self>, text: &str) -> Result<()> {
		intercept(
			self,
			"set_text",
			|shadow: &ShadowTextView| *shadow.text.borrow_mut() = text.to_owned(),
			|real| *real.text.borrow_mut() = text.to_owned(),
		)
	}
}

#[derive(Debug, PartialEq)]
pub struct Camera {
	header: ObjectHeader,
	pub id: i32,
	pub torch: Cell<bool>,
}
impl_blank!(Camera { header, id, torch });
impl_real!(Camera => CAMERA);

impl Camera {
	/// Talks to the camera service, which never exists under test.
	fn open(_args: &mut ArgList) -> std::result::Result<Rc<dyn Real>, ConstructError> {
		CAMERA_OPEN_ATTEMPTS.with(|c| c.set(c.get() + 1));
		Err(ConstructError::failed("camera service unavailable"))
	}

	pub fn release(self: &Rc<Self>) -> Result<bool> {
		intercept(self, "release", |_: &ShadowCameraLegacy| true, |_| false)
	}

	pub fn set_torch(self: &Rc<Self>, on: bool) -> Result<bool> {
		intercept(
			self,
			"set_torch",
			|shadow: &ShadowCamera2| {
				shadow.torch.set(on);
				true
			},
			|real| {
				real.torch.set(on);
				true
			},
		)
	}
}

pub struct SystemClock {
	header: ObjectHeader,
	pub millis: Cell<u64>,
}
impl_blank!(SystemClock { header, millis });
impl_real!(SystemClock => SYSTEM_CLOCK);

impl SystemClock {
	pub fn uptime_millis(self: &Rc<Self>) -> Result<u64> {
		intercept(self, "uptime_millis", |_: &ShadowView| 0, |real| real.millis.get())
	}
}

pub struct Instrumentation {
	header: ObjectHeader,
	pub started: Cell<bool>,
}
impl_blank!(Instrumentation { header, started });
impl_real!(Instrumentation => INSTRUMENTATION);

pub struct ShadowApplication {
	pub real: RealObject,
	pub package_name: RefCell<String>,
}
impl_blank!(ShadowApplication { real, package_name });
impl_shadow!(ShadowApplication, real: real);

impl ShadowApplication {
	fn reset() {
		SENT_BROADCASTS.with(|sent| sent.borrow_mut().clear());
	}
}

pub struct ShadowView {
	pub real: RealObject,
	pub clicks: Cell<u32>,
}
impl_blank!(ShadowView { real, clicks });
impl_shadow!(ShadowView, real: real);

pub struct ShadowTextView {
	pub real: RealObject,
	pub text: RefCell<String>,
}
impl_blank!(ShadowTextView { real, text });
impl_shadow!(ShadowTextView, real: real);

pub struct ShadowButton {
	pub real: RealObject,
}
impl_blank!(ShadowButton { real });
impl_shadow!(ShadowButton, real: real);

pub struct ShadowCameraLegacy {
	pub real: RealObject,
}
impl_blank!(ShadowCameraLegacy { real });
impl_shadow!(ShadowCameraLegacy, real: real);

pub struct ShadowCamera2 {
	pub real: RealObject,
	pub torch: Cell<bool>,
}
impl_blank!(ShadowCamera2 { real, torch });
impl_shadow!(ShadowCamera2, real: real);

pub struct ShadowCameraStub;
impl_blank!(ShadowCameraStub {});
impl_shadow!(ShadowCameraStub);

pub static SHADOW_APPLICATION: ShadowTypeDef = shadow_type!(
	ShadowApplication,
	"ShadowApplication",
	implements: ["get_package_name", "send_broadcast"],
	resetter: ShadowApplication::reset,
);
pub static SHADOW_VIEW: ShadowTypeDef = shadow_type!(ShadowView, "ShadowView", implements: ["perform_click"]);
pub static SHADOW_TEXT_VIEW: ShadowTypeDef =
	shadow_type!(ShadowTextView, "ShadowTextView", implements: ["set_text", "get_text"]);
pub static SHADOW_BUTTON: ShadowTypeDef = shadow_type!(ShadowButton, "ShadowButton");
pub static SHADOW_CAMERA_LEGACY: ShadowTypeDef = shadow_type!(
	ShadowCameraLegacy,
	"ShadowCameraLegacy",
	implements: ["release"],
	call_through: false,
);
pub static SHADOW_CAMERA2: ShadowTypeDef = shadow_type!(
	ShadowCamera2,
	"ShadowCamera2",
	implements: ["set_torch" in VersionRange::from_level(15)],
	call_through: false,
);
pub static SHADOW_CAMERA_STUB: ShadowTypeDef = shadow_type!(ShadowCameraStub, "ShadowCameraStub");

shadow!(application: &SHADOW_APPLICATION => &APPLICATION);
shadow!(view: &SHADOW_VIEW => &VIEW);
shadow!(text_view: &SHADOW_TEXT_VIEW => &TEXT_VIEW);
shadow!(camera_legacy: &SHADOW_CAMERA_LEGACY => &CAMERA, range: VersionRange::between(0, 10));
shadow!(camera2: &SHADOW_CAMERA2 => &CAMERA, range: VersionRange::between(11, 20));

real_type!(&SYSTEM_CLOCK);
real_type!(&INSTRUMENTATION);

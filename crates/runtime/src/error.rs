use thiserror::Error;
use umbra_catalog::CatalogError;
use umbra_primitives::{ArgError, RunId, TypeKind};

/// Errors surfaced by the runtime.
///
/// Resolution and allocation failures name the real type involved so a test
/// failure points at the catalog gap directly.
#[derive(Error, Debug)]
pub enum RuntimeError {
	#[error(transparent)]
	Catalog(#[from] CatalogError),
	/// Allocation was requested for a type without a concrete layout.
	#[error("cannot allocate {type_name}: type is {kind}")]
	Uninstantiable { type_name: &'static str, kind: TypeKind },
	/// Initializer-driven construction was requested for a type without one.
	#[error("{type_name} declares no constructor")]
	NoConstructor { type_name: &'static str },
	#[error("constructing {type_name}: {source}")]
	ArgumentMismatch {
		type_name: &'static str,
		#[source]
		source: ArgError,
	},
	/// An allocator produced an instance of a different runtime type.
	#[error("expected an instance of {expected}, got {actual}")]
	RealTypeMismatch {
		expected: &'static str,
		actual: &'static str,
	},
	/// The caller asked for a shadow type other than the one resolved.
	#[error("shadow of {real_type} is {actual}, not {expected}")]
	ShadowTypeMismatch {
		real_type: &'static str,
		expected: &'static str,
		actual: &'static str,
	},
	#[error("no run is active")]
	NoActiveRun,
	#[error("{run} is still active")]
	RunActive { run: RunId },
	#[error("no runtime is entered on this thread")]
	NoCurrentRuntime,
	/// Neither an application type nor a supplier is configured.
	#[error("no application is configured")]
	NoApplication,
	#[error("invalid run configuration: {0}")]
	Config(#[from] toml::de::Error),
	/// A declared constructor failed; the failure is passed through as is.
	#[error(transparent)]
	Construct(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = RuntimeError> = std::result::Result<T, E>;

use shim_pkg::PackageError;
use shim_print::PrintError;
use thiserror::Error;

/// Failure of one top-level resolution. Every variant aborts the whole run;
/// nothing is retried and there is no partial output.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("interface type declaration not found: {name} in package {package}")]
    DeclarationNotFound { name: String, package: String },

    #[error("embedded type is not an interface: {0}")]
    NotAContract(String),

    #[error("unknown selector: {0}")]
    UnknownSelector(String),

    #[error("package {path} referenced through selector {selector} is not loaded")]
    ImportNotLoaded { selector: String, path: String },

    #[error("failed to print signature: {0}")]
    Print(#[from] PrintError),

    #[error("interface has no methods: {0}")]
    EmptyContract(String),

    #[error("unexported method: {0}")]
    UnexportedMethod(String),

    #[error("cyclic embedding: {0}")]
    CyclicEmbedding(String),

    #[error("generic arity mismatch for {type_name}: expected {expected} type argument(s), got {actual}")]
    GenericArityMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("conflicting signatures for method {name}: {outer:?} vs {inner:?}")]
    ConflictingMethodSignature {
        name: String,
        outer: String,
        inner: String,
    },

    #[error(transparent)]
    Package(#[from] PackageError),
}

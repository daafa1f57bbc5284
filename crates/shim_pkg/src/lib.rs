// shim_pkg - Packages, declaration lookup, and package loading

mod loader;
mod package;

pub use loader::{CachingLoader, PackageLoader, PackageRegistry};
pub use package::{DeclarationHit, Package};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("package not found: {0}")]
    PackageNotFound(String),
    #[error("package already registered: {0}")]
    DuplicatePackage(String),
}

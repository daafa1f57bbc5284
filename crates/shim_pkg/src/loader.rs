use crate::package::Package;
use crate::PackageError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Capability that turns an import path or directory specifier into a loaded
/// package. The resolver only calls this at the top of a resolution; embedded
/// cross-package references are served from the loaded package's own import
/// graph.
pub trait PackageLoader {
    fn load(&self, spec: &str) -> Result<Arc<Package>, PackageError>;
}

/// In-memory loader over a fixed set of packages, keyed by import path.
/// Frontends that parse source text populate one of these; tests build them
/// directly.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    packages: HashMap<String, Arc<Package>>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, package: Arc<Package>) -> Result<(), PackageError> {
        let path = package.import_path.clone();
        if self.packages.contains_key(&path) {
            return Err(PackageError::DuplicatePackage(path));
        }
        self.packages.insert(path, package);
        Ok(())
    }

    pub fn with_package(mut self, package: Arc<Package>) -> Self {
        self.packages
            .insert(package.import_path.clone(), package);
        self
    }
}

impl PackageLoader for PackageRegistry {
    fn load(&self, spec: &str) -> Result<Arc<Package>, PackageError> {
        self.packages
            .get(spec)
            .cloned()
            .ok_or_else(|| PackageError::PackageNotFound(spec.to_string()))
    }
}

/// Process-scoped cache around another loader, keyed by load specifier.
/// Declarations are immutable once loaded, so nothing invalidates entries
/// within one generation run.
pub struct CachingLoader<L> {
    inner: L,
    cache: Mutex<HashMap<String, Arc<Package>>>,
}

impl<L: PackageLoader> CachingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Drop every cached package, for reuse across independent runs.
    pub fn invalidate(&self) {
        self.cache.lock().expect("loader cache poisoned").clear();
    }
}

impl<L: PackageLoader> PackageLoader for CachingLoader<L> {
    fn load(&self, spec: &str) -> Result<Arc<Package>, PackageError> {
        let mut cache = self.cache.lock().expect("loader cache poisoned");
        if let Some(package) = cache.get(spec) {
            debug!(spec, "package served from loader cache");
            return Ok(Arc::clone(package));
        }
        let package = self.inner.load(spec)?;
        cache.insert(spec.to_string(), Arc::clone(&package));
        Ok(package)
    }
}

impl<L: PackageLoader> PackageLoader for &L {
    fn load(&self, spec: &str) -> Result<Arc<Package>, PackageError> {
        (**self).load(spec)
    }
}

use crate::error::ResolveError;
use shim_ast::ImportRecord;
use shim_pkg::Package;
use std::collections::HashSet;

/// Resolve a package selector to an import path. Aliased imports of the
/// enclosing file are consulted first; failing that, the current package's
/// loaded imports are scanned for one whose canonical name matches. A
/// selector can be a local alias or a package's default name, hence the two
/// tiers.
pub fn import_path_for(
    selector: &str,
    file_imports: &[ImportRecord],
    package: &Package,
) -> Result<String, ResolveError> {
    for import in file_imports {
        if import.alias.as_deref() == Some(selector) {
            return Ok(import.path.clone());
        }
    }

    for (path, imported) in package.imported_packages() {
        if imported.name == selector {
            return Ok(path.to_string());
        }
    }

    Err(ResolveError::UnknownSelector(selector.to_string()))
}

/// Every selector usable from a given file: its import aliases plus the
/// canonical names of packages the enclosing package has loaded.
pub fn selectors_in_scope(file_imports: &[ImportRecord], package: &Package) -> HashSet<String> {
    let mut selectors: HashSet<String> = file_imports
        .iter()
        .filter_map(|import| import.alias.clone())
        .collect();
    for (_, imported) in package.imported_packages() {
        selectors.insert(imported.name.clone());
    }
    selectors
}

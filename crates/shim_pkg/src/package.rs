use shim_ast::{ImportRecord, SourceFile, TypeDeclaration};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of a declaration index lookup: the declaration plus the import
/// table of the file that declared it.
#[derive(Debug, Clone)]
pub struct DeclarationHit<'a> {
    pub declaration: &'a TypeDeclaration,
    pub file_imports: &'a [ImportRecord],
}

/// A loaded package: canonical name, import path, parsed files, and the
/// already-loaded packages it imports. Immutable once handed to the
/// resolver; one snapshot serves a whole top-level resolution.
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub name: String,
    pub import_path: String,
    pub files: Vec<SourceFile>,
    imports: HashMap<String, Arc<Package>>,
}

impl Package {
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: import_path.into(),
            files: Vec::new(),
            imports: HashMap::new(),
        }
    }

    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    /// Record a loaded dependency, keyed by its import path.
    pub fn with_import(mut self, dependency: Arc<Package>) -> Self {
        self.imports
            .insert(dependency.import_path.clone(), dependency);
        self
    }

    /// Look up a type declaration by name across every file of the package,
    /// in file order.
    pub fn find_declaration(&self, name: &str) -> Option<DeclarationHit<'_>> {
        for file in &self.files {
            for declaration in &file.declarations {
                if declaration.name == name {
                    return Some(DeclarationHit {
                        declaration,
                        file_imports: &file.imports,
                    });
                }
            }
        }
        None
    }

    /// Names of every type declared in this package, used by the printer to
    /// decide which identifiers need package qualification.
    pub fn declared_type_names(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|file| file.declarations.iter())
            .map(|declaration| declaration.name.clone())
            .collect()
    }

    /// A dependency previously loaded for this package, by import path.
    pub fn imported_package(&self, import_path: &str) -> Option<&Arc<Package>> {
        self.imports.get(import_path)
    }

    /// Iterate loaded dependencies as (import path, package) pairs.
    pub fn imported_packages(&self) -> impl Iterator<Item = (&str, &Arc<Package>)> {
        self.imports
            .iter()
            .map(|(path, package)| (path.as_str(), package))
    }
}

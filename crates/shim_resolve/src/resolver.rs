use crate::config::{ResolverConfig, UnresolvedEmbeddingPolicy};
use crate::error::ResolveError;
use crate::output::{Method, MethodSet, ResolvedContract};
use crate::{generics, guard, merge, selector};
use shim_ast::{EmbeddedRef, ImportRecord, Member};
use shim_pkg::{Package, PackageLoader};
use shim_print::{PrinterScope, SignaturePrinter};
use std::sync::Arc;
use tracing::{debug, warn};

/// One top-level resolution request.
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    /// Loader specifier for the package that declares the interface.
    pub source_package: &'a str,
    pub interface_name: &'a str,
    /// Import path of the package the generated code will live in. Decides
    /// whether qualification and the export guard apply.
    pub destination_package: &'a str,
    /// Selector to use for the source package instead of its canonical name.
    pub source_alias: Option<&'a str>,
}

impl<'a> ResolveRequest<'a> {
    pub fn new(
        source_package: &'a str,
        interface_name: &'a str,
        destination_package: &'a str,
    ) -> Self {
        Self {
            source_package,
            interface_name,
            destination_package,
            source_alias: None,
        }
    }

    pub fn with_source_alias(mut self, alias: &'a str) -> Self {
        self.source_alias = Some(alias);
        self
    }
}

/// Result of walking one declaration: its generic clauses, the methods
/// accumulated so far, and the import table of the file that declared it.
struct ResolvedFrame {
    type_param_clause: String,
    type_arg_clause: String,
    methods: MethodSet,
    imports: Vec<ImportRecord>,
}

/// Per-resolution context shared by every frame.
struct ResolveContext<'a> {
    destination: &'a str,
    source_path: String,
    source_alias: Option<&'a str>,
}

impl ResolveContext<'_> {
    /// Selector used to qualify a package's local named types when printing
    /// them for the destination package. `None` when no qualification is
    /// needed because the packages coincide.
    fn qualifier_for(&self, package: &Package) -> Option<String> {
        if package.import_path == self.destination {
            None
        } else if package.import_path == self.source_path {
            Some(
                self.source_alias
                    .map(str::to_string)
                    .unwrap_or_else(|| package.name.clone()),
            )
        } else {
            Some(package.name.clone())
        }
    }
}

/// Resolves the complete flattened method contract of a named interface-like
/// declaration, following embedded contracts across files and packages.
/// Resolution is synchronous and depth-first; every loaded package is treated
/// as an immutable snapshot for the duration of one call.
pub struct ContractResolver<L> {
    loader: L,
    config: ResolverConfig,
}

impl<L: PackageLoader> ContractResolver<L> {
    pub fn new(loader: L) -> Self {
        Self::with_config(loader, ResolverConfig::default())
    }

    pub fn with_config(loader: L, config: ResolverConfig) -> Self {
        Self { loader, config }
    }

    pub fn resolve(&self, request: &ResolveRequest<'_>) -> Result<ResolvedContract, ResolveError> {
        let package = self.loader.load(request.source_package)?;
        debug!(
            source = %package.import_path,
            interface = request.interface_name,
            destination = request.destination_package,
            "resolving contract"
        );

        let crosses_package = package.import_path != request.destination_package;
        let context = ResolveContext {
            destination: request.destination_package,
            source_path: package.import_path.clone(),
            source_alias: request.source_alias,
        };

        let mut visiting = Vec::new();
        let frame =
            self.resolve_in_package(&package, request.interface_name, &[], &mut visiting, &context)?;

        guard::check_contract(request.interface_name, &frame.methods, crosses_package)?;

        let selector_name = request.source_alias.unwrap_or(&package.name);
        let interface_type = if crosses_package {
            format!("{}.{}", selector_name, request.interface_name)
        } else {
            request.interface_name.to_string()
        };

        let mut imports = frame.imports;
        if crosses_package {
            imports.push(ImportRecord {
                alias: request.source_alias.map(str::to_string),
                path: package.import_path.clone(),
            });
        }

        Ok(ResolvedContract {
            name: request.interface_name.to_string(),
            interface_type,
            type_param_clause: frame.type_param_clause,
            type_arg_clause: frame.type_arg_clause,
            methods: frame.methods,
            imports,
        })
    }

    /// One frame of the recursive walk: locate the declaration, bind any
    /// supplied generic arguments, then fold every member into the frame's
    /// method set.
    fn resolve_in_package(
        &self,
        package: &Arc<Package>,
        name: &str,
        generic_args: &[String],
        visiting: &mut Vec<(String, String)>,
        context: &ResolveContext<'_>,
    ) -> Result<ResolvedFrame, ResolveError> {
        let key = (package.import_path.clone(), name.to_string());
        if visiting.contains(&key) {
            let mut path: Vec<String> = visiting
                .iter()
                .map(|(package_path, type_name)| format!("{}.{}", package_path, type_name))
                .collect();
            path.push(format!("{}.{}", key.0, key.1));
            return Err(ResolveError::CyclicEmbedding(path.join(" -> ")));
        }

        visiting.push(key);
        let frame = self.walk_declaration(package, name, generic_args, visiting, context);
        visiting.pop();
        frame
    }

    fn walk_declaration(
        &self,
        package: &Arc<Package>,
        name: &str,
        generic_args: &[String],
        visiting: &mut Vec<(String, String)>,
        context: &ResolveContext<'_>,
    ) -> Result<ResolvedFrame, ResolveError> {
        let hit = package
            .find_declaration(name)
            .ok_or_else(|| ResolveError::DeclarationNotFound {
                name: name.to_string(),
                package: package.import_path.clone(),
            })?;
        let body = hit
            .declaration
            .as_contract()
            .ok_or_else(|| ResolveError::NotAContract(name.to_string()))?;

        let bindings = generics::bind_arguments(name, &hit.declaration.type_params, generic_args)?;
        let printer = SignaturePrinter::new(PrinterScope {
            local_types: package.declared_type_names().into_iter().collect(),
            selectors: selector::selectors_in_scope(hit.file_imports, package),
            type_params: hit
                .declaration
                .type_params
                .iter()
                .map(|param| param.name.clone())
                .collect(),
            bindings,
            qualifier: context.qualifier_for(package),
        });
        let (type_param_clause, type_arg_clause) =
            generics::build_clauses(&hit.declaration.type_params, &printer)?;

        debug!(
            package = %package.import_path,
            contract = name,
            members = body.members.len(),
            "walking contract members"
        );

        let mut methods = MethodSet::new();
        for member in &body.members {
            match member {
                Member::Method {
                    name: method_name,
                    signature,
                    ..
                } => {
                    let rendered = printer.print_method(method_name, signature)?;
                    methods.insert(
                        method_name.clone(),
                        Method {
                            name: method_name.clone(),
                            signature: rendered,
                        },
                    );
                }
                Member::Embedded { reference, .. } => {
                    let embedded = self.resolve_embedded(
                        reference,
                        package,
                        hit.file_imports,
                        &printer,
                        visiting,
                        context,
                    )?;
                    methods =
                        merge::merge_method_sets(methods, embedded, self.config.strict_conflicts)?;
                }
            }
        }

        Ok(ResolvedFrame {
            type_param_clause,
            type_arg_clause,
            methods,
            imports: hit.file_imports.to_vec(),
        })
    }

    fn resolve_embedded(
        &self,
        reference: &EmbeddedRef,
        package: &Arc<Package>,
        file_imports: &[ImportRecord],
        printer: &SignaturePrinter,
        visiting: &mut Vec<(String, String)>,
        context: &ResolveContext<'_>,
    ) -> Result<MethodSet, ResolveError> {
        match reference {
            EmbeddedRef::Local(target) => {
                self.resolve_local(package, target, &[], visiting, context)
            }
            EmbeddedRef::Qualified { selector, name } => self.resolve_qualified(
                package,
                selector,
                name,
                &[],
                file_imports,
                visiting,
                context,
            ),
            EmbeddedRef::Instantiated { target, args } => {
                // Argument expressions are printed with the current frame's
                // bindings in scope, so placeholders supplied by an outer
                // instantiation propagate through nested embeddings.
                let mut printed_args = Vec::with_capacity(args.len());
                for arg in args {
                    printed_args.push(printer.print_type(arg)?);
                }

                match target.as_ref() {
                    EmbeddedRef::Local(name) => {
                        self.resolve_local(package, name, &printed_args, visiting, context)
                    }
                    EmbeddedRef::Qualified { selector, name } => self.resolve_qualified(
                        package,
                        selector,
                        name,
                        &printed_args,
                        file_imports,
                        visiting,
                        context,
                    ),
                    EmbeddedRef::Instantiated { .. } => {
                        warn!(
                            package = %package.import_path,
                            "nested instantiation target in embedding contributes no methods"
                        );
                        Ok(MethodSet::new())
                    }
                }
            }
        }
    }

    /// Embedded reference to a declaration in the same package. An unmatched
    /// name is tolerated under the permissive policy and contributes nothing;
    /// a matched non-contract declaration is always an error.
    fn resolve_local(
        &self,
        package: &Arc<Package>,
        target: &str,
        generic_args: &[String],
        visiting: &mut Vec<(String, String)>,
        context: &ResolveContext<'_>,
    ) -> Result<MethodSet, ResolveError> {
        if package.find_declaration(target).is_none() {
            return match self.config.unresolved_embedding {
                UnresolvedEmbeddingPolicy::Permissive => {
                    warn!(
                        package = %package.import_path,
                        embedded = target,
                        "embedded reference matches no declaration; contributing no methods"
                    );
                    Ok(MethodSet::new())
                }
                UnresolvedEmbeddingPolicy::Strict => Err(ResolveError::DeclarationNotFound {
                    name: target.to_string(),
                    package: package.import_path.clone(),
                }),
            };
        }

        let frame = self.resolve_in_package(package, target, generic_args, visiting, context)?;
        Ok(frame.methods)
    }

    /// Embedded selector reference into another package. The selector is
    /// mapped to an import path, the already-loaded dependency is looked up,
    /// and resolution continues there. A missing declaration in the target
    /// package is an error here, unlike the local case.
    #[allow(clippy::too_many_arguments)]
    fn resolve_qualified(
        &self,
        package: &Arc<Package>,
        selector_name: &str,
        name: &str,
        generic_args: &[String],
        file_imports: &[ImportRecord],
        visiting: &mut Vec<(String, String)>,
        context: &ResolveContext<'_>,
    ) -> Result<MethodSet, ResolveError> {
        let import_path = selector::import_path_for(selector_name, file_imports, package)?;
        let target =
            package
                .imported_package(&import_path)
                .ok_or_else(|| ResolveError::ImportNotLoaded {
                    selector: selector_name.to_string(),
                    path: import_path.clone(),
                })?;
        let target = Arc::clone(target);

        let frame = self.resolve_in_package(&target, name, generic_args, visiting, context)?;
        Ok(frame.methods)
    }
}

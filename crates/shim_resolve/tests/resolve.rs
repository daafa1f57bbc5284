use shim_ast::{
    ContractBody, EmbeddedRef, ImportRecord, Member, Param, Signature, SourceFile,
    TypeDeclaration, TypeExpr, TypeParam,
};
use shim_pkg::{Package, PackageRegistry};
use shim_resolve::{ContractResolver, ResolveError, ResolveRequest};
use std::sync::Arc;

const STREAM_PATH: &str = "example.com/stream";

fn read_signature() -> Signature {
    Signature::new(
        vec![Param::named("p", TypeExpr::slice(TypeExpr::ident("byte")))],
        vec![
            Param::named("n", TypeExpr::ident("int")),
            Param::named("err", TypeExpr::ident("error")),
        ],
    )
}

fn close_signature() -> Signature {
    Signature::new(vec![], vec![Param::anonymous(TypeExpr::ident("error"))])
}

fn stream_package() -> Arc<Package> {
    Arc::new(
        Package::new("stream", STREAM_PATH).with_file(
            SourceFile::new("stream.go").with_declarations(vec![
                TypeDeclaration::contract(
                    "Reader",
                    ContractBody::new(vec![Member::method("Read", read_signature())]),
                ),
                TypeDeclaration::contract(
                    "ReadCloser",
                    ContractBody::new(vec![
                        Member::embedded(EmbeddedRef::local("Reader")),
                        Member::method("Close", close_signature()),
                    ]),
                ),
                TypeDeclaration::other("Buf", TypeExpr::slice(TypeExpr::ident("byte"))),
                TypeDeclaration::contract(
                    "Buffered",
                    ContractBody::new(vec![Member::method(
                        "Buffer",
                        Signature::new(vec![], vec![Param::anonymous(TypeExpr::ident("Buf"))]),
                    )]),
                ),
            ]),
        ),
    )
}

fn resolver_for(packages: Vec<Arc<Package>>) -> ContractResolver<PackageRegistry> {
    let mut registry = PackageRegistry::new();
    for package in packages {
        registry.register(package).expect("unique package");
    }
    ContractResolver::new(registry)
}

#[test]
fn direct_methods_resolve_to_their_printed_signatures() {
    let resolver = resolver_for(vec![stream_package()]);
    let contract = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "Reader", STREAM_PATH))
        .expect("Reader resolves");

    assert_eq!(contract.name, "Reader");
    assert_eq!(contract.interface_type, "Reader");
    assert!(contract.type_param_clause.is_empty());
    assert_eq!(contract.methods.len(), 1);
    assert_eq!(
        contract.methods["Read"].signature,
        "Read(p []byte) (n int, err error)"
    );
}

#[test]
fn local_embedding_flattens_into_two_methods() {
    let resolver = resolver_for(vec![stream_package()]);
    let contract = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "ReadCloser", STREAM_PATH))
        .expect("ReadCloser resolves");

    let names: Vec<&str> = contract.methods.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Close", "Read"]);
    assert_eq!(contract.methods["Close"].signature, "Close() error");
    assert_eq!(
        contract.methods["Read"].signature,
        "Read(p []byte) (n int, err error)"
    );
}

#[test]
fn outer_declaration_overrides_embedded_method() {
    let package = Arc::new(
        Package::new("stream", STREAM_PATH).with_file(
            SourceFile::new("stream.go").with_declarations(vec![
                TypeDeclaration::contract(
                    "Reader",
                    ContractBody::new(vec![Member::method("Read", read_signature())]),
                ),
                TypeDeclaration::contract(
                    "SimpleReader",
                    ContractBody::new(vec![
                        Member::embedded(EmbeddedRef::local("Reader")),
                        Member::method(
                            "Read",
                            Signature::new(
                                vec![],
                                vec![Param::anonymous(TypeExpr::ident("error"))],
                            ),
                        ),
                    ]),
                ),
            ]),
        ),
    );

    let resolver = resolver_for(vec![package]);
    let contract = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "SimpleReader", STREAM_PATH))
        .expect("SimpleReader resolves");

    assert_eq!(contract.methods.len(), 1);
    assert_eq!(contract.methods["Read"].signature, "Read() error");
}

#[test]
fn qualified_embedding_matches_direct_resolution_of_the_target() {
    let stream = stream_package();
    let app = Arc::new(
        Package::new("app", "example.com/app")
            .with_file(
                SourceFile::new("app.go")
                    .with_imports(vec![ImportRecord::plain(STREAM_PATH)])
                    .with_declarations(vec![TypeDeclaration::contract(
                        "Pipeline",
                        ContractBody::new(vec![Member::embedded(EmbeddedRef::qualified(
                            "stream", "Reader",
                        ))]),
                    )]),
            )
            .with_import(Arc::clone(&stream)),
    );

    let resolver = resolver_for(vec![Arc::clone(&stream), app]);
    let destination = "example.com/dest";

    let through_embedding = resolver
        .resolve(&ResolveRequest::new(
            "example.com/app",
            "Pipeline",
            destination,
        ))
        .expect("Pipeline resolves");
    let direct = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "Reader", destination))
        .expect("Reader resolves");

    assert_eq!(through_embedding.methods, direct.methods);
}

#[test]
fn aliased_import_serves_the_selector() {
    let stream = stream_package();
    let app = Arc::new(
        Package::new("app", "example.com/app")
            .with_file(
                SourceFile::new("app.go")
                    .with_imports(vec![ImportRecord::aliased("s", STREAM_PATH)])
                    .with_declarations(vec![TypeDeclaration::contract(
                        "Pipeline",
                        ContractBody::new(vec![Member::embedded(EmbeddedRef::qualified(
                            "s", "Reader",
                        ))]),
                    )]),
            )
            .with_import(Arc::clone(&stream)),
    );

    let resolver = resolver_for(vec![stream, app]);
    let contract = resolver
        .resolve(&ResolveRequest::new(
            "example.com/app",
            "Pipeline",
            "example.com/app",
        ))
        .expect("Pipeline resolves through alias");

    assert_eq!(contract.methods.len(), 1);
    assert!(contract.methods.contains_key("Read"));
}

#[test]
fn cross_package_output_qualifies_source_local_types() {
    let resolver = resolver_for(vec![stream_package()]);

    let same = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "Buffered", STREAM_PATH))
        .expect("same-package resolution");
    assert_eq!(same.methods["Buffer"].signature, "Buffer() Buf");
    assert!(same.imports.is_empty());

    let cross = resolver
        .resolve(&ResolveRequest::new(
            STREAM_PATH,
            "Buffered",
            "example.com/dest",
        ))
        .expect("cross-package resolution");
    assert_eq!(cross.methods["Buffer"].signature, "Buffer() stream.Buf");
    assert_eq!(cross.interface_type, "stream.Buffered");
    assert_eq!(cross.import_lines(), vec![format!("\"{}\"", STREAM_PATH)]);
}

#[test]
fn source_alias_overrides_the_package_selector() {
    let resolver = resolver_for(vec![stream_package()]);
    let contract = resolver
        .resolve(
            &ResolveRequest::new(STREAM_PATH, "Buffered", "example.com/dest")
                .with_source_alias("sio"),
        )
        .expect("aliased resolution");

    assert_eq!(contract.interface_type, "sio.Buffered");
    assert_eq!(contract.methods["Buffer"].signature, "Buffer() sio.Buf");
    assert_eq!(
        contract.import_lines(),
        vec![format!("sio \"{}\"", STREAM_PATH)]
    );
}

#[test]
fn unexported_method_fails_only_when_crossing_packages() {
    let package = Arc::new(
        Package::new("internal", "example.com/internal").with_file(
            SourceFile::new("internal.go").with_declarations(vec![TypeDeclaration::contract(
                "mixed",
                ContractBody::new(vec![
                    Member::method("Read", read_signature()),
                    Member::method("reset", Signature::default()),
                ]),
            )]),
        ),
    );

    let resolver = resolver_for(vec![package]);

    resolver
        .resolve(&ResolveRequest::new(
            "example.com/internal",
            "mixed",
            "example.com/internal",
        ))
        .expect("same-package resolution permits unexported methods");

    let err = resolver
        .resolve(&ResolveRequest::new(
            "example.com/internal",
            "mixed",
            "example.com/dest",
        ))
        .expect_err("cross-package resolution rejects unexported methods");
    assert!(matches!(
        err,
        ResolveError::UnexportedMethod(name) if name == "reset"
    ));
}

#[test]
fn empty_contract_is_rejected() {
    let package = Arc::new(
        Package::new("stream", STREAM_PATH).with_file(
            SourceFile::new("stream.go").with_declarations(vec![TypeDeclaration::contract(
                "Nothing",
                ContractBody::default(),
            )]),
        ),
    );

    let resolver = resolver_for(vec![package]);
    let err = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "Nothing", STREAM_PATH))
        .expect_err("empty contract");
    assert!(matches!(
        err,
        ResolveError::EmptyContract(name) if name == "Nothing"
    ));
}

#[test]
fn missing_declaration_is_reported_with_its_package() {
    let resolver = resolver_for(vec![stream_package()]);
    let err = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "Missing", STREAM_PATH))
        .expect_err("unknown declaration");
    assert!(matches!(
        err,
        ResolveError::DeclarationNotFound { name, package }
            if name == "Missing" && package == STREAM_PATH
    ));
}

#[test]
fn embedding_a_non_contract_declaration_fails() {
    let package = Arc::new(
        Package::new("stream", STREAM_PATH).with_file(
            SourceFile::new("stream.go").with_declarations(vec![
                TypeDeclaration::other("Buf", TypeExpr::slice(TypeExpr::ident("byte"))),
                TypeDeclaration::contract(
                    "Broken",
                    ContractBody::new(vec![Member::embedded(EmbeddedRef::local("Buf"))]),
                ),
            ]),
        ),
    );

    let resolver = resolver_for(vec![package]);
    let err = resolver
        .resolve(&ResolveRequest::new(STREAM_PATH, "Broken", STREAM_PATH))
        .expect_err("non-contract embedding");
    assert!(matches!(
        err,
        ResolveError::NotAContract(name) if name == "Buf"
    ));
}

#[test]
fn generic_container_instantiated_through_embedding() {
    let package = Arc::new(
        Package::new("box", "example.com/box").with_file(
            SourceFile::new("box.go").with_declarations(vec![
                TypeDeclaration::generic_contract(
                    "Container",
                    vec![TypeParam::new("T", TypeExpr::ident("any"))],
                    ContractBody::new(vec![Member::method(
                        "Get",
                        Signature::new(vec![], vec![Param::anonymous(TypeExpr::ident("T"))]),
                    )]),
                ),
                TypeDeclaration::contract(
                    "StringBox",
                    ContractBody::new(vec![Member::embedded(EmbeddedRef::instantiated(
                        EmbeddedRef::local("Container"),
                        vec![TypeExpr::ident("string")],
                    ))]),
                ),
            ]),
        ),
    );

    let resolver = resolver_for(vec![package]);
    let contract = resolver
        .resolve(&ResolveRequest::new(
            "example.com/box",
            "StringBox",
            "example.com/box",
        ))
        .expect("StringBox resolves");

    assert_eq!(contract.methods["Get"].signature, "Get() string");
    assert!(contract.type_param_clause.is_empty());
}

#[test]
fn declaring_site_resolution_keeps_placeholders_and_builds_clauses() {
    let package = Arc::new(
        Package::new("box", "example.com/box").with_file(
            SourceFile::new("box.go").with_declarations(vec![TypeDeclaration::generic_contract(
                "Container",
                vec![TypeParam::new("T", TypeExpr::ident("any"))],
                ContractBody::new(vec![Member::method(
                    "Get",
                    Signature::new(vec![], vec![Param::anonymous(TypeExpr::ident("T"))]),
                )]),
            )]),
        ),
    );

    let resolver = resolver_for(vec![package]);
    let contract = resolver
        .resolve(&ResolveRequest::new(
            "example.com/box",
            "Container",
            "example.com/box",
        ))
        .expect("Container resolves");

    assert_eq!(contract.methods["Get"].signature, "Get() T");
    assert_eq!(contract.type_param_clause, "[T any]");
    assert_eq!(contract.type_arg_clause, "[T]");
}

#[test]
fn generic_arguments_propagate_through_nested_embeddings() {
    let package = Arc::new(
        Package::new("box", "example.com/box").with_file(
            SourceFile::new("box.go").with_declarations(vec![
                TypeDeclaration::generic_contract(
                    "Container",
                    vec![TypeParam::new("T", TypeExpr::ident("any"))],
                    ContractBody::new(vec![Member::method(
                        "Get",
                        Signature::new(vec![], vec![Param::anonymous(TypeExpr::ident("T"))]),
                    )]),
                ),
                TypeDeclaration::generic_contract(
                    "Outer",
                    vec![TypeParam::new("T", TypeExpr::ident("any"))],
                    ContractBody::new(vec![Member::embedded(EmbeddedRef::instantiated(
                        EmbeddedRef::local("Container"),
                        vec![TypeExpr::ident("T")],
                    ))]),
                ),
                TypeDeclaration::contract(
                    "IntBox",
                    ContractBody::new(vec![Member::embedded(EmbeddedRef::instantiated(
                        EmbeddedRef::local("Outer"),
                        vec![TypeExpr::ident("int")],
                    ))]),
                ),
            ]),
        ),
    );

    let resolver = resolver_for(vec![package]);
    let contract = resolver
        .resolve(&ResolveRequest::new(
            "example.com/box",
            "IntBox",
            "example.com/box",
        ))
        .expect("IntBox resolves");

    assert_eq!(contract.methods["Get"].signature, "Get() int");
}

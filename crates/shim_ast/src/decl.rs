// shim_ast/decl - Type declarations, contract bodies, and source files
use crate::span::Span;
use crate::types::{Signature, TypeExpr};
use serde::{Deserialize, Serialize};

/// Generic type parameter declared on a contract, e.g. the `T any` in
/// `Container[T any]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: TypeExpr,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, constraint: TypeExpr) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }
}

/// A named type declaration as found in one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub body: TypeBody,
    pub span: Span,
}

impl TypeDeclaration {
    pub fn contract(name: impl Into<String>, body: ContractBody) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            body: TypeBody::Contract(body),
            span: Span::dummy(),
        }
    }

    pub fn generic_contract(
        name: impl Into<String>,
        type_params: Vec<TypeParam>,
        body: ContractBody,
    ) -> Self {
        Self {
            name: name.into(),
            type_params,
            body: TypeBody::Contract(body),
            span: Span::dummy(),
        }
    }

    pub fn other(name: impl Into<String>, underlying: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            body: TypeBody::Other(underlying),
            span: Span::dummy(),
        }
    }

    pub fn as_contract(&self) -> Option<&ContractBody> {
        match &self.body {
            TypeBody::Contract(body) => Some(body),
            TypeBody::Other(_) => None,
        }
    }
}

/// Underlying shape of a type declaration. Only contract bodies can be
/// embedded; anything else embedded where a contract is required is a
/// resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeBody {
    Contract(ContractBody),
    Other(TypeExpr),
}

/// Ordered member list of an interface-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContractBody {
    pub members: Vec<Member>,
}

impl ContractBody {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }
}

/// One contract member: a directly declared method or an embedded reference
/// to another contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    Method {
        name: String,
        signature: Signature,
        span: Span,
    },
    Embedded {
        reference: EmbeddedRef,
        span: Span,
    },
}

impl Member {
    pub fn method(name: impl Into<String>, signature: Signature) -> Self {
        Member::Method {
            name: name.into(),
            signature,
            span: Span::dummy(),
        }
    }

    pub fn embedded(reference: EmbeddedRef) -> Self {
        Member::Embedded {
            reference,
            span: Span::dummy(),
        }
    }
}

/// Reference target of an embedded contract member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddedRef {
    /// Unqualified reference to a declaration in the same package.
    Local(String),
    /// Selector reference into another package, e.g. `io.Reader`.
    Qualified { selector: String, name: String },
    /// Generic instantiation of a local or qualified reference with
    /// positional type arguments, e.g. `Container[string]`.
    Instantiated {
        target: Box<EmbeddedRef>,
        args: Vec<TypeExpr>,
    },
}

impl EmbeddedRef {
    pub fn local(name: impl Into<String>) -> Self {
        EmbeddedRef::Local(name.into())
    }

    pub fn qualified(selector: impl Into<String>, name: impl Into<String>) -> Self {
        EmbeddedRef::Qualified {
            selector: selector.into(),
            name: name.into(),
        }
    }

    pub fn instantiated(target: EmbeddedRef, args: Vec<TypeExpr>) -> Self {
        EmbeddedRef::Instantiated {
            target: Box::new(target),
            args,
        }
    }
}

/// Import declared at the top of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub alias: Option<String>,
    pub path: String,
}

impl ImportRecord {
    pub fn plain(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    /// Canonical import line body, e.g. `io "io/fs"` or `"bytes"`.
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} \"{}\"", alias, self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// One parsed source file: its import table plus the type declarations it
/// contributes to the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourceFile {
    pub name: String,
    pub imports: Vec<ImportRecord>,
    pub declarations: Vec<TypeDeclaration>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: Vec<ImportRecord>) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_declarations(mut self, declarations: Vec<TypeDeclaration>) -> Self {
        self.declarations = declarations;
        self
    }
}

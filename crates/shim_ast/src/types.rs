// shim_ast/types - Type expressions and method signatures
use serde::{Deserialize, Serialize};

/// Channel directionality for channel type expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Bidirectional,
    Receive,
    Send,
}

/// A single type expression as it appears in a method signature or an
/// embedding site. The tree mirrors Go surface syntax closely enough that a
/// printer can reproduce a canonical rendering from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Unqualified identifier: a predeclared type, a package-local named
    /// type, or a generic type parameter.
    Ident(String),
    /// Package-qualified identifier, e.g. `io.Reader`.
    Selector { package: String, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array { len: usize, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// Final-parameter variadic marker, e.g. `...string`.
    Variadic(Box<TypeExpr>),
    Func(Box<Signature>),
    EmptyInterface,
    /// Generic instantiation in type position, e.g. `Container[string]`.
    Instantiated {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn selector(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Selector {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn variadic(elem: TypeExpr) -> Self {
        TypeExpr::Variadic(Box::new(elem))
    }

    pub fn instantiated(base: TypeExpr, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Instantiated {
            base: Box::new(base),
            args,
        }
    }
}

/// One parameter or result slot. Result slots are frequently anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn anonymous(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }
}

/// Ordered parameter and result lists of a method or function type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

impl Signature {
    pub fn new(params: Vec<Param>, results: Vec<Param>) -> Self {
        Self { params, results }
    }
}

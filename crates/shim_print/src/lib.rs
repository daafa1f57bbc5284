// shim_print - Renders type expressions and method signatures to canonical
// source strings, qualifying cross-package identifiers and substituting bound
// generic placeholders.

use shim_ast::{ChanDir, Param, Signature, TypeExpr};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),
    #[error("unknown package selector: {0}")]
    UnknownPackageSelector(String),
}

/// Identifiers that resolve without any declaration being in scope.
const PREDECLARED: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Name-resolution scope a printer operates in. Built once per resolution
/// frame by the resolver.
#[derive(Debug, Clone, Default)]
pub struct PrinterScope {
    /// Types declared in the package being walked.
    pub local_types: HashSet<String>,
    /// Package selectors usable in this scope: file import aliases plus the
    /// canonical names of loaded imports.
    pub selectors: HashSet<String>,
    /// Generic parameters declared by the contract being walked.
    pub type_params: HashSet<String>,
    /// Generic parameter name -> printed argument, for instantiated frames.
    pub bindings: HashMap<String, String>,
    /// Selector to prefix package-local named types with when printing for a
    /// different destination package. `None` for same-package output.
    pub qualifier: Option<String>,
}

/// Renders one type expression or method signature at a time. Stateless apart
/// from its scope; construct freely, one per frame.
#[derive(Debug, Clone, Default)]
pub struct SignaturePrinter {
    scope: PrinterScope,
}

impl SignaturePrinter {
    pub fn new(scope: PrinterScope) -> Self {
        Self { scope }
    }

    /// Render a type expression to its canonical string form.
    pub fn print_type(&self, expr: &TypeExpr) -> Result<String, PrintError> {
        Ok(match expr {
            TypeExpr::Ident(name) => self.print_ident(name)?,
            TypeExpr::Selector { package, name } => {
                if !self.scope.selectors.contains(package) {
                    return Err(PrintError::UnknownPackageSelector(package.clone()));
                }
                format!("{}.{}", package, name)
            }
            TypeExpr::Pointer(elem) => format!("*{}", self.print_type(elem)?),
            TypeExpr::Slice(elem) => format!("[]{}", self.print_type(elem)?),
            TypeExpr::Array { len, elem } => format!("[{}]{}", len, self.print_type(elem)?),
            TypeExpr::Map { key, value } => format!(
                "map[{}]{}",
                self.print_type(key)?,
                self.print_type(value)?
            ),
            TypeExpr::Chan { dir, elem } => {
                let elem = self.print_type(elem)?;
                match dir {
                    ChanDir::Bidirectional => format!("chan {}", elem),
                    ChanDir::Receive => format!("<-chan {}", elem),
                    ChanDir::Send => format!("chan<- {}", elem),
                }
            }
            TypeExpr::Variadic(elem) => format!("...{}", self.print_type(elem)?),
            TypeExpr::Func(signature) => {
                format!("func{}", self.print_signature(signature)?)
            }
            TypeExpr::EmptyInterface => "interface{}".to_string(),
            TypeExpr::Instantiated { base, args } => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    rendered.push(self.print_type(arg)?);
                }
                format!("{}[{}]", self.print_type(base)?, rendered.join(", "))
            }
        })
    }

    /// Render a full method signature, e.g.
    /// `Read(p []byte) (n int, err error)`.
    pub fn print_method(&self, name: &str, signature: &Signature) -> Result<String, PrintError> {
        Ok(format!("{}{}", name, self.print_signature(signature)?))
    }

    fn print_ident(&self, name: &str) -> Result<String, PrintError> {
        if let Some(bound) = self.scope.bindings.get(name) {
            return Ok(bound.clone());
        }
        if self.scope.type_params.contains(name) || PREDECLARED.contains(&name) {
            return Ok(name.to_string());
        }
        if self.scope.local_types.contains(name) {
            return Ok(match &self.scope.qualifier {
                Some(qualifier) => format!("{}.{}", qualifier, name),
                None => name.to_string(),
            });
        }
        Err(PrintError::UnknownIdentifier(name.to_string()))
    }

    fn print_signature(&self, signature: &Signature) -> Result<String, PrintError> {
        let params = self.print_params(&signature.params)?;
        let results = match signature.results.len() {
            0 => String::new(),
            1 if signature.results[0].name.is_none() => {
                format!(" {}", self.print_type(&signature.results[0].ty)?)
            }
            _ => format!(" ({})", self.print_params(&signature.results)?),
        };
        Ok(format!("({}){}", params, results))
    }

    fn print_params(&self, params: &[Param]) -> Result<String, PrintError> {
        let mut rendered = Vec::with_capacity(params.len());
        for param in params {
            let ty = self.print_type(&param.ty)?;
            rendered.push(match &param.name {
                Some(name) => format!("{} {}", name, ty),
                None => ty,
            });
        }
        Ok(rendered.join(", "))
    }
}

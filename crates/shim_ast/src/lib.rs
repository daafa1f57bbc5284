// shim_ast - Declaration graph consumed by the contract resolver
//
// Parsing source text into this graph is the job of an external frontend;
// everything here is plain data plus convenience constructors.

mod decl;
mod span;
mod types;

pub use decl::{
    ContractBody, EmbeddedRef, ImportRecord, Member, SourceFile, TypeBody, TypeDeclaration,
    TypeParam,
};
pub use span::Span;
pub use types::{ChanDir, Param, Signature, TypeExpr};

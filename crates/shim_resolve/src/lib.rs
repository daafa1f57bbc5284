// shim_resolve - Flattens an interface-like declaration into a single ordered
// method set, following embedded contracts across files and packages, with
// generic-argument propagation and package-boundary validation.

mod config;
mod error;
mod generics;
mod guard;
mod merge;
mod output;
mod resolver;
mod selector;

pub use config::{ResolverConfig, UnresolvedEmbeddingPolicy};
pub use error::ResolveError;
pub use merge::merge_method_sets;
pub use output::{Method, MethodSet, ResolvedContract};
pub use resolver::{ContractResolver, ResolveRequest};

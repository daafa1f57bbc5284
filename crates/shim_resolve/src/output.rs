use serde::{Deserialize, Serialize};
use shim_ast::ImportRecord;
use std::collections::{BTreeMap, BTreeSet};

/// One resolved method: its name plus the fully rendered signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub signature: String,
}

/// Flattened, deduplicated method mapping. Keyed by name; iteration order is
/// lexicographic so downstream output is deterministic.
pub type MethodSet = BTreeMap<String, Method>;

/// The tuple handed to downstream code emission: everything a template needs
/// to render a wrapper for the resolved contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContract {
    /// Bare name of the interface declaration.
    pub name: String,
    /// Name as referenced from the destination package, e.g. `store.Putter`
    /// cross-package or plain `Putter` same-package.
    pub interface_type: String,
    /// Declared type-parameter clause, e.g. `[T any]`; empty when the
    /// contract is not generic.
    pub type_param_clause: String,
    /// Positional argument clause matching the parameter clause, e.g. `[T]`.
    pub type_arg_clause: String,
    pub methods: MethodSet,
    /// Imports collected from the file that declared the contract, plus the
    /// source package itself when resolution crossed packages.
    pub imports: Vec<ImportRecord>,
}

impl ResolvedContract {
    /// Deduplicated, sorted import lines ready for an import block.
    pub fn import_lines(&self) -> Vec<String> {
        let lines: BTreeSet<String> = self
            .imports
            .iter()
            .map(ImportRecord::render)
            .collect();
        lines.into_iter().collect()
    }
}

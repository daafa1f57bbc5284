use crate::error::ResolveError;
use crate::output::MethodSet;

/// Final validation of a fully merged top-level method set. An empty
/// contract is always rejected. When the defining package differs from the
/// destination package, every method must be exported, since the generated
/// code has to call it from outside; same-package output skips the
/// visibility check entirely.
pub fn check_contract(
    name: &str,
    methods: &MethodSet,
    crosses_package: bool,
) -> Result<(), ResolveError> {
    if methods.is_empty() {
        return Err(ResolveError::EmptyContract(name.to_string()));
    }

    if !crosses_package {
        return Ok(());
    }

    for method_name in methods.keys() {
        let exported = method_name
            .chars()
            .next()
            .is_some_and(char::is_uppercase);
        if !exported {
            return Err(ResolveError::UnexportedMethod(method_name.clone()));
        }
    }

    Ok(())
}

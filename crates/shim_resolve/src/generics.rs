use crate::error::ResolveError;
use shim_ast::TypeParam;
use shim_print::SignaturePrinter;
use std::collections::HashMap;

/// Bind positional type arguments onto declared parameter names for the
/// duration of one resolution frame. No arguments means a declaring-site
/// frame: parameters stay unbound and print as themselves. A non-empty
/// argument list must match the declared parameter count exactly.
pub fn bind_arguments(
    type_name: &str,
    params: &[TypeParam],
    args: &[String],
) -> Result<HashMap<String, String>, ResolveError> {
    if args.is_empty() {
        return Ok(HashMap::new());
    }
    if args.len() != params.len() {
        return Err(ResolveError::GenericArityMismatch {
            type_name: type_name.to_string(),
            expected: params.len(),
            actual: args.len(),
        });
    }

    Ok(params
        .iter()
        .zip(args)
        .map(|(param, arg)| (param.name.clone(), arg.clone()))
        .collect())
}

/// Build the two clause strings a generic declaration site needs: the
/// type-parameter clause (`[T any, K comparable]`) and the positionally
/// aligned argument clause (`[T, K]`). Both are empty for non-generic
/// contracts.
pub fn build_clauses(
    params: &[TypeParam],
    printer: &SignaturePrinter,
) -> Result<(String, String), ResolveError> {
    if params.is_empty() {
        return Ok((String::new(), String::new()));
    }

    let mut declared = Vec::with_capacity(params.len());
    let mut passed = Vec::with_capacity(params.len());
    for param in params {
        declared.push(format!("{} {}", param.name, printer.print_type(&param.constraint)?));
        passed.push(param.name.clone());
    }

    Ok((
        format!("[{}]", declared.join(", ")),
        format!("[{}]", passed.join(", ")),
    ))
}

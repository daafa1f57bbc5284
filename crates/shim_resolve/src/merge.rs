use crate::error::ResolveError;
use crate::output::MethodSet;

/// Combine an outer (closer to the requested declaration) method set with one
/// derived from an embedded contract. An empty side passes the other through;
/// otherwise outer entries override inner ones name by name.
///
/// With `strict` set, a name present on both sides with differing signatures
/// is rejected instead of silently resolved in the outer set's favour.
pub fn merge_method_sets(
    outer: MethodSet,
    inner: MethodSet,
    strict: bool,
) -> Result<MethodSet, ResolveError> {
    if outer.is_empty() {
        return Ok(inner);
    }
    if inner.is_empty() {
        return Ok(outer);
    }

    if strict {
        for (name, method) in &outer {
            if let Some(shadowed) = inner.get(name) {
                if shadowed.signature != method.signature {
                    return Err(ResolveError::ConflictingMethodSignature {
                        name: name.clone(),
                        outer: method.signature.clone(),
                        inner: shadowed.signature.clone(),
                    });
                }
            }
        }
    }

    let mut merged = inner;
    merged.extend(outer);
    Ok(merged)
}

//! Service methods of the entrypoint type.

use rustc_hash::FxHashSet;
use tyrpc_ir::{MessageDef, MessageField, RpcMethod};
use tyrpc_native::{Method, NativeTypeId, Var};

use crate::convert::Converter;
use crate::LowerError;

/// Field name used for a trailing `error` result.
pub const ERROR_FIELD: &str = "Error";

/// Build one request and one response message per exported method of
/// `entrypoint`, in declaration order, skipping `excluded` names.
#[tracing::instrument(level = "debug", skip_all)]
pub fn extract_methods(
    conv: &mut Converter<'_>,
    entrypoint: NativeTypeId,
    excluded: &FxHashSet<String>,
) -> Result<Vec<RpcMethod>, LowerError> {
    let table = conv.table();
    let mut methods = Vec::new();

    for method in table.exported_methods(entrypoint) {
        if excluded.contains(&method.name) {
            tracing::debug!(method = %method.name, "method excluded");
            continue;
        }
        methods.push(extract_method(conv, method)?);
    }

    tracing::debug!(count = methods.len(), "service methods extracted");
    Ok(methods)
}

fn extract_method(conv: &mut Converter<'_>, method: &Method) -> Result<RpcMethod, LowerError> {
    let signature = &method.signature;
    tracing::trace!(
        method = %method.name,
        params = signature.params.len(),
        results = signature.results.len(),
        "processing method"
    );

    // A variadic tail has no structural counterpart.
    let params = match signature.params.split_last() {
        Some((_, rest)) if signature.variadic => rest,
        _ => signature.params.as_slice(),
    };

    let mut request = Vec::with_capacity(params.len());
    for (index, param) in params.iter().enumerate() {
        let ty = conv.convert(param.ty).map_err(|e| {
            e.within(format!("parameter {} of method `{}`", index + 1, method.name))
        })?;
        request.push(MessageField::new(field_name(param, index), ty));
    }

    let universe = conv.table().universe();
    let mut response = Vec::with_capacity(signature.results.len());
    for (index, result) in signature.results.iter().enumerate() {
        let last = index + 1 == signature.results.len();
        let ty = conv.convert(result.ty).map_err(|e| {
            e.within(format!("result {} of method `{}`", index + 1, method.name))
        })?;
        let name = if last && universe.is_error(result.ty) {
            ERROR_FIELD.to_string()
        } else {
            field_name(result, index)
        };
        response.push(MessageField::new(name, ty));
    }

    let pool = conv.pool_mut();
    let request = pool.message(MessageDef::new(format!("{}Request", method.name), request));
    let response = pool.message(MessageDef::new(format!("{}Response", method.name), response));

    Ok(RpcMethod {
        name: method.name.clone(),
        request,
        response,
    })
}

/// Source name, or `Field<n>` (1-based) for unnamed and blank entries.
fn field_name(var: &Var, index: usize) -> String {
    match var.name.as_deref() {
        Some(name) if !name.is_empty() && name != "_" => name.to_string(),
        _ => format!("Field{}", index + 1),
    }
}

#[cfg(test)]
mod tests;

//! Lowering from a native package to a service schema.
//!
//! One run of [`compile`]:
//!
//! 1. finds the entrypoint type in the loaded package
//! 2. groups typed constants into enumerations ([`extract_enums`])
//! 3. converts every exported method of the entrypoint into a request and a
//!    response message ([`extract_methods`]), converting the reachable type
//!    graph on the way ([`Converter`])
//! 4. validates emitted names ([`check_type_names`])
//!
//! All state lives in a per-run [`Converter`]; runs never share caches.

mod check;
mod convert;
mod enums;
mod error;
mod interfaces;
mod scalar;
mod service;
mod stack;

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use tyrpc_ir::Schema;
use tyrpc_native::{SymbolTable, TypeLoader};

pub use check::check_type_names;
pub use convert::Converter;
pub use enums::{build_members, extract_enums, EnumTable};
pub use error::LowerError;
pub use interfaces::find_implementations;
pub use scalar::map_scalar;
pub use service::{extract_methods, ERROR_FIELD};

/// Lifecycle methods with no meaningful request/response shape.
pub const DEFAULT_EXCLUDED_METHODS: [&str; 4] = ["Open", "Close", "AddHandler", "AddHandlerOnce"];

/// Inputs of one compilation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Package identifier handed to the loader (`github.com/acme/chat`).
    pub package_id: String,
    /// Name of the type whose exported methods form the service.
    pub entrypoint: String,
    pub excluded_methods: Vec<String>,
    /// Struct types emitted as messages without fields.
    pub fieldless_types: Vec<String>,
    /// Service name; defaults to the entrypoint name.
    pub service_name: Option<String>,
    pub proto_package: Option<String>,
    pub options: BTreeMap<String, String>,
    /// Emit methods by name instead of declaration order.
    pub sort_methods: bool,
}

impl CompileOptions {
    pub fn new(package_id: impl Into<String>, entrypoint: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            entrypoint: entrypoint.into(),
            excluded_methods: DEFAULT_EXCLUDED_METHODS.map(String::from).to_vec(),
            fieldless_types: Vec::new(),
            service_name: None,
            proto_package: None,
            options: BTreeMap::new(),
            sort_methods: false,
        }
    }
}

/// Load `options.package_id` through `loader` and compile it.
pub fn compile_package(
    loader: &dyn TypeLoader,
    options: &CompileOptions,
) -> Result<Schema, LowerError> {
    let table =
        loader
            .load_package(&options.package_id)
            .map_err(|source| LowerError::LoadFailure {
                package: options.package_id.clone(),
                source,
            })?;
    compile(&table, options)
}

/// Compile the service surface of `options.entrypoint`.
#[tracing::instrument(level = "debug", skip_all, fields(entrypoint = %options.entrypoint))]
pub fn compile(table: &SymbolTable, options: &CompileOptions) -> Result<Schema, LowerError> {
    let entrypoint = table
        .lookup_named_type(&options.entrypoint)
        .ok_or_else(|| LowerError::MissingEntrypoint {
            name: options.entrypoint.clone(),
            package: table.package_path().to_string(),
        })?;

    let enums = extract_enums(table);
    let mut conv = Converter::new(table, enums).with_fieldless(options.fieldless_types.clone());

    let excluded: FxHashSet<String> = options.excluded_methods.iter().cloned().collect();
    let mut methods = extract_methods(&mut conv, entrypoint, &excluded)?;
    if options.sort_methods {
        methods.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let service = options
        .service_name
        .clone()
        .unwrap_or_else(|| options.entrypoint.clone());
    let mut schema = Schema::new(service, conv.into_pool());
    schema.package.clone_from(&options.proto_package);
    schema.options.clone_from(&options.options);
    schema.methods = methods;

    check_type_names(&schema)?;

    tracing::info!(
        service = %schema.service,
        methods = schema.methods.len(),
        types = schema.definitions().len(),
        "schema compiled"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests;

//! The `compile` and `check` commands.

use std::io::BufWriter;
use std::path::Path;

use tyrpc_emit::{emit_schema, render, WriteEmitter};
use tyrpc_ir::Schema;
use tyrpc_lower::compile_package;
use tyrpc_native::ManifestLoader;

use crate::config::Job;
use crate::CliError;

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub service: String,
    pub methods: usize,
    pub types: usize,
}

impl Summary {
    fn of(schema: &Schema) -> Self {
        Self {
            service: schema.service.clone(),
            methods: schema.methods.len(),
            types: schema.definitions().len(),
        }
    }
}

fn build(job: &Job) -> Result<Schema, CliError> {
    let loader = ManifestLoader::new(&job.manifest_root);
    Ok(compile_package(&loader, &job.options)?)
}

/// Compile and write the schema to `job.output`. Nothing is written when
/// compilation fails.
#[tracing::instrument(level = "debug", skip_all, fields(package = %job.options.package_id))]
pub fn compile(job: &Job) -> Result<Summary, CliError> {
    let schema = build(job)?;
    write_atomic(&job.output, |out| render(&schema, out))?;
    tracing::info!(output = %job.output.display(), "schema written");
    Ok(Summary::of(&schema))
}

/// Compile and render without writing anything.
#[tracing::instrument(level = "debug", skip_all, fields(package = %job.options.package_id))]
pub fn check(job: &Job) -> Result<Summary, CliError> {
    let schema = build(job)?;
    let text = emit_schema(&schema);
    tracing::debug!(bytes = text.len(), "schema rendered");
    Ok(Summary::of(&schema))
}

/// Write through a temporary file in the destination directory, then move it
/// over `path`. Readers never observe a partial file.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<(), CliError>
where
    F: FnOnce(&mut WriteEmitter<BufWriter<&mut tempfile::NamedTempFile>>),
{
    let write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;

    {
        let mut emitter = WriteEmitter::new(BufWriter::new(&mut file));
        write(&mut emitter);
        emitter.finish().map_err(write_error)?;
    }

    file.persist(path).map_err(|error| write_error(error.error))?;
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::GenError,
    gen_cpp::{file_name, generate_record},
    layout::{compute_layout, Layout},
    options::GenOptions,
    parser::parse_schema,
    verifier::verify_schema,
};
use seristruct_schema::Schema;

/// Rendered source for one record, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub record:    String,
    pub file_name: String,
    pub source:    String,
    pub layout:    Layout,
}

/// Compile a textual schema into `(Schema, files)`, entirely in memory.
/// Returns the first parse, verification or layout error in file order.
pub fn compile_schema(text: &str, opts: &GenOptions) -> Result<(Schema, Vec<GeneratedFile>), GenError> {
    let schema = parse_schema(text)?;
    verify_schema(&schema)?;

    let files = schema
        .records
        .iter()
        .map(|record| {
            let layout = compute_layout(record)?;
            debug!(
                record = %record.name,
                fields = layout.fields.len(),
                buffer_size = layout.buffer_size,
                "computed layout"
            );
            Ok(GeneratedFile {
                record:    record.name.clone(),
                file_name: file_name(record, opts),
                source:    generate_record(record, &layout, opts),
                layout,
            })
        })
        .collect::<Result<Vec<_>, GenError>>()?;

    Ok((schema, files))
}

/// Reads the schema file, rejecting a missing input before any other work.
pub fn read_schema(input: &Path) -> Result<String, GenError> {
    if !input.is_file() {
        return Err(GenError::InputNotFound(input.to_path_buf()));
    }
    info!("Reading IDL from: {}", input.display());
    Ok(fs::read_to_string(input)?)
}

pub fn check_output_dir(output_dir: &Path) -> Result<(), GenError> {
    if output_dir.is_file() {
        return Err(GenError::OutputIsFile(output_dir.to_path_buf()));
    }
    Ok(())
}

/// Writes every file into `output_dir`, creating it if needed, one file at a time.
/// A failure leaves files written before it in place. Callers run `check_output_dir` first.
pub fn write_generated(output_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GenError> {
    fs::create_dir_all(output_dir)?;
    info!("Writing generated files to: {}", output_dir.display());

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output_dir.join(&file.file_name);
        info!("Writing {} to {}...", file.record, path.display());
        fs::write(&path, &file.source).map_err(|source| GenError::FileWriteError {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Runs the whole batch: pre-flight checks, parse, layout, render, then write.
/// Returns the files that were written, in record order.
pub fn generate_files(input: &Path, output_dir: &Path, opts: &GenOptions) -> Result<Vec<GeneratedFile>, GenError> {
    opts.validate()?;
    let text = read_schema(input)?;
    check_output_dir(output_dir)?;
    let (_schema, files) = compile_schema(&text, opts)?;
    write_generated(output_dir, &files)?;
    Ok(files)
}

//! Driver: one forward pass over the declarations, writing as it goes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::dispatch::{generate_dispatch, generate_handler};
use super::record::generate_record;
use super::templates::{render_file, PreambleTemplate, TemplateLibrary};
use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::routes::{extract_route, ReceiverRoutes};
use crate::source::{load_source, Declaration, SourceFile};

/// Placeholder path for write errors on a caller-supplied writer
const OUTPUT_PLACEHOLDER: &str = "<output>";

/// What a generator run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Records that got `bind`/`validate`, in output order
    pub records: Vec<String>,
    /// Routes grouped by receiver, as dispatched by the generated `serve`
    pub routes: ReceiverRoutes,
}

impl GenerationReport {
    /// Number of routes across all receivers
    pub fn route_count(&self) -> usize {
        self.routes.routes().count()
    }
}

/// Generate the module for `source` into `out`.
///
/// Records and handler wrappers are written as their declarations are
/// visited; `serve` blocks are written once the pass has finished. On error
/// the writer holds a partial module that must not be used.
///
/// # Errors
///
/// The first [`GenError`] met during the pass.
pub fn generate<W: Write>(
    source: &SourceFile,
    config: &GeneratorConfig,
    out: &mut W,
) -> Result<GenerationReport, GenError> {
    let library = TemplateLibrary::new(&config.error_type)?;
    let mut report = GenerationReport::default();

    let preamble = render_file(
        "preamble.rs.txt",
        &PreambleTemplate {
            source: &source.name,
            error_type: &config.error_type,
        },
    )?;
    write_chunk(out, &preamble)?;

    for declaration in &source.declarations {
        match declaration {
            Declaration::Record(record) => {
                if report.records.contains(&record.name) {
                    warn!(record = %record.name, "record declared twice, keeping the first");
                    continue;
                }
                if let Some(code) = generate_record(record, &library, &config.error_type)? {
                    write_chunk(out, &code)?;
                    info!(record = %record.name, "generated bind/validate");
                    report.records.push(record.name.clone());
                }
            }
            Declaration::Function(function) => {
                let Some(route) = extract_route(function, &config.route_marker)? else {
                    continue;
                };
                write_chunk(out, &generate_handler(&route, config)?)?;
                info!(
                    receiver = %route.receiver_type,
                    handler = %route.handler_name,
                    url = %route.url,
                    "generated handler wrapper"
                );
                report.routes.add(route);
            }
        }
    }

    for entry in report.routes.iter() {
        write_chunk(out, &generate_dispatch(entry)?)?;
        info!(receiver = %entry.receiver, routes = entry.routes.len(), "generated serve");
    }

    for route in report.routes.routes() {
        if !report.records.contains(&route.param_type) {
            warn!(
                handler = %route.handler_name,
                param_type = %route.param_type,
                "parameter type has no generated bind/validate in this file"
            );
        }
    }

    Ok(report)
}

/// Generate into a `String`
pub fn generate_to_string(
    source: &SourceFile,
    config: &GeneratorConfig,
) -> Result<(String, GenerationReport), GenError> {
    let mut buf = Vec::new();
    let report = generate(source, config, &mut buf)?;
    let code = String::from_utf8(buf).map_err(|e| GenError::template("output", e))?;
    Ok((code, report))
}

/// Read `input`, generate, and write the module to `output`.
///
/// The input is fully loaded before `output` is created, so a source error
/// never leaves a file behind.
pub fn generate_file(
    input: &Path,
    output: &Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport, GenError> {
    let source = load_source(input, &config.validator_attr)?;
    info!(
        input = %input.display(),
        declarations = source.declarations.len(),
        "loaded source"
    );

    let file = File::create(output).map_err(|e| GenError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    let result = generate(&source, config, &mut writer);
    let flushed = writer.flush();
    let report = result.map_err(|e| at_output(e, output))?;
    flushed.map_err(|e| GenError::io(output, e))?;

    info!(
        output = %output.display(),
        records = report.records.len(),
        routes = report.route_count(),
        "generated module"
    );
    Ok(report)
}

fn write_chunk<W: Write>(out: &mut W, chunk: &str) -> Result<(), GenError> {
    out.write_all(chunk.as_bytes())
        .and_then(|_| out.write_all(b"\n"))
        .map_err(|e| GenError::io(OUTPUT_PLACEHOLDER, e))
}

/// Point writer errors at the real output path
fn at_output(err: GenError, output: &Path) -> GenError {
    match err {
        GenError::Io { path, source } if path == PathBuf::from(OUTPUT_PLACEHOLDER) => {
            GenError::io(output, source)
        }
        other => other,
    }
}

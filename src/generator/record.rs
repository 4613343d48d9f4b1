//! Record generator: `bind` and `validate` for annotated record types.

use std::str::FromStr;

use tracing::{debug, warn};

use super::templates::{render_file, RecordTemplate, TemplateLibrary};
use crate::error::GenError;
use crate::rules::{Rule, RuleSet};
use crate::source::{FieldKind, RecordDecl};

/// An annotated field of a supported primitive type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Declared type, used for integer parsing
    pub rust_type: String,
    /// Raw annotation text
    pub annotation: String,
}

/// Generatable fields of a record, in declaration order.
///
/// Annotated fields of unsupported types are skipped with a warning.
pub fn field_specs(record: &RecordDecl) -> Vec<FieldSpec> {
    let mut specs = Vec::new();
    for field in &record.fields {
        let Some(annotation) = &field.annotation else {
            continue;
        };
        let Some(kind) = field.kind else {
            warn!(
                record = %record.name,
                field = %field.name,
                ty = %field.type_name,
                line = field.line,
                "annotated field has an unsupported type, skipping"
            );
            continue;
        };
        specs.push(FieldSpec {
            name: field.name.clone(),
            kind,
            rust_type: field.type_name.clone(),
            annotation: annotation.clone(),
        });
    }
    specs
}

/// Generate the `impl` block of one record type.
///
/// Returns `Ok(None)` when the record has no generatable field.
///
/// # Errors
///
/// [`GenError::RuleArgument`] when a numeric rule argument is not an integer,
/// [`GenError::Template`] when rendering fails.
pub fn generate_record(
    record: &RecordDecl,
    library: &TemplateLibrary,
    error_type: &str,
) -> Result<Option<String>, GenError> {
    let fields = field_specs(record);
    if fields.is_empty() {
        debug!(record = %record.name, "no generatable fields");
        return Ok(None);
    }

    let mut bind_fields = Vec::new();
    let mut validate_steps = Vec::new();
    for field in &fields {
        let rules = RuleSet::parse(&field.annotation);
        match rules.bind_key(&field.name) {
            Some(key) => bind_fields.push(snippet(library.render_bind(field, &key)?)),
            None => debug!(record = %record.name, field = %field.name, "binding skipped"),
        }
        for step in rules.validation_steps() {
            let argument = normalize_argument(record, field, &step.rule, step.argument)?;
            validate_steps.push(snippet(library.render_rule(
                &step.rule,
                field,
                argument.as_deref(),
            )?));
        }
    }

    let code = render_file(
        "record.rs.txt",
        &RecordTemplate {
            name: &record.name,
            error_type,
            bind_fields,
            validate_steps,
        },
    )?;
    Ok(Some(code))
}

fn snippet(rendered: String) -> String {
    rendered.trim_start_matches('\n').to_string()
}

/// Check and canonicalise a rule argument for a field kind.
///
/// Integer bounds, integer defaults and integer enum tokens must be values of
/// the field's integer type; string bounds are lengths and must be
/// non-negative. String defaults and
/// string enum tokens are taken as written.
fn normalize_argument(
    record: &RecordDecl,
    field: &FieldSpec,
    rule: &Rule,
    argument: Option<&str>,
) -> Result<Option<String>, GenError> {
    let raw = argument.unwrap_or_default();
    let invalid = || GenError::RuleArgument {
        record: record.name.clone(),
        field: field.name.clone(),
        rule: rule.name().to_string(),
        argument: raw.to_string(),
    };
    let normalized = match (rule, field.kind) {
        (Rule::Required, _) => None,
        (Rule::Min | Rule::Max, FieldKind::String) => {
            Some(raw.parse::<u64>().map_err(|_| invalid())?.to_string())
        }
        (Rule::Min | Rule::Max | Rule::Default, FieldKind::Int) => {
            Some(parse_integer(&field.rust_type, raw).ok_or_else(invalid)?)
        }
        (Rule::Enum, FieldKind::Int) => {
            let tokens = raw
                .split('|')
                .map(|token| parse_integer(&field.rust_type, token.trim()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?;
            Some(tokens.join("|"))
        }
        _ => Some(raw.to_string()),
    };
    Ok(normalized)
}

/// Parse `raw` as a value of the integer primitive named by `rust_type`
fn parse_integer(rust_type: &str, raw: &str) -> Option<String> {
    fn parse<T: FromStr + ToString>(raw: &str) -> Option<String> {
        raw.parse::<T>().ok().map(|n| n.to_string())
    }
    let name = rust_type.rsplit("::").next().unwrap_or(rust_type);
    match name {
        "i8" => parse::<i8>(raw),
        "i16" => parse::<i16>(raw),
        "i32" => parse::<i32>(raw),
        "i64" => parse::<i64>(raw),
        "i128" => parse::<i128>(raw),
        "isize" => parse::<isize>(raw),
        "u8" => parse::<u8>(raw),
        "u16" => parse::<u16>(raw),
        "u32" => parse::<u32>(raw),
        "u64" => parse::<u64>(raw),
        "u128" => parse::<u128>(raw),
        "usize" => parse::<usize>(raw),
        _ => None,
    }
}

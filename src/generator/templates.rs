//! # Template Library
//!
//! Two kinds of templates produce the generated module:
//!
//! - **File templates** (askama, `templates/*.rs.txt`): the preamble, the
//!   `bind`/`validate` impl block of a record, the per-handler wrapper and the
//!   `serve` dispatch block. Their shape never depends on annotations, so they
//!   are checked at compile time.
//! - **Rule templates** (minijinja): one snippet per field binding and per
//!   validation rule, looked up by name from [`RULE_TEMPLATES`]. Each snippet
//!   is parameterised by the field name, its kind (`int` / `string`), its Rust
//!   type and the rule argument.
//!
//! Filters available to rule templates: `lower` (built in), `enum_list`
//! (`a|b` → `a, b`), `pattern(quoted)` (`a|b` → `"a" | "b"`) and `rust_str`
//! (Rust string literal).

use askama::Template;
use minijinja::{context, Environment};

use super::record::FieldSpec;
use crate::error::GenError;
use crate::rules::Rule;

/// Name of the field binding template
pub const BIND_FIELD: &str = "bind_field";

const BIND_FIELD_TPL: &str = r#"
{%- if ty == "int" %}
        match values.get({{ key|rust_str }}).map(String::as_str).unwrap_or_default().parse::<{{ rust_type }}>() {
            Ok(value) => self.{{ field }} = value,
            Err(_) => {
                return Err({{ error_type }} {
                    http_status: http::StatusCode::BAD_REQUEST,
                    message: {{ (field|lower ~ " must be int")|rust_str }}.to_string(),
                });
            }
        }
{%- else %}
        self.{{ field }} = values.get({{ key|rust_str }}).cloned().unwrap_or_default();
{%- endif %}"#;

const DEFAULT_TPL: &str = r#"
        if self.{{ field }}{% if ty == "int" %} == 0{% else %}.is_empty(){% endif %} {
            self.{{ field }} = {% if ty == "int" %}{{ arg }}{% else %}{{ arg|rust_str }}.to_string(){% endif %};
        }"#;

const REQUIRED_TPL: &str = r#"
        if self.{{ field }}{% if ty == "int" %} == 0{% else %}.is_empty(){% endif %} {
            return Err({{ error_type }} {
                http_status: http::StatusCode::BAD_REQUEST,
                message: {{ (field|lower ~ " must me not empty")|rust_str }}.to_string(),
            });
        }"#;

const MIN_TPL: &str = r#"
{%- if ty == "int" %}
        if self.{{ field }} < {{ arg }} {
            return Err({{ error_type }} {
                http_status: http::StatusCode::BAD_REQUEST,
                message: {{ (field|lower ~ " must be >= " ~ arg)|rust_str }}.to_string(),
            });
        }
{%- else %}
        if self.{{ field }}.chars().count() < {{ arg }} {
            return Err({{ error_type }} {
                http_status: http::StatusCode::BAD_REQUEST,
                message: {{ (field|lower ~ " len must be >= " ~ arg)|rust_str }}.to_string(),
            });
        }
{%- endif %}"#;

const MAX_TPL: &str = r#"
{%- if ty == "int" %}
        if self.{{ field }} > {{ arg }} {
            return Err({{ error_type }} {
                http_status: http::StatusCode::BAD_REQUEST,
                message: {{ (field|lower ~ " must be <= " ~ arg)|rust_str }}.to_string(),
            });
        }
{%- else %}
        if self.{{ field }}.chars().count() > {{ arg }} {
            return Err({{ error_type }} {
                http_status: http::StatusCode::BAD_REQUEST,
                message: {{ (field|lower ~ " len must be <= " ~ arg)|rust_str }}.to_string(),
            });
        }
{%- endif %}"#;

const ENUM_TPL: &str = r#"
{%- if ty == "int" %}
        if !matches!(self.{{ field }}, {{ arg|pattern(false) }}) {
{%- else %}
        if !matches!(self.{{ field }}.as_str(), {{ arg|pattern(true) }}) {
{%- endif %}
            return Err({{ error_type }} {
                http_status: http::StatusCode::BAD_REQUEST,
                message: {{ (field|lower ~ " must be one of [" ~ arg|enum_list ~ "]")|rust_str }}.to_string(),
            });
        }"#;

/// Validation rule → (template name, template source)
pub static RULE_TEMPLATES: [(Rule, &str, &str); 5] = [
    (Rule::Default, "default", DEFAULT_TPL),
    (Rule::Required, "required", REQUIRED_TPL),
    (Rule::Min, "min", MIN_TPL),
    (Rule::Max, "max", MAX_TPL),
    (Rule::Enum, "enum", ENUM_TPL),
];

/// Template name used for a validation rule, if it has one
pub fn rule_template_name(rule: &Rule) -> Option<&'static str> {
    RULE_TEMPLATES
        .iter()
        .find(|(r, _, _)| r == rule)
        .map(|(_, name, _)| *name)
}

/// `a|b|c` → `a, b, c`
fn enum_list(value: String) -> String {
    value.split('|').map(str::trim).collect::<Vec<_>>().join(", ")
}

/// `a|b` → `"a" | "b"` (quoted) or `a | b`
fn enum_pattern(value: String, quoted: bool) -> String {
    value
        .split('|')
        .map(str::trim)
        .map(|token| {
            if quoted {
                format!("{token:?}")
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Quote as a Rust string literal
fn rust_str(value: String) -> String {
    format!("{value:?}")
}

/// Rule template environment plus the settings baked into every snippet
pub struct TemplateLibrary {
    env: Environment<'static>,
    error_type: String,
}

impl TemplateLibrary {
    /// Compile the rule templates.
    ///
    /// # Errors
    ///
    /// [`GenError::Template`] if a template does not compile.
    pub fn new(error_type: &str) -> Result<Self, GenError> {
        let mut env = Environment::new();
        env.add_filter("enum_list", enum_list);
        env.add_filter("pattern", enum_pattern);
        env.add_filter("rust_str", rust_str);
        env.add_template(BIND_FIELD, BIND_FIELD_TPL)
            .map_err(|e| GenError::template(BIND_FIELD, e))?;
        for &(_, name, source) in RULE_TEMPLATES.iter() {
            env.add_template(name, source)
                .map_err(|e| GenError::template(name, e))?;
        }
        Ok(Self {
            env,
            error_type: error_type.to_string(),
        })
    }

    /// Render the `bind` statement for one field read from input `key`
    pub fn render_bind(&self, field: &FieldSpec, key: &str) -> Result<String, GenError> {
        self.render(BIND_FIELD, field, key, None)
    }

    /// Render one validation rule for one field
    ///
    /// # Errors
    ///
    /// [`GenError::Template`] for rules without a template (`paramname`,
    /// unknown names) or when rendering fails.
    pub fn render_rule(
        &self,
        rule: &Rule,
        field: &FieldSpec,
        argument: Option<&str>,
    ) -> Result<String, GenError> {
        let name = rule_template_name(rule)
            .ok_or_else(|| GenError::template(rule.name(), "no template for this rule"))?;
        self.render(name, field, "", argument)
    }

    fn render(
        &self,
        name: &str,
        field: &FieldSpec,
        key: &str,
        argument: Option<&str>,
    ) -> Result<String, GenError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| GenError::template(name, e))?;
        template
            .render(context! {
                field => field.name,
                ty => field.kind.as_str(),
                rust_type => field.rust_type,
                key => key,
                arg => argument.unwrap_or_default(),
                error_type => self.error_type,
            })
            .map_err(|e| GenError::template(name, e))
    }
}

/// File header: lint allowances, imports and the helpers used by wrappers
#[derive(Template)]
#[template(path = "preamble.rs.txt", escape = "none")]
pub struct PreambleTemplate<'a> {
    /// Input file the module was generated from
    pub source: &'a str,
    pub error_type: &'a str,
}

/// `bind` and `validate` of one record type
#[derive(Template)]
#[template(path = "record.rs.txt", escape = "none")]
pub struct RecordTemplate<'a> {
    pub name: &'a str,
    pub error_type: &'a str,
    /// Rendered [`BIND_FIELD`] snippets
    pub bind_fields: Vec<String>,
    /// Rendered rule snippets in application order
    pub validate_steps: Vec<String>,
}

/// Wrapper that checks method and auth, binds, validates and calls a handler
#[derive(Template)]
#[template(path = "handler.rs.txt", escape = "none")]
pub struct HandlerTemplate<'a> {
    pub receiver: &'a str,
    pub handler: &'a str,
    pub mutable: bool,
    /// `"GET" | "POST"`
    pub methods_pattern: String,
    pub auth: bool,
    /// Header name as a Rust string literal
    pub auth_header: String,
    /// Expected token as a Rust string literal
    pub auth_token: String,
    pub param_type: &'a str,
}

/// One `match` arm of a dispatch routine
#[derive(Debug, Clone)]
pub struct DispatchArm {
    /// URL as a Rust string literal
    pub url: String,
    pub handler: String,
}

/// `serve` entry point of one receiver type
#[derive(Template)]
#[template(path = "serve.rs.txt", escape = "none")]
pub struct DispatchTemplate<'a> {
    pub receiver: &'a str,
    pub mutable: bool,
    pub routes: Vec<DispatchArm>,
}

/// Render an askama template, naming it in the error
pub(crate) fn render_file<T: Template>(name: &str, template: &T) -> Result<String, GenError> {
    template.render().map_err(|e| GenError::template(name, e))
}

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort a generator run
///
/// Every variant is fatal: the driver stops at the first one and the output
/// file (if it was already created) must not be used.
#[derive(Debug)]
pub enum GenError {
    /// Reading the input or writing the output failed
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The input is not syntactically valid Rust, or an annotation attribute
    /// does not have the `#[attr("...")]` / `#[attr = "..."]` shape
    SourceParse {
        /// Display name of the input
        file: String,
        /// 1-based line of the offending token
        line: usize,
        /// 1-based column of the offending token
        column: usize,
        /// Parser message
        message: String,
    },
    /// A route annotation payload or the annotated handler is malformed
    RouteMetadata {
        /// Handler function name
        handler: String,
        /// What is wrong with it
        message: String,
    },
    /// A numeric rule (`min`, `max`, integer `default`/`enum`) has an
    /// argument that is not an integer, or not a value of the field's type
    RuleArgument {
        /// Record type name
        record: String,
        /// Field name
        field: String,
        /// Rule name
        rule: String,
        /// Offending argument text (empty when missing)
        argument: String,
    },
    /// A template failed to render
    Template {
        /// Template name
        template: String,
        /// Engine message
        message: String,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(file: &str, err: &syn::Error) -> Self {
        let start = err.span().start();
        GenError::SourceParse {
            file: file.to_string(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }

    pub(crate) fn route(handler: &str, message: impl Into<String>) -> Self {
        GenError::RouteMetadata {
            handler: handler.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn template(template: &str, err: impl fmt::Display) -> Self {
        GenError::Template {
            template: template.to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            GenError::SourceParse {
                file,
                line,
                column,
                message,
            } => {
                write!(f, "{file}:{line}:{column}: parse error: {message}")
            }
            GenError::RouteMetadata { handler, message } => {
                write!(f, "invalid route annotation on `{handler}`: {message}")
            }
            GenError::RuleArgument {
                record,
                field,
                rule,
                argument,
            } => {
                write!(
                    f,
                    "{record}.{field}: rule `{rule}` expects an integer argument, got '{argument}'"
                )
            }
            GenError::Template { template, message } => {
                write!(f, "failed to render template '{template}': {message}")
            }
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

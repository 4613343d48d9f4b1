//! # Generator Configuration
//!
//! Names the generator looks for in the input and bakes into the output.
//! The CLI fills this from flags, falling back to `APIGEN_*` environment
//! variables and then to the defaults below.
//!
//! | Setting        | Flag             | Environment            | Default        |
//! |----------------|------------------|------------------------|----------------|
//! | route marker   | `--marker`       | `APIGEN_ROUTE_MARKER`  | `apigen:api`   |
//! | field attribute| `--attr`         | `APIGEN_VALIDATOR_ATTR`| `apivalidator` |
//! | error type     | `--error-type`   | `APIGEN_ERROR_TYPE`    | `ApiError`     |
//! | auth header    | `--auth-header`  | `APIGEN_AUTH_HEADER`   | `X-Auth`       |
//! | auth token     | `--auth-token`   | `APIGEN_AUTH_TOKEN`    | `100500`       |

/// Doc comment prefix that marks a handler as a route
pub const DEFAULT_ROUTE_MARKER: &str = "apigen:api";
/// Field attribute holding validation annotations
pub const DEFAULT_VALIDATOR_ATTR: &str = "apivalidator";
/// Structured error type constructed by generated code
pub const DEFAULT_ERROR_TYPE: &str = "ApiError";
/// Header checked by handlers declared with `"auth": true`
pub const DEFAULT_AUTH_HEADER: &str = "X-Auth";
/// Expected value of the auth header
pub const DEFAULT_AUTH_TOKEN: &str = "100500";

/// Settings for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub route_marker: String,
    pub validator_attr: String,
    pub error_type: String,
    pub auth_header: String,
    pub auth_token: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            validator_attr: DEFAULT_VALIDATOR_ATTR.to_string(),
            error_type: DEFAULT_ERROR_TYPE.to_string(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Check that every setting can be used where it ends up
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.route_marker.trim().is_empty() {
            anyhow::bail!("route marker must not be empty");
        }
        if !is_identifier(&self.validator_attr) {
            anyhow::bail!(
                "validator attribute '{}' is not a valid identifier",
                self.validator_attr
            );
        }
        if !is_identifier(&self.error_type) {
            anyhow::bail!("error type '{}' is not a valid identifier", self.error_type);
        }
        if http::HeaderName::from_bytes(self.auth_header.as_bytes()).is_err() {
            anyhow::bail!("auth header '{}' is not a valid header name", self.auth_header);
        }
        if http::HeaderValue::from_str(&self.auth_token).is_err() {
            anyhow::bail!("auth token is not a valid header value");
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    syn::parse_str::<syn::Ident>(s).is_ok()
}

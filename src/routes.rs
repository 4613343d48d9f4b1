//! # Route Metadata Extractor
//!
//! A handler becomes a route when its doc comment starts with the route
//! marker followed by a JSON object:
//!
//! ```text
//! /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
//! pub fn create(&mut self, request: &Request, params: CreateParams) -> ...
//! ```
//!
//! | Key      | Type   | Default      |
//! |----------|--------|--------------|
//! | `url`    | string | required     |
//! | `auth`   | bool   | `false`      |
//! | `method` | string | `GET\|POST`  |
//!
//! Extracted routes are collected per receiver type in [`ReceiverRoutes`],
//! which the dispatch generator reads once the whole file has been visited.

use serde::Deserialize;
use tracing::warn;

use crate::error::GenError;
use crate::source::{FunctionDecl, SelfKind};

/// Methods allowed when the annotation has no `method`
pub const DEFAULT_METHODS: [&str; 2] = ["GET", "POST"];

/// JSON payload after the marker
#[derive(Debug, Deserialize)]
struct RouteAnnotation {
    url: String,
    #[serde(default)]
    auth: Option<bool>,
    #[serde(default)]
    method: Option<String>,
}

/// Routing metadata of one handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Exact request path
    pub url: String,
    /// Allowed HTTP methods, upper-case, no duplicates
    pub methods: Vec<String>,
    pub auth_required: bool,
    pub receiver_type: String,
    /// Handler takes `&mut self`
    pub receiver_mut: bool,
    pub handler_name: String,
    /// Record type bound from the request
    pub param_type: String,
}

/// Extract route metadata from a function declaration.
///
/// Returns `Ok(None)` when the doc comment does not start with `marker`.
///
/// # Errors
///
/// [`GenError::RouteMetadata`] when the payload is not well-formed JSON with a
/// non-empty `url`, when a method name is invalid, or when the handler shape
/// cannot be dispatched to (no receiver, no `&self`, missing parameter type).
pub fn extract_route(function: &FunctionDecl, marker: &str) -> Result<Option<RouteInfo>, GenError> {
    let Some(payload) = function.doc.strip_prefix(marker) else {
        return Ok(None);
    };
    let handler = function.name.as_str();

    let annotation: RouteAnnotation =
        serde_json::from_str(payload).map_err(|e| GenError::route(handler, e.to_string()))?;
    if annotation.url.is_empty() {
        return Err(GenError::route(handler, "url must not be empty"));
    }
    let methods = parse_methods(annotation.method.as_deref().unwrap_or_default()).map_err(|m| GenError::route(handler, m))?;

    let receiver = function
        .receiver
        .as_ref()
        .ok_or_else(|| GenError::route(handler, "route handlers must be methods of a type"))?;
    if receiver.generic {
        return Err(GenError::route(
            handler,
            "route handlers must be in a non-generic impl block",
        ));
    }
    let receiver_mut = match receiver.self_kind {
        SelfKind::Ref => false,
        SelfKind::RefMut => true,
        SelfKind::None | SelfKind::Value => {
            return Err(GenError::route(
                handler,
                "route handlers must take `&self` or `&mut self`",
            ))
        }
    };

    let param_type = match function.params.get(1) {
        Some(Some(name)) => name.clone(),
        Some(None) => {
            return Err(GenError::route(
                handler,
                "second parameter must be a plain named record type",
            ))
        }
        None => {
            return Err(GenError::route(
                handler,
                "route handlers take (request, params) after the receiver",
            ))
        }
    };

    Ok(Some(RouteInfo {
        url: annotation.url,
        methods,
        auth_required: annotation.auth.unwrap_or(false),
        receiver_type: receiver.type_name.clone(),
        receiver_mut,
        handler_name: function.name.clone(),
        param_type,
    }))
}

/// Parse `"GET|post"` style method lists; empty means [`DEFAULT_METHODS`]
fn parse_methods(raw: &str) -> Result<Vec<String>, String> {
    let mut methods: Vec<String> = Vec::new();
    for token in raw.split('|').map(str::trim).filter(|t| !t.is_empty()) {
        let method = token.to_ascii_uppercase();
        if http::Method::from_bytes(method.as_bytes()).is_err() {
            return Err(format!("invalid HTTP method '{token}'"));
        }
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    if methods.is_empty() {
        methods = DEFAULT_METHODS.iter().map(|m| m.to_string()).collect();
    }
    Ok(methods)
}

/// Routes of one receiver type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverEntry {
    pub receiver: String,
    pub routes: Vec<RouteInfo>,
}

impl ReceiverEntry {
    /// Dispatch needs `&mut self` when any handler does
    pub fn needs_mut(&self) -> bool {
        self.routes.iter().any(|r| r.receiver_mut)
    }
}

/// Routes grouped by receiver type
///
/// Receivers keep first-seen order and routes keep declaration order, so the
/// generated dispatch code is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiverRoutes {
    entries: Vec<ReceiverEntry>,
}

impl ReceiverRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a route under its receiver, creating the entry if needed
    pub fn add(&mut self, route: RouteInfo) {
        let index = match self
            .entries
            .iter()
            .position(|e| e.receiver == route.receiver_type)
        {
            Some(index) => index,
            None => {
                self.entries.push(ReceiverEntry {
                    receiver: route.receiver_type.clone(),
                    routes: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[index];
        if entry.routes.iter().any(|r| r.url == route.url) {
            warn!(
                receiver = %entry.receiver,
                url = %route.url,
                handler = %route.handler_name,
                "duplicate route url, the first handler wins"
            );
        }
        entry.routes.push(route);
    }

    pub fn get(&self, receiver: &str) -> Option<&[RouteInfo]> {
        self.entries
            .iter()
            .find(|e| e.receiver == receiver)
            .map(|e| e.routes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReceiverEntry> {
        self.entries.iter()
    }

    /// Number of receiver types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every route of every receiver
    pub fn routes(&self) -> impl Iterator<Item = &RouteInfo> {
        self.entries.iter().flat_map(|e| e.routes.iter())
    }
}

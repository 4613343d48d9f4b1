//! Dispatch generator: per-handler wrappers and the `serve` entry point of
//! each receiver type.

use super::templates::{render_file, DispatchArm, DispatchTemplate, HandlerTemplate};
use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::routes::{ReceiverEntry, RouteInfo};

/// Wrapper `handle_<name>` for one route
pub fn generate_handler(route: &RouteInfo, config: &GeneratorConfig) -> Result<String, GenError> {
    let methods_pattern = route
        .methods
        .iter()
        .map(|m| format!("{m:?}"))
        .collect::<Vec<_>>()
        .join(" | ");
    render_file(
        "handler.rs.txt",
        &HandlerTemplate {
            receiver: &route.receiver_type,
            handler: &route.handler_name,
            mutable: route.receiver_mut,
            methods_pattern,
            auth: route.auth_required,
            auth_header: format!("{:?}", config.auth_header),
            auth_token: format!("{:?}", config.auth_token),
            param_type: &route.param_type,
        },
    )
}

/// `serve` for one receiver, matching request paths exactly
pub fn generate_dispatch(entry: &ReceiverEntry) -> Result<String, GenError> {
    let routes = entry
        .routes
        .iter()
        .map(|route| DispatchArm {
            url: format!("{:?}", route.url),
            handler: route.handler_name.clone(),
        })
        .collect();
    render_file(
        "serve.rs.txt",
        &DispatchTemplate {
            receiver: &entry.receiver,
            mutable: entry.needs_mut(),
            routes,
        },
    )
}

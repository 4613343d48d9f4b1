// Code generated by apigen from tests/fixtures/api.rs. DO NOT EDIT.
#![allow(dead_code, unused_imports, unused_variables, unreachable_patterns, clippy::all)]

use super::*;

use std::collections::HashMap;

// Named string inputs of one request; the first value of a repeated key wins.
pub(crate) type Values = HashMap<String, String>;

fn parse_values(raw: &[u8], values: &mut Values) {
    for (key, value) in url::form_urlencoded::parse(raw) {
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
}

fn is_form(request: &http::Request<Vec<u8>>) -> bool {
    request
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

// Form bodies are read only from non-GET requests declaring a urlencoded body.
fn request_values(request: &http::Request<Vec<u8>>) -> Values {
    let mut values = Values::new();
    if request.method() != http::Method::GET && is_form(request) {
        parse_values(request.body(), &mut values);
    }
    parse_values(request.uri().query().unwrap_or_default().as_bytes(), &mut values);
    values
}

fn envelope(error: &str, response: Option<serde_json::Value>) -> String {
    let mut body = serde_json::Map::new();
    body.insert("error".to_string(), serde_json::Value::from(error));
    if let Some(response) = response {
        body.insert("response".to_string(), response);
    }
    serde_json::Value::Object(body).to_string()
}

fn reply(status: http::StatusCode, body: String) -> http::Response<String> {
    let mut response = http::Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}

fn failure<E: std::fmt::Display + 'static>(err: E) -> http::Response<String> {
    let any: &dyn std::any::Any = &err;
    let structured = any
        .downcast_ref::<ApiError>()
        .or_else(|| {
            any.downcast_ref::<Box<dyn std::error::Error>>()
                .and_then(|boxed| boxed.downcast_ref::<ApiError>())
        })
        .or_else(|| {
            any.downcast_ref::<Box<dyn std::error::Error + Send + Sync>>()
                .and_then(|boxed| boxed.downcast_ref::<ApiError>())
        });
    match structured {
        Some(err) => reply(err.http_status, envelope(&err.message, None)),
        None => reply(
            http::StatusCode::INTERNAL_SERVER_ERROR,
            envelope(&err.to_string(), None),
        ),
    }
}

impl ProfileParams {
    pub(crate) fn bind(&mut self, values: &Values) -> Result<(), ApiError> {
        self.login = values.get("login").cloned().unwrap_or_default();
        Ok(())
    }

    pub(crate) fn validate(&mut self, _values: &Values) -> Result<(), ApiError> {
        if self.login.is_empty() {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "login must me not empty".to_string(),
            });
        }
        Ok(())
    }
}

impl CreateParams {
    pub(crate) fn bind(&mut self, values: &Values) -> Result<(), ApiError> {
        self.login = values.get("login").cloned().unwrap_or_default();
        self.name = values.get("full_name").cloned().unwrap_or_default();
        self.status = values.get("status").cloned().unwrap_or_default();
        match values.get("age").map(String::as_str).unwrap_or_default().parse::<i64>() {
            Ok(value) => self.age = value,
            Err(_) => {
                return Err(ApiError {
                    http_status: http::StatusCode::BAD_REQUEST,
                    message: "age must be int".to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn validate(&mut self, _values: &Values) -> Result<(), ApiError> {
        if self.login.is_empty() {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "login must me not empty".to_string(),
            });
        }
        if self.login.chars().count() < 10 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "login len must be >= 10".to_string(),
            });
        }
        if self.status.is_empty() {
            self.status = "user".to_string();
        }
        if !matches!(self.status.as_str(), "user" | "moderator" | "admin") {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "status must be one of [user, moderator, admin]".to_string(),
            });
        }
        if self.age < 0 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "age must be >= 0".to_string(),
            });
        }
        if self.age > 128 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "age must be <= 128".to_string(),
            });
        }
        Ok(())
    }
}

impl MyApi {
    fn handle_profile(&self, request: http::Request<Vec<u8>>) -> http::Response<String> {
        if !matches!(request.method().as_str(), "GET" | "POST") {
            return reply(http::StatusCode::NOT_ACCEPTABLE, envelope("bad method", None));
        }
        let values = request_values(&request);
        let mut params = ProfileParams::default();
        if let Err(err) = params.bind(&values) {
            return reply(err.http_status, envelope(&err.message, None));
        }
        if let Err(err) = params.validate(&values) {
            return reply(err.http_status, envelope(&err.message, None));
        }
        match self.profile(&request, params) {
            Ok(res) => match serde_json::to_value(res) {
                Ok(value) => reply(http::StatusCode::OK, envelope("", Some(value))),
                Err(err) => failure(err),
            },
            Err(err) => failure(err),
        }
    }
}

impl MyApi {
    fn handle_create(&mut self, request: http::Request<Vec<u8>>) -> http::Response<String> {
        if !matches!(request.method().as_str(), "POST") {
            return reply(http::StatusCode::NOT_ACCEPTABLE, envelope("bad method", None));
        }
        let token = request
            .headers()
            .get("X-Auth")
            .and_then(|value| value.to_str().ok());
        if token != Some("100500") {
            return reply(http::StatusCode::FORBIDDEN, envelope("unauthorized", None));
        }
        let values = request_values(&request);
        let mut params = CreateParams::default();
        if let Err(err) = params.bind(&values) {
            return reply(err.http_status, envelope(&err.message, None));
        }
        if let Err(err) = params.validate(&values) {
            return reply(err.http_status, envelope(&err.message, None));
        }
        match self.create(&request, params) {
            Ok(res) => match serde_json::to_value(res) {
                Ok(value) => reply(http::StatusCode::OK, envelope("", Some(value))),
                Err(err) => failure(err),
            },
            Err(err) => failure(err),
        }
    }
}

impl OtherCreateParams {
    pub(crate) fn bind(&mut self, values: &Values) -> Result<(), ApiError> {
        self.username = values.get("username").cloned().unwrap_or_default();
        self.name = values.get("account_name").cloned().unwrap_or_default();
        self.class = values.get("class").cloned().unwrap_or_default();
        match values.get("level").map(String::as_str).unwrap_or_default().parse::<i64>() {
            Ok(value) => self.level = value,
            Err(_) => {
                return Err(ApiError {
                    http_status: http::StatusCode::BAD_REQUEST,
                    message: "level must be int".to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn validate(&mut self, _values: &Values) -> Result<(), ApiError> {
        if self.username.is_empty() {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "username must me not empty".to_string(),
            });
        }
        if self.username.chars().count() < 3 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "username len must be >= 3".to_string(),
            });
        }
        if self.class.is_empty() {
            self.class = "warrior".to_string();
        }
        if !matches!(self.class.as_str(), "warrior" | "sorcerer" | "rouge") {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "class must be one of [warrior, sorcerer, rouge]".to_string(),
            });
        }
        if self.level < 1 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "level must be >= 1".to_string(),
            });
        }
        if self.level > 50 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "level must be <= 50".to_string(),
            });
        }
        Ok(())
    }
}

impl OtherApi {
    fn handle_create(&self, request: http::Request<Vec<u8>>) -> http::Response<String> {
        if !matches!(request.method().as_str(), "POST") {
            return reply(http::StatusCode::NOT_ACCEPTABLE, envelope("bad method", None));
        }
        let token = request
            .headers()
            .get("X-Auth")
            .and_then(|value| value.to_str().ok());
        if token != Some("100500") {
            return reply(http::StatusCode::FORBIDDEN, envelope("unauthorized", None));
        }
        let values = request_values(&request);
        let mut params = OtherCreateParams::default();
        if let Err(err) = params.bind(&values) {
            return reply(err.http_status, envelope(&err.message, None));
        }
        if let Err(err) = params.validate(&values) {
            return reply(err.http_status, envelope(&err.message, None));
        }
        match self.create(&request, params) {
            Ok(res) => match serde_json::to_value(res) {
                Ok(value) => reply(http::StatusCode::OK, envelope("", Some(value))),
                Err(err) => failure(err),
            },
            Err(err) => failure(err),
        }
    }
}

impl DefaultsParams {
    pub(crate) fn bind(&mut self, values: &Values) -> Result<(), ApiError> {
        self.role = values.get("role").cloned().unwrap_or_default();
        Ok(())
    }

    pub(crate) fn validate(&mut self, _values: &Values) -> Result<(), ApiError> {
        if self.role.is_empty() {
            self.role = "user".to_string();
        }
        if self.role.is_empty() {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "role must me not empty".to_string(),
            });
        }
        if self.limit == 0 {
            self.limit = 5;
        }
        if self.limit == 0 {
            return Err(ApiError {
                http_status: http::StatusCode::BAD_REQUEST,
                message: "limit must me not empty".to_string(),
            });
        }
        Ok(())
    }
}

impl MyApi {
    pub fn serve(&mut self, request: http::Request<Vec<u8>>) -> http::Response<String> {
        let path = request.uri().path().to_string();
        match path.as_str() {
            "/user/profile" => self.handle_profile(request),
            "/user/create" => self.handle_create(request),
            _ => reply(http::StatusCode::NOT_FOUND, envelope("unknown method", None)),
        }
    }
}

impl OtherApi {
    pub fn serve(&self, request: http::Request<Vec<u8>>) -> http::Response<String> {
        let path = request.uri().path().to_string();
        match path.as_str() {
            "/user/create" => self.handle_create(request),
            _ => reply(http::StatusCode::NOT_FOUND, envelope("unknown method", None)),
        }
    }
}

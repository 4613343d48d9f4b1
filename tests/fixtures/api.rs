//! Sample API used by the generator tests.
//!
//! `api_handlers.rs` next to this file is the checked-in output of
//! `apigen tests/fixtures/api.rs tests/fixtures/api_handlers.rs`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

#[path = "api_handlers.rs"]
mod api_handlers;

#[derive(Debug)]
pub struct ApiError {
    pub http_status: http::StatusCode,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub status: i32,
}

#[derive(Debug, Serialize)]
pub struct NewUser {
    pub id: u64,
}

#[derive(Debug, Default, apigen_macros::ApiParams)]
pub struct ProfileParams {
    #[apivalidator("required")]
    pub login: String,
}

#[derive(Debug, Default, apigen_macros::ApiParams)]
pub struct CreateParams {
    #[apivalidator("required,min=10")]
    pub login: String,
    #[apivalidator("paramname=full_name")]
    pub name: String,
    #[apivalidator("enum=user|moderator|admin,default=user")]
    pub status: String,
    #[apivalidator("min=0,max=128")]
    pub age: i64,
}

pub struct MyApi {
    users: HashMap<String, User>,
    next_id: u64,
}

impl MyApi {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "rvasily".to_string(),
            User {
                id: 42,
                login: "rvasily".to_string(),
                full_name: "Vasily Romanov".to_string(),
                status: 20,
            },
        );
        MyApi { users, next_id: 43 }
    }

    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(
        &self,
        _request: &http::Request<Vec<u8>>,
        params: ProfileParams,
    ) -> Result<User, ApiError> {
        if params.login == "bad_user" {
            return Err(ApiError {
                http_status: http::StatusCode::INTERNAL_SERVER_ERROR,
                message: "bad user".to_string(),
            });
        }
        self.users.get(&params.login).cloned().ok_or(ApiError {
            http_status: http::StatusCode::NOT_FOUND,
            message: "user not exist".to_string(),
        })
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(
        &mut self,
        _request: &http::Request<Vec<u8>>,
        params: CreateParams,
    ) -> Result<NewUser, Box<dyn std::error::Error>> {
        if self.users.contains_key(&params.login) {
            return Err(Box::new(ApiError {
                http_status: http::StatusCode::CONFLICT,
                message: "user rvasily exist".to_string(),
            }));
        }
        if params.login == "bad_username" {
            return Err("bad user".into());
        }
        let id = self.next_id;
        self.next_id += 1;
        let status = match params.status.as_str() {
            "admin" => 20,
            "moderator" => 10,
            _ => 0,
        };
        self.users.insert(
            params.login.clone(),
            User {
                id,
                login: params.login,
                full_name: params.name,
                status,
            },
        );
        Ok(NewUser { id })
    }
}

#[derive(Debug, Default, apigen_macros::ApiParams)]
pub struct OtherCreateParams {
    #[apivalidator("required,min=3")]
    pub username: String,
    #[apivalidator("paramname=account_name")]
    pub name: String,
    #[apivalidator("enum=warrior|sorcerer|rouge,default=warrior")]
    pub class: String,
    #[apivalidator("min=1,max=50")]
    pub level: i64,
}

#[derive(Debug, Serialize)]
pub struct OtherUser {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub level: i64,
}

pub struct OtherApi;

impl OtherApi {
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(
        &self,
        _request: &http::Request<Vec<u8>>,
        params: OtherCreateParams,
    ) -> Result<OtherUser, ApiError> {
        Ok(OtherUser {
            id: 12,
            login: params.username,
            full_name: params.name,
            level: params.level,
        })
    }
}

#[derive(Debug, Default, apigen_macros::ApiParams)]
pub struct DefaultsParams {
    #[apivalidator("default=user,required")]
    pub role: String,
    #[apivalidator("paramname=-,default=5,required")]
    pub limit: i64,
}

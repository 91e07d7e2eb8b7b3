//! Request and response messages of the `user.UserService` RPC surface.
//!
//! `password` and `root` are accepted from callers but never serialized back.

use serde::{Deserialize, Serialize};

use crate::models;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub login: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub register_date: String,
    #[serde(default, skip_serializing)]
    pub root: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveUserRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveUserResponse {
    pub user_id: String,
    pub saved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub deleted: bool,
}

/// Partial user for `UpdateUser`: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub credentials: Option<CredentialsUpdate>,
    #[serde(default)]
    pub root: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsUpdate {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub user: UserUpdate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserResponse {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadSpecificUsersRequest {
    #[serde(default)]
    pub user_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadUserResponse {
    pub user: User,
}

impl From<models::Credentials> for Credentials {
    fn from(creds: models::Credentials) -> Self {
        Self {
            login: creds.login,
            password: creds.password,
        }
    }
}

impl From<Credentials> for models::Credentials {
    fn from(creds: Credentials) -> Self {
        Self {
            login: creds.login,
            password: creds.password,
        }
    }
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name,
            credentials: user.credentials.into(),
            register_date: user.register_date,
            root: user.root,
        }
    }
}

impl From<UserUpdate> for models::UserChanges {
    fn from(update: UserUpdate) -> Self {
        let credentials = update.credentials.unwrap_or_default();
        Self {
            user_name: update.user_name,
            login: credentials.login,
            password: credentials.password,
            root: update.root,
        }
    }
}

impl From<models::User> for ReadUserResponse {
    fn from(user: models::User) -> Self {
        Self { user: user.into() }
    }
}

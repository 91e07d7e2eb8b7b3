use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Layout used to stamp `register_date` on new users.
pub const REGISTER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %A";

/// A user document as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub user_name: String,
    pub credentials: Credentials,
    pub register_date: String,
    pub root: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl User {
    /// Build a fresh record with a random id and the current local time.
    pub fn register(user_name: String, credentials: Credentials, root: bool) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            user_name,
            credentials,
            register_date: Local::now().format(REGISTER_DATE_FORMAT).to_string(),
            root,
        }
    }
}

/// Fields to overwrite on a stored user. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub user_name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub root: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.login.is_none()
            && self.password.is_none()
            && self.root.is_none()
    }

    /// Apply the changes in place, returning whether anything differed.
    pub fn apply(&self, user: &mut User) -> bool {
        let before = user.clone();
        if let Some(name) = &self.user_name {
            user.user_name = name.clone();
        }
        if let Some(login) = &self.login {
            user.credentials.login = login.clone();
        }
        if let Some(password) = &self.password {
            user.credentials.password = password.clone();
        }
        if let Some(root) = self.root {
            user.root = root;
        }
        *user != before
    }
}

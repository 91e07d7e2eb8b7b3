pub mod users;

use async_trait::async_trait;

use crate::models::{User, UserChanges};

pub use users::MongoUserStore;

pub const DB_NAME: &str = "applications";
pub const USERS_COLLECTION: &str = "users";

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Database(mongodb::error::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "{msg}"),
            StoreError::Database(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Match counts reported by an update. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Persistence operations over the users collection, keyed by `user_id`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn read_user(&self, user_id: &str) -> Result<User, StoreError>;
    async fn get_users(&self) -> Result<Vec<User>, StoreError>;
    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError>;
    /// Overwrites only the fields present in `changes`.
    async fn update_user(
        &self,
        user_id: &str,
        changes: &UserChanges,
    ) -> Result<UpdateOutcome, StoreError>;
}

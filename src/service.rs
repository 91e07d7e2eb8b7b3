use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{AppError, Rejected};
use crate::messages::{
    Credentials, DeleteUserResponse, ReadUserResponse, SaveUserResponse, UpdateUserResponse,
    UserUpdate,
};
use crate::models;

/// Domain logic between the RPC handlers and the user store.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user under a freshly generated id.
    ///
    /// On failure the caller receives `{user_id: "", saved: false}` with the error.
    pub async fn save_new_user(
        &self,
        credentials: Credentials,
        user_name: String,
        root: bool,
    ) -> Result<SaveUserResponse, Rejected<SaveUserResponse>> {
        tracing::debug!("Processing new user");

        let user = models::User::register(user_name, credentials.into(), root);
        self.store
            .insert_user(&user)
            .await
            .map_err(|e| Rejected::new(SaveUserResponse::default(), e))?;

        tracing::debug!(user_id = %user.user_id, "New user saved");
        Ok(SaveUserResponse {
            user_id: user.user_id,
            saved: true,
        })
    }

    pub async fn delete_user(
        &self,
        user_id: &str,
    ) -> Result<DeleteUserResponse, Rejected<DeleteUserResponse>> {
        tracing::debug!(user_id, "Processing user deletion");

        self.store
            .delete_user(user_id)
            .await
            .map_err(|e| Rejected::new(DeleteUserResponse { deleted: false }, e))?;

        tracing::debug!(user_id, "User deleted");
        Ok(DeleteUserResponse { deleted: true })
    }

    pub async fn get_user(&self, user_id: &str) -> Result<ReadUserResponse, AppError> {
        tracing::debug!(user_id, "Retrieving user");

        let user = self.store.read_user(user_id).await?;

        tracing::debug!(user_id, "User retrieved");
        Ok(user.into())
    }

    pub async fn list_users(&self) -> Result<Vec<ReadUserResponse>, AppError> {
        tracing::debug!("Retrieving all users");

        let users = self.store.get_users().await?;
        Ok(users.into_iter().map(ReadUserResponse::from).collect())
    }

    /// Overwrite the fields present in `update` on an existing user.
    ///
    /// `user_id` selects the record and is never changed, nor is `register_date`.
    pub async fn update_user(&self, update: UserUpdate) -> Result<UpdateUserResponse, AppError> {
        let user_id = update.user_id.clone();
        tracing::debug!(user_id = %user_id, "Processing user update");

        let changes = models::UserChanges::from(update);
        let outcome = self.store.update_user(&user_id, &changes).await?;
        if outcome.matched == 0 {
            return Err(AppError::NotFound(format!("user {user_id} not found")));
        }

        tracing::debug!(user_id = %user_id, modified = outcome.modified, "User updated");
        Ok(UpdateUserResponse {})
    }
}

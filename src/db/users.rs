use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection};

use super::{DB_NAME, StoreError, USERS_COLLECTION, UpdateOutcome, UserStore};
use crate::models::{User, UserChanges};

/// MongoDB-backed user store. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct MongoUserStore {
    client: Client,
}

impl MongoUserStore {
    /// Connect to `mongodb://host:port` and ping the server before returning.
    pub async fn connect(host: &str, port: u16) -> Result<Self, StoreError> {
        tracing::debug!("Creating new MongoDB connection at {host}:{port}");

        let client = Client::with_uri_str(format!("mongodb://{host}:{port}")).await?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .inspect_err(|e| tracing::error!("MongoDB ping failed: {e}"))?;

        tracing::debug!("MongoDB client created");
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn users(&self) -> Collection<User> {
        self.client.database(DB_NAME).collection(USERS_COLLECTION)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        tracing::debug!(user_id = %user.user_id, "Inserting new user");

        self.users().insert_one(user).await?;

        tracing::debug!(user_id = %user.user_id, "User inserted");
        Ok(())
    }

    async fn read_user(&self, user_id: &str) -> Result<User, StoreError> {
        tracing::debug!(user_id, "Reading user");

        self.users()
            .find_one(doc! { "user_id": user_id })
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id} not found")))
    }

    async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        tracing::debug!("Reading registered users");

        let users: Vec<User> = self.users().find(doc! {}).await?.try_collect().await?;

        tracing::debug!("Read {} registered users", users.len());
        Ok(users)
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        tracing::debug!(user_id, "Deleting user");

        let res = self.users().delete_one(doc! { "user_id": user_id }).await?;
        if res.deleted_count == 0 {
            return Err(StoreError::NotFound(
                "user with requested id wasn't found".to_string(),
            ));
        }

        tracing::debug!("Deleted {} user documents", res.deleted_count);
        Ok(())
    }

    async fn update_user(
        &self,
        user_id: &str,
        changes: &UserChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        tracing::debug!(user_id, "Updating user");

        let filter = doc! { "user_id": user_id };

        // An empty $set is rejected by the server; report the match only.
        if changes.is_empty() {
            let matched = self.users().count_documents(filter).await?;
            tracing::debug!(matched, "No user fields to update");
            return Ok(UpdateOutcome {
                matched,
                modified: 0,
            });
        }

        let res = self
            .users()
            .update_one(filter, doc! { "$set": set_document(changes) })
            .await?;

        let outcome = UpdateOutcome {
            matched: res.matched_count,
            modified: res.modified_count,
        };
        tracing::debug!(
            matched = outcome.matched,
            modified = outcome.modified,
            "User update applied"
        );
        Ok(outcome)
    }
}

fn set_document(changes: &UserChanges) -> Document {
    let mut set = Document::new();
    if let Some(name) = &changes.user_name {
        set.insert("user_name", name.as_str());
    }
    if let Some(login) = &changes.login {
        set.insert("credentials.login", login.as_str());
    }
    if let Some(password) = &changes.password {
        set.insert("credentials.password", password.as_str());
    }
    if let Some(root) = changes.root {
        set.insert("root", root);
    }
    set
}

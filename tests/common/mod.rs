use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use user_service::db::{StoreError, UpdateOutcome, UserStore};
use user_service::models::{User, UserChanges};

/// In-memory stand-in for the MongoDB collection.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn find(&self, user_id: &str) -> Option<User> {
        self.snapshot().into_iter().find(|u| u.user_id == user_id)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn read_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.find(user_id)
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id} not found")))
    }

    async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.snapshot())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.user_id != user_id);
        if users.len() == before {
            return Err(StoreError::NotFound(
                "user with requested id wasn't found".to_string(),
            ));
        }
        Ok(())
    }

    async fn update_user(
        &self,
        user_id: &str,
        changes: &UserChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut users = self.users.lock().unwrap();
        let mut outcome = UpdateOutcome::default();
        for stored in users.iter_mut().filter(|u| u.user_id == user_id) {
            outcome.matched += 1;
            if changes.apply(stored) {
                outcome.modified += 1;
            }
        }
        Ok(outcome)
    }
}

/// A store whose every call fails with a driver error.
pub struct FailingStore;

fn driver_error() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    StoreError::Database(mongodb::error::Error::from(io))
}

#[async_trait]
impl UserStore for FailingStore {
    async fn insert_user(&self, _user: &User) -> Result<(), StoreError> {
        Err(driver_error())
    }

    async fn read_user(&self, _user_id: &str) -> Result<User, StoreError> {
        Err(driver_error())
    }

    async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        Err(driver_error())
    }

    async fn delete_user(&self, _user_id: &str) -> Result<(), StoreError> {
        Err(driver_error())
    }

    async fn update_user(
        &self,
        _user_id: &str,
        _changes: &UserChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        Err(driver_error())
    }
}

/// Wraps a store and counts lookups by id.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    reads: AtomicUsize,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.inner.insert_user(user).await
    }

    async fn read_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_user(user_id).await
    }

    async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        self.inner.get_users().await
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        self.inner.delete_user(user_id).await
    }

    async fn update_user(
        &self,
        user_id: &str,
        changes: &UserChanges,
    ) -> Result<UpdateOutcome, StoreError> {
        self.inner.update_user(user_id, changes).await
    }
}

/// A running test server instance backed by a given store.
#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Call a unary RPC method and return the body + status.
    pub async fn call(&self, method: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/user.UserService/{method}")))
            .json(body)
            .send()
            .await
            .expect("rpc request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Call a server-streaming RPC method and collect every message.
    pub async fn call_stream(&self, method: &str, body: &Value) -> Vec<Value> {
        let resp = self
            .client
            .post(self.url(&format!("/user.UserService/{method}")))
            .json(body)
            .send()
            .await
            .expect("stream request failed");
        assert_eq!(resp.status(), StatusCode::OK, "stream call non-200");
        assert_eq!(
            resp.headers()["content-type"],
            "application/x-ndjson",
            "stream content type"
        );
        let text = resp.text().await.expect("stream body failed");
        text.lines()
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).expect("invalid stream message"))
            .collect()
    }

    /// Save a user, return the new user id.
    pub async fn save_user(&self, name: &str, login: &str, password: &str, root: bool) -> String {
        let (body, status) = self
            .call(
                "SaveUser",
                &json!({
                    "user_name": name,
                    "root": root,
                    "credentials": { "login": login, "password": password },
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "save user failed: {body}");
        assert_eq!(body["saved"], true);
        body["user_id"].as_str().unwrap().to_string()
    }
}

/// Spawn a test app on a random port.
#[allow(dead_code)]
pub async fn spawn_app(store: Arc<dyn UserStore>) -> TestApp {
    let app = user_service::build_app(store);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

/// Spawn a test app with a fresh in-memory store, returning both.
#[allow(dead_code)]
pub async fn spawn_memory_app() -> (TestApp, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let app = spawn_app(store.clone()).await;
    (app, store)
}

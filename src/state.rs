use std::sync::Arc;

use crate::service::UserService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub service: UserService,
}

pub mod stream;
pub mod users;

use axum::Router;
use axum::routing::post;

use crate::state::SharedState;

pub fn rpc_routes() -> Router<SharedState> {
    Router::new()
        .route("/user.UserService/SaveUser", post(users::save_user))
        .route("/user.UserService/DeleteUser", post(users::delete_user))
        .route("/user.UserService/UpdateUser", post(users::update_user))
        .route(
            "/user.UserService/ReadSpecificUsers",
            post(users::read_specific_users),
        )
        .route("/user.UserService/ListUsers", post(users::list_users))
}

use axum::Json;
use axum::extract::State;

use crate::error::{AppError, Rejected};
use crate::messages::{
    DeleteUserRequest, DeleteUserResponse, ReadSpecificUsersRequest, ReadUserResponse,
    SaveUserRequest, SaveUserResponse, UpdateUserRequest, UpdateUserResponse,
};
use crate::routes::stream::{self, NdjsonStream, StreamWriter};
use crate::service::UserService;
use crate::state::SharedState;

pub async fn save_user(
    State(state): State<SharedState>,
    Json(req): Json<SaveUserRequest>,
) -> Result<Json<SaveUserResponse>, Rejected<SaveUserResponse>> {
    tracing::info!("SaveUser request received");

    let resp = state
        .service
        .save_new_user(req.credentials, req.user_name, req.root)
        .await
        .inspect_err(|e| tracing::error!("SaveUser failed: {e}"))?;

    tracing::info!(user_id = %resp.user_id, "SaveUser processed");
    Ok(Json(resp))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    Json(req): Json<DeleteUserRequest>,
) -> Result<Json<DeleteUserResponse>, Rejected<DeleteUserResponse>> {
    tracing::info!(user_id = %req.user_id, "DeleteUser request received");

    let resp = state
        .service
        .delete_user(&req.user_id)
        .await
        .inspect_err(|e| tracing::error!(user_id = %req.user_id, "DeleteUser failed: {e}"))?;

    tracing::info!(user_id = %req.user_id, "DeleteUser processed");
    Ok(Json(resp))
}

pub async fn update_user(
    State(state): State<SharedState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, AppError> {
    let user_id = req.user.user_id.clone();
    tracing::info!(user_id = %user_id, "UpdateUser request received");

    let resp = state
        .service
        .update_user(req.user)
        .await
        .inspect_err(|e| tracing::error!(user_id = %user_id, "UpdateUser failed: {e}"))?;

    tracing::info!(user_id = %user_id, "UpdateUser processed");
    Ok(Json(resp))
}

pub async fn read_specific_users(
    State(state): State<SharedState>,
    Json(req): Json<ReadSpecificUsersRequest>,
) -> NdjsonStream<ReadUserResponse> {
    tracing::info!(count = req.user_ids.len(), "ReadSpecificUsers stream opened");

    let (writer, body) = stream::channel();
    tokio::spawn(async move {
        send_users(&state.service, &req.user_ids, &writer).await;
        tracing::info!("ReadSpecificUsers stream processed");
    });
    body
}

/// Look up each id in order and write it to the stream.
///
/// Lookup and write failures are logged and skipped; the remaining ids are
/// still processed.
pub async fn send_users(
    service: &UserService,
    user_ids: &[String],
    writer: &StreamWriter<ReadUserResponse>,
) {
    for user_id in user_ids {
        let resp = match service.get_user(user_id).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(user_id = %user_id, "Failed to retrieve user: {e}");
                continue;
            }
        };

        if let Err(e) = writer.send(resp).await {
            tracing::error!(user_id = %user_id, "Failed to send result: {e}");
        }
    }
}

pub async fn list_users(
    State(state): State<SharedState>,
) -> Result<NdjsonStream<ReadUserResponse>, AppError> {
    tracing::info!("ListUsers stream opened");

    let users = state
        .service
        .list_users()
        .await
        .inspect_err(|e| tracing::error!("ListUsers failed: {e}"))?;

    let (writer, body) = stream::channel();
    tokio::spawn(async move {
        for resp in users {
            if let Err(e) = writer.send(resp).await {
                tracing::error!("Failed to send result: {e}");
            }
        }
        tracing::info!("ListUsers stream processed");
    });
    Ok(body)
}

//! Handlers for the user collection and single users.
//!
//! Handlers that address one user parse the `{id}` segment before they look
//! at the body or the store, so a malformed id never costs a lock.

use serde::Serialize;
use tracing::{debug, info};

use super::ApiError;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::UserStore;
use crate::user::{UserId, UserInput};

/// `GET /users` — every record, as an object keyed by id.
pub async fn list_users(_req: Request, store: UserStore) -> Result<Response, ApiError> {
    let users = store.all().await;
    json(&users)
}

/// `POST /users` — stores the body under a fresh id and echoes the record.
///
/// Answers `200`, not `201`.
pub async fn create_user(req: Request, store: UserStore) -> Result<Response, ApiError> {
    let input = user_input(&req)?;
    debug!(?input, "creating user");

    let user = input.into_user(UserId::generate());
    store.insert(user.clone()).await;
    info!(id = %user.id, "user created");

    json(&user)
}

/// `GET /users/{id}`
pub async fn get_user(req: Request, store: UserStore) -> Result<Response, ApiError> {
    let id = user_id(&req)?;
    let user = store.get(&id).await.ok_or(ApiError::UserNotFound)?;
    json(&user)
}

/// `PUT /users/{id}` — replaces every field, keeping the id from the path.
///
/// Creates the record when the id is not stored yet. A body that does not
/// decode is rejected before anything is written.
pub async fn update_user(req: Request, store: UserStore) -> Result<Response, ApiError> {
    let id = user_id(&req)?;
    let input = user_input(&req)?;

    let user = input.into_user(id);
    let previous = store.insert(user.clone()).await;
    info!(%id, created = previous.is_none(), "user updated");

    json(&user)
}

/// `DELETE /users/{id}` — `204` with no body.
pub async fn delete_user(req: Request, store: UserStore) -> Result<Response, ApiError> {
    let id = user_id(&req)?;
    store.remove(&id).await.ok_or(ApiError::UserNotFound)?;
    info!(%id, "user deleted");

    Ok(Response::status(Status::NoContent))
}

fn user_id(req: &Request) -> Result<UserId, ApiError> {
    match req.param_as::<UserId>("id") {
        Some(Ok(id)) => Ok(id),
        _ => Err(ApiError::InvalidId),
    }
}

fn user_input(req: &Request) -> Result<UserInput, ApiError> {
    req.json().map_err(ApiError::InvalidBody)
}

fn json<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    serde_json::to_vec(value)
        .map(Response::json)
        .map_err(ApiError::Encode)
}

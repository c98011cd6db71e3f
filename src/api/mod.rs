//! The `/users` REST API.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/users` | [`users::list_users`] |
//! | POST | `/users` | [`users::create_user`] |
//! | GET | `/users/{id}` | [`users::get_user`] |
//! | PUT | `/users/{id}` | [`users::update_user`] |
//! | DELETE | `/users/{id}` | [`users::delete_user`] |
//!
//! `OPTIONS` on any path is answered by [`Cors`] before routing, and every
//! other response leaves with `Content-Type: application/json` plus the
//! permissive CORS headers, errors included.

use std::fmt;

use tracing::debug;

use crate::middleware::{Cors, SetResponseHeader, Trace};
use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::UserStore;
use crate::{Method, Router};

pub mod users;

/// Builds the application: routes, middleware and the store they share.
pub fn router(store: UserStore) -> Router<UserStore> {
    Router::with_state(store)
        .on(Method::Get,    "/users",      users::list_users)
        .on(Method::Post,   "/users",      users::create_user)
        .on(Method::Get,    "/users/{id}", users::get_user)
        .on(Method::Put,    "/users/{id}", users::update_user)
        .on(Method::Delete, "/users/{id}", users::delete_user)
        .layer(Trace)
        .layer(Cors::permissive())
        .layer(SetResponseHeader::overriding("content-type", "application/json"))
}

/// Why a `/users` request failed. Each variant maps to one status code and
/// a plain-text body.
#[derive(Debug)]
pub enum ApiError {
    /// The `{id}` path segment is not a UUID.
    InvalidId,
    /// The body does not decode into a user input.
    InvalidBody(serde_json::Error),
    UserNotFound,
    /// The response could not be serialized.
    Encode(serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidId | Self::InvalidBody(_) => Status::BadRequest,
            Self::UserNotFound => Status::NotFound,
            Self::Encode(_) => Status::InternalServerError,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => f.write_str("Invalid UUID"),
            Self::InvalidBody(_) => f.write_str(Status::BadRequest.reason()),
            Self::UserNotFound => f.write_str("User not found"),
            Self::Encode(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBody(e) | Self::Encode(e) => Some(e),
            Self::InvalidId | Self::UserNotFound => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(error = ?self, "request rejected");
        Response::builder()
            .status(self.status())
            .text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_and_body() {
        let bad_json = serde_json::from_str::<u8>("x").unwrap_err();

        let res = ApiError::InvalidBody(bad_json).into_response();
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.body(), b"Bad Request");

        let res = ApiError::InvalidId.into_response();
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.body(), b"Invalid UUID");

        let res = ApiError::UserNotFound.into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), b"User not found");
    }
}

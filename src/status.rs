//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use roster::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NoContent);
//!
//! // plain-text error with the standard reason phrase as body
//! Response::builder()
//!     .status(Status::BadRequest)
//!     .text(Status::BadRequest.reason());
//! ```

/// The status codes this service answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    NoContent,           // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl Status {
    /// Standard reason phrase, e.g. `"Bad Request"`.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                  => "OK",
            Self::NoContent           => "No Content",
            Self::BadRequest          => "Bad Request",
            Self::NotFound            => "Not Found",
            Self::MethodNotAllowed    => "Method Not Allowed",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NoContent           => 204,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
        }
    }
}

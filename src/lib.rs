//! # roster
//!
//! A small HTTP service keeping user records in memory and exposing them as
//! REST over JSON. Records are keyed by a server-generated UUID and vanish
//! when the process exits.
//!
//! ## Layout
//!
//! - [`api`] — the `/users` routes, their handlers and [`api::ApiError`]
//! - [`UserStore`] — the records, behind an async read-write lock
//! - [`User`], [`UserInput`], [`UserId`] — the data model
//! - [`Router`], [`Server`], [`middleware`] — the HTTP plumbing: a radix-tree
//!   router over hyper, with trace, CORS and header layers
//! - [`Config`] — listen address from `HOST` / `PORT`
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use roster::{Config, Server, UserStore, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roster::Error> {
//!     let config = Config::from_env()?;
//!     Server::bind(config.addr).serve(api::router(UserStore::new())).await
//! }
//! ```
//!
//! The router can also be driven without a socket, which is how the tests
//! exercise it:
//!
//! ```rust
//! use roster::{Method, Request, UserStore, api};
//!
//! # tokio_test();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test() {
//! let app = api::router(UserStore::new());
//! let res = app.dispatch(Request::new(Method::Get, "/users")).await;
//! assert_eq!(res.status_code(), 200);
//! assert_eq!(res.body(), b"{}");
//! # }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;
mod user;

pub mod api;
pub mod middleware;

pub use config::Config;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::UserStore;
pub use user::{User, UserId, UserInput};

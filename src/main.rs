//! `roster` binary: serves the `/users` API until SIGTERM or Ctrl-C.
//!
//! Run with:
//!   RUST_LOG=debug cargo run
//!
//! Try:
//!   curl -X POST http://localhost:8080/users \
//!        -H 'content-type: application/json' \
//!        -d '{"firstname":"Ada","lastname":"Lovelace","age":36}'
//!   curl http://localhost:8080/users
//!   curl http://localhost:8080/users/<id>
//!   curl -X DELETE http://localhost:8080/users/<id>

use roster::{Config, Server, UserStore, api};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), roster::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let app = api::router(UserStore::new());

    Server::bind(config.addr).serve(app).await
}

//! HTTP server and graceful shutdown.
//!
//! On **SIGTERM** (container orchestrators) or **SIGINT** (Ctrl-C) the
//! server:
//! 1. Immediately stops `listener.accept()`. No new connections are made.
//! 2. Tells every open connection to finish its in-flight request and then
//!    close. Idle keep-alive connections close right away.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.
//!
//! Records live only in memory, so everything stored is gone once `serve`
//! returns.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::request::Request;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    bind: Bind,
}

enum Bind {
    Addr(SocketAddr),
    Listener(TcpListener),
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use roster::Server;
    /// let server = Server::bind("0.0.0.0:8080".parse().unwrap());
    /// ```
    pub fn bind(addr: SocketAddr) -> Self {
        Self { bind: Bind::Addr(addr) }
    }

    /// Serves on a listener that is already bound, e.g. to port 0 so the
    /// caller can learn the port first.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { bind: Bind::Listener(listener) }
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting once `signal`
    /// resolves instead of waiting for a process signal.
    pub async fn serve_with_shutdown<S>(
        self,
        router: Router<S>,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        let listener = match self.bind {
            Bind::Addr(addr) => TcpListener::bind(addr).await?,
            Bind::Listener(listener) => listener,
        };
        let addr = listener.local_addr()?;

        // Shared across connection tasks without copying the routing table.
        let router = Arc::new(router);

        info!(%addr, "roster listening");

        // Tracks every spawned connection task so shutdown can wait for them.
        let mut tasks = tokio::task::JoinSet::new();
        // Lets shutdown ask each connection to close once its current
        // request is answered.
        let graceful = GracefulShutdown::new();
        let builder = ConnBuilder::new(TokioExecutor::new());

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal immediately stops accepting
                // new connections, even if more are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    // Called once per request on the connection, not once
                    // per connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req).await }
                    });

                    // HTTP/1.1 or HTTP/2, whatever the client negotiates.
                    let conn = builder.serve_connection(io, svc).into_owned();
                    let conn = graceful.watch(conn);

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);
        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("roster stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Every failure becomes a response (400, 404, 405, 500…), so hyper never
/// sees an error.
async fn dispatch<S>(
    router: Arc<Router<S>>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    let req = Request::from_hyper(req).await;
    Ok(router.dispatch(req).await.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both SIGTERM and SIGINT; elsewhere only Ctrl-C
/// is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

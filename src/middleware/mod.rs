//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: request tracing, CORS, headers every response
//! must carry. Register layers with [`Router::layer`](crate::Router::layer).
//!
//! ```text
//! request ──▶ Trace ──▶ Cors ──▶ SetResponseHeader ──▶ handler
//! response ◀─ Trace ◀── Cors ◀── SetResponseHeader ◀──┘
//! ```
//!
//! A layer either calls [`Next::run`] to continue down the chain or returns
//! its own response and short-circuits it (what [`Cors`] does for preflight
//! requests).

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;

mod cors;
mod headers;
mod trace;

pub use cors::Cors;
pub use headers::SetResponseHeader;
pub use trace::Trace;

/// A cross-cutting step wrapped around every routed request.
///
/// The returned future must be `'static`: clone whatever configuration the
/// layer needs into it instead of borrowing `self`.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The rest of the chain after the current layer.
pub struct Next {
    endpoint: BoxedHandler,
    layers: Arc<[BoxedMiddleware]>,
    index: usize,
}

impl Next {
    pub(crate) fn new(endpoint: BoxedHandler, layers: Arc<[BoxedMiddleware]>) -> Self {
        Self { endpoint, layers, index: 0 }
    }

    /// Passes `req` to the next layer, or to the handler once the layers
    /// are exhausted.
    pub fn run(mut self, req: Request) -> BoxFuture {
        let layer = self.layers.get(self.index).cloned();
        match layer {
            Some(layer) => {
                self.index += 1;
                layer.handle(req, self)
            }
            None => self.endpoint.call(req),
        }
    }
}

//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types in one table. Rust
//! collections can only hold one concrete type, so each handler is hidden
//! behind a trait object (`dyn ErasedHandler`) together with a clone of the
//! router state it was registered with.
//!
//! ```text
//! async fn get_user(req: Request, store: UserStore) -> … { … }   ← user writes this
//!        ↓ Router::with_state(store).on(Method::Get, "/users/{id}", get_user)
//! get_user.into_boxed_handler(store)                 ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler { f: get_user, state: store })  ← state captured once
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time                 ← one vtable dispatch
//!        ↓
//! Box::pin(async { get_user(req, store.clone()).await.into_response() })
//! ```
//!
//! Per request that costs one Arc clone, one state clone and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Pin<Box<…>>` is required because the async runtime must be able to poll
/// the future in-place. `Send + 'static` let tokio move it across threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request, state: S) -> impl IntoResponse
/// ```
///
/// where `S` is the router's state type. The trait is **sealed**: only the
/// blanket impl below can satisfy it.
pub trait Handler<S>: private::Sealed<S> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self, state: S) -> BoxedHandler;
}

mod private {
    pub trait Sealed<S> {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R, S> private::Sealed<S> for F
where
    F: Fn(Request, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Clone + Send + Sync + 'static,
{
}

impl<F, Fut, R, S> Handler<S> for F
where
    F: Fn(Request, S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Clone + Send + Sync + 'static,
{
    fn into_boxed_handler(self, state: S) -> BoxedHandler {
        Arc::new(FnHandler { f: self, state })
    }
}

// ── Concrete wrappers ─────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and its state, bridging the typed world to
/// the trait-object world.
struct FnHandler<F, S> {
    f: F,
    state: S,
}

impl<F, Fut, R, S> ErasedHandler for FnHandler<F, S>
where
    F: Fn(Request, S) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Clone,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.f)(req, self.state.clone());
        Box::pin(async move { fut.await.into_response() })
    }
}

/// A handler that ignores the request and answers with a fixed response.
///
/// The router uses these for unmatched paths and methods so that those
/// responses still travel through the middleware chain.
pub(crate) struct Fallback(pub(crate) fn() -> Response);

impl ErasedHandler for Fallback {
    fn call(&self, _req: Request) -> BoxFuture {
        let res = (self.0)();
        Box::pin(async move { res })
    }
}

/// `405 Method Not Allowed` with an `Allow` header naming what the path
/// does accept.
pub(crate) struct MethodNotAllowed {
    pub(crate) allow: String,
}

impl ErasedHandler for MethodNotAllowed {
    fn call(&self, _req: Request) -> BoxFuture {
        use crate::status::Status;

        let res = Response::builder()
            .status(Status::MethodNotAllowed)
            .header("allow", &self.allow)
            .text(Status::MethodNotAllowed.reason());
        Box::pin(async move { res })
    }
}

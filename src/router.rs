//! Radix-tree request router.
//!
//! One tree over path patterns; every pattern owns a small per-method table.
//! Splitting it that way is what lets the router tell "no such path" (404)
//! apart from "path exists, wrong method" (405).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Fallback, Handler, MethodNotAllowed};
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup with the state every handler receives, then
/// pass it to [`Server::serve`](crate::Server::serve). Each call returns
/// `self` so registrations chain naturally.
pub struct Router<S> {
    state: S,
    tree: MatchitRouter<usize>,
    patterns: HashMap<String, usize>,
    routes: Vec<BTreeMap<Method, BoxedHandler>>,
    layers: Arc<[BoxedMiddleware]>,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty router whose handlers all receive a clone of `state`.
    pub fn with_state(state: S) -> Self {
        Self {
            state,
            tree: MatchitRouter::new(),
            patterns: HashMap::new(),
            routes: Vec::new(),
            layers: Arc::from(Vec::new()),
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use roster::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request, _: ()) -> Response { Response::text("") }
    /// # async fn delete_user(_: Request, _: ()) -> Response { Response::text("") }
    /// Router::with_state(())
    ///     .on(Method::Get,    "/users/{id}", get_user)
    ///     .on(Method::Delete, "/users/{id}", delete_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern, conflicts with an
    /// existing one, or already has a handler for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        let index = match self.patterns.get(path) {
            Some(&index) => index,
            None => {
                let index = self.routes.len();
                self.tree
                    .insert(path, index)
                    .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
                self.patterns.insert(path.to_owned(), index);
                self.routes.push(BTreeMap::new());
                index
            }
        };

        let boxed = handler.into_boxed_handler(self.state.clone());
        if self.routes[index].insert(method, boxed).is_some() {
            panic!("duplicate route `{method} {path}`");
        }
        self
    }

    /// Wraps every request in `middleware`.
    ///
    /// Layers run in the order they were added: the first one sees the
    /// request first and the response last.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        let mut layers = self.layers.to_vec();
        layers.push(Arc::new(middleware));
        self.layers = layers.into();
        self
    }

    /// Routes one request through the middleware chain to its handler.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let endpoint = self.resolve(&mut req);
        Next::new(endpoint, Arc::clone(&self.layers)).run(req).await
    }

    /// Picks the endpoint for `req` and fills in its path parameters.
    fn resolve(&self, req: &mut Request) -> BoxedHandler {
        let (index, params) = match self.tree.at(&req.path) {
            Ok(matched) => {
                let params: HashMap<String, String> = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                (*matched.value, params)
            }
            Err(_) => return Arc::new(Fallback(not_found)),
        };
        req.params = params;

        let handlers = &self.routes[index];
        match req.method.and_then(|method| handlers.get(&method)) {
            // A handler would only see a truncated body.
            Some(_) if req.body_unreadable => Arc::new(Fallback(bad_request)),
            Some(handler) => Arc::clone(handler),
            None => {
                let allow = handlers.keys()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Arc::new(MethodNotAllowed { allow })
            }
        }
    }
}

fn not_found() -> Response {
    Response::builder()
        .status(Status::NotFound)
        .text(Status::NotFound.reason())
}

fn bad_request() -> Response {
    Response::builder()
        .status(Status::BadRequest)
        .text(Status::BadRequest.reason())
}

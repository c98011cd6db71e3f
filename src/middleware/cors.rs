//! Cross-origin resource sharing.

use tracing::debug;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Answers preflight requests and stamps CORS headers on every response.
///
/// Any `OPTIONS` request is treated as a preflight: it gets `200` with an
/// empty body and the CORS headers, and never reaches the router's handlers.
///
/// ```rust
/// use roster::middleware::Cors;
/// use roster::Method;
///
/// let cors = Cors::permissive().allow_methods(&[Method::Get, Method::Post]);
/// ```
#[derive(Clone, Debug)]
pub struct Cors {
    allow_origin: String,
    allow_headers: Option<String>,
    allow_methods: Option<String>,
}

impl Cors {
    /// Any origin, `Content-Type` as the only extra request header.
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*".to_owned(),
            allow_headers: Some("Content-Type".to_owned()),
            allow_methods: None,
        }
    }

    pub fn allow_origin(mut self, origin: &str) -> Self {
        self.allow_origin = origin.to_owned();
        self
    }

    pub fn allow_headers(mut self, headers: &[&str]) -> Self {
        self.allow_headers = Some(headers.join(", "));
        self
    }

    pub fn allow_methods(mut self, methods: &[Method]) -> Self {
        let names: Vec<&str> = methods.iter().map(|m| m.as_str()).collect();
        self.allow_methods = Some(names.join(", "));
        self
    }

    fn decorate(&self, res: &mut Response) {
        res.set_header("access-control-allow-origin", &self.allow_origin);
        if let Some(headers) = &self.allow_headers {
            res.set_header("access-control-allow-headers", headers);
        }
        if let Some(methods) = &self.allow_methods {
            res.set_header("access-control-allow-methods", methods);
        }
    }
}

impl Middleware for Cors {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let cors = self.clone();

        if req.method() == Some(Method::Options) {
            debug!(path = %req.path(), "answering preflight");
            let mut res = Response::status(Status::Ok);
            cors.decorate(&mut res);
            return Box::pin(async move { res });
        }

        Box::pin(async move {
            let mut res = next.run(req).await;
            cors.decorate(&mut res);
            res
        })
    }
}

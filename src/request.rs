//! Incoming HTTP request type.

use std::collections::HashMap;
use std::str::FromStr;

use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::method::Method;

/// An incoming HTTP request with its body fully read.
pub struct Request {
    /// `None` for methods outside RFC 9110; `method_name` still has the
    /// wire spelling.
    pub(crate) method: Option<Method>,
    pub(crate) method_name: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<u8>,
    /// Set when the connection failed while the body was being read.
    pub(crate) body_unreadable: bool,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// Builds a request by hand, useful for driving a
    /// [`Router`](crate::Router) without a socket.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self::with_method_name(method.as_str(), path)
    }

    /// Like [`new`](Self::new), but takes the method as it appears on the
    /// wire, so methods without a [`Method`] variant can be expressed.
    pub fn with_method_name(method: &str, path: impl Into<String>) -> Self {
        Self {
            method: method.parse().ok(),
            method_name: method.to_owned(),
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
            body_unreadable: false,
            params: HashMap::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Converts a hyper request, reading the whole body.
    ///
    /// Nothing is rejected here. An unknown method or a body that fails
    /// mid-read is recorded on the request, and the router answers it
    /// through the middleware chain like any other response.
    pub(crate) async fn from_hyper(req: hyper::Request<hyper::body::Incoming>) -> Self {
        let (parts, body) = req.into_parts();

        let mut req = Self::with_method_name(parts.method.as_str(), parts.uri.path());
        if req.method.is_none() {
            debug!(method = %parts.method, "unsupported method");
        }

        match body.collect().await {
            Ok(collected) => req.body = collected.to_bytes().to_vec(),
            Err(e) => {
                debug!("failed to read request body: {e}");
                req.body_unreadable = true;
            }
        }

        req.headers = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        req
    }

    /// The method, or `None` when it is not one of RFC 9110's.
    pub fn method(&self) -> Option<Method> { self.method }
    /// The method exactly as received.
    pub fn method_name(&self) -> &str { &self.method_name }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a named path parameter parsed into `T`.
    ///
    /// `None` if the route has no such parameter, `Some(Err(_))` if it does
    /// but the segment does not parse.
    pub fn param_as<T: FromStr>(&self, key: &str) -> Option<Result<T, T::Err>> {
        self.param(key).map(str::parse)
    }

    /// Deserializes the first JSON value in the body.
    ///
    /// Anything after that value is ignored, so `{"age":1} trailing` decodes
    /// like `{"age":1}`. An empty body is an EOF error.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match serde_json::Deserializer::from_slice(&self.body).into_iter::<T>().next() {
            Some(value) => value,
            None => serde_json::from_slice(&self.body),
        }
    }
}

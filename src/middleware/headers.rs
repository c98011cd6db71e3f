//! Headers every response must carry.

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Sets a header on every response that passes through, replacing whatever
/// the handler put there.
#[derive(Clone, Debug)]
pub struct SetResponseHeader {
    name: String,
    value: String,
}

impl SetResponseHeader {
    pub fn overriding(name: &str, value: &str) -> Self {
        Self { name: name.to_owned(), value: value.to_owned() }
    }
}

impl Middleware for SetResponseHeader {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let header = self.clone();
        Box::pin(async move {
            let mut res = next.run(req).await;
            res.set_header(&header.name, &header.value);
            res
        })
    }
}

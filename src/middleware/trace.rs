//! Per-request tracing span.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Opens a `request` span (method, path) around the rest of the chain and
/// logs status and latency once the response is ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("request", method = %req.method_name(), path = %req.path());

        Box::pin(
            async move {
                let started = Instant::now();
                let res = next.run(req).await;
                info!(
                    status = res.status_code(),
                    latency_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                    "request finished"
                );
                res
            }
            .instrument(span),
        )
    }
}

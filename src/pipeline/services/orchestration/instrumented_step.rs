use futures::future::BoxFuture;
use std::fmt::Display;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::Service;
use tower_layer::Layer;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::pipeline::types::{AnalyzeRequest, StylingRequest};

/// Requests that carry a correlation id for log output.
pub trait RequestId {
    fn request_id(&self) -> Option<Uuid>;
}

impl RequestId for AnalyzeRequest {
    fn request_id(&self) -> Option<Uuid> {
        Some(self.request_id)
    }
}

impl RequestId for StylingRequest {
    fn request_id(&self) -> Option<Uuid> {
        None
    }
}

/// Wraps a service with a tracing span plus timing and error logs.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentLayer {
    name: &'static str,
}

impl InstrumentLayer {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl<S> Layer<S> for InstrumentLayer {
    type Service = Instrumented<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Instrumented {
            inner,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Instrumented<S> {
    inner: S,
    name: &'static str,
}

impl<S> Instrumented<S> {
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Request> Service<Request> for Instrumented<S>
where
    S: Service<Request>,
    S::Future: Send + 'static,
    S::Response: 'static,
    S::Error: Display + 'static,
    Request: RequestId,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let request_id = request
            .request_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let span = info_span!("service", service = self.name, request_id = %request_id);
        let name = self.name;
        let start = Instant::now();

        let future = {
            let _enter = span.enter();
            self.inner.call(request)
        };

        Box::pin(
            async move {
                let result = future.await;
                let duration_us = start.elapsed().as_micros() as u64;

                match &result {
                    Ok(_) => {
                        debug!("Completed '{}' successfully in {}us", name, duration_us);
                    }
                    Err(e) => {
                        tracing::error!("'{}' failed after {}us: {}", name, duration_us, e);
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

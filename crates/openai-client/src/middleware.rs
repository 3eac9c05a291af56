use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::{
    transport::{ApiRequest, ApiResponse, Transport},
    OpenAIResult,
};

/// A stage in the client's request pipeline.
///
/// A middleware sees every request before the transport does, and decides
/// whether (and with what request) to continue by calling [`Next::run`].
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn intercept(
        &self,
        request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
        next: Next<'_>,
    ) -> OpenAIResult<ApiResponse>;
}

/// The rest of the pipeline: the remaining middlewares, then the transport.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    middlewares: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, middlewares: &'a [Arc<dyn Middleware>]) -> Self {
        Self {
            transport,
            middlewares,
        }
    }

    /// Runs the remainder of the pipeline with `request`.
    pub async fn run(
        self,
        request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
    ) -> OpenAIResult<ApiResponse> {
        match self.middlewares.split_first() {
            Some((current, rest)) => {
                let next = Next::new(self.transport, rest);
                current
                    .intercept(request, base_url, operation_id, next)
                    .await
            }
            None => self.transport.send(request, base_url, operation_id).await,
        }
    }
}

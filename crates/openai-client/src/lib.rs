//! A small client for the [OpenAI API](https://platform.openai.com/docs/api-reference).
//!
//! Requests go through a chain of [`Middleware`]s before reaching a
//! [`Transport`]. The client built by [`OpenAI::client`] always installs
//! [`AuthenticationMiddleware`] first, so every request is signed with the
//! configured key. Only a handful of endpoints are covered, see [`OpenAIApi`].

mod auth;
mod client;
mod config;
pub mod endpoints;
pub mod error;
mod middleware;
mod transport;

use std::sync::Arc;

pub use auth::AuthenticationMiddleware;
pub use client::{Client, OpenAIApi};
pub use config::{Configuration, DEFAULT_BASE_URL};
pub use error::{OpenAIError, OpenAIResult};
pub use middleware::{Middleware, Next};
use serde::Deserialize;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

/// Entry point for building clients.
pub struct OpenAI;

impl OpenAI {
    /// Builds a client from `configuration`: authentication first, then any extra
    /// middlewares, then the configured transport.
    ///
    /// Fails only if the api key can't be sent as a header.
    pub fn client(
        configuration: &Configuration,
    ) -> OpenAIResult<impl OpenAIApi + Clone + Send + Sync + 'static> {
        let auth: Arc<dyn Middleware> =
            Arc::new(AuthenticationMiddleware::new(configuration.api_key())?);

        let middlewares = std::iter::once(auth)
            .chain(configuration.middlewares().iter().cloned())
            .collect();

        Ok(Client::new(
            configuration.base_url().clone(),
            Arc::clone(configuration.transport()),
            middlewares,
        ))
    }
}

/// The token usage of a request.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

use std::sync::Arc;

use bon::Builder;
use url::Url;

use crate::{
    middleware::Middleware,
    transport::{ReqwestTransport, Transport},
    OpenAIError, OpenAIResult,
};

/// The endpoint used unless a configuration says otherwise.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Everything needed to build a client: who we are, where to send requests, and how.
///
/// ```no_run
/// use std::sync::Arc;
/// use openai_client::{Configuration, ReqwestTransport};
///
/// // defaults: the public API endpoint over reqwest
/// let config = Configuration::new("sk-...");
///
/// // or override pieces of it
/// let config = Configuration::with_api_key("sk-...".to_string())
///     .base_url("http://localhost:8080/v1".parse().unwrap())
///     .transport(Arc::new(ReqwestTransport::new()))
///     .build();
/// ```
#[derive(Builder, Clone)]
#[builder(start_fn = with_api_key)]
pub struct Configuration {
    #[builder(start_fn)]
    api_key: String,
    #[builder(default = default_base_url())]
    base_url: Url,
    #[builder(default = default_transport())]
    transport: Arc<dyn Transport>,
    /// Extra middlewares, run in order after authentication.
    #[builder(default)]
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Configuration {
    const API_KEY_VAR: &'static str = "OPENAI_API_KEY";
    const BASE_URL_VAR: &'static str = "OPENAI_BASE_URL";

    /// A configuration for the public API endpoint using the default transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_key(api_key.into()).build()
    }

    /// Reads the key from `OPENAI_API_KEY` and, if set, the base URL from `OPENAI_BASE_URL`.
    pub fn from_env() -> OpenAIResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> OpenAIResult<Self> {
        let api_key = lookup(Self::API_KEY_VAR).ok_or(OpenAIError::MissingAuthToken)?;
        let base_url = lookup(Self::BASE_URL_VAR)
            .map(|url| Url::parse(&url))
            .transpose()?;

        Ok(Self::with_api_key(api_key)
            .maybe_base_url(base_url)
            .build())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base url is a valid absolute url")
}

fn default_transport() -> Arc<dyn Transport> {
    Arc::new(ReqwestTransport::new())
}

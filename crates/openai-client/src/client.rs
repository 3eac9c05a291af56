use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::{instrument, Span};
use url::Url;

use crate::{
    endpoints::{
        chat::{ChatCompletion, ChatCompletionResponse},
        embeddings::{Embeddings, EmbeddingsResponse},
        models::{ListModels, ModelList, ModelObject, RetrieveModel},
        GenericOpenAIResponse, OpenAIRequestProvider,
    },
    middleware::{Middleware, Next},
    transport::{ApiRequest, ApiResponse, Transport},
    OpenAIError, OpenAIResult,
};

/// The operations this crate knows how to call.
///
/// Every call is `Send`, so clients can be used from spawned tasks.
#[async_trait]
pub trait OpenAIApi: Send + Sync {
    /// `POST /chat/completions`
    async fn create_chat_completion(
        &self,
        request: &ChatCompletion<'_>,
    ) -> OpenAIResult<ChatCompletionResponse>;

    /// `POST /embeddings`
    async fn create_embedding(&self, request: &Embeddings<'_>) -> OpenAIResult<EmbeddingsResponse>;

    /// `GET /models`
    async fn list_models(&self) -> OpenAIResult<ModelList>;

    /// `GET /models/{model}`
    async fn retrieve_model(&self, model: &str) -> OpenAIResult<ModelObject>;
}

/// A client that runs every request through its middlewares, in order, before
/// handing it to the transport. Cloning is cheap.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    transport: Arc<dyn Transport>,
    middlewares: Arc<[Arc<dyn Middleware>]>,
}

impl Client {
    pub fn new(
        base_url: Url,
        transport: Arc<dyn Transport>,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> Self {
        Self {
            base_url,
            transport,
            middlewares: middlewares.into(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a request to the OpenAI API.
    #[instrument(
        name = "openai_request",
        skip_all,
        fields(
            operation_id = R::OPERATION_ID,
            http.method = %R::METHOD,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn req<R: OpenAIRequestProvider>(&self, request: &R) -> OpenAIResult<R::Response> {
        let mut api_request = ApiRequest::new(R::METHOD, request.path_with_leading_slash());
        if R::METHOD != Method::GET {
            api_request = api_request.with_body(serde_json::to_vec(request)?);
        }

        let response = Next::new(self.transport.as_ref(), &self.middlewares)
            .run(api_request, &self.base_url, R::OPERATION_ID)
            .await?;

        Span::current().record("http.status_code", response.status().as_u16());
        tracing::debug!(status = %response.status(), bytes = response.body().len(), "received response");

        decode(&response)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("middlewares", &self.middlewares.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OpenAIApi for Client {
    async fn create_chat_completion(
        &self,
        request: &ChatCompletion<'_>,
    ) -> OpenAIResult<ChatCompletionResponse> {
        self.req(request).await
    }

    async fn create_embedding(&self, request: &Embeddings<'_>) -> OpenAIResult<EmbeddingsResponse> {
        self.req(request).await
    }

    async fn list_models(&self) -> OpenAIResult<ModelList> {
        self.req(&ListModels).await
    }

    async fn retrieve_model(&self, model: &str) -> OpenAIResult<ModelObject> {
        self.req(&RetrieveModel::new(model)?).await
    }
}

// a payload only counts on a success status. a failed response that isn't a
// known api error is reported with its status and raw body.
fn decode<T>(response: &ApiResponse) -> OpenAIResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    match serde_json::from_slice::<GenericOpenAIResponse<T>>(response.body()) {
        Ok(GenericOpenAIResponse::Success(success)) if status.is_success() => Ok(success),
        Ok(error @ GenericOpenAIResponse::Error(_)) => error.into(),
        Err(err) if status.is_success() => Err(err.into()),
        _ => Err(OpenAIError::Status {
            status,
            body: String::from_utf8_lossy(response.body()).into_owned(),
        }),
    }
}

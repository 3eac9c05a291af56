use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::{
    middleware::{Middleware, Next},
    transport::{ApiRequest, ApiResponse},
    OpenAIError, OpenAIResult,
};

/// Middleware that signs every request with a bearer token and marks the body as JSON.
///
/// Both headers are overwritten if the request already carries them.
#[derive(Clone)]
pub struct AuthenticationMiddleware {
    authorization: HeaderValue,
}

impl AuthenticationMiddleware {
    /// Fails with [`OpenAIError::InvalidApiKey`] if `Bearer <api_key>` is not a valid
    /// header value. The key's contents are otherwise left for the API to judge.
    pub fn new(api_key: &str) -> OpenAIResult<Self> {
        let mut authorization = HeaderValue::try_from(format!("Bearer {api_key}"))
            .map_err(|_| OpenAIError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        Ok(Self { authorization })
    }
}

impl std::fmt::Debug for AuthenticationMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationMiddleware")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Middleware for AuthenticationMiddleware {
    async fn intercept(
        &self,
        mut request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
        next: Next<'_>,
    ) -> OpenAIResult<ApiResponse> {
        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        next.run(request, base_url, operation_id).await
    }
}

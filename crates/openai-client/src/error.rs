use reqwest::StatusCode;
use serde::Deserialize;

pub type OpenAIResult<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("http error: {0}")]
    Reqwest(reqwest::Error),
    /// A failure reported by a custom [`crate::Transport`].
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to deserialize api response: {0}")]
    Serde(serde_json::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(url::ParseError),
    #[error("api key cannot be used as a bearer token header value")]
    InvalidApiKey,
    #[error("invalid model id: {0:?}")]
    InvalidModelId(String),
    #[error("missing auth token")]
    MissingAuthToken,
    #[error("OpenAI API error: {0}")]
    API(OpenAIAPIError),
    /// A non-success response whose body was not a recognized API error.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("OpenAI refused to generate response: {0}")]
    Refusal(String),
}

impl From<reqwest::Error> for OpenAIError {
    fn from(err: reqwest::Error) -> Self {
        Self::Reqwest(err)
    }
}

impl From<serde_json::Error> for OpenAIError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err)
    }
}

impl From<url::ParseError> for OpenAIError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err)
    }
}

#[derive(Debug, Deserialize, Clone, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAIAPIError {
    #[error("no choices")]
    #[serde(skip)]
    NoChoices,
    #[error("invalid request: {}", .0.message)]
    InvalidRequestError(OpenAIAPIErrorData),
    #[error("authentication failed: {}", .0.message)]
    AuthenticationError(OpenAIAPIErrorData),
    #[error("model context length exceeded")]
    ContextLengthExceeded(OpenAIAPIErrorData),
    #[error("cloudflare service unavailable")]
    CfServiceUnavailable(OpenAIAPIErrorData),
    #[error("transient server error")]
    ServerError(OpenAIAPIErrorData),
    #[error("cloudflare bad gateway")]
    CfBadGateway(OpenAIAPIErrorData),
    #[error("quota exceeded")]
    QuotaExceeded(OpenAIAPIErrorData),
    #[error("insufficient quota: {}", .0.message)]
    InsufficientQuota(OpenAIAPIErrorData),
    #[error("rate limited on tokens: {}", .0.message)]
    Tokens(OpenAIAPIErrorData),
    #[error("rate limited on requests: {}", .0.message)]
    Requests(OpenAIAPIErrorData),
    #[error("internal error")]
    InternalError(OpenAIAPIErrorData),
}

impl OpenAIAPIError {
    /// The error payload sent by the API, if any.
    pub fn data(&self) -> Option<&OpenAIAPIErrorData> {
        match self {
            Self::NoChoices => None,
            Self::InvalidRequestError(data)
            | Self::AuthenticationError(data)
            | Self::ContextLengthExceeded(data)
            | Self::CfServiceUnavailable(data)
            | Self::ServerError(data)
            | Self::CfBadGateway(data)
            | Self::QuotaExceeded(data)
            | Self::InsufficientQuota(data)
            | Self::Tokens(data)
            | Self::Requests(data)
            | Self::InternalError(data) => Some(data),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAIAPIErrorData {
    pub message: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_deserializes_an_invalid_key_error() {
        let err: OpenAIAPIError = serde_json::from_str(
            r#"{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}"#,
        )
        .unwrap();

        let data = err.data().unwrap();
        assert!(matches!(err, OpenAIAPIError::InvalidRequestError(_)));
        assert_eq!(data.code.as_deref(), Some("invalid_api_key"));
        assert_eq!(
            err.to_string(),
            "invalid request: Incorrect API key provided"
        );
    }

    #[test]
    fn it_rejects_unknown_error_types() {
        let result = serde_json::from_str::<OpenAIAPIError>(
            r#"{"message":"?","type":"something_new","param":null,"code":null}"#,
        );
        assert!(result.is_err());
    }
}

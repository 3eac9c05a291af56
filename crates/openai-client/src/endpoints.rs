use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{error::OpenAIAPIError, OpenAIResult};

pub mod chat;
pub mod embeddings;
pub mod models;

// this enum and the struct below it are hacks to deal with openai's weird response format
// where they will return either a single error field or the success payload.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum GenericOpenAIResponse<T> {
    Success(T),
    Error(ResponseDeserializableOpenAIAPIError),
}

#[derive(Deserialize)]
pub(crate) struct ResponseDeserializableOpenAIAPIError {
    error: OpenAIAPIError,
}

impl<T> From<GenericOpenAIResponse<T>> for OpenAIResult<T> {
    fn from(value: GenericOpenAIResponse<T>) -> Self {
        match value {
            GenericOpenAIResponse::Success(success) => Ok(success),
            GenericOpenAIResponse::Error(error) => Err(crate::OpenAIError::API(error.error)),
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// Any type that can be sent to the client's `req` method.
///
/// The request is serialized as the JSON body, except for `GET` requests which
/// carry none.
pub trait OpenAIRequestProvider: Serialize + private::Sealed {
    type Response: for<'de> Deserialize<'de>;
    const METHOD: Method;
    /// The operation's name in OpenAI's OpenAPI document.
    const OPERATION_ID: &'static str;

    fn path_with_leading_slash(&self) -> String;
}

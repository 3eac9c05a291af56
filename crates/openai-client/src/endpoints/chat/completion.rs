use std::collections::HashMap;

use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{endpoints::OpenAIRequestProvider, OpenAIError, OpenAIResult, Usage};

use super::{FinishReason, Message, Model};

/// A chat completion request. The response content is returned as an unparsed string.
///
/// Responses are never streamed.
#[derive(Serialize, Debug, Builder)]
#[builder(start_fn = model)]
pub struct ChatCompletion<'a> {
    #[builder(start_fn)]
    model: Model,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<HashMap<i32, i32>>,
    /// A stable identifier for your end user, used by OpenAI for abuse monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl OpenAIRequestProvider for ChatCompletion<'_> {
    type Response = ChatCompletionResponse;

    const METHOD: Method = Method::POST;
    const OPERATION_ID: &'static str = "createChatCompletion";

    fn path_with_leading_slash(&self) -> String {
        "/chat/completions".to_string()
    }
}

impl crate::endpoints::private::Sealed for ChatCompletion<'_> {}

/// A response from a chat completion request.
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    id: String,
    created: i64,
    model: String,
    choices: Vec<ChatCompletionResponseChoice>,
    usage: Option<Usage>,
    system_fingerprint: Option<String>,
}

impl ChatCompletionResponse {
    /// Takes the first message in the response consumes the response.
    pub fn take_first_choice(self) -> Option<ChatCompletionResponseChoice> {
        self.choices.into_iter().next()
    }

    /// Like [`Self::take_first_choice`], but an empty response is an error.
    pub fn first_choice(self) -> OpenAIResult<ChatCompletionResponseChoice> {
        self.take_first_choice()
            .ok_or(OpenAIError::API(crate::error::OpenAIAPIError::NoChoices))
    }

    pub fn choices(&self) -> &[ChatCompletionResponseChoice] {
        &self.choices
    }

    /// Gives the usage tokens of the response, when the API reported them.
    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The model that actually served the request, e.g. `gpt-4o-mini-2024-07-18`.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Unix timestamp, in seconds.
    pub fn created(&self) -> i64 {
        self.created
    }

    pub fn system_fingerprint(&self) -> Option<&str> {
        self.system_fingerprint.as_deref()
    }
}

/// A response choice from a chat completion request.
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponseChoice {
    finish_reason: FinishReason,
    index: i32,
    message: ChatCompletionResponseMessage,
}

impl ChatCompletionResponseChoice {
    /// Takes the message and returns a result that may contain a refusal.
    pub fn message(self) -> OpenAIResult<String> {
        match self.message.refusal {
            Some(refusal) => Err(OpenAIError::Refusal(refusal)),
            None => Ok(self.message.content.unwrap_or_default()),
        }
    }

    pub fn finish_reason(&self) -> FinishReason {
        self.finish_reason
    }

    pub fn index(&self) -> i32 {
        self.index
    }
}

// leave private, messages should only be interacted with through `message()`.
#[derive(Deserialize, Debug)]
struct ChatCompletionResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[macro_export]
macro_rules! logit_bias {
    () => {
        std::collections::HashMap::new()
    };

    ($($key:tt : $value:expr),+ $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key as i32, $value as i32);
        )+
        map
    }};
}

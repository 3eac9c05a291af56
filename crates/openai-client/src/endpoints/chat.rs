mod completion;

pub use completion::*;

use std::borrow::Cow;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// The model used for a chat completion. Anything not listed can go through `Other`.
#[derive(Serialize, Debug, Clone)]
#[allow(non_camel_case_types)]
pub enum Model {
    #[serde(rename = "gpt-4o-2024-11-20")]
    Gpt4o_2024_11_20,
    #[serde(rename = "gpt-4o-2024-08-06")]
    Gpt4o_2024_08_06,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4.1")]
    Gpt4_1,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt4_1Mini,
    #[serde(rename = "o1")]
    O1,
    #[serde(rename = "o3-mini")]
    O3Mini,
    #[serde(untagged)]
    Other(String),
}

/// The role of the message used for the chat completion.
#[derive(Serialize, Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The system message, describing the task to the model.
    System,
    /// Instructions that take precedence over user messages on reasoning models.
    Developer,
    /// The user message, i.e. the payload into the model.
    User,
    /// The assistant message, i.e. the model's response.
    Assistant,
}

/// A chat completion message. You can pre-populate the request with user and
/// assistant messages (alongside the system message) to provide context for the
/// completion.
#[derive(Serialize, Debug, Builder)]
#[builder(start_fn = role)]
pub struct Message<'a> {
    #[builder(start_fn)]
    role: Role,
    content: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refusal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<Cow<'a, str>>,
}

#[macro_export]
macro_rules! system_message {
    ($($arg:tt)*) => {
        ::openai_client::endpoints::chat::Message::role(
            ::openai_client::endpoints::chat::Role::System
        )
        .content(format!($($arg)*).into())
        .build()
    };
}

#[macro_export]
macro_rules! user_message {
    ($($arg:tt)*) => {
        ::openai_client::endpoints::chat::Message::role(
            ::openai_client::endpoints::chat::Role::User
        )
        .content(format!($($arg)*).into())
        .build()
    };
}

#[macro_export]
macro_rules! assistant_message {
    ($($arg:tt)*) => {
        ::openai_client::endpoints::chat::Message::role(
            ::openai_client::endpoints::chat::Role::Assistant
        )
        .content(format!($($arg)*).into())
        .build()
    };
}

/// The reason the response was terminated.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    FunctionCall,
}

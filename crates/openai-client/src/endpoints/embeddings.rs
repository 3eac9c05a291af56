use bon::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::OpenAIRequestProvider;

/// The model used to create text embeddings.
#[derive(Serialize, Debug, Clone, Copy)]
pub enum EmbeddingsModel {
    #[serde(rename = "text-embedding-3-large")]
    TextEmbedding3Large,
    #[serde(rename = "text-embedding-3-small")]
    TextEmbedding3Small,
    #[serde(rename = "text-embedding-ada-002")]
    TextEmbeddingAda002,
}

/// A text embeddings creation request.
///
/// Construct with `Embeddings::model`
#[derive(Serialize, Debug, Clone, Builder)]
#[builder(start_fn = model)]
pub struct Embeddings<'a> {
    #[builder(start_fn)]
    model: EmbeddingsModel,
    input: &'a str,
    /// Only supported by the `text-embedding-3` models.
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

impl OpenAIRequestProvider for Embeddings<'_> {
    type Response = EmbeddingsResponse;

    const METHOD: reqwest::Method = Method::POST;
    const OPERATION_ID: &'static str = "createEmbedding";

    fn path_with_leading_slash(&self) -> String {
        "/embeddings".to_string()
    }
}

impl super::private::Sealed for Embeddings<'_> {}

#[derive(Deserialize, Debug)]
pub struct EmbeddingsResponse {
    data: Vec<EmbeddingsData>,
    usage: Option<EmbeddingsUsage>,
}

impl EmbeddingsResponse {
    /// Consumes the response and gives the embeddings.
    pub fn embedding(self) -> Vec<f32> {
        self.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .unwrap_or_default()
    }

    /// Gives a reference to the generated embeddings, empty if there were none.
    pub fn embedding_ref(&self) -> &[f32] {
        self.data
            .first()
            .map(|d| d.embedding.as_slice())
            .unwrap_or_default()
    }

    pub fn usage(&self) -> Option<EmbeddingsUsage> {
        self.usage
    }
}

#[derive(Deserialize, Debug)]
struct EmbeddingsData {
    embedding: Vec<f32>,
}

/// Embeddings only consume prompt tokens.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct EmbeddingsUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::OpenAIRequestProvider;
use crate::{OpenAIError, OpenAIResult};

// a model id must stay a single path segment, so anything that would end it
// (or start a query or fragment) is escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Lists the models available to the API key.
#[derive(Serialize, Debug, Clone, Copy, Default)]
pub struct ListModels;

impl OpenAIRequestProvider for ListModels {
    type Response = ModelList;

    const METHOD: Method = Method::GET;
    const OPERATION_ID: &'static str = "listModels";

    fn path_with_leading_slash(&self) -> String {
        "/models".to_string()
    }
}

impl super::private::Sealed for ListModels {}

/// Fetches a single model by id.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct RetrieveModel<'a> {
    #[serde(skip)]
    model: &'a str,
}

impl<'a> RetrieveModel<'a> {
    /// Fails with [`OpenAIError::InvalidModelId`] for ids that can't name a path
    /// segment: empty, `.` or `..`.
    pub fn new(model: &'a str) -> OpenAIResult<Self> {
        if matches!(model, "" | "." | "..") {
            return Err(OpenAIError::InvalidModelId(model.to_string()));
        }
        Ok(Self { model })
    }
}

impl OpenAIRequestProvider for RetrieveModel<'_> {
    type Response = ModelObject;

    const METHOD: Method = Method::GET;
    const OPERATION_ID: &'static str = "retrieveModel";

    fn path_with_leading_slash(&self) -> String {
        format!("/models/{}", utf8_percent_encode(self.model, PATH_SEGMENT))
    }
}

impl super::private::Sealed for RetrieveModel<'_> {}

#[derive(Deserialize, Debug, Clone)]
pub struct ModelList {
    pub data: Vec<ModelObject>,
}

/// A model as described by the API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelObject {
    pub id: String,
    /// Unix timestamp, in seconds.
    pub created: i64,
    pub owned_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_for(model: &str) -> String {
        RetrieveModel::new(model).unwrap().path_with_leading_slash()
    }

    #[test]
    fn it_puts_the_model_id_in_the_path() {
        assert_eq!(path_for("gpt-4o-mini"), "/models/gpt-4o-mini");
        assert_eq!(
            path_for("ft:gpt-4o-mini:acme::abc123"),
            "/models/ft:gpt-4o-mini:acme::abc123"
        );
    }

    #[test]
    fn it_keeps_the_model_id_in_one_segment() {
        assert_eq!(path_for("../embeddings"), "/models/..%2Fembeddings");
        assert_eq!(path_for("gpt-4o?x=1"), "/models/gpt-4o%3Fx=1");
        assert_eq!(path_for("a#frag"), "/models/a%23frag");
        assert_eq!(path_for("100%"), "/models/100%25");
    }

    #[test]
    fn it_rejects_ids_that_are_not_a_segment() {
        for model in ["", ".", ".."] {
            assert!(matches!(
                RetrieveModel::new(model),
                Err(OpenAIError::InvalidModelId(id)) if id == model
            ));
        }
    }
}

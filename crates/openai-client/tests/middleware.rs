use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use openai_client::{
    ApiRequest, ApiResponse, AuthenticationMiddleware, Client, Configuration, Middleware, Next,
    OpenAI, OpenAIApi, OpenAIError, OpenAIResult, Transport,
};
use reqwest::{
    header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use url::Url;

const EMPTY_MODEL_LIST: &str = r#"{"object":"list","data":[]}"#;

/// Answers every request with an empty model list and remembers what it was sent.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    fn authorization_headers(&self) -> Vec<HeaderValue> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.headers().get(AUTHORIZATION).cloned())
            .collect()
    }

    fn last(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        request: ApiRequest,
        _base_url: &Url,
        _operation_id: &str,
    ) -> OpenAIResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(ApiResponse::new(StatusCode::OK, EMPTY_MODEL_LIST))
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(
        &self,
        _request: ApiRequest,
        _base_url: &Url,
        _operation_id: &str,
    ) -> OpenAIResult<ApiResponse> {
        Err(OpenAIError::Transport("connection reset by peer".into()))
    }
}

/// Sets headers of its own before passing the request on.
struct PresetHeaders;

#[async_trait]
impl Middleware for PresetHeaders {
    async fn intercept(
        &self,
        mut request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
        next: Next<'_>,
    ) -> OpenAIResult<ApiResponse> {
        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        next.run(request, base_url, operation_id).await
    }
}

/// Records the authorization header it observes, to check where it sits in the chain.
#[derive(Default)]
struct Probe {
    seen: Mutex<Vec<Option<HeaderValue>>>,
}

#[async_trait]
impl Middleware for Probe {
    async fn intercept(
        &self,
        request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
        next: Next<'_>,
    ) -> OpenAIResult<ApiResponse> {
        self.seen
            .lock()
            .unwrap()
            .push(request.headers().get(AUTHORIZATION).cloned());
        next.run(request, base_url, operation_id).await
    }
}

fn configuration(api_key: &str, transport: Arc<dyn Transport>) -> Configuration {
    Configuration::with_api_key(api_key.to_string())
        .transport(transport)
        .build()
}

#[tokio::test]
async fn it_signs_requests_with_the_configured_key() {
    let transport = Arc::new(RecordingTransport::default());
    let client = OpenAI::client(&configuration("sk-test", transport.clone())).unwrap();

    client.list_models().await.unwrap();
    client.retrieve_model("gpt-4o").await.unwrap_err();

    assert_eq!(transport.authorization_headers(), vec!["Bearer sk-test"; 2]);
    assert_eq!(transport.last().headers()[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn it_overwrites_headers_set_earlier_in_the_chain() {
    let transport = Arc::new(RecordingTransport::default());
    let client = Client::new(
        Url::parse("https://api.openai.com/v1").unwrap(),
        transport.clone(),
        vec![
            Arc::new(PresetHeaders) as Arc<dyn Middleware>,
            Arc::new(AuthenticationMiddleware::new("sk-test").unwrap()),
        ],
    );

    client.list_models().await.unwrap();

    let request = transport.last();
    assert_eq!(request.headers()[AUTHORIZATION], "Bearer sk-test");
    assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(request.headers().get_all(CONTENT_TYPE).iter().count(), 1);
}

#[tokio::test]
async fn it_keeps_keys_of_different_clients_apart() {
    let first_transport = Arc::new(RecordingTransport::default());
    let second_transport = Arc::new(RecordingTransport::default());
    let first = OpenAI::client(&configuration("sk-first", first_transport.clone())).unwrap();
    let second = OpenAI::client(&configuration("sk-second", second_transport.clone())).unwrap();

    let (a, b) = tokio::join!(first.list_models(), second.list_models());
    a.unwrap();
    b.unwrap();
    first.list_models().await.unwrap();

    assert_eq!(
        first_transport.authorization_headers(),
        vec!["Bearer sk-first"; 2]
    );
    assert_eq!(second_transport.authorization_headers(), vec!["Bearer sk-second"]);
}

#[tokio::test]
async fn it_runs_authentication_before_configured_middlewares() {
    let transport = Arc::new(RecordingTransport::default());
    let probe = Arc::new(Probe::default());
    let config = Configuration::with_api_key("sk-test".to_string())
        .transport(transport)
        .middlewares(vec![probe.clone() as Arc<dyn Middleware>])
        .build();

    OpenAI::client(&config).unwrap().list_models().await.unwrap();

    assert_eq!(
        *probe.seen.lock().unwrap(),
        vec![Some(HeaderValue::from_static("Bearer sk-test"))]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn it_serves_requests_from_spawned_tasks() {
    let transport = Arc::new(RecordingTransport::default());
    let client = OpenAI::client(&configuration("sk-test", transport.clone())).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.list_models().await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(transport.authorization_headers(), vec!["Bearer sk-test"; 4]);
}

#[tokio::test]
async fn it_propagates_transport_failures_unchanged() {
    let client = OpenAI::client(&configuration("sk-test", Arc::new(FailingTransport))).unwrap();

    let err = client.list_models().await.unwrap_err();

    assert!(matches!(err, OpenAIError::Transport(_)));
    assert_eq!(err.to_string(), "transport error: connection reset by peer");
}

#[tokio::test]
async fn it_sends_no_body_on_get_requests() {
    let transport = Arc::new(RecordingTransport::default());
    let client = OpenAI::client(&configuration("sk-test", transport.clone())).unwrap();

    client.list_models().await.unwrap();

    let request = transport.last();
    assert_eq!(request.method(), &reqwest::Method::GET);
    assert_eq!(request.path(), "/models");
    assert!(request.body().is_none());
}

#[test]
fn it_refuses_keys_that_cannot_be_headers() {
    let result = OpenAI::client(&Configuration::new("sk-\r\nInjected: yes"));
    assert!(matches!(result, Err(OpenAIError::InvalidApiKey)));
}

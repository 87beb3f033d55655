//! `reqwest`-backed transport: `POST {url}` with a JSON body.

use async_trait::async_trait;
use tracing::debug;

use crate::{ChatError, ChatReply, ChatRequest};

use super::config::HttpTransportConfig;
use super::ChatTransport;

/// HTTP chat transport.
pub struct HttpTransport {
    config: HttpTransportConfig,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ChatError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        debug!(url = %self.config.url, "chat request");

        let response = self
            .http
            .post(&self.config.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if signals_invalidation(&text) {
                return Err(ChatError::SessionInvalidated);
            }
            return Err(ChatError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))
    }
}

/// Whether an error body carries the invalidation signal: a JSON object
/// whose `sessionId` field is present and `null`.
pub fn signals_invalidation(body: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            matches!(map.get("sessionId"), Some(serde_json::Value::Null))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(HttpTransportConfig::new(format!("{}/api/chat", server.uri()))).unwrap()
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            session_id: "abc".into(),
            message: message.into(),
        }
    }

    #[test]
    fn invalidation_signal_requires_explicit_null() {
        assert!(signals_invalidation(r#"{"sessionId":null}"#));
        assert!(signals_invalidation(
            r#"{"error":"expired","sessionId":null}"#
        ));
        assert!(!signals_invalidation(r#"{"sessionId":"abc"}"#));
        assert!(!signals_invalidation(r#"{"error":"boom"}"#));
        assert!(!signals_invalidation("null"));
        assert!(!signals_invalidation("Internal Server Error"));
        assert!(!signals_invalidation(""));
    }

    #[test]
    fn builds_with_timeouts() {
        let config = HttpTransportConfig::new("http://localhost:3000/api/chat")
            .with_connect_timeout(Duration::from_secs(5))
            .with_request_timeout(Duration::from_secs(30));
        assert!(HttpTransport::new(config).is_ok());
    }

    #[tokio::test]
    async fn posts_json_and_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({ "sessionId": "abc", "message": "hi" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sessionId": "abc",
                "history": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = transport_for(&server).send(&request("hi")).await.unwrap();
        assert_eq!(reply.session_id, "abc");
        assert_eq!(
            reply.history,
            vec![Message::user("hi"), Message::model("hello")]
        );
    }

    #[tokio::test]
    async fn null_session_in_error_body_is_invalidation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "error": "session expired", "sessionId": null })),
            )
            .mount(&server)
            .await;

        let err = transport_for(&server).send(&request("hi")).await.unwrap_err();
        assert!(err.is_session_invalidated());
    }

    #[tokio::test]
    async fn other_error_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let err = transport_for(&server).send(&request("hi")).await.unwrap_err();
        match err {
            ChatError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = transport_for(&server).send(&request("hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let server = MockServer::start().await;
        let url = format!("{}/api/chat", server.uri());
        drop(server);

        let transport = HttpTransport::new(HttpTransportConfig::new(url)).unwrap();
        let err = transport.send(&request("hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Network(_)));
    }
}

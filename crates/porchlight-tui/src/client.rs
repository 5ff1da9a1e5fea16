//! HTTP client for the Porchlight chat service.

use anyhow::Result;
use log::debug;
use porchlight_protocol::{ChatReply, ChatRequest, SessionId};

/// Client holding the HTTP connection pool and this console's session
/// identity.
///
/// One instance is built at startup and shared by every in-flight request,
/// so all requests from a console run carry the same session id.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    session_id: SessionId,
}

impl ChatClient {
    /// Create a client for the service at `endpoint` with a fresh session id.
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            session_id: SessionId::generate(),
        }
    }

    /// Session identifier sent with every request.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Post one chat message and return the assistant's reply text.
    ///
    /// The response body alone decides the outcome: any payload that does
    /// not parse as a reply object is an error, whatever the HTTP status
    /// said.
    pub async fn send(&self, message: &str) -> Result<String> {
        debug!(
            "posting chat message (session_id={}, len={})",
            self.session_id,
            message.len()
        );
        let request = ChatRequest {
            session_id: self.session_id.clone(),
            message: message.to_string(),
        };
        let reply: ChatReply = self
            .http
            .post(format!("{}/chat", self.endpoint))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        Ok(reply.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn send_returns_the_reply_text() {
        let router = Router::new().route(
            "/chat",
            post(|Json(_request): Json<ChatRequest>| async {
                Json(ChatReply {
                    reply: "Hi! What's your name?".to_string(),
                })
            }),
        );
        let client = ChatClient::new(serve(router).await);
        let reply = client.send("hello").await.unwrap();
        assert_eq!(reply, "Hi! What's your name?");
    }

    #[tokio::test]
    async fn every_send_carries_the_same_session_id() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let router = Router::new().route(
            "/chat",
            post(move |Json(request): Json<ChatRequest>| {
                let sink = sink.clone();
                async move {
                    sink.lock()
                        .unwrap()
                        .push(request.session_id.as_str().to_string());
                    Json(ChatReply {
                        reply: "ok".to_string(),
                    })
                }
            }),
        );
        let client = ChatClient::new(serve(router).await);
        client.send("one").await.unwrap();
        client.send("two").await.unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0], client.session_id().as_str());
    }

    #[tokio::test]
    async fn non_json_bodies_are_errors() {
        let router = Router::new().route("/chat", post(|| async { "plain text" }));
        let client = ChatClient::new(serve(router).await);
        assert!(client.send("hello").await.is_err());
    }

    #[tokio::test]
    async fn replies_missing_the_reply_field_are_errors() {
        let router = Router::new().route(
            "/chat",
            post(|| async { Json(serde_json::json!({ "message": "hi" })) }),
        );
        let client = ChatClient::new(serve(router).await);
        assert!(client.send("hello").await.is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoints_are_errors() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = ChatClient::new(endpoint);
        assert!(client.send("hello").await.is_err());
    }
}

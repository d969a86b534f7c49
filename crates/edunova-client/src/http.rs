//! HTTP client for the roadmap backend

use async_trait::async_trait;
use edunova_core::{
    ClientConfig, FetchError, QuizFetcher, QuizPayload, QuizRequest, Roadmap, RoadmapNode,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct NodeChatRequest<'a> {
    query: &'a str,
    node_data: &'a RoadmapNode,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Backend client
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// Build a client for the configured backend
    ///
    /// # Errors
    /// `FetchError::Transport` if the HTTP client cannot be constructed
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Backend base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current roadmap
    ///
    /// # Errors
    /// Any [`FetchError`]
    pub async fn fetch_roadmap(&self) -> Result<Roadmap, FetchError> {
        let url = self.url("roadmap");
        let body = self.exec_request(self.http.get(&url), &url).await?;
        decode_json(&url, &body)
    }

    /// Ask a free-form question
    ///
    /// # Errors
    /// Any [`FetchError`]
    pub async fn chat(&self, query: &str) -> Result<String, FetchError> {
        let url = self.url("chat");
        let req = self.http.post(&url).json(&ChatRequest { query });
        let body = self.exec_request(req, &url).await?;
        decode_json::<ChatResponse>(&url, &body).map(|r| r.response)
    }

    /// Ask a question scoped to one roadmap node
    ///
    /// # Errors
    /// Any [`FetchError`]
    pub async fn chat_with_node(
        &self,
        query: &str,
        node: &RoadmapNode,
    ) -> Result<String, FetchError> {
        let url = self.url("chat-with-chunk");
        let req = self.http.post(&url).json(&NodeChatRequest {
            query,
            node_data: node,
        });
        let body = self.exec_request(req, &url).await?;
        decode_json::<ChatResponse>(&url, &body).map(|r| r.response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn exec_request(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<String, FetchError> {
        let res = req.send().await.map_err(|e| {
            tracing::debug!(url, error = %e, "backend request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        body
                    }
                });
            tracing::debug!(url, status = status.as_u16(), %message, "backend returned error");
            return Err(FetchError::status(status.as_u16(), message));
        }
        Ok(body)
    }
}

fn decode_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(format!("{url}: {e}")))
}

#[async_trait]
impl QuizFetcher for BackendClient {
    async fn fetch_quiz(&self, request: &QuizRequest) -> Result<QuizPayload, FetchError> {
        let url = self.url("quiz");
        tracing::debug!(node_id = %request.node_id, topic = %request.topic, "requesting quiz");
        let body = self.exec_request(self.http.post(&url).json(request), &url).await?;
        decode_json(&url, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let config = ClientConfig::new().with_backend_url("http://backend:5000/");
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://backend:5000");
        assert_eq!(client.url("quiz"), "http://backend:5000/quiz");
    }

    #[test]
    fn decode_error_names_url() {
        let err = decode_json::<Roadmap>("http://x/roadmap", "not json").unwrap_err();
        assert!(matches!(err, FetchError::Decode(ref msg) if msg.starts_with("http://x/roadmap")));
    }
}

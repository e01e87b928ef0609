use crate::{
    config::{get_config, Config},
    constants::GEMINI_API_BASE,
    errors::{GitoError, GitoResult},
    logging::log_api_call,
    models::ApiCallLog,
};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

/// Client for the Google generative-language `generateContent` endpoint.
/// The base URL is a field rather than a constant so tests can point the
/// client at a mock server.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Builds a client from the global config. Returns `None` when no
    /// credential is configured; the caller falls back to local matching.
    pub fn from_config() -> Option<Self> {
        let config = get_config();
        Self::from_parts(&config, GEMINI_API_BASE)
    }

    pub fn from_parts(config: &Config, base_url: &str) -> Option<Self> {
        if config.api_key.trim().is_empty() {
            return None;
        }
        Some(GeminiClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Requests a single text completion: one system instruction plus one
    /// user turn, one text reply back.
    pub async fn generate_content(
        &self,
        system_instruction: &str,
        query: &str,
    ) -> GitoResult<String> {
        let payload = json!({
            "systemInstruction": {
                "parts": [{ "text": system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": query }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens
            }
        });

        let start_time = std::time::Instant::now();

        // Transport failures surface as `GitoError::Http` via the `#[from]`
        // conversion; protocol-level problems below become `Api` errors.
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.endpoint(),
            request_summary: "generate_content".to_string(),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GitoError::api_error(format!(
                "API returned error: {} - {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GitoError::api_error(format!("Failed to parse API response: {}", e)))?;

        if let Some(error) = body["error"].as_object() {
            return Err(GitoError::api_error(format!(
                "{}: {}",
                error["status"].as_str().unwrap_or("unknown"),
                error["message"].as_str().unwrap_or("no message")
            )));
        }

        let content = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| GitoError::api_error("Response missing expected content"))?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_config() -> Config {
        let mut config = Config::default();
        config.api_key = "test-api-key".to_string();
        config.model = "gemini-2.5-flash".to_string();
        config
    }

    #[test]
    fn test_no_client_without_credential() {
        let config = Config::default();
        assert!(GeminiClient::from_parts(&config, GEMINI_API_BASE).is_none());
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "Olá! Sou o Gito." }],
                        "role": "model"
                    }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&test_config(), &mock_server.uri()).unwrap();
        let reply = client
            .generate_content("instruções", "Olá")
            .await
            .unwrap();
        assert_eq!(reply, "Olá! Sou o Gito.");
    }

    #[tokio::test]
    async fn test_generate_content_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&test_config(), &mock_server.uri()).unwrap();
        let err = client
            .generate_content("instruções", "Olá")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_generate_content_api_reported_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {
                    "status": "RESOURCE_EXHAUSTED",
                    "message": "quota exceeded"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&test_config(), &mock_server.uri()).unwrap();
        let err = client
            .generate_content("instruções", "Olá")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_generate_content_connection_error_is_http() {
        // Grab a port nothing listens on anymore, then try to reach it.
        // (Bind a throwaway listener rather than dropping a MockServer:
        // wiremock pools servers, so a dropped server's port stays bound.)
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let client = GeminiClient::from_parts(&test_config(), &uri).unwrap();
        let err = client
            .generate_content("instruções", "Olá")
            .await
            .unwrap_err();
        assert!(matches!(err, GitoError::Http(_)));
    }

    #[tokio::test]
    async fn test_generate_content_missing_text_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&test_config(), &mock_server.uri()).unwrap();
        assert!(client.generate_content("i", "q").await.is_err());
    }
}

// src/resolver.rs
//
// Maps a free-text query plus the knowledge base to an answer string. This
// is the only seam between the UI and the generative API: callers always get
// a string back, never an error. The whole-context prompt assembly lives
// here so a ranked-retrieval strategy could replace it without touching any
// caller.

use crate::api::GeminiClient;
use crate::constants::{
    DEGRADED_MODE_PREFIX, NO_MATCH_RESPONSE, PERSONA_FOOTER, PERSONA_HEADER, UNRESOLVED_CATEGORY,
};
use crate::models::{Category, FaqEntry};

pub struct ResponseResolver {
    client: Option<GeminiClient>,
}

impl ResponseResolver {
    /// Resolver in the mode selected by the global config: service-backed
    /// when a credential is present, local fallback otherwise.
    pub fn from_config() -> Self {
        ResponseResolver {
            client: GeminiClient::from_config(),
        }
    }

    pub fn with_client(client: Option<GeminiClient>) -> Self {
        ResponseResolver { client }
    }

    pub fn service_backed(&self) -> bool {
        self.client.is_some()
    }

    /// Always produces a non-empty answer. Service errors degrade to the
    /// apology prefix plus the local fallback answer for the same query;
    /// they never cross this boundary.
    pub async fn resolve(
        &self,
        query: &str,
        faqs: &[FaqEntry],
        categories: &[Category],
    ) -> String {
        let client = match &self.client {
            Some(client) => client,
            None => {
                log::debug!("no API credential configured, using fallback matching");
                return fallback_response(query, faqs);
            }
        };

        let system_instruction = build_system_instruction(faqs, categories);
        match client.generate_content(&system_instruction, query).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("generative service call failed: {}", e);
                format!("{}{}", DEGRADED_MODE_PREFIX, fallback_response(query, faqs))
            }
        }
    }
}

/// Concatenates every FAQ into the persona prompt: category name (or
/// "Geral" for dangling references), question and answer, entries separated
/// by blank lines.
pub fn build_system_instruction(faqs: &[FaqEntry], categories: &[Category]) -> String {
    let context = faqs
        .iter()
        .map(|faq| {
            let category = categories
                .iter()
                .find(|c| c.id == faq.category_id)
                .map(|c| c.name.as_str())
                .unwrap_or(UNRESOLVED_CATEGORY);
            format!(
                "Categoria: {}\nPergunta: {}\nResposta: {}",
                category, faq.question, faq.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}{}{}", PERSONA_HEADER, context, PERSONA_FOOTER)
}

/// Scans the FAQ sequence in order and returns the answer of the first entry
/// whose question or answer contains the query, case-insensitively. First
/// match wins; there is no scoring.
pub fn fallback_response(query: &str, faqs: &[FaqEntry]) -> String {
    let query_lower = query.to_lowercase();
    for faq in faqs {
        if faq.question.to_lowercase().contains(&query_lower)
            || faq.answer.to_lowercase().contains(&query_lower)
        {
            return faq.answer.clone();
        }
    }
    NO_MATCH_RESPONSE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GeminiClient;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::{
        matchers::method,
        Mock, MockServer, ResponseTemplate,
    };

    fn categories() -> Vec<Category> {
        vec![Category::new("1", "Matrículas e Inscrições", "desc")]
    }

    fn faqs() -> Vec<FaqEntry> {
        vec![
            FaqEntry::seeded(
                "1",
                "1",
                "Quais os prazos de matrícula?",
                "Início em Janeiro.",
                0,
            ),
            FaqEntry::seeded(
                "2",
                "1",
                "Como pagar propinas?",
                "Na tesouraria da faculdade.",
                0,
            ),
        ]
    }

    fn service_config() -> Config {
        let mut config = Config::default();
        config.api_key = "test-api-key".to_string();
        config
    }

    #[tokio::test]
    async fn test_resolve_without_credential_uses_fallback() {
        let resolver = ResponseResolver::with_client(None);
        assert!(!resolver.service_backed());
        let answer = resolver
            .resolve("prazos de matrícula", &faqs(), &categories())
            .await;
        assert_eq!(answer, "Início em Janeiro.");
    }

    #[tokio::test]
    async fn test_resolve_never_returns_empty() {
        let resolver = ResponseResolver::with_client(None);
        for query in ["", "prazos", "xyzzy-no-match-token", "ÁÇÉ"] {
            let answer = resolver.resolve(query, &faqs(), &categories()).await;
            assert!(!answer.is_empty(), "empty answer for query {:?}", query);
        }
    }

    #[test]
    fn test_fallback_is_case_insensitive() {
        assert_eq!(
            fallback_response("PRAZOS DE MATRÍCULA", &faqs()),
            "Início em Janeiro."
        );
    }

    #[test]
    fn test_fallback_matches_answer_text_too() {
        // "tesouraria" only appears in the answer of the second entry.
        assert_eq!(
            fallback_response("tesouraria", &faqs()),
            "Na tesouraria da faculdade."
        );
    }

    #[test]
    fn test_fallback_no_match_returns_referral() {
        assert_eq!(
            fallback_response("xyzzy-no-match-token", &faqs()),
            NO_MATCH_RESPONSE
        );
    }

    #[test]
    fn test_fallback_first_match_in_order_wins() {
        let entries = vec![
            FaqEntry::seeded("1", "1", "Sobre propinas", "Resposta da primeira.", 0),
            FaqEntry::seeded("2", "1", "Mais sobre propinas", "Resposta da segunda.", 0),
        ];
        assert_eq!(
            fallback_response("propinas", &entries),
            "Resposta da primeira."
        );
    }

    #[test]
    fn test_system_instruction_contains_every_entry() {
        let instruction = build_system_instruction(&faqs(), &categories());
        assert!(instruction.contains("Categoria: Matrículas e Inscrições"));
        assert!(instruction.contains("Pergunta: Quais os prazos de matrícula?"));
        assert!(instruction.contains("Resposta: Início em Janeiro."));
        assert!(instruction.contains("Pergunta: Como pagar propinas?"));
        assert!(instruction.contains("Seu nome é Gito"));
    }

    #[test]
    fn test_system_instruction_dangling_category_uses_geral() {
        let entries = vec![FaqEntry::seeded("1", "999", "Pergunta?", "Resposta.", 0)];
        let instruction = build_system_instruction(&entries, &categories());
        assert!(instruction.contains("Categoria: Geral"));
    }

    #[tokio::test]
    async fn test_resolve_returns_service_text_verbatim() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Olá! Sou o Gito, como posso ajudar?" }] }
                }]
            })))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&service_config(), &mock_server.uri());
        let resolver = ResponseResolver::with_client(client);
        let answer = resolver.resolve("Olá", &faqs(), &categories()).await;
        assert_eq!(answer, "Olá! Sou o Gito, como posso ajudar?");
    }

    #[tokio::test]
    async fn test_service_failure_degrades_to_apology_plus_fallback() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&service_config(), &mock_server.uri());
        let resolver = ResponseResolver::with_client(client);
        let answer = resolver
            .resolve("prazos de matrícula", &faqs(), &categories())
            .await;
        assert!(answer.starts_with(DEGRADED_MODE_PREFIX));
        assert!(answer.ends_with("Início em Janeiro."));
    }

    #[tokio::test]
    async fn test_service_failure_with_no_match_still_degrades_cleanly() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::from_parts(&service_config(), &mock_server.uri());
        let resolver = ResponseResolver::with_client(client);
        let answer = resolver
            .resolve("xyzzy-no-match-token", &faqs(), &categories())
            .await;
        assert!(answer.contains(NO_MATCH_RESPONSE));
    }
}

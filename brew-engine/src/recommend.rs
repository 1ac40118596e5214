//! Drink recommendations via an OpenAI-compatible chat endpoint
//!
//! The model is asked for drink names only, one per line; anything it
//! returns that is not in the catalog is dropped, so a hallucinated
//! drink can never reach the cart.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::Catalog;

const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("recommendation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("recommendation service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("recommendation response carried no choices")]
    EmptyResponse,
}

/// Endpoint configuration; the key is supplied by the embedding app
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl RecommendConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct RecommendationClient {
    http: reqwest::Client,
    config: RecommendConfig,
}

impl RecommendationClient {
    pub fn new(config: RecommendConfig) -> Result<Self, RecommendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Ask for up to `count` drinks matching the free-text preference,
    /// returning canonical catalog names
    pub async fn recommend(
        &self,
        catalog: &Catalog,
        preference: &str,
        count: usize,
    ) -> Result<Vec<String>, RecommendError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt(catalog, count) },
                { "role": "user", "content": preference },
            ],
            "temperature": 1.0,
            "max_tokens": 1024,
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "recommendation request rejected");
            return Err(RecommendError::Status { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or(RecommendError::EmptyResponse)?;

        let drinks = parse_drink_lines(content, catalog, count);
        tracing::debug!(returned = drinks.len(), "recommendations parsed");
        Ok(drinks)
    }
}

fn system_prompt(catalog: &Catalog, count: usize) -> String {
    format!(
        "You are a barista recommending drinks. The menu is: {}. \
         Reply with at most {count} drink names from the menu, one per \
         line, nothing else.",
        catalog.product_names().join(", ")
    )
}

/// Extract catalog drinks from the model reply: one candidate per line,
/// list markers stripped, unknown names dropped, duplicates collapsed
fn parse_drink_lines(content: &str, catalog: &Catalog, count: usize) -> Vec<String> {
    let mut drinks = Vec::new();
    for line in content.lines() {
        let candidate = line
            .trim()
            .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')' || c == '-')
            .trim();
        if candidate.is_empty() {
            continue;
        }
        let Some(canonical) = catalog.canonical_name(candidate) else {
            tracing::debug!(candidate, "dropping unknown recommendation");
            continue;
        };
        if !drinks.iter().any(|d| d == canonical) {
            drinks.push(canonical.to_string());
        }
        if drinks.len() == count {
            break;
        }
    }
    drinks
}

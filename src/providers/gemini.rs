//! Gemini client for embeddings and answer generation
//!
//! Talks to the Google Generative Language API with an API key taken from
//! the environment. One client serves both provider traits.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::llm::LlmProvider;

/// Gemini API client with bounded retry
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: ModelConfig,
    /// API key resolved from the configured environment variable
    api_key: String,
}

#[derive(Serialize)]
struct EmbedContentRequest {
    model: String,
    content: ContentPayload,
}

#[derive(Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Serialize)]
struct ContentPayload {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a client from the model config
    ///
    /// Reads the API key from the configured environment variable; a
    /// missing key is a configuration error.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            Error::config(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:embedContent",
            self.config.api_base, self.config.embed_model
        )
    }

    fn batch_embed_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:batchEmbedContents",
            self.config.api_base, self.config.embed_model
        )
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base, self.config.generate_model
        )
    }

    fn embed_request(&self, text: &str) -> EmbedContentRequest {
        EmbedContentRequest {
            model: format!("models/{}", self.config.embed_model),
            content: ContentPayload {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        }
    }

    /// Retry a request with exponential backoff
    ///
    /// `max_retries = 0` (the default) means a single attempt.
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.config.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::generation("request failed with no recorded error")))
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.embed_url();
        let body = serde_json::to_value(self.embed_request(text))?;
        let client = self.client.clone();
        let api_key = self.api_key.clone();

        self.retry_request(|| {
            let url = url.clone();
            let body = body.clone();
            let client = client.clone();
            let api_key = api_key.clone();

            async move {
                let response = client
                    .post(&url)
                    .header("x-goog-api-key", &api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Error::embedding(format!("request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::embedding(format!("HTTP {}: {}", status, body)));
                }

                let embed_response: EmbedContentResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::embedding(format!("cannot parse response: {}", e)))?;

                Ok(embed_response.embedding.values)
            }
        })
        .await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.batch_embed_url();
        let body = serde_json::to_value(BatchEmbedRequest {
            requests: texts.iter().map(|t| self.embed_request(t)).collect(),
        })?;
        let client = self.client.clone();
        let api_key = self.api_key.clone();
        let expected = texts.len();

        self.retry_request(|| {
            let url = url.clone();
            let body = body.clone();
            let client = client.clone();
            let api_key = api_key.clone();

            async move {
                let response = client
                    .post(&url)
                    .header("x-goog-api-key", &api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Error::embedding(format!("batch request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::embedding(format!("HTTP {}: {}", status, body)));
                }

                let batch_response: BatchEmbedResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::embedding(format!("cannot parse response: {}", e)))?;

                if batch_response.embeddings.len() != expected {
                    return Err(Error::embedding(format!(
                        "expected {} embeddings, got {}",
                        expected,
                        batch_response.embeddings.len()
                    )));
                }

                Ok(batch_response
                    .embeddings
                    .into_iter()
                    .map(|e| e.values)
                    .collect())
            }
        })
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!(
            "{}/v1beta/models/{}",
            self.config.api_base, self.config.embed_model
        );
        match self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.generate_url();
        let body = serde_json::to_value(GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: 1024,
            },
        })?;
        let client = self.client.clone();
        let api_key = self.api_key.clone();

        tracing::debug!("Generating with model: {}", self.config.generate_model);

        self.retry_request(|| {
            let url = url.clone();
            let body = body.clone();
            let client = client.clone();
            let api_key = api_key.clone();

            async move {
                let response = client
                    .post(&url)
                    .header("x-goog-api-key", &api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Error::generation(format!("request failed: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::generation(format!("HTTP {}: {}", status, body)));
                }

                let gen_response: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::generation(format!("cannot parse response: {}", e)))?;

                gen_response
                    .candidates
                    .into_iter()
                    .next()
                    .and_then(|c| c.content.parts.into_iter().next())
                    .map(|p| p.text)
                    .ok_or_else(|| Error::generation("no text in model response"))
            }
        })
        .await
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!(
            "{}/v1beta/models/{}",
            self.config.api_base, self.config.generate_model
        );
        match self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.generate_model
    }
}

//! RAG service client with bounded retries and exponential backoff.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::RagError;
use crate::policy::RetryPolicy;

/// Default endpoint of the RAG answer service.
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8001/get-response";

/// Answer returned when the service responds with an empty body.
const EMPTY_ANSWER_FALLBACK: &str = "Вибачте, сервіс не надав відповіді.";

/// An answer from the RAG service.
#[derive(Debug, Clone, PartialEq)]
pub struct RagAnswer {
    /// The answer text. Never blank - an empty upstream answer is replaced
    /// with the product's fallback string.
    pub answer: String,

    /// Source documents the answer was grounded on.
    pub sources: Vec<String>,

    /// Service-side metadata (mode, response time, ...).
    pub metadata: serde_json::Value,
}

/// Client for the RAG assistant service.
///
/// Wraps a [`reqwest::Client`] with the retry policy the chat surface needs:
/// transient upstream failures (5xx, 429, timeouts, connection errors) are
/// retried with exponential backoff; everything else surfaces immediately as
/// a categorized [`RagError`].
///
/// # Example
///
/// ```rust,no_run
/// use diawatch_rag::RagClient;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RagClient::builder()
///         .endpoint("http://rag.internal:8001/get-response")
///         .timeout(Duration::from_secs(30))
///         .max_retries(2)
///         .build();
///
///     let context = "Пацієнт: Марта\nТип діабету: Діабет 1-го типу";
///     let answer = client
///         .ask_personalized("Скільки вуглеводів у яблуку?", context)
///         .await?;
///     println!("{}", answer.answer);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RagClient {
    client: Client,
    endpoint: String,
    personal_endpoint: String,
    policy: RetryPolicy,
}

impl RagClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> RagClientBuilder {
        RagClientBuilder::default()
    }

    /// Ask a standard (non-personalized) question.
    pub async fn ask(&self, question: &str) -> Result<RagAnswer, RagError> {
        self.request(|| {
            self.client
                .get(&self.endpoint)
                .query(&[("question", question), ("mode", "standard")])
        })
        .await
    }

    /// Ask a question against a personal context block.
    pub async fn ask_personalized(
        &self,
        question: &str,
        context: &str,
    ) -> Result<RagAnswer, RagError> {
        self.request(|| {
            self.client
                .post(&self.personal_endpoint)
                .json(&serde_json::json!({
                    "question": question,
                    "context": context,
                    "mode": "personalized",
                }))
        })
        .await
    }

    /// The configured standard endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The configured personalized endpoint.
    pub fn personal_endpoint(&self) -> &str {
        &self.personal_endpoint
    }

    async fn request(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<RagAnswer, RagError> {
        let mut attempt = 0u32;
        loop {
            match self.attempt(build()).await {
                Ok(answer) => return Ok(answer),
                Err(err) if self.policy.should_retry(&err) && attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        error = %err,
                        attempt = attempt + 1,
                        total = self.policy.max_retries + 1,
                        "RAG request failed, retrying in {:.2}s",
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        attempts = attempt + 1,
                        "RAG request failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, request: reqwest::RequestBuilder) -> Result<RagAnswer, RagError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(RagError::Http {
                status: status.as_u16(),
            });
        }

        let body: ResponseBody = response
            .json()
            .await
            .map_err(|e| RagError::Parse(e.to_string()))?;

        let answer = body
            .answer
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| EMPTY_ANSWER_FALLBACK.to_string());

        Ok(RagAnswer {
            answer,
            sources: body.sources.unwrap_or_default(),
            metadata: body.metadata.unwrap_or(serde_json::Value::Null),
        })
    }
}

/// Builder for [`RagClient`].
#[derive(Debug, Default)]
pub struct RagClientBuilder {
    endpoint: Option<String>,
    personal_endpoint: Option<String>,
    policy: RetryPolicy,
}

impl RagClientBuilder {
    /// Set the standard endpoint (e.g. "http://127.0.0.1:8001/get-response").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Override the personalized endpoint.
    ///
    /// Defaults to the standard endpoint with "/personalized" appended.
    pub fn personal_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.personal_endpoint = Some(endpoint.into());
        self
    }

    /// Set the per-request timeout (default: 60 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.policy.timeout = timeout;
        self
    }

    /// Set the maximum number of retries after the initial attempt
    /// (default: 3).
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.policy.max_retries = max_retries;
        self
    }

    /// Set the exponential backoff multiplier in seconds (default: 0.5).
    pub fn backoff_factor(mut self, factor: f64) -> Self {
        self.policy.backoff_factor = factor;
        self
    }

    /// Replace the whole retry policy.
    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the client.
    pub fn build(self) -> RagClient {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let personal_endpoint = self
            .personal_endpoint
            .unwrap_or_else(|| format!("{}/personalized", endpoint.trim_end_matches('/')));

        let client = Client::builder()
            .timeout(self.policy.timeout)
            .build()
            .expect("Failed to build HTTP client");

        RagClient {
            client,
            endpoint,
            personal_endpoint,
            policy: self.policy,
        }
    }
}

/// Response body of the RAG service.
#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    sources: Option<Vec<String>>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

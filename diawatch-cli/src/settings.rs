//! CLI settings loaded from a file and the environment.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use diawatch_rag::RagClient;

/// Connection settings for the RAG assistant service.
///
/// Loaded from an optional TOML file, with `DIAWATCH_*` environment
/// variables layered on top (e.g. `DIAWATCH_RAG_URL`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Standard endpoint of the RAG service.
    pub rag_url: String,

    /// Personalized endpoint override. Derived from `rag_url` when unset.
    pub rag_personal_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum retries after the initial attempt.
    pub max_retries: u32,

    /// Exponential backoff multiplier in seconds.
    pub backoff_factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rag_url: "http://127.0.0.1:8001/get-response".to_string(),
            rag_personal_url: None,
            timeout_secs: 60,
            max_retries: 3,
            backoff_factor: 0.5,
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// With an explicit path the file must exist; otherwise `diawatch.toml`
    /// in the working directory is used when present. Environment variables
    /// prefixed `DIAWATCH_` override file values either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let builder = match path {
            Some(path) => Config::builder().add_source(File::from(path)),
            None => Config::builder().add_source(File::with_name("diawatch").required(false)),
        };

        let config = builder
            .add_source(Environment::with_prefix("DIAWATCH").try_parsing(true))
            .build()
            .context("failed to load settings")?;

        config.try_deserialize().context("invalid settings")
    }

    /// Build a RAG client from these settings.
    pub fn rag_client(&self) -> RagClient {
        let mut builder = RagClient::builder()
            .endpoint(&self.rag_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff_factor(self.backoff_factor);

        if let Some(personal) = &self.rag_personal_url {
            builder = builder.personal_endpoint(personal);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_service() {
        let s = Settings::default();
        assert_eq!(s.rag_url, "http://127.0.0.1:8001/get-response");
        assert_eq!(s.timeout_secs, 60);
        assert_eq!(s.max_retries, 3);
        assert_eq!(s.backoff_factor, 0.5);
        assert!(s.rag_personal_url.is_none());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "rag_url = \"http://rag.internal:8001/get-response\"\nmax_retries = 5"
        )
        .unwrap();

        let s = Settings::load(Some(file.path())).unwrap();
        assert_eq!(s.rag_url, "http://rag.internal:8001/get-response");
        assert_eq!(s.max_retries, 5);
        // Unset keys keep their defaults.
        assert_eq!(s.timeout_secs, 60);
    }

    #[test]
    fn missing_default_file_is_fine() {
        let s = Settings::load(None).unwrap();
        assert_eq!(s.max_retries, Settings::default().max_retries);
    }

    #[test]
    fn client_uses_personal_override() {
        let settings = Settings {
            rag_personal_url: Some("http://rag.internal:9000/custom".to_string()),
            ..Settings::default()
        };
        let client = settings.rag_client();
        assert_eq!(client.personal_endpoint(), "http://rag.internal:9000/custom");
    }
}

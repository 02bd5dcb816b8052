//! # diawatch-rag
//!
//! Retry-hardened client for the RAG assistant microservice.
//!
//! The upstream service answers patient questions, optionally against a
//! personal context block. It is a single dependency that fails in mundane
//! ways - restarts, overload, slow cold starts - so every call retries
//! transient failures with exponential backoff and surfaces a distinct
//! error category for everything else.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diawatch_rag::RagClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RagClient::builder()
//!         .endpoint("http://127.0.0.1:8001/get-response")
//!         .build();
//!
//!     let answer = client.ask("Що таке хлібна одиниця?").await?;
//!     println!("{}", answer.answer);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Retry behavior
//!
//! - Retries on 500/502/503/504/429, timeouts, and connection errors
//! - Other HTTP statuses fail immediately
//! - Delay before attempt `n` is `backoff_factor * 2^n` seconds
//! - Defaults: 3 retries, factor 0.5, 60 s request timeout

mod client;
mod error;
mod policy;

pub use client::{RagAnswer, RagClient, RagClientBuilder};
pub use error::RagError;
pub use policy::RetryPolicy;

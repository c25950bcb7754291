//! Client for an OpenAI-compatible local inference server (LM Studio),
//! the connection check, and LLM-assisted grading.

pub mod check;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod grading;

pub use client::LlmClient;
pub use config::LlmConfig;
pub use error::LlmError;

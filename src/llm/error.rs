use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("connection refused by {url}")]
    ConnectionRefused { url: String },

    #[error("request to {url} timed out after {timeout:?}")]
    TimedOut { url: String, timeout: Duration },

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl LlmError {
    /// Short classification in the style of socket error codes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionRefused { .. } => "ECONNREFUSED",
            Self::TimedOut { .. } => "ETIMEDOUT",
            Self::Status { .. } => "EHTTPSTATUS",
            Self::MalformedResponse(_) => "EBADRESPONSE",
            Self::Request(_) => "EREQUEST",
        }
    }

    /// Error code used on the sidecar protocol.
    pub fn ipc_code(&self) -> &'static str {
        match self {
            Self::ConnectionRefused { .. } => "llm_unreachable",
            Self::TimedOut { .. } => "llm_timeout",
            _ => "llm_failed",
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if err.is_timeout() {
            return Self::TimedOut {
                url: url.to_string(),
                timeout,
            };
        }
        if err.is_connect() && is_connection_refused(&err) {
            return Self::ConnectionRefused {
                url: url.to_string(),
            };
        }
        Self::Request(error_chain(&err))
    }
}

fn is_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = e.source();
    }
    // Some connectors flatten the io error into a message.
    error_chain(err).to_ascii_lowercase().contains("refused")
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(e) = source {
        parts.push(e.to_string());
        source = e.source();
    }
    parts.join(": ")
}

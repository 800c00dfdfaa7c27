use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{operation}: expected {expected} positional arguments, got {got}")]
    Arity {
        operation: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{operation}: {extra} extra positional arguments, operation takes no trailing arguments")]
    AmbiguousArguments {
        operation: &'static str,
        extra: usize,
    },
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
    #[error("transport: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("{url} - {status}, {message}")]
    Service {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("native binding error: {0}")]
    Binding(Value),
    #[error("native binding dropped its callback without settling")]
    BindingDropped,
}

impl Error {
    pub(crate) fn transport<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(source))
    }
}

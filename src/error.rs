use elasticsearch::http::response::Response;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    /// Index or document does not exist (HTTP 404).
    #[error("Not found (index {}): {reason}", index.as_deref().unwrap_or("?"))]
    NotFound {
        index: Option<String>,
        reason: String,
    },

    /// Version conflict (HTTP 409) or an index that already exists.
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Request failed (status {status}): {reason}")]
    Status { status: u16, reason: String },

    #[error("Elasticsearch error: {0}")]
    Elasticsearch(#[from] elasticsearch::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DemoResult<T> = Result<T, DemoError>;

impl DemoError {
    /// Classify a non-success status and its JSON error body.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let error = &body["error"];
        let reason = match (error["type"].as_str(), error["reason"].as_str()) {
            (Some(kind), Some(reason)) => format!("[{kind}] {reason}"),
            (None, Some(reason)) => reason.to_string(),
            // Some 404s (e.g. get on a missing document) carry no error object
            _ => match error.as_str() {
                Some(s) => s.to_string(),
                None => body.to_string(),
            },
        };

        let already_exists = error["type"].as_str() == Some("resource_already_exists_exception");
        match status {
            409 => Self::Conflict { reason },
            _ if already_exists => Self::Conflict { reason },
            404 => Self::NotFound {
                index: error["index"]
                    .as_str()
                    .or_else(|| body["_index"].as_str())
                    .map(String::from),
                reason,
            },
            _ => Self::Status { status, reason },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Pass a successful response through, turning anything else into a `DemoError`.
pub async fn check_response(response: Response) -> DemoResult<Response> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
    tracing::debug!("Request failed with status {status}: {body}");
    Err(DemoError::from_status(status.as_u16(), &body))
}

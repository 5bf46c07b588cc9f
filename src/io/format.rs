//! Output formats and the JSON envelope used by `--json`.

use crate::error::IndexError;
use crate::io::exit_code::ExitCode;
use serde::{Deserialize, Serialize};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for tool integration
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Standard JSON response format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse<T = serde_json::Value>
where
    T: Serialize,
{
    /// Status: "success" or "error"
    pub status: String,

    /// Result code (e.g., "OK", "NO_RESULTS", "INDEX_CORRUPTED")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Actual data payload (only for success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Recovery suggestions (only for errors)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Exit code for shell scripts
    pub exit_code: u8,

    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Version of the tool
    pub version: String,
    pub timestamp: String,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            code: "OK".to_string(),
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            suggestions: Vec::new(),
            exit_code: ExitCode::Success as u8,
            meta: ResponseMeta::default(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl JsonResponse<serde_json::Value> {
    /// An empty result set.
    pub fn no_results(query: &str) -> Self {
        Self {
            status: "success".to_string(),
            code: "NO_RESULTS".to_string(),
            message: format!("No results found for '{query}'"),
            data: None,
            suggestions: vec![
                "Check the spelling".to_string(),
                "Drop the kind filter prefix".to_string(),
            ],
            exit_code: ExitCode::NotFound as u8,
            meta: ResponseMeta::default(),
        }
    }

    /// Create an error response from IndexError.
    pub fn from_error(error: &IndexError) -> Self {
        Self {
            status: "error".to_string(),
            code: error.status_code(),
            message: error.to_string(),
            data: None,
            suggestions: error
                .recovery_suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exit_code: ExitCode::from_error(error) as u8,
            meta: ResponseMeta::default(),
        }
    }
}

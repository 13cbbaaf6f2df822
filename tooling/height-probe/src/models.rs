use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const UNABLE_TO_FETCH_MESSAGE: &str = "Unable to fetch block height";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Unknown,
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckState {
    #[default]
    None,
    Success,
    Failure,
}

/// Invocation metadata sent by the monitoring host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckContext {
    /// Echoed back as [`EvaluationResult::func_name`].
    #[serde(default)]
    pub execute_method: String,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

impl CheckContext {
    pub fn for_method(execute_method: impl Into<String>) -> Self {
        Self {
            execute_method: execute_method.into(),
            options: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub func_name: String,
    pub message: String,
    pub severity: Severity,
    pub state: CheckState,
}

impl EvaluationResult {
    /// The result reported before any observation has been made.
    pub fn unevaluated(func_name: impl Into<String>) -> Self {
        Self {
            func_name: func_name.into(),
            message: UNABLE_TO_FETCH_MESSAGE.to_owned(),
            severity: Severity::Unknown,
            state: CheckState::None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == CheckState::Success
    }
}

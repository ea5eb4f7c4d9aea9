use serde::{Deserialize, Serialize};

use crate::model::task::Task;
use crate::undo::UndoStatus;

// ---------------------------------------------------------------------------
// Form bodies
// ---------------------------------------------------------------------------

/// `POST /add`
#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub task: String,
    #[serde(default, deserialize_with = "form_bool::deserialize")]
    pub done: bool,
}

/// `POST /update/{id}`
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    #[serde(deserialize_with = "form_bool::deserialize")]
    pub done: bool,
}

/// HTML forms send booleans as text; accept the usual spellings.
pub mod form_bool {
    use serde::de::{self, Deserialize, Deserializer};

    pub fn parse(value: &str) -> Option<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => None,
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&raw), &"a boolean such as true or false")
        })
    }
}

// ---------------------------------------------------------------------------
// JSON responses
// ---------------------------------------------------------------------------

/// Body of `POST /clear` and `POST /undo`
#[derive(Debug, Serialize)]
pub struct TodosResponse {
    pub status: UndoStatus,
    pub todos: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorResponse {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

//! Text utility endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::AppError;
use crate::provider::{MountContext, ProviderError, RouteProvider, RouteSpec};
use crate::response::envelope;
use crate::SharedState;

/// Operations applied when the request names none
const DEFAULT_OPERATIONS: &[&str] = &[
    "toUpperCase",
    "toLowerCase",
    "capitalize",
    "reverse",
    "wordCount",
    "charCount",
    "charCountNoSpaces",
    "lineCount",
];

/// Mounts `POST /api/tools/text`
pub struct TextToolsProvider;

#[derive(Debug, Deserialize)]
struct TextToolsOptions {
    #[serde(default = "default_path")]
    path: String,
}

fn default_path() -> String {
    "/api/tools/text".to_string()
}

/// Request body for the text endpoint
#[derive(Debug, Deserialize)]
pub struct TextToolsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub operations: Vec<String>,
}

impl RouteProvider for TextToolsProvider {
    fn name(&self) -> &str {
        "text_tools"
    }

    fn description(&self) -> &str {
        "Case, reversal and counting utilities for text"
    }

    fn routes(&self, ctx: &MountContext<'_>) -> Result<Vec<RouteSpec>, ProviderError> {
        let options: TextToolsOptions = ctx.options()?;
        Ok(vec![RouteSpec::post(options.path, process_text)])
    }
}

async fn process_text(
    State(state): State<SharedState>,
    Json(request): Json<TextToolsRequest>,
) -> Result<Json<Value>, AppError> {
    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Text parameter is required".to_string()))?;

    let results = apply_operations(&text, &request.operations);

    Ok(Json(envelope(
        &state.settings.api.creator,
        json!({
            "message": "Text operations completed successfully",
            "data": results,
        }),
    )))
}

/// Run the named operations over `text`; unknown names are reported inline
pub fn apply_operations(text: &str, operations: &[String]) -> Map<String, Value> {
    let requested: Vec<&str> = if operations.is_empty() {
        DEFAULT_OPERATIONS.to_vec()
    } else {
        operations.iter().map(String::as_str).collect()
    };

    let mut results = Map::new();
    for op in requested {
        let value = match op {
            "toUpperCase" => Value::from(text.to_uppercase()),
            "toLowerCase" => Value::from(text.to_lowercase()),
            "capitalize" => Value::from(capitalize(text)),
            "reverse" => Value::from(text.chars().rev().collect::<String>()),
            "wordCount" => Value::from(text.split_whitespace().count()),
            "charCount" => Value::from(text.chars().count()),
            "charCountNoSpaces" => {
                Value::from(text.chars().filter(|c| !c.is_whitespace()).count())
            }
            "lineCount" => Value::from(text.split('\n').count()),
            "removeSpaces" => Value::from(
                text.chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>(),
            ),
            "removeExtraSpaces" => Value::from(text.split_whitespace().collect::<Vec<_>>().join(" ")),
            "trim" => Value::from(text.trim()),
            other => Value::from(format!("Unknown operation: {}", other)),
        };
        results.insert(op.to_string(), value);
    }
    results
}

/// Uppercase the first character of every word
fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        let word_char = c.is_alphanumeric() || c == '_';
        if word_char && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = word_char;
    }
    out
}

//! Wire format for the generative layout transform.
//!
//! The model receives the current layout plus a free-text instruction and
//! answers with a complete replacement layout. This module only builds the
//! request and decodes the answer; the HTTP call itself lives with the
//! caller (browser `fetch` or a native client).

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::model::HouseLayout;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const SYSTEM_INSTRUCTION: &str = "\
You are an expert architect AI specialized in 2D floor plan generation for multi-story houses.
Your task is to modify a JSON structure representing a house layout based on a user's natural language request.

COORDINATE SYSTEM:
- The layout is a 2D cartesian plane.
- Top-Left is (0,0).
- X-axis increases to the RIGHT (South).
- Y-axis increases DOWNWARDS (West).
- \"Left edge\" corresponds to North (x=0).
- \"Top edge\" corresponds to East (y=0).

STRUCTURE:
- The layout contains 'land' dimensions and an array of 'floors'.
- Each 'floor' has an id, name, and a list of 'rooms'.

OUTPUT:
- A valid JSON object matching the input structure with the requested modifications.
- Ensure structural walls often align between floors (e.g., external walls).
- Ensure rooms do not unintentionally overlap unless specified.
- Ensure rooms generally stay within the land boundaries (0,0) to (land.width, land.height).
- Recalculate positions (x,y) and dimensions (width,height) accurately.
";

/// Connection settings for the transform service. Built once by the host
/// and handed to whoever performs the call.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl TransformConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        TransformConfig {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Everything needed to issue one POST.
#[derive(Clone, Debug)]
pub struct TransformRequest {
    pub url: String,
    pub api_key: String,
    pub body: String,
}

impl TransformRequest {
    pub const API_KEY_HEADER: &'static str = "x-goog-api-key";
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("transform service is not configured: missing API key")]
    MissingApiKey,
    #[error("transform request failed: {0}")]
    Network(String),
    #[error("transform service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transform service returned no content")]
    EmptyResponse,
    #[error("transform response is not a valid layout: {0}")]
    Malformed(String),
}

fn room_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "name": { "type": "STRING" },
            "x": { "type": "NUMBER" },
            "y": { "type": "NUMBER" },
            "width": { "type": "NUMBER" },
            "height": { "type": "NUMBER" },
            "color": { "type": "STRING" },
            "description": { "type": "STRING" }
        },
        "required": ["id", "name", "x", "y", "width", "height", "color"]
    })
}

/// Structured-output schema mirroring [`HouseLayout`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "land": {
                "type": "OBJECT",
                "properties": {
                    "width": { "type": "NUMBER" },
                    "height": { "type": "NUMBER" }
                },
                "required": ["width", "height"]
            },
            "floors": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": { "type": "STRING" },
                        "rooms": { "type": "ARRAY", "items": room_schema() }
                    },
                    "required": ["id", "name", "rooms"]
                }
            }
        },
        "required": ["land", "floors"]
    })
}

pub fn user_content(layout: &HouseLayout, instruction: &str) -> String {
    format!(
        "Current Layout: {}\nUser Instruction: {}",
        layout.to_json(),
        instruction.trim()
    )
}

pub fn build_request(
    config: &TransformConfig,
    layout: &HouseLayout,
    instruction: &str,
) -> Result<TransformRequest, TransformError> {
    if config.api_key.trim().is_empty() {
        return Err(TransformError::MissingApiKey);
    }
    let body = json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{
            "role": "user",
            "parts": [{ "text": user_content(layout, instruction) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    });
    Ok(TransformRequest {
        url: config.url(),
        api_key: config.api_key.clone(),
        body: body.to_string(),
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the model's text out of a `generateContent` response body.
pub fn response_text(body: &str) -> Result<String, TransformError> {
    let resp: GenerateResponse =
        serde_json::from_str(body).map_err(|e| TransformError::Malformed(e.to_string()))?;
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(TransformError::EmptyResponse);
    }
    Ok(text)
}

/// Decode a response body into a replacement layout. Layouts that cannot
/// be rendered are rejected; guidance violations are only logged.
pub fn parse_response(body: &str) -> Result<HouseLayout, TransformError> {
    let text = response_text(body)?;
    let layout =
        HouseLayout::from_json(&text).map_err(|e| TransformError::Malformed(e.to_string()))?;
    let issues = layout.validate();
    if let Some(hard) = issues.iter().find(|i| i.is_hard()) {
        return Err(TransformError::Malformed(hard.to_string()));
    }
    for issue in &issues {
        log::warn!("transform output: {issue}");
    }
    Ok(layout)
}

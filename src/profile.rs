//! Company profile extraction
//!
//! Sends the raw startup description to the model with a fixed analyst
//! instruction, then recovers a JSON object from the (possibly noisy)
//! response and normalizes it into a `CompanyProfile`. The model output
//! is never trusted to be clean JSON.

use crate::error::DiligenceError;
use crate::minimax::ChatModel;
use crate::models::{CompanyProfile, CustomerType, Stage};
use crate::Result;
use serde_json::Value;
use tracing::info;

pub const SYSTEM_PROMPT: &str = "You are a startup analyst. Analyze the startup description provided and extract structured information.

Return ONLY valid JSON with exactly these keys (use null if information is not mentioned):
- business_model: string (e.g., SaaS, marketplace, fintech, e-commerce, hardware, etc.)
- customer_type: string (\"B2B\" or \"B2C\" only, or null)
- stage: string (\"pre-seed\" or \"seed\" only, or null)
- milestone: string (what they want to achieve next, or null)
- mentioned_competitors: array of strings (company names if mentioned, or empty array [])

Do not include any other text, markdown, or explanation. Output only the raw JSON object.";

/// Bound on the raw-response excerpt carried in parse errors.
const ERROR_EXCERPT_CHARS: usize = 500;

/// Extract a structured company profile from a startup description.
///
/// Blank input short-circuits to the all-empty profile without a model
/// call.
pub async fn extract_company_profile(
    model: &dyn ChatModel,
    description: &str,
) -> Result<CompanyProfile> {
    let description = description.trim();
    if description.is_empty() {
        return Ok(CompanyProfile::default());
    }

    let response = model.complete(SYSTEM_PROMPT, description).await?;

    let profile = parse_profile_response(&response)?;
    info!(
        business_model = ?profile.business_model,
        stage = ?profile.stage,
        "Extracted company profile"
    );
    Ok(profile)
}

/// Parse JSON out of a model response, handling markdown fences and
/// surrounding prose.
pub fn parse_profile_response(response: &str) -> Result<CompanyProfile> {
    let mut text = response.trim();

    if let Some(inner) = strip_code_fence(text) {
        text = inner;
    }
    let text = truncate_to_object(text);

    let value: Value = serde_json::from_str(text).map_err(|e| {
        DiligenceError::UpstreamParse(format!(
            "Failed to parse model response as JSON: {}. Raw response: {}",
            e,
            excerpt(response)
        ))
    })?;

    let object = value.as_object().ok_or_else(|| {
        DiligenceError::UpstreamParse(format!(
            "Model response was not a JSON object. Raw response: {}",
            excerpt(response)
        ))
    })?;

    Ok(CompanyProfile {
        business_model: string_field(object.get("business_model")),
        customer_type: object
            .get("customer_type")
            .and_then(Value::as_str)
            .and_then(CustomerType::parse),
        stage: object
            .get("stage")
            .and_then(Value::as_str)
            .and_then(Stage::parse),
        milestone: string_field(object.get("milestone")),
        mentioned_competitors: normalize_competitors(object.get("mentioned_competitors")),
    })
}

/// Contents of the first ``` fenced block, if any. An optional `json`
/// language tag after the opening fence is skipped.
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let mut inner = &text[start + 3..];
    if let Some(tagged) = inner.strip_prefix("json") {
        inner = tagged;
    }
    let end = inner.find("```")?;
    Some(inner[..end].trim())
}

/// Truncate to the first balanced `{...}` object, dropping any trailing
/// prose. Leaves the text untouched when no balanced object is found so
/// the JSON parser reports the failure.
fn truncate_to_object(text: &str) -> &str {
    let Some(start) = text.find('{') else {
        return text;
    };
    let mut depth = 0usize;
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return &text[start..start + offset + 1];
                }
            }
            _ => {}
        }
    }
    text
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Coerce `mentioned_competitors` to a list of non-empty trimmed strings
/// regardless of whether the model returned null, a scalar, or a list.
fn normalize_competitors(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(other) => scalar_to_string(other)
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string().trim().to_string()),
    }
}

fn excerpt(response: &str) -> String {
    response.chars().take(ERROR_EXCERPT_CHARS).collect()
}

//! Validation of untrusted exercise payloads
//!
//! The REST catalog and the generative-AI auto-fill both hand back loosely
//! shaped JSON. These functions turn it into domain structures or a
//! [`ParseError`] naming the offending item; nothing unchecked gets through.

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::errors::ParseError;
use crate::models::{ExerciseDefinition, ExerciseDraft};

/// Fields every catalog exercise must carry
const DEFINITION_REQUIRED_FIELDS: &[&str] = &["exerciseId", "exerciseName"];

/// Fields every auto-fill draft must carry
const DRAFT_REQUIRED_FIELDS: &[&str] = &["exerciseName"];

/// Parse catalog exercises
///
/// Accepts a bare array, an object with an `exercises` array, or a single
/// exercise object.
pub fn parse_exercise_definitions(payload: &Value) -> Result<Vec<ExerciseDefinition>, ParseError> {
    parse_items(payload, DEFINITION_REQUIRED_FIELDS)
}

/// Parse AI auto-fill drafts (same shapes as [`parse_exercise_definitions`])
pub fn parse_exercise_drafts(payload: &Value) -> Result<Vec<ExerciseDraft>, ParseError> {
    parse_items(payload, DRAFT_REQUIRED_FIELDS)
}

/// Parse the raw text an AI model replied with
///
/// Models often wrap JSON in Markdown code fences; those are stripped first.
pub fn parse_ai_exercise_payload(text: &str) -> Result<Vec<ExerciseDraft>, ParseError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(ParseError::Empty);
    }
    let payload: Value =
        serde_json::from_str(body).map_err(|e| ParseError::Malformed(e.to_string()))?;
    parse_exercise_drafts(&payload)
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if present
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening line
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

fn collect_items(payload: &Value) -> Result<Vec<&Value>, ParseError> {
    match payload {
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(map) => match map.get("exercises") {
            Some(Value::Array(items)) => Ok(items.iter().collect()),
            Some(_) => Err(ParseError::Malformed(
                "'exercises' must be an array".to_string(),
            )),
            None => Ok(vec![payload]),
        },
        _ => Err(ParseError::Malformed(
            "expected an exercise object or array".to_string(),
        )),
    }
}

fn parse_items<T>(payload: &Value, required: &[&str]) -> Result<Vec<T>, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let items = collect_items(payload)?;
    if items.is_empty() {
        return Err(ParseError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_item(index, item, required))
        .collect()
}

fn parse_item<T>(index: usize, item: &Value, required: &[&str]) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let Value::Object(map) = item else {
        return Err(ParseError::Invalid {
            index,
            message: "expected an object".to_string(),
        });
    };

    for field in required {
        match map.get(*field) {
            None | Some(Value::Null) => {
                return Err(ParseError::MissingField {
                    index,
                    field: field.to_string(),
                })
            }
            _ => {}
        }
    }

    let parsed: T = serde_json::from_value(item.clone()).map_err(|e| ParseError::Invalid {
        index,
        message: e.to_string(),
    })?;

    parsed.validate().map_err(|errors| ParseError::Invalid {
        index,
        message: describe(&errors),
    })?;

    Ok(parsed)
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

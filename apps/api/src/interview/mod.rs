// Interview features: single-shot assistant and the multi-turn mock interview.
// All generator calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;

use serde_json::Value;

use crate::errors::AppError;
use crate::models::interview::{
    InterviewContext, DEFAULT_NUM_QUESTIONS, DEFAULT_ROUND_TYPE, MAX_NUM_QUESTIONS,
};

/// Builds an `InterviewContext` from raw request fields, applying defaults and bounds.
pub fn resolve_context(
    company: Option<String>,
    role: Option<String>,
    round_type: Option<String>,
    num_questions: Option<&Value>,
) -> Result<InterviewContext, AppError> {
    let round_type = round_type
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROUND_TYPE.to_string());

    Ok(InterviewContext {
        company,
        role,
        round_type,
        num_questions: parse_num_questions(num_questions)?,
    })
}

/// Accepts a JSON integer or a numeric string. Must fall in `1..=MAX_NUM_QUESTIONS`.
pub fn parse_num_questions(raw: Option<&Value>) -> Result<u32, AppError> {
    let invalid = || {
        AppError::Validation(format!(
            "num_questions must be an integer between 1 and {MAX_NUM_QUESTIONS}"
        ))
    };

    let n: i64 = match raw {
        None | Some(Value::Null) => return Ok(DEFAULT_NUM_QUESTIONS),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e9 => f as i64,
            _ => return Err(invalid()),
        },
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };

    u32::try_from(n)
        .ok()
        .filter(|n| (1..=MAX_NUM_QUESTIONS).contains(n))
        .ok_or_else(invalid)
}

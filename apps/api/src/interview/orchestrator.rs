//! Mock interview turn driver.
//!
//! Stateless: the caller sends the whole transcript on every turn, and the transcript
//! length alone decides whether the generator is asked for the next question or for
//! grading. The reply is then classified as either a question or a completion result.

use serde_json::{Map, Value};
use tracing::debug;

use crate::interview::prompts::{build_prompt, PromptMode};
use crate::llm_client::{GeneratorError, TextGenerator};
use crate::models::interview::{InterviewContext, InterviewTurnResult, QaPair};

/// Token whose presence marks a reply as a completion result.
pub const COMPLETION_MARKER: &str = "finished";

/// Runs one turn: render the prompt, call the generator, classify the reply.
pub async fn run_turn(
    generator: &dyn TextGenerator,
    context: &InterviewContext,
    transcript: &[QaPair],
) -> Result<InterviewTurnResult, GeneratorError> {
    let mode = PromptMode::select(context, transcript);
    let prompt = build_prompt(context, transcript);
    debug!(
        "Mock interview turn: mode={mode:?}, answered={}/{}\n{prompt}",
        transcript.len(),
        context.num_questions
    );

    let reply = generator.generate(&prompt).await?;
    debug!("Generator reply: {reply}");

    Ok(interpret_reply(&reply, mode))
}

/// Classifies generated text. Never fails: an unparsable completion becomes
/// `InterviewTurnResult::Unparsed` carrying the full text.
///
/// While questions remain, a reply with no `{` at all is a question even if it
/// happens to contain the completion marker.
pub fn interpret_reply(text: &str, mode: PromptMode) -> InterviewTurnResult {
    if !text.contains(COMPLETION_MARKER) {
        return InterviewTurnResult::Question(text.to_string());
    }
    if mode == PromptMode::InProgress && !text.contains('{') {
        return InterviewTurnResult::Question(text.to_string());
    }
    match extract_completion(text) {
        Some(fields) => InterviewTurnResult::Graded(fields),
        None => InterviewTurnResult::Unparsed(text.to_string()),
    }
}

/// Tries fenced blocks first, then balanced `{...}` objects, then the legacy
/// first-`{`-to-last-`}` span.
fn extract_completion(text: &str) -> Option<Map<String, Value>> {
    fenced_blocks(text)
        .into_iter()
        .chain(balanced_objects(text))
        .chain(legacy_span(text))
        .find_map(parse_completion)
}

/// `finished: true` plus non-negative integer `correct` and `total`.
fn parse_completion(candidate: &str) -> Option<Map<String, Value>> {
    let fields = serde_json::from_str::<Map<String, Value>>(candidate.trim()).ok()?;
    let finished = fields.get("finished").and_then(Value::as_bool) == Some(true);
    let counted = ["correct", "total"]
        .iter()
        .all(|key| fields.get(*key).and_then(Value::as_u64).is_some());
    (finished && counted).then_some(fields)
}

/// Bodies of ``` fences, with any language tag dropped.
fn fenced_blocks(text: &str) -> Vec<&str> {
    let mut pieces = text.split("```");
    pieces.next();
    pieces
        .step_by(2)
        .map(|block| block.trim_start_matches(|c: char| c.is_ascii_alphabetic()))
        .collect()
}

/// Every depth-balanced `{...}` span, outermost first. Braces inside JSON
/// string literals are ignored.
fn balanced_objects(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut starts: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' if !starts.is_empty() => in_string = true,
            '{' => starts.push(i),
            '}' => {
                if let Some(start) = starts.pop() {
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    spans.sort_by_key(|&(start, _)| start);
    spans.into_iter().map(|(s, e)| &text[s..e]).collect()
}

fn legacy_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

// Prompt rendering for the assistant and the mock interview.
// Every function here is pure: same inputs, same text.

use std::fmt::Write;

use crate::models::interview::{InterviewContext, QaPair};

/// Which instruction block a mock-interview turn sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Fewer answers than questions: ask for the next question.
    InProgress,
    /// Every question answered: ask for grading.
    Grading,
}

impl PromptMode {
    pub fn select(context: &InterviewContext, transcript: &[QaPair]) -> Self {
        if transcript.len() < context.num_questions as usize {
            PromptMode::InProgress
        } else {
            PromptMode::Grading
        }
    }
}

const COMPLETION_OBJECT: &str =
    r#"{"finished": true, "correct": <number_correct>, "total": <total_questions>}"#;

fn context_block(context: &InterviewContext) -> String {
    format!(
        "Context:\n\
         - Company: {}\n\
         - Role: {}\n\
         - Interview Round: {}\n\
         - Number of Questions: {}\n",
        or_any(context.company.as_deref()),
        or_any(context.role.as_deref()),
        context.round_type,
        context.num_questions,
    )
}

fn or_any(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("Any")
}

/// `Q1: ...\nA1: ...\n` for each pair, in order.
pub fn render_transcript(transcript: &[QaPair]) -> String {
    let mut out = String::new();
    for (idx, qa) in transcript.iter().enumerate() {
        let n = idx + 1;
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Q{n}: {}", qa.question);
        let _ = writeln!(out, "A{n}: {}", qa.answer);
    }
    out
}

/// Single-shot question generator used by `/ask_assistant`.
pub fn build_assistant_prompt(context: &InterviewContext) -> String {
    let n = context.num_questions;
    let round = &context.round_type;
    format!(
        "You are an expert interview question generator for campus placements.\n\n\
         {ctx}\n\
         Task:\n\
         Generate {n} high-quality, relevant interview questions for the {round} round. \
         The questions should be tailored to the company and/or role if provided. \
         Return the questions as a numbered list. \
         Present one question at a time. \
         Provide the next question only after the previous one is answered. \
         After all questions have been answered, display the final result showing how many answers were correct.\n",
        ctx = context_block(context),
    )
}

/// Mock-interview turn prompt. The mode is chosen from the transcript length.
pub fn build_prompt(context: &InterviewContext, transcript: &[QaPair]) -> String {
    let ctx = context_block(context);
    let history = render_transcript(transcript);

    match PromptMode::select(context, transcript) {
        PromptMode::InProgress => format!(
            "You are an expert interview question generator for campus placements.\n\n\
             {ctx}\n\
             Task:\n\
             Present one question at a time. \
             Provide the next question only after the previous one is answered. \
             After all questions have been answered, display the final result showing how many answers were correct.\n\n\
             Here is the interview so far:\n\
             {history}\n\
             Please provide the next question only, as plain text. \
             If all questions are answered, provide the final result as a JSON object \
             inside a ```json fenced block: {COMPLETION_OBJECT}\n"
        ),
        PromptMode::Grading => format!(
            "You are an expert interview evaluator for campus placements.\n\n\
             {ctx}\n\
             Task:\n\
             All questions have been answered. Here is the interview:\n\
             {history}\n\
             Count how many answers are correct. \
             Return only a JSON object inside a ```json fenced block: {COMPLETION_OBJECT}\n"
        ),
    }
}

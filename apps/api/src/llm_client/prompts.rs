// Caller-facing fallback text for chat-style endpoints.
// Generator failures there are reported inside a success-shaped response.

use super::GeneratorError;

pub const TRANSPORT_FALLBACK: &str = "I apologize, but I'm having trouble processing your request right now. Please try again later.";

pub const EMPTY_CANDIDATE_FALLBACK: &str =
    "I apologize, but I couldn't generate a response. Please try rephrasing your question.";

pub const UNEXPECTED_FALLBACK: &str =
    "I encountered an error while processing your request. Please try again.";

/// Maps a generator failure to the apology shown in place of generated text.
pub fn fallback_message(err: &GeneratorError) -> &'static str {
    if err.is_transport() {
        TRANSPORT_FALLBACK
    } else if matches!(err, GeneratorError::EmptyCandidate) {
        EMPTY_CANDIDATE_FALLBACK
    } else {
        UNEXPECTED_FALLBACK
    }
}

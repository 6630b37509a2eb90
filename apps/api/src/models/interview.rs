use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const DEFAULT_ROUND_TYPE: &str = "Technical";
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;
/// Upper bound on questions per interview; keeps prompts bounded.
pub const MAX_NUM_QUESTIONS: u32 = 20;

/// Per-request interview parameters. Never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewContext {
    pub company: Option<String>,
    pub role: Option<String>,
    pub round_type: String,
    pub num_questions: u32,
}

impl Default for InterviewContext {
    fn default() -> Self {
        Self {
            company: None,
            role: None,
            round_type: DEFAULT_ROUND_TYPE.to_string(),
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }
}

/// One answered question of the client-held transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Body of `POST /ask_assistant`.
#[derive(Debug, Default, Deserialize)]
pub struct AssistantRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub round_type: Option<String>,
    /// Number or numeric string.
    pub num_questions: Option<Value>,
}

/// Body of `POST /mock_interview`.
#[derive(Debug, Default, Deserialize)]
pub struct MockInterviewRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub round_type: Option<String>,
    pub num_questions: Option<Value>,
    pub previous_answers: Option<Vec<QaPair>>,
}

/// Outcome of one mock-interview turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewTurnResult {
    Question(String),
    /// Completion object as the generator wrote it. Always carries `finished: true`
    /// and non-negative integer `correct`/`total`; any other keys are kept.
    Graded(Map<String, Value>),
    /// The generator signalled completion but no result object could be parsed.
    Unparsed(String),
}

impl Serialize for InterviewTurnResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            InterviewTurnResult::Question(question) => {
                map.serialize_entry("question", question)?;
                map.serialize_entry("finished", &false)?;
            }
            InterviewTurnResult::Graded(fields) => {
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
            }
            InterviewTurnResult::Unparsed(raw) => {
                map.serialize_entry("finished", &true)?;
                map.serialize_entry("rawResult", raw)?;
            }
        }
        map.end()
    }
}

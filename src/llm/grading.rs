use crate::llm::client::{ChatMessage, LlmClient, Usage};
use crate::llm::config::GRADING_TIMEOUT;
use crate::llm::error::LlmError;
use crate::llm::extract::{extract_verdict, ExtractError, GradeVerdict};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

const SYSTEM_PROMPT: &str = "You are an impartial examiner grading short written answers. \
Respond with a single JSON object and nothing else, using exactly these keys: \
\"marksObtained\" (number), \"feedback\" (string for the student), \"reasoning\" (string for the teacher).";

#[derive(Debug, Clone, PartialEq)]
pub struct GradingRequest {
    pub question: String,
    pub reference_answer: Option<String>,
    pub student_answer: String,
    pub max_marks: f64,
}

impl GradingRequest {
    /// Question used by the connection check to exercise the grading path.
    pub fn sample() -> Self {
        Self {
            question: "What is the chemical formula for water?".to_string(),
            reference_answer: Some("H2O: two hydrogen atoms bonded to one oxygen atom.".to_string()),
            student_answer: "Water is H2O.".to_string(),
            max_marks: 5.0,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut prompt = format!(
            "Question: {}\nMaximum marks: {}\n",
            self.question.trim(),
            self.max_marks
        );
        if let Some(reference) = self.reference_answer.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            prompt.push_str(&format!("Reference answer: {reference}\n"));
        }
        prompt.push_str(&format!(
            "Student answer: {}\n\nAward between 0 and {} marks.",
            self.student_answer.trim(),
            self.max_marks
        ));
        vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    #[serde(flatten)]
    pub verdict: GradeVerdict,
    pub max_marks: f64,
    /// True when the model's figure was outside `[0, maxMarks]`.
    pub clamped: bool,
    pub usage: Option<Usage>,
}

#[derive(Debug, Error)]
pub enum GradingError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("{reason}")]
    NoVerdict { reason: ExtractError, reply: String },
}

pub fn clamp_marks(marks: f64, max_marks: f64) -> (f64, bool) {
    if !marks.is_finite() {
        return (0.0, true);
    }
    let clamped = marks.clamp(0.0, max_marks.max(0.0));
    (clamped, clamped != marks)
}

pub fn evaluate(client: &LlmClient, request: &GradingRequest) -> Result<GradeOutcome, GradingError> {
    let reply = client.chat(&request.messages(), GRADING_TIMEOUT)?;
    let mut verdict = match extract_verdict(&reply.content) {
        Ok(v) => v,
        Err(reason) => {
            warn!(%reason, "grading reply had no usable verdict");
            return Err(GradingError::NoVerdict {
                reason,
                reply: reply.content,
            });
        }
    };
    let (marks, clamped) = clamp_marks(verdict.marks_obtained, request.max_marks);
    verdict.marks_obtained = marks;
    info!(marks, max_marks = request.max_marks, clamped, "graded answer");
    Ok(GradeOutcome {
        verdict,
        max_marks: request.max_marks,
        clamped,
        usage: reply.usage,
    })
}

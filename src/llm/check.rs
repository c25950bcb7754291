//! `assessd check-llm`: verifies that the inference server answers and that
//! a grading reply can be turned into a verdict.

use crate::llm::client::{ChatMessage, LlmClient, Usage};
use crate::llm::config::{LlmConfig, GRADING_TIMEOUT, PROBE_TIMEOUT};
use crate::llm::error::LlmError;
use crate::llm::extract::{extract_verdict, GradeVerdict};
use crate::llm::grading::GradingRequest;
use std::io::{self, Write};
use tracing::warn;

const GREETING_PROMPT: &str = "Say hello in one short sentence.";

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub connected: bool,
    pub error_code: Option<&'static str>,
    pub usage: Option<Usage>,
    pub verdict: Option<GradeVerdict>,
}

/// What to tell the operator for a failed connection.
pub fn remediation_steps(err: &LlmError, config: &LlmConfig) -> Vec<String> {
    match err {
        LlmError::ConnectionRefused { .. } => vec![
            "Open LM Studio".to_string(),
            "Download and load a chat model (for example a 7B instruct model)".to_string(),
            "Open the \"Local Server\" (Developer) tab".to_string(),
            "Click \"Start Server\"".to_string(),
            format!("Make sure the server URL matches {}", config.api_url),
            "Run this check again".to_string(),
        ],
        LlmError::TimedOut { .. } => vec![
            "The server accepted the connection but did not answer in time".to_string(),
            "Check that a model is fully loaded in LM Studio".to_string(),
            "Try a smaller or quantized model if responses are slow".to_string(),
        ],
        LlmError::Status { status, .. } if *status == 404 => vec![
            format!("Check that {} ends with /v1/chat/completions", config.api_url),
            format!("Check that model \"{}\" is loaded", config.model),
        ],
        _ => Vec::new(),
    }
}

pub fn run_connection_check(client: &LlmClient, out: &mut impl Write) -> io::Result<CheckOutcome> {
    let config = client.config();
    writeln!(out, "Testing LM Studio connection")?;
    writeln!(out, "  URL:   {}", config.api_url)?;
    writeln!(out, "  Model: {}", config.model)?;
    writeln!(out)?;

    writeln!(out, "[1/2] Basic chat completion")?;
    let greeting = client.chat(&[ChatMessage::user(GREETING_PROMPT)], PROBE_TIMEOUT);
    let reply = match greeting {
        Ok(reply) => reply,
        Err(err) => {
            report_failure(&err, config, out)?;
            return Ok(CheckOutcome {
                connected: false,
                error_code: Some(err.code()),
                usage: None,
                verdict: None,
            });
        }
    };

    writeln!(out, "SUCCESS: connected to LM Studio")?;
    writeln!(out, "Response: {}", reply.content.trim())?;
    if let Some(usage) = reply.usage {
        writeln!(out, "Token usage:")?;
        writeln!(out, "  Prompt tokens: {}", usage.prompt_tokens)?;
        writeln!(out, "  Completion tokens: {}", usage.completion_tokens)?;
        writeln!(out, "  Total tokens: {}", usage.total_tokens)?;
    }
    writeln!(out)?;

    writeln!(out, "[2/2] Grading prompt")?;
    let verdict = grading_probe(client, out)?;

    writeln!(out)?;
    writeln!(out, "LM Studio is ready for AI-assisted grading.")?;
    Ok(CheckOutcome {
        connected: true,
        error_code: None,
        usage: reply.usage,
        verdict,
    })
}

/// Never fails the check; problems are printed as warnings.
fn grading_probe(client: &LlmClient, out: &mut impl Write) -> io::Result<Option<GradeVerdict>> {
    let request = GradingRequest::sample();
    let reply = match client.chat(&request.messages(), GRADING_TIMEOUT) {
        Ok(reply) => reply,
        Err(err) => {
            warn!(%err, "grading probe failed");
            writeln!(out, "WARNING: grading request failed ({}): {}", err.code(), err)?;
            return Ok(None);
        }
    };
    match extract_verdict(&reply.content) {
        Ok(verdict) => {
            writeln!(out, "Parsed grading verdict:")?;
            writeln!(
                out,
                "  Marks obtained: {} / {}",
                verdict.marks_obtained, request.max_marks
            )?;
            writeln!(out, "  Feedback: {}", verdict.feedback)?;
            writeln!(out, "  Reasoning: {}", verdict.reasoning)?;
            Ok(Some(verdict))
        }
        Err(reason) => {
            writeln!(out, "WARNING: {reason}; the model may not follow the JSON format.")?;
            writeln!(out, "Raw reply: {}", reply.content.trim())?;
            Ok(None)
        }
    }
}

fn report_failure(err: &LlmError, config: &LlmConfig, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "FAILED: could not reach LM Studio ({})", err.code())?;
    writeln!(out, "Error: {err}")?;
    let steps = remediation_steps(err, config);
    if !steps.is_empty() {
        writeln!(out)?;
        writeln!(out, "To fix this:")?;
        for (i, step) in steps.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, step)?;
        }
    }
    Ok(())
}

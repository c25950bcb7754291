use crate::ipc::error::{err, ok};
use crate::ipc::handlers::setup::effective_llm_config;
use crate::ipc::helpers::{db_conn, parse_opt_string, required_str};
use crate::ipc::types::{AppState, Request};
use crate::llm::check::{remediation_steps, run_connection_check};
use crate::llm::grading::{evaluate, GradingError, GradingRequest};
use crate::llm::{LlmClient, LlmConfig, LlmError};
use serde_json::json;
use tracing::info;

/// Stored settings when a workspace is open, otherwise the environment alone.
fn resolve_config(state: &AppState, req: &Request) -> Result<LlmConfig, serde_json::Value> {
    match state.db.as_ref() {
        Some(conn) => effective_llm_config(conn)
            .map_err(|e| err(&req.id, "db_query_failed", e.to_string(), None)),
        None => Ok(LlmConfig::from_env()),
    }
}

fn llm_err(req: &Request, e: &LlmError, config: &LlmConfig) -> serde_json::Value {
    err(
        &req.id,
        e.ipc_code(),
        e.to_string(),
        Some(json!({
            "code": e.code(),
            "remediation": remediation_steps(e, config),
        })),
    )
}

fn client_for(req: &Request, config: LlmConfig) -> Result<LlmClient, serde_json::Value> {
    LlmClient::new(config.clone()).map_err(|e| llm_err(req, &e, &config))
}

fn handle_llm_check_connection(state: &mut AppState, req: &Request) -> serde_json::Value {
    let config = match resolve_config(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let url = match parse_opt_string(req.params.get("apiUrl")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("apiUrl {}", m), None),
    };
    let model = match parse_opt_string(req.params.get("model")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("model {}", m), None),
    };
    let client = match client_for(req, config.with_cli_overrides(url, model)) {
        Ok(c) => c,
        Err(e) => return e,
    };

    let mut transcript = Vec::new();
    let outcome = match run_connection_check(&client, &mut transcript) {
        Ok(o) => o,
        Err(e) => return err(&req.id, "llm_failed", e.to_string(), None),
    };
    info!(connected = outcome.connected, code = ?outcome.error_code, "connection check finished");
    let lines: Vec<String> = String::from_utf8_lossy(&transcript)
        .lines()
        .map(str::to_string)
        .collect();
    ok(
        &req.id,
        json!({
            "connected": outcome.connected,
            "errorCode": outcome.error_code,
            "usage": outcome.usage,
            "verdict": outcome.verdict,
            "config": client.config(),
            "transcript": lines,
        }),
    )
}

fn handle_grading_evaluate(state: &mut AppState, req: &Request) -> serde_json::Value {
    // A workspace is needed for the stored model settings.
    if let Err(e) = db_conn(state, req) {
        return e;
    }
    let question = match required_str(req, "question") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let student_answer = match required_str(req, "studentAnswer") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let reference_answer = match parse_opt_string(req.params.get("referenceAnswer")) {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", format!("referenceAnswer {}", m), None),
    };
    let Some(max_marks) = req.params.get("maxMarks").and_then(|v| v.as_f64()) else {
        return err(&req.id, "bad_params", "missing maxMarks", None);
    };
    if !(max_marks.is_finite() && max_marks > 0.0) {
        return err(&req.id, "bad_params", "maxMarks must be > 0", None);
    }

    let config = match resolve_config(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let client = match client_for(req, config) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let request = GradingRequest {
        question,
        reference_answer,
        student_answer,
        max_marks,
    };
    match evaluate(&client, &request) {
        Ok(outcome) => ok(&req.id, json!({ "grade": outcome })),
        Err(GradingError::Llm(e)) => llm_err(req, &e, client.config()),
        Err(GradingError::NoVerdict { reason, reply }) => err(
            &req.id,
            "llm_failed",
            "model reply did not contain a grading verdict",
            Some(json!({ "reason": reason.to_string(), "reply": reply })),
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "llm.checkConnection" => Some(handle_llm_check_connection(state, req)),
        "grading.evaluate" => Some(handle_grading_evaluate(state, req)),
        _ => None,
    }
}

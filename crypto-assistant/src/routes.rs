use crate::interpreter::{CommandInterpreter, GENERIC_APOLOGY};
use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;
use tracing::{info, warn};

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// `{"command": "..."}` in, `{"response": "..."}` out.
///
/// The body is parsed by hand so that malformed JSON still gets a spoken
/// apology instead of actix's plain-text 400.
#[post("/api/process-command")]
pub async fn process_command(
    interpreter: web::Data<CommandInterpreter>,
    body: web::Bytes,
) -> HttpResponse {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Unreadable command body: {}", e);
            return HttpResponse::Ok().json(serde_json::json!({
                "response": GENERIC_APOLOGY
            }));
        }
    };

    let command = match payload.get("command").and_then(Value::as_str) {
        Some(command) if !command.is_empty() => command,
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Command is required"
            }))
        }
    };

    let result = interpreter.interpret_with_diagnostics(command).await;
    info!(intent = %result.intent, degraded = result.failure.is_some(), "processed command");

    HttpResponse::Ok().json(serde_json::json!({
        "response": result.response
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).service(process_command);
}

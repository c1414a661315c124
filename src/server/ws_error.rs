/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Every error carries a code, a human-readable message and an optional context,
/// whether it travels as a WebSocket frame or an HTTP body.
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse, http::StatusCode};
use log::warn;
use serde_json::{json, Value};

use crate::server::play_session::messages::ServerMessage;

/// Builds a WebSocket error frame (`{"action":"Error","data":{...}}`).
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_ACTION").
/// - `message`: Human-readable error message.
/// - `context`: Optional context (e.g. the offending index).
pub fn ws_error(code: &str, message: &str, context: Option<Value>) -> ServerMessage {
    ServerMessage::Error {
        code: code.to_string(),
        message: message.to_string(),
        context: context.unwrap_or(Value::Null),
    }
}

/// Same as [`ws_error`], already serialized for the socket.
pub fn ws_error_message(code: &str, message: &str, context: Option<Value>) -> String {
    ws_error(code, message, context).to_json()
}

/// The frame sent when an action arrives during a run.
pub fn ws_busy() -> ServerMessage {
    ws_error(
        "BUSY",
        "Commands cannot be changed while the program is running.",
        None,
    )
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context string.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(""),
        }
    }))
}

/// `JsonConfig` error handler: malformed request bodies get the JSON error shape.
pub fn json_body_error(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let detail = err.to_string();
    warn!("[Http] rejected body on {}: {}", req.path(), detail);
    let response = http_error_response(
        "INVALID_BODY",
        "Request body could not be read.",
        Some(detail.as_str()),
        StatusCode::BAD_REQUEST,
    );
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_error_frame_shape() {
        let frame = ws_error_message("INVALID_ACTION", "Bad \"frame\"", Some(json!({"index": 3})));
        let value: Value = serde_json::from_str(&frame).expect("valid json");
        assert_eq!(value["action"], "Error");
        assert_eq!(value["data"]["code"], "INVALID_ACTION");
        assert_eq!(value["data"]["message"], "Bad \"frame\"");
        assert_eq!(value["data"]["context"]["index"], 3);
    }

    #[test]
    fn test_busy_frame() {
        let value: Value = serde_json::from_str(&ws_busy().to_json()).expect("valid json");
        assert_eq!(value["data"]["code"], "BUSY");
        assert_eq!(value["data"]["context"], Value::Null);
    }

    #[test]
    fn test_http_error_status() {
        let response = http_error_response("LEVEL_NOT_FOUND", "Unknown level", Some("9-9"), StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Severity a browser page may attach to a forwarded log line
///
/// Names the server does not know are accepted and written at `info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientLogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    #[serde(other)]
    Unrecognized,
}

impl ClientLogLevel {
    /// Level the line is actually written at
    pub fn effective(self) -> Self {
        match self {
            Self::Unrecognized => Self::Info,
            level => level,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogRequest {
    #[serde(default)]
    pub level: ClientLogLevel,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
    pub level: ClientLogLevel,
}

/// Write a log line sent by the sales page into the server log
pub async fn log_message(Json(request): Json<LogRequest>) -> Result<Json<LogResponse>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let component = request.component.as_deref().unwrap_or("sales-page");
    let level = request.level.effective();
    match level {
        ClientLogLevel::Debug => debug!(target: "sales_page", component, "{}", request.message),
        ClientLogLevel::Warn => warn!(target: "sales_page", component, "{}", request.message),
        ClientLogLevel::Error => error!(target: "sales_page", component, "{}", request.message),
        ClientLogLevel::Info | ClientLogLevel::Unrecognized => {
            info!(target: "sales_page", component, "{}", request.message)
        }
    }

    Ok(Json(LogResponse { success: true, level }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::test_support::{send, test_app};
    use axum::http::Method;
    use serde_json::json;

    #[test]
    fn test_level_names() {
        let parse = |name: &str| serde_json::from_value::<ClientLogLevel>(json!(name)).unwrap();
        assert_eq!(parse("warn"), ClientLogLevel::Warn);
        assert_eq!(parse("debug"), ClientLogLevel::Debug);
        assert_eq!(parse("verbose"), ClientLogLevel::Unrecognized);
        assert_eq!(parse("verbose").effective(), ClientLogLevel::Info);
        assert_eq!(ClientLogLevel::Error.effective(), ClientLogLevel::Error);
    }

    #[tokio::test]
    async fn test_log_forwarding() {
        let (app, _, _) = test_app(Vec::new()).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/logs",
            Some(json!({"level": "warn", "message": "table failed to load", "component": "sales-table"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["level"], "warn");
    }

    #[tokio::test]
    async fn test_unknown_or_missing_level_logs_at_info() {
        let (app, _, _) = test_app(Vec::new()).await;
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/logs",
            Some(json!({"level": "trace-ish", "message": "hello"})),
        )
        .await;
        assert_eq!(body["level"], "info");

        let (status, body) = send(&app, Method::POST, "/api/logs", Some(json!({"message": "hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "info");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let (app, _, _) = test_app(Vec::new()).await;
        let (status, _) = send(&app, Method::POST, "/api/logs", Some(json!({"level": "error", "message": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

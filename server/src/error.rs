use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde_json::json;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = *self.0.current_context();
        let status = match context {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::InvalidState => StatusCode::CONFLICT,
            KernelError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            KernelError::Authentication => StatusCode::UNAUTHORIZED,
            KernelError::Authorization => StatusCode::FORBIDDEN,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
            return (status, Json(json!({ "error": context.to_string() }))).into_response();
        }
        tracing::debug!("{:?}", self.0);
        // The latest printable attachment carries the reason, e.g. "Title is required".
        let message = self
            .0
            .frames()
            .find_map(|frame| {
                frame
                    .downcast_ref::<String>()
                    .cloned()
                    .or_else(|| frame.downcast_ref::<&'static str>().map(|s| s.to_string()))
            })
            .unwrap_or_else(|| context.to_string());
        (status, Json(json!({ "error": message }))).into_response()
    }
}

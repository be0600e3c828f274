use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use campus_domain::validate::ValidationFailure;

/// API error taxonomy.
///
/// `Conflict` maps to 400 (not 409): uniqueness and referential-integrity
/// violations are reported as bad requests with a remediation hint, the
/// same contract the legacy API exposed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("cohort not found")]
    CohortNotFound,
    #[error("class not found")]
    ClassNotFound,
    #[error("module not found")]
    ModuleNotFound,
    #[error("course offering not found")]
    OfferingNotFound,
    #[error("activity log not found")]
    ActivityLogNotFound,
    #[error("grade not found")]
    GradeNotFound,
    #[error("notification not found")]
    NotificationNotFound,
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    #[error("{message}")]
    Conflict {
        message: String,
        hint: Option<String>,
    },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            hint: None,
        }
    }

    pub fn conflict_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CohortNotFound => "COHORT_NOT_FOUND",
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::ModuleNotFound => "MODULE_NOT_FOUND",
            Self::OfferingNotFound => "OFFERING_NOT_FOUND",
            Self::ActivityLogNotFound => "ACTIVITY_LOG_NOT_FOUND",
            Self::GradeNotFound => "GRADE_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
            Self::Conflict { .. } => "CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::CohortNotFound
            | Self::ClassNotFound
            | Self::ModuleNotFound
            | Self::OfferingNotFound
            | Self::ActivityLogNotFound
            | Self::GradeNotFound
            | Self::NotificationNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        match &self {
            Self::Validation(failure) => {
                body["field"] = serde_json::json!(failure.field);
            }
            Self::Conflict {
                hint: Some(hint), ..
            } => {
                body["hint"] = serde_json::json!(hint);
            }
            _ => {}
        }
        (status, axum::Json(body)).into_response()
    }
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::view::NotificationView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::notification::{
    ListNotificationsUseCase, MarkNotificationReadUseCase, SendTestNotificationUseCase,
    TestNotificationKind,
};

// ── GET /notifications ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NotificationListQuery {
    pub limit: Option<u64>,
}

pub async fn list_notifications(
    current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
    let usecase = ListNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let notifications = usecase.execute(current.id, query.limit).await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

// ── PATCH /notifications/{id}/read ───────────────────────────────────────────

pub async fn mark_notification_read(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = MarkNotificationReadUseCase {
        repo: state.notification_repo(),
    };
    usecase.execute(id, current.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /notifications/test ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TestNotificationRequest {
    #[serde(rename = "type")]
    pub kind: TestNotificationKind,
}

#[derive(Serialize)]
pub struct TestNotificationResponse {
    pub message: &'static str,
    pub job_id: Uuid,
}

pub async fn test_notification(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<TestNotificationRequest>,
) -> Result<Json<TestNotificationResponse>, ApiError> {
    let usecase = SendTestNotificationUseCase {
        queue: state.notification_queue(),
    };
    let job = usecase.execute(current.id, body.kind).await?;
    Ok(Json(TestNotificationResponse {
        message: "test notification queued",
        job_id: job.id,
    }))
}

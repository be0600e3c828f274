use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::activity::TaskStatus;

use crate::domain::view::ActivityLogView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::activity_log::{
    CreateActivityLogInput, CreateActivityLogUseCase, DeleteActivityLogUseCase,
    GetActivityLogUseCase, ListActivityLogsUseCase, UpdateActivityLogInput,
    UpdateActivityLogUseCase,
};

// ── POST /activity-logs ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateActivityLogRequest {
    pub offering_id: Uuid,
    pub week_number: i32,
    pub attendance: Option<serde_json::Value>,
    pub formative_one_grading: Option<TaskStatus>,
    pub formative_two_grading: Option<TaskStatus>,
    pub summative_grading: Option<TaskStatus>,
    pub course_moderation: Option<TaskStatus>,
    pub intranet_sync: Option<TaskStatus>,
    pub gradebook_status: Option<TaskStatus>,
    pub notes: Option<String>,
}

pub async fn create_activity_log(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateActivityLogRequest>,
) -> Result<(StatusCode, Json<ActivityLogView>), ApiError> {
    current.require_role(&[])?;
    let usecase = CreateActivityLogUseCase {
        logs: state.activity_log_repo(),
        offerings: state.offering_repo(),
    };
    let log = usecase
        .execute(CreateActivityLogInput {
            offering_id: body.offering_id,
            week_number: body.week_number,
            attendance: body.attendance,
            formative_one_grading: body.formative_one_grading,
            formative_two_grading: body.formative_two_grading,
            summative_grading: body.summative_grading,
            course_moderation: body.course_moderation,
            intranet_sync: body.intranet_sync,
            gradebook_status: body.gradebook_status,
            notes: body.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

// ── GET /activity-logs ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ActivityLogListQuery {
    pub week_number: Option<i32>,
}

pub async fn list_activity_logs(
    State(state): State<AppState>,
    Query(query): Query<ActivityLogListQuery>,
) -> Result<Json<Vec<ActivityLogView>>, ApiError> {
    let usecase = ListActivityLogsUseCase {
        repo: state.activity_log_repo(),
    };
    let logs = usecase.execute(query.week_number).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

// ── GET /activity-logs/{id} ──────────────────────────────────────────────────

pub async fn get_activity_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActivityLogView>, ApiError> {
    let usecase = GetActivityLogUseCase {
        repo: state.activity_log_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PUT /activity-logs/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateActivityLogRequest {
    pub week_number: Option<i32>,
    pub attendance: Option<serde_json::Value>,
    pub formative_one_grading: Option<TaskStatus>,
    pub formative_two_grading: Option<TaskStatus>,
    pub summative_grading: Option<TaskStatus>,
    pub course_moderation: Option<TaskStatus>,
    pub intranet_sync: Option<TaskStatus>,
    pub gradebook_status: Option<TaskStatus>,
    pub notes: Option<String>,
}

pub async fn update_activity_log(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateActivityLogRequest>,
) -> Result<Json<ActivityLogView>, ApiError> {
    current.require_role(&[])?;
    let usecase = UpdateActivityLogUseCase {
        repo: state.activity_log_repo(),
    };
    let log = usecase
        .execute(
            id,
            UpdateActivityLogInput {
                week_number: body.week_number,
                attendance: body.attendance,
                formative_one_grading: body.formative_one_grading,
                formative_two_grading: body.formative_two_grading,
                summative_grading: body.summative_grading,
                course_moderation: body.course_moderation,
                intranet_sync: body.intranet_sync,
                gradebook_status: body.gradebook_status,
                notes: body.notes,
            },
        )
        .await?;
    Ok(Json(log.into()))
}

// ── DELETE /activity-logs/{id} ───────────────────────────────────────────────

pub async fn delete_activity_log(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[])?;
    let usecase = DeleteActivityLogUseCase {
        repo: state.activity_log_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

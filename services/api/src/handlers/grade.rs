use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::grade::GradeStatus;

use crate::domain::view::GradeView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::grade::{
    CreateGradeInput, CreateGradeUseCase, DeleteGradeUseCase, GetGradeUseCase, ListGradesUseCase,
    PublishGradeUseCase, UpdateGradeInput, UpdateGradeUseCase,
};

// ── POST /grades ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateGradeRequest {
    pub student_id: Uuid,
    pub offering_id: Uuid,
    pub formative_one: Option<f32>,
    pub formative_two: Option<f32>,
    pub summative: Option<f32>,
    pub final_grade: Option<f32>,
    pub grade_status: Option<GradeStatus>,
    pub feedback: Option<String>,
}

pub async fn create_grade(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeView>), ApiError> {
    current.require_role(&[])?;
    let usecase = CreateGradeUseCase {
        grades: state.grade_repo(),
        users: state.user_repo(),
        offerings: state.offering_repo(),
    };
    let grade = usecase
        .execute(CreateGradeInput {
            student_id: body.student_id,
            offering_id: body.offering_id,
            formative_one: body.formative_one,
            formative_two: body.formative_two,
            summative: body.summative,
            final_grade: body.final_grade,
            grade_status: body.grade_status,
            feedback: body.feedback,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(grade.into())))
}

// ── GET /grades ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GradeListQuery {
    pub grade_status: Option<GradeStatus>,
}

pub async fn list_grades(
    State(state): State<AppState>,
    Query(query): Query<GradeListQuery>,
) -> Result<Json<Vec<GradeView>>, ApiError> {
    let usecase = ListGradesUseCase {
        repo: state.grade_repo(),
    };
    let grades = usecase.execute(query.grade_status).await?;
    Ok(Json(grades.into_iter().map(Into::into).collect()))
}

// ── GET /grades/{id} ─────────────────────────────────────────────────────────

pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeView>, ApiError> {
    let usecase = GetGradeUseCase {
        repo: state.grade_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /grades/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateGradeRequest {
    pub formative_one: Option<f32>,
    pub formative_two: Option<f32>,
    pub summative: Option<f32>,
    pub final_grade: Option<f32>,
    pub grade_status: Option<GradeStatus>,
    pub feedback: Option<String>,
}

pub async fn update_grade(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGradeRequest>,
) -> Result<Json<GradeView>, ApiError> {
    current.require_role(&[])?;
    let usecase = UpdateGradeUseCase {
        repo: state.grade_repo(),
    };
    let grade = usecase
        .execute(
            id,
            UpdateGradeInput {
                formative_one: body.formative_one,
                formative_two: body.formative_two,
                summative: body.summative,
                final_grade: body.final_grade,
                grade_status: body.grade_status,
                feedback: body.feedback,
            },
        )
        .await?;
    Ok(Json(grade.into()))
}

// ── PATCH /grades/{id}/publish ───────────────────────────────────────────────

pub async fn publish_grade(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeView>, ApiError> {
    current.require_role(&[])?;
    let usecase = PublishGradeUseCase {
        repo: state.grade_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── DELETE /grades/{id} ──────────────────────────────────────────────────────

pub async fn delete_grade(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[])?;
    let usecase = DeleteGradeUseCase {
        repo: state.grade_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

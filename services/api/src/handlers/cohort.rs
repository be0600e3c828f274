use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::cohort::CohortStatus;

use crate::domain::view::CohortView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::cohort::{
    CreateCohortInput, CreateCohortUseCase, DeleteCohortUseCase, GetCohortUseCase,
    ListCohortsUseCase, UpdateCohortInput, UpdateCohortUseCase,
};

// ── POST /cohorts ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCohortRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<CohortStatus>,
}

pub async fn create_cohort(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateCohortRequest>,
) -> Result<(StatusCode, Json<CohortView>), ApiError> {
    current.require_role(&[])?;
    let usecase = CreateCohortUseCase {
        repo: state.cohort_repo(),
    };
    let cohort = usecase
        .execute(CreateCohortInput {
            name: body.name,
            start_date: body.start_date,
            end_date: body.end_date,
            status: body.status,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(cohort.into())))
}

// ── GET /cohorts ─────────────────────────────────────────────────────────────

pub async fn list_cohorts(
    State(state): State<AppState>,
) -> Result<Json<Vec<CohortView>>, ApiError> {
    let usecase = ListCohortsUseCase {
        repo: state.cohort_repo(),
    };
    let cohorts = usecase.execute().await?;
    Ok(Json(cohorts.into_iter().map(Into::into).collect()))
}

// ── GET /cohorts/{id} ────────────────────────────────────────────────────────

pub async fn get_cohort(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CohortView>, ApiError> {
    let usecase = GetCohortUseCase {
        repo: state.cohort_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /cohorts/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCohortRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CohortStatus>,
}

pub async fn update_cohort(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCohortRequest>,
) -> Result<Json<CohortView>, ApiError> {
    current.require_role(&[])?;
    let usecase = UpdateCohortUseCase {
        repo: state.cohort_repo(),
    };
    let cohort = usecase
        .execute(
            id,
            UpdateCohortInput {
                name: body.name,
                start_date: body.start_date,
                end_date: body.end_date,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(cohort.into()))
}

// ── DELETE /cohorts/{id} ─────────────────────────────────────────────────────

pub async fn delete_cohort(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[])?;
    let usecase = DeleteCohortUseCase {
        repo: state.cohort_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

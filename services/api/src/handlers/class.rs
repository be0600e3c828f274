use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::class::{ClassMode, IntakePeriod};
use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;

use crate::domain::types::ClassFilter;
use crate::domain::view::{ClassView, Paginated};
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::class::{
    CreateClassInput, CreateClassUseCase, DeleteClassUseCase, GetClassUseCase, ListClassesUseCase,
    UpdateClassInput, UpdateClassUseCase,
};

// ── POST /classes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub code: String,
    pub trimester: String,
    pub intake_period: IntakePeriod,
    pub mode: ClassMode,
    pub cohort_id: Uuid,
}

pub async fn create_class(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassView>), ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = CreateClassUseCase {
        classes: state.class_repo(),
        cohorts: state.cohort_repo(),
    };
    let detail = usecase
        .execute(CreateClassInput {
            name: body.name,
            code: body.code,
            trimester: body.trimester,
            intake_period: body.intake_period,
            mode: body.mode,
            cohort_id: body.cohort_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

// ── GET /classes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ClassListQuery {
    pub cohort_id: Option<Uuid>,
    pub intake_period: Option<IntakePeriod>,
    pub mode: Option<ClassMode>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<ClassListQuery>,
) -> Result<Json<Paginated<ClassView>>, ApiError> {
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or_else(|| PageRequest::default().per_page),
    }
    .clamped();
    let usecase = ListClassesUseCase {
        repo: state.class_repo(),
    };
    let (total, details) = usecase
        .execute(
            ClassFilter {
                cohort_id: query.cohort_id,
                intake_period: query.intake_period,
                mode: query.mode,
            },
            page,
        )
        .await?;
    Ok(Json(Paginated {
        total,
        page: page.page,
        per_page: page.per_page,
        data: details.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /classes/{id} ────────────────────────────────────────────────────────

pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassView>, ApiError> {
    let usecase = GetClassUseCase {
        repo: state.class_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /classes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub trimester: Option<String>,
    pub intake_period: Option<IntakePeriod>,
    pub mode: Option<ClassMode>,
    pub cohort_id: Option<Uuid>,
}

pub async fn update_class(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateClassRequest>,
) -> Result<Json<ClassView>, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = UpdateClassUseCase {
        classes: state.class_repo(),
        cohorts: state.cohort_repo(),
    };
    let detail = usecase
        .execute(
            id,
            UpdateClassInput {
                name: body.name,
                code: body.code,
                trimester: body.trimester,
                intake_period: body.intake_period,
                mode: body.mode,
                cohort_id: body.cohort_id,
            },
        )
        .await?;
    Ok(Json(detail.into()))
}

// ── DELETE /classes/{id} ─────────────────────────────────────────────────────

pub async fn delete_class(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = DeleteClassUseCase {
        repo: state.class_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

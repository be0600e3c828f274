use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::role::Role;

use crate::domain::view::ModuleView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::module::{
    CreateModuleInput, CreateModuleUseCase, DeleteModuleUseCase, GetModuleUseCase,
    ListModulesUseCase, UpdateModuleInput, UpdateModuleUseCase,
};

// ── POST /modules ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateModuleRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: Option<bool>,
}

pub async fn create_module(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateModuleRequest>,
) -> Result<(StatusCode, Json<ModuleView>), ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = CreateModuleUseCase {
        repo: state.module_repo(),
    };
    let module = usecase
        .execute(CreateModuleInput {
            code: body.code,
            name: body.name,
            description: body.description,
            credits: body.credits,
            is_active: body.is_active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(module.into())))
}

// ── GET /modules ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ModuleListQuery {
    pub active: Option<bool>,
}

pub async fn list_modules(
    State(state): State<AppState>,
    Query(query): Query<ModuleListQuery>,
) -> Result<Json<Vec<ModuleView>>, ApiError> {
    let usecase = ListModulesUseCase {
        repo: state.module_repo(),
    };
    let modules = usecase.execute(query.active).await?;
    Ok(Json(modules.into_iter().map(Into::into).collect()))
}

// ── GET /modules/{id} ────────────────────────────────────────────────────────

pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModuleView>, ApiError> {
    let usecase = GetModuleUseCase {
        repo: state.module_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /modules/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateModuleRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

pub async fn update_module(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateModuleRequest>,
) -> Result<Json<ModuleView>, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = UpdateModuleUseCase {
        repo: state.module_repo(),
    };
    let module = usecase
        .execute(
            id,
            UpdateModuleInput {
                code: body.code,
                name: body.name,
                description: body.description,
                credits: body.credits,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(module.into()))
}

// ── DELETE /modules/{id} ─────────────────────────────────────────────────────

pub async fn delete_module(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = DeleteModuleUseCase {
        repo: state.module_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

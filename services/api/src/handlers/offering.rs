use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::offering::OfferingStatus;

use crate::domain::view::OfferingView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::offering::{
    CreateOfferingInput, CreateOfferingUseCase, DeleteOfferingUseCase, GetOfferingUseCase,
    ListOfferingsUseCase, UpdateOfferingInput, UpdateOfferingUseCase,
};

// ── POST /course-offerings ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOfferingRequest {
    pub module_id: Uuid,
    pub class_id: Uuid,
    pub facilitator_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<OfferingStatus>,
    pub capacity: Option<i32>,
    pub current_enrollment: Option<i32>,
}

pub async fn create_offering(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateOfferingRequest>,
) -> Result<(StatusCode, Json<OfferingView>), ApiError> {
    current.require_role(&[])?;
    let usecase = CreateOfferingUseCase {
        offerings: state.offering_repo(),
        modules: state.module_repo(),
        classes: state.class_repo(),
        users: state.user_repo(),
    };
    let detail = usecase
        .execute(CreateOfferingInput {
            module_id: body.module_id,
            class_id: body.class_id,
            facilitator_id: body.facilitator_id,
            start_date: body.start_date,
            end_date: body.end_date,
            status: body.status,
            capacity: body.capacity,
            current_enrollment: body.current_enrollment,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

// ── GET /course-offerings ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OfferingListQuery {
    pub status: Option<OfferingStatus>,
}

pub async fn list_offerings(
    State(state): State<AppState>,
    Query(query): Query<OfferingListQuery>,
) -> Result<Json<Vec<OfferingView>>, ApiError> {
    let usecase = ListOfferingsUseCase {
        repo: state.offering_repo(),
    };
    let details = usecase.execute(query.status).await?;
    Ok(Json(details.into_iter().map(Into::into).collect()))
}

// ── GET /course-offerings/{id} ───────────────────────────────────────────────

pub async fn get_offering(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferingView>, ApiError> {
    let usecase = GetOfferingUseCase {
        repo: state.offering_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /course-offerings/{id} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateOfferingRequest {
    pub module_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub facilitator_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<OfferingStatus>,
    pub capacity: Option<i32>,
    pub current_enrollment: Option<i32>,
}

pub async fn update_offering(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateOfferingRequest>,
) -> Result<Json<OfferingView>, ApiError> {
    current.require_role(&[])?;
    let usecase = UpdateOfferingUseCase {
        offerings: state.offering_repo(),
        modules: state.module_repo(),
        classes: state.class_repo(),
        users: state.user_repo(),
    };
    let detail = usecase
        .execute(
            id,
            UpdateOfferingInput {
                module_id: body.module_id,
                class_id: body.class_id,
                facilitator_id: body.facilitator_id,
                start_date: body.start_date,
                end_date: body.end_date,
                status: body.status,
                capacity: body.capacity,
                current_enrollment: body.current_enrollment,
            },
        )
        .await?;
    Ok(Json(detail.into()))
}

// ── DELETE /course-offerings/{id} ────────────────────────────────────────────

pub async fn delete_offering(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[])?;
    let usecase = DeleteOfferingUseCase {
        repo: state.offering_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

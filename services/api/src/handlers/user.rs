use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use campus_domain::role::Role;

use crate::domain::view::UserView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::user::{
    AssignStudentClassUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(
        users
            .into_iter()
            .map(|(user, profile)| UserView::compose(user, profile))
            .collect(),
    ))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserView>, ApiError> {
    current.require_role(&[])?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let (user, profile) = usecase.execute(id).await?;
    Ok(Json(UserView::compose(user, profile)))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_number: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub faculty_position: Option<String>,
    pub specialization: Option<String>,
    pub office_location: Option<String>,
    pub department: Option<String>,
}

pub async fn update_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    current.require_role(&[])?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let (user, profile) = usecase
        .execute(
            id,
            UpdateUserInput {
                username: body.username,
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                student_number: body.student_number,
                enrollment_date: body.enrollment_date,
                faculty_position: body.faculty_position,
                specialization: body.specialization,
                office_location: body.office_location,
                department: body.department,
            },
        )
        .await?;
    Ok(Json(UserView::compose(user, profile)))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /users/students/{id}/class ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignClassRequest {
    /// `null` clears the assignment.
    pub class_id: Option<Uuid>,
}

pub async fn assign_student_class(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignClassRequest>,
) -> Result<Json<UserView>, ApiError> {
    current.require_role(&[Role::Manager])?;
    let usecase = AssignStudentClassUseCase {
        users: state.user_repo(),
        classes: state.class_repo(),
    };
    let (user, profile) = usecase.execute(id, body.class_id).await?;
    Ok(Json(UserView::compose(user, profile)))
}

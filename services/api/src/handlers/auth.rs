use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{FacilitatorProfile, ManagerProfile, RoleProfile, StudentProfile};
use crate::domain::view::UserView;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, RegisterUserInput, RegisterUserUseCase};

// ── POST /auth/register/student ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterStudentRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub student_number: String,
    pub enrollment_date: Option<NaiveDate>,
}

pub async fn register_student(
    State(state): State<AppState>,
    Json(body): Json<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let (user, profile) = usecase
        .execute(RegisterUserInput {
            username: body.username,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            profile: RoleProfile::Student(StudentProfile {
                student_number: body.student_number,
                class_id: None,
                enrollment_date: body.enrollment_date,
            }),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserView::compose(user, profile))))
}

// ── POST /auth/register/facilitator ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterFacilitatorRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub faculty_position: Option<String>,
    pub specialization: Option<String>,
    pub office_location: Option<String>,
}

pub async fn register_facilitator(
    State(state): State<AppState>,
    Json(body): Json<RegisterFacilitatorRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let (user, profile) = usecase
        .execute(RegisterUserInput {
            username: body.username,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            profile: RoleProfile::Facilitator(FacilitatorProfile {
                faculty_position: body.faculty_position,
                specialization: body.specialization,
                office_location: body.office_location,
            }),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserView::compose(user, profile))))
}

// ── POST /auth/register/manager ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterManagerRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
}

pub async fn register_manager(
    State(state): State<AppState>,
    Json(body): Json<RegisterManagerRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let (user, profile) = usecase
        .execute(RegisterUserInput {
            username: body.username,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            profile: RoleProfile::Manager(ManagerProfile {
                department: body.department,
            }),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserView::compose(user, profile))))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token expiry, seconds since epoch.
    pub token_exp: u64,
    pub user: UserView,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&body.username, &body.password).await?;
    Ok(Json(LoginResponse {
        token: out.token,
        token_exp: out.token_exp,
        user: UserView::compose(out.user, out.profile),
    }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(current: CurrentUser) -> Json<UserView> {
    Json(current.view)
}

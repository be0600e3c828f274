use chrono::Utc;
use uuid::Uuid;

use campus_domain::grade::GradeStatus;
use campus_domain::role::Role;
use campus_domain::validate::{self, ValidationFailure};

use crate::domain::repository::{GradeRepository, OfferingRepository, UserRepository};
use crate::domain::types::Grade;
use crate::error::ApiError;

// ── CreateGrade ──────────────────────────────────────────────────────────────

pub struct CreateGradeInput {
    pub student_id: Uuid,
    pub offering_id: Uuid,
    pub formative_one: Option<f32>,
    pub formative_two: Option<f32>,
    pub summative: Option<f32>,
    pub final_grade: Option<f32>,
    pub grade_status: Option<GradeStatus>,
    pub feedback: Option<String>,
}

pub struct CreateGradeUseCase<G, U, O>
where
    G: GradeRepository,
    U: UserRepository,
    O: OfferingRepository,
{
    pub grades: G,
    pub users: U,
    pub offerings: O,
}

impl<G, U, O> CreateGradeUseCase<G, U, O>
where
    G: GradeRepository,
    U: UserRepository,
    O: OfferingRepository,
{
    pub async fn execute(&self, input: CreateGradeInput) -> Result<Grade, ApiError> {
        let student = self
            .users
            .find_by_id(input.student_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if student.role != Role::Student {
            return Err(ValidationFailure::new("student_id", "user is not a student").into());
        }
        self.offerings
            .find_by_id(input.offering_id)
            .await?
            .ok_or(ApiError::OfferingNotFound)?;

        let now = Utc::now();
        let grade = Grade {
            id: Uuid::now_v7(),
            student_id: input.student_id,
            offering_id: input.offering_id,
            formative_one: input.formative_one,
            formative_two: input.formative_two,
            summative: input.summative,
            final_grade: input.final_grade,
            grade_status: input.grade_status.unwrap_or_default(),
            feedback: input.feedback,
            created_at: now,
            updated_at: now,
        };
        validate::grade_scores(&grade.scores())?;

        self.grades.create(&grade).await?;
        Ok(grade)
    }
}

// ── ListGrades / GetGrade ────────────────────────────────────────────────────

pub struct ListGradesUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> ListGradesUseCase<G> {
    pub async fn execute(&self, status: Option<GradeStatus>) -> Result<Vec<Grade>, ApiError> {
        self.repo.list(status).await
    }
}

pub struct GetGradeUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> GetGradeUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<Grade, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::GradeNotFound)
    }
}

// ── UpdateGrade ──────────────────────────────────────────────────────────────

/// Partial update: absent score fields keep their stored values.
#[derive(Default)]
pub struct UpdateGradeInput {
    pub formative_one: Option<f32>,
    pub formative_two: Option<f32>,
    pub summative: Option<f32>,
    pub final_grade: Option<f32>,
    pub grade_status: Option<GradeStatus>,
    pub feedback: Option<String>,
}

pub struct UpdateGradeUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> UpdateGradeUseCase<G> {
    pub async fn execute(&self, id: Uuid, input: UpdateGradeInput) -> Result<Grade, ApiError> {
        let mut grade = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::GradeNotFound)?;

        if input.formative_one.is_some() {
            grade.formative_one = input.formative_one;
        }
        if input.formative_two.is_some() {
            grade.formative_two = input.formative_two;
        }
        if input.summative.is_some() {
            grade.summative = input.summative;
        }
        if input.final_grade.is_some() {
            grade.final_grade = input.final_grade;
        }
        if let Some(status) = input.grade_status {
            grade.grade_status = status;
        }
        if input.feedback.is_some() {
            grade.feedback = input.feedback;
        }
        validate::grade_scores(&grade.scores())?;

        grade.updated_at = Utc::now();
        self.repo.update(&grade).await?;
        Ok(grade)
    }
}

// ── PublishGrade ─────────────────────────────────────────────────────────────

pub struct PublishGradeUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> PublishGradeUseCase<G> {
    /// draft → published is one-way; publishing twice is a conflict and
    /// leaves the stored status untouched.
    pub async fn execute(&self, id: Uuid) -> Result<Grade, ApiError> {
        let mut grade = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::GradeNotFound)?;

        if grade.grade_status == GradeStatus::Published {
            return Err(ApiError::conflict("grade is already published"));
        }

        grade.grade_status = GradeStatus::Published;
        grade.updated_at = Utc::now();
        self.repo.update(&grade).await?;
        Ok(grade)
    }
}

// ── DeleteGrade ──────────────────────────────────────────────────────────────

pub struct DeleteGradeUseCase<G: GradeRepository> {
    pub repo: G,
}

impl<G: GradeRepository> DeleteGradeUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::GradeNotFound);
        }
        Ok(())
    }
}

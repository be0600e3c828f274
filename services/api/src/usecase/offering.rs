use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use campus_domain::offering::OfferingStatus;
use campus_domain::role::Role;
use campus_domain::validate::{self, ValidationFailure};

use crate::domain::repository::{
    ClassRepository, ModuleRepository, OfferingRepository, UserRepository,
};
use crate::domain::types::Offering;
use crate::domain::view::OfferingDetail;
use crate::error::ApiError;

async fn check_facilitator<U: UserRepository>(users: &U, id: Uuid) -> Result<(), ApiError> {
    let user = users.find_by_id(id).await?.ok_or(ApiError::UserNotFound)?;
    if user.role != Role::Facilitator {
        return Err(ValidationFailure::new("facilitator_id", "user is not a facilitator").into());
    }
    Ok(())
}

// ── CreateOffering ───────────────────────────────────────────────────────────

pub struct CreateOfferingInput {
    pub module_id: Uuid,
    pub class_id: Uuid,
    pub facilitator_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<OfferingStatus>,
    pub capacity: Option<i32>,
    pub current_enrollment: Option<i32>,
}

pub struct CreateOfferingUseCase<O, M, C, U>
where
    O: OfferingRepository,
    M: ModuleRepository,
    C: ClassRepository,
    U: UserRepository,
{
    pub offerings: O,
    pub modules: M,
    pub classes: C,
    pub users: U,
}

impl<O, M, C, U> CreateOfferingUseCase<O, M, C, U>
where
    O: OfferingRepository,
    M: ModuleRepository,
    C: ClassRepository,
    U: UserRepository,
{
    pub async fn execute(&self, input: CreateOfferingInput) -> Result<OfferingDetail, ApiError> {
        self.modules
            .find_by_id(input.module_id)
            .await?
            .ok_or(ApiError::ModuleNotFound)?;
        self.classes
            .find_by_id(input.class_id)
            .await?
            .ok_or(ApiError::ClassNotFound)?;
        check_facilitator(&self.users, input.facilitator_id).await?;

        validate::date_range(input.start_date, input.end_date)?;
        let capacity = input.capacity.unwrap_or(30);
        let current_enrollment = input.current_enrollment.unwrap_or(0);
        validate::capacity(capacity, current_enrollment)?;

        let now = Utc::now();
        let offering = Offering {
            id: Uuid::now_v7(),
            module_id: input.module_id,
            class_id: input.class_id,
            facilitator_id: input.facilitator_id,
            start_date: input.start_date,
            end_date: input.end_date,
            status: input.status.unwrap_or_default(),
            capacity,
            current_enrollment,
            created_at: now,
            updated_at: now,
        };
        self.offerings.create(&offering).await?;
        self.offerings
            .find_detail(offering.id)
            .await?
            .ok_or(ApiError::OfferingNotFound)
    }
}

// ── ListOfferings / GetOffering ──────────────────────────────────────────────

pub struct ListOfferingsUseCase<O: OfferingRepository> {
    pub repo: O,
}

impl<O: OfferingRepository> ListOfferingsUseCase<O> {
    pub async fn execute(
        &self,
        status: Option<OfferingStatus>,
    ) -> Result<Vec<OfferingDetail>, ApiError> {
        self.repo.list(status).await
    }
}

pub struct GetOfferingUseCase<O: OfferingRepository> {
    pub repo: O,
}

impl<O: OfferingRepository> GetOfferingUseCase<O> {
    pub async fn execute(&self, id: Uuid) -> Result<OfferingDetail, ApiError> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or(ApiError::OfferingNotFound)
    }
}

// ── UpdateOffering ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateOfferingInput {
    pub module_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub facilitator_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<OfferingStatus>,
    pub capacity: Option<i32>,
    pub current_enrollment: Option<i32>,
}

pub struct UpdateOfferingUseCase<O, M, C, U>
where
    O: OfferingRepository,
    M: ModuleRepository,
    C: ClassRepository,
    U: UserRepository,
{
    pub offerings: O,
    pub modules: M,
    pub classes: C,
    pub users: U,
}

impl<O, M, C, U> UpdateOfferingUseCase<O, M, C, U>
where
    O: OfferingRepository,
    M: ModuleRepository,
    C: ClassRepository,
    U: UserRepository,
{
    /// Patch is merged onto the stored row first; date range and
    /// capacity/enrollment are validated on the merged result, so a
    /// one-sided change cannot bypass either invariant.
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateOfferingInput,
    ) -> Result<OfferingDetail, ApiError> {
        let mut offering = self
            .offerings
            .find_by_id(id)
            .await?
            .ok_or(ApiError::OfferingNotFound)?;

        if let Some(module_id) = input.module_id {
            self.modules
                .find_by_id(module_id)
                .await?
                .ok_or(ApiError::ModuleNotFound)?;
            offering.module_id = module_id;
        }
        if let Some(class_id) = input.class_id {
            self.classes
                .find_by_id(class_id)
                .await?
                .ok_or(ApiError::ClassNotFound)?;
            offering.class_id = class_id;
        }
        if let Some(facilitator_id) = input.facilitator_id {
            check_facilitator(&self.users, facilitator_id).await?;
            offering.facilitator_id = facilitator_id;
        }
        if let Some(start_date) = input.start_date {
            offering.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            offering.end_date = end_date;
        }
        if let Some(status) = input.status {
            offering.status = status;
        }
        if let Some(capacity) = input.capacity {
            offering.capacity = capacity;
        }
        if let Some(current_enrollment) = input.current_enrollment {
            offering.current_enrollment = current_enrollment;
        }

        validate::date_range(offering.start_date, offering.end_date)?;
        validate::capacity(offering.capacity, offering.current_enrollment)?;

        offering.updated_at = Utc::now();
        self.offerings.update(&offering).await?;
        self.offerings
            .find_detail(id)
            .await?
            .ok_or(ApiError::OfferingNotFound)
    }
}

// ── DeleteOffering ───────────────────────────────────────────────────────────

pub struct DeleteOfferingUseCase<O: OfferingRepository> {
    pub repo: O,
}

impl<O: OfferingRepository> DeleteOfferingUseCase<O> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::OfferingNotFound);
        }
        Ok(())
    }
}

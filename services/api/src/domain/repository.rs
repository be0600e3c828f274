#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use campus_domain::grade::GradeStatus;
use campus_domain::offering::OfferingStatus;
use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;

use crate::domain::types::{
    ActivityLog, Class, ClassFilter, Cohort, Grade, JobEnvelope, Module, Notification, Offering,
    RoleProfile, User,
};
use crate::domain::view::{ClassDetail, OfferingDetail};
use crate::error::ApiError;

/// Repository for identities and their role profiles.
///
/// `create_with_profile` and `update_with_profile` are transactional:
/// either both the users row and the profile row land, or neither does.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn find_with_profile(&self, id: Uuid) -> Result<Option<(User, RoleProfile)>, ApiError>;
    async fn list_with_profiles(&self) -> Result<Vec<(User, RoleProfile)>, ApiError>;
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, ApiError>;

    async fn username_exists(
        &self,
        username: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ApiError>;
    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ApiError>;
    async fn student_number_exists(
        &self,
        student_number: &str,
        exclude_user: Option<Uuid>,
    ) -> Result<bool, ApiError>;

    async fn create_with_profile(
        &self,
        user: &User,
        profile: &RoleProfile,
    ) -> Result<(), ApiError>;
    async fn update_with_profile(
        &self,
        user: &User,
        profile: &RoleProfile,
    ) -> Result<(), ApiError>;

    /// Delete an identity. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Assign (or clear) a student's class. Returns `false` when the user
    /// has no student profile row.
    async fn set_student_class(
        &self,
        user_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<bool, ApiError>;
}

pub trait CohortRepository: Send + Sync {
    async fn create(&self, cohort: &Cohort) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cohort>, ApiError>;
    /// All cohorts, newest start date first.
    async fn list(&self) -> Result<Vec<Cohort>, ApiError>;
    async fn update(&self, cohort: &Cohort) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ApiError>;
}

pub trait ClassRepository: Send + Sync {
    async fn create(&self, class: &Class) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>, ApiError>;
    async fn find_detail(&self, id: Uuid) -> Result<Option<ClassDetail>, ApiError>;
    /// Filtered page plus the total match count, newest first.
    async fn list(
        &self,
        filter: ClassFilter,
        page: PageRequest,
    ) -> Result<(u64, Vec<ClassDetail>), ApiError>;
    async fn update(&self, class: &Class) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, ApiError>;
    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ApiError>;
    /// Any student profile assigned to this class?
    async fn has_enrolled_students(&self, class_id: Uuid) -> Result<bool, ApiError>;
    async fn has_offerings(&self, class_id: Uuid) -> Result<bool, ApiError>;
}

pub trait ModuleRepository: Send + Sync {
    async fn create(&self, module: &Module) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Module>, ApiError>;
    async fn list(&self, active: Option<bool>) -> Result<Vec<Module>, ApiError>;
    async fn update(&self, module: &Module) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, ApiError>;
    async fn has_offerings(&self, module_id: Uuid) -> Result<bool, ApiError>;
}

pub trait OfferingRepository: Send + Sync {
    async fn create(&self, offering: &Offering) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offering>, ApiError>;
    async fn find_detail(&self, id: Uuid) -> Result<Option<OfferingDetail>, ApiError>;
    /// Offerings with nested refs, newest start date first.
    async fn list(&self, status: Option<OfferingStatus>) -> Result<Vec<OfferingDetail>, ApiError>;
    async fn update(&self, offering: &Offering) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait ActivityLogRepository: Send + Sync {
    async fn create(&self, log: &ActivityLog) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ActivityLog>, ApiError>;
    /// Logs ordered by week number ascending.
    async fn list(&self, week_number: Option<i32>) -> Result<Vec<ActivityLog>, ApiError>;
    async fn update(&self, log: &ActivityLog) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Does any offering of this facilitator have a log for the week?
    async fn facilitator_has_log_for_week(
        &self,
        facilitator_id: Uuid,
        week_number: i32,
    ) -> Result<bool, ApiError>;
}

pub trait GradeRepository: Send + Sync {
    async fn create(&self, grade: &Grade) -> Result<(), ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grade>, ApiError>;
    /// Grades newest first, optionally filtered by status.
    async fn list(&self, status: Option<GradeStatus>) -> Result<Vec<Grade>, ApiError>;
    async fn update(&self, grade: &Grade) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<(), ApiError>;
    /// A user's notifications, newest first.
    async fn list_for_user(&self, user_id: Uuid, limit: u64)
    -> Result<Vec<Notification>, ApiError>;
    /// Mark one of the user's notifications read. Returns `false` when the
    /// row does not exist or belongs to someone else.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, ApiError>;
}

/// Fire-and-forget producer side of the notification queue.
pub trait NotificationQueue: Send + Sync {
    async fn enqueue(&self, job: &JobEnvelope) -> Result<(), ApiError>;
}

/// Injectable time source so scheduled tasks are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

//! Response composition.
//!
//! Views are the only types handlers serialize. `UserView` flattens the
//! base identity with its role profile and drops the password hash on
//! every path; nested includes expose whitelisted reference objects only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use campus_core::serde::to_rfc3339_ms;
use campus_domain::activity::TaskStatus;
use campus_domain::class::{ClassMode, IntakePeriod};
use campus_domain::cohort::CohortStatus;
use campus_domain::grade::GradeStatus;
use campus_domain::notification::NotificationKind;
use campus_domain::offering::OfferingStatus;
use campus_domain::role::Role;

use crate::domain::types::{
    ActivityLog, Class, Cohort, FacilitatorProfile, Grade, ManagerProfile, Module, Notification,
    Offering, RoleProfile, StudentProfile, User,
};

/// Whitelisted `{id, name}` reference for nested includes.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRef {
    pub id: Uuid,
    pub name: String,
}

/// Whitelisted person reference for nested includes.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRef {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// A class joined with its cohort reference.
#[derive(Debug, Clone)]
pub struct ClassDetail {
    pub class: Class,
    pub cohort: EntityRef,
}

/// An offering joined with its module/class/facilitator references.
#[derive(Debug, Clone)]
pub struct OfferingDetail {
    pub offering: Offering,
    pub module: EntityRef,
    pub class: EntityRef,
    pub facilitator: PersonRef,
}

/// Paginated listing envelope.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub data: Vec<T>,
}

// ── User ─────────────────────────────────────────────────────────────────────

/// Flattened identity: base fields merged with the role profile's fields.
/// Only the fields of the user's own role are present; the password hash
/// is dropped unconditionally.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl UserView {
    pub fn compose(user: User, profile: RoleProfile) -> Self {
        let mut view = Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            student_number: None,
            class_id: None,
            enrollment_date: None,
            faculty_position: None,
            specialization: None,
            office_location: None,
            department: None,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };
        match profile {
            RoleProfile::Student(StudentProfile {
                student_number,
                class_id,
                enrollment_date,
            }) => {
                view.student_number = Some(student_number);
                view.class_id = class_id;
                view.enrollment_date = enrollment_date;
            }
            RoleProfile::Facilitator(FacilitatorProfile {
                faculty_position,
                specialization,
                office_location,
            }) => {
                view.faculty_position = faculty_position;
                view.specialization = specialization;
                view.office_location = office_location;
            }
            RoleProfile::Manager(ManagerProfile { department }) => {
                view.department = department;
            }
        }
        view
    }
}

// ── Cohort ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CohortView {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CohortStatus,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Cohort> for CohortView {
    fn from(cohort: Cohort) -> Self {
        Self {
            id: cohort.id,
            name: cohort.name,
            start_date: cohort.start_date,
            end_date: cohort.end_date,
            status: cohort.status,
            created_at: cohort.created_at,
            updated_at: cohort.updated_at,
        }
    }
}

// ── Class ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ClassView {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub trimester: String,
    pub intake_period: IntakePeriod,
    pub mode: ClassMode,
    pub cohort: EntityRef,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ClassDetail> for ClassView {
    fn from(detail: ClassDetail) -> Self {
        let ClassDetail { class, cohort } = detail;
        Self {
            id: class.id,
            name: class.name,
            code: class.code,
            trimester: class.trimester,
            intake_period: class.intake_period,
            mode: class.mode,
            cohort,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

// ── Module ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ModuleView {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Module> for ModuleView {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            code: module.code,
            name: module.name,
            description: module.description,
            credits: module.credits,
            is_active: module.is_active,
            created_at: module.created_at,
            updated_at: module.updated_at,
        }
    }
}

// ── Offering ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OfferingView {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: OfferingStatus,
    pub capacity: i32,
    pub current_enrollment: i32,
    pub module: EntityRef,
    pub class: EntityRef,
    pub facilitator: PersonRef,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<OfferingDetail> for OfferingView {
    fn from(detail: OfferingDetail) -> Self {
        let OfferingDetail {
            offering,
            module,
            class,
            facilitator,
        } = detail;
        Self {
            id: offering.id,
            start_date: offering.start_date,
            end_date: offering.end_date,
            status: offering.status,
            capacity: offering.capacity,
            current_enrollment: offering.current_enrollment,
            module,
            class,
            facilitator,
            created_at: offering.created_at,
            updated_at: offering.updated_at,
        }
    }
}

// ── Activity log ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ActivityLogView {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub week_number: i32,
    pub attendance: serde_json::Value,
    pub formative_one_grading: TaskStatus,
    pub formative_two_grading: TaskStatus,
    pub summative_grading: TaskStatus,
    pub course_moderation: TaskStatus,
    pub intranet_sync: TaskStatus,
    pub gradebook_status: TaskStatus,
    pub notes: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogView {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id,
            offering_id: log.offering_id,
            week_number: log.week_number,
            attendance: log.attendance,
            formative_one_grading: log.formative_one_grading,
            formative_two_grading: log.formative_two_grading,
            summative_grading: log.summative_grading,
            course_moderation: log.course_moderation,
            intranet_sync: log.intranet_sync,
            gradebook_status: log.gradebook_status,
            notes: log.notes,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}

// ── Grade ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GradeView {
    pub id: Uuid,
    pub student_id: Uuid,
    pub offering_id: Uuid,
    pub formative_one: Option<f32>,
    pub formative_two: Option<f32>,
    pub summative: Option<f32>,
    pub final_grade: Option<f32>,
    pub grade_status: GradeStatus,
    pub feedback: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Grade> for GradeView {
    fn from(grade: Grade) -> Self {
        Self {
            id: grade.id,
            student_id: grade.student_id,
            offering_id: grade.offering_id,
            formative_one: grade.formative_one,
            formative_two: grade.formative_two,
            summative: grade.summative,
            final_grade: grade.final_grade,
            grade_status: grade.grade_status,
            feedback: grade.feedback,
            created_at: grade.created_at,
            updated_at: grade.updated_at,
        }
    }
}

// ── Notification ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            is_read: notification.is_read,
            metadata: notification.metadata,
            created_at: notification.created_at,
        }
    }
}

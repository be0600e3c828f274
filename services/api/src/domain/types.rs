use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::activity::TaskStatus;
use campus_domain::class::{ClassMode, IntakePeriod};
use campus_domain::cohort::CohortStatus;
use campus_domain::grade::GradeStatus;
use campus_domain::notification::NotificationKind;
use campus_domain::offering::OfferingStatus;
use campus_domain::role::Role;

/// Base identity record. The password hash never leaves the auth boundary:
/// response composition goes through `view::UserView`, which drops it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student role-profile fields.
#[derive(Debug, Clone, Default)]
pub struct StudentProfile {
    pub student_number: String,
    pub class_id: Option<Uuid>,
    pub enrollment_date: Option<NaiveDate>,
}

/// Facilitator role-profile fields.
#[derive(Debug, Clone, Default)]
pub struct FacilitatorProfile {
    pub faculty_position: Option<String>,
    pub specialization: Option<String>,
    pub office_location: Option<String>,
}

/// Manager role-profile fields.
#[derive(Debug, Clone, Default)]
pub struct ManagerProfile {
    pub department: Option<String>,
}

/// Role-specific profile, exactly one per identity.
///
/// The variant always matches `User::role`; the explicit tag replaces the
/// legacy pattern of deriving an association name from the role string.
#[derive(Debug, Clone)]
pub enum RoleProfile {
    Student(StudentProfile),
    Facilitator(FacilitatorProfile),
    Manager(ManagerProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Facilitator(_) => Role::Facilitator,
            Self::Manager(_) => Role::Manager,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cohort {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CohortStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub trimester: String,
    pub intake_period: IntakePeriod,
    pub mode: ClassMode,
    pub cohort_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Module {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Offering {
    pub id: Uuid,
    pub module_id: Uuid,
    pub class_id: Uuid,
    pub facilitator_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: OfferingStatus,
    pub capacity: i32,
    pub current_enrollment: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub week_number: i32,
    /// Ordered attendance records, stored verbatim as JSON.
    pub attendance: serde_json::Value,
    pub formative_one_grading: TaskStatus,
    pub formative_two_grading: TaskStatus,
    pub summative_grading: TaskStatus,
    pub course_moderation: TaskStatus,
    pub intranet_sync: TaskStatus,
    pub gradebook_status: TaskStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Grade {
    pub id: Uuid,
    pub student_id: Uuid,
    pub offering_id: Uuid,
    pub formative_one: Option<f32>,
    pub formative_two: Option<f32>,
    pub summative: Option<f32>,
    pub final_grade: Option<f32>,
    pub grade_status: GradeStatus,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    /// Named score fields for range validation.
    pub fn scores(&self) -> [(&'static str, Option<f32>); 4] {
        [
            ("formative_one", self.formative_one),
            ("formative_two", self.formative_two),
            ("summative", self.summative),
            ("final_grade", self.final_grade),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for the class listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassFilter {
    pub cohort_id: Option<Uuid>,
    pub intake_period: Option<IntakePeriod>,
    pub mode: Option<ClassMode>,
}

/// Background-job kinds understood by the notification worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    FacilitatorLogReminder,
    FacilitatorLogMissed,
    ManagerAlert,
}

/// Envelope pushed onto the notification queue. Fire-and-forget on the
/// request path; `attempt` is bumped by the worker on retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub id: Uuid,
    pub kind: JobKind,
    pub user_id: Uuid,
    pub data: serde_json::Value,
    #[serde(default)]
    pub attempt: u32,
}

impl JobEnvelope {
    fn new(kind: JobKind, user_id: Uuid, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind,
            user_id,
            data,
            attempt: 0,
        }
    }

    pub fn facilitator_log_reminder(facilitator_id: Uuid, week_number: i32) -> Self {
        Self::new(
            JobKind::FacilitatorLogReminder,
            facilitator_id,
            serde_json::json!({ "week_number": week_number }),
        )
    }

    pub fn facilitator_log_missed(facilitator_id: Uuid, week_number: i32) -> Self {
        Self::new(
            JobKind::FacilitatorLogMissed,
            facilitator_id,
            serde_json::json!({ "week_number": week_number }),
        )
    }

    pub fn manager_alert(
        manager_id: Uuid,
        facilitator_id: Uuid,
        week_number: i32,
        status: &str,
    ) -> Self {
        Self::new(
            JobKind::ManagerAlert,
            manager_id,
            serde_json::json!({
                "facilitator_id": facilitator_id,
                "week_number": week_number,
                "status": status,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_profile_reports_matching_role() {
        assert_eq!(
            RoleProfile::Student(StudentProfile::default()).role(),
            Role::Student
        );
        assert_eq!(
            RoleProfile::Facilitator(FacilitatorProfile::default()).role(),
            Role::Facilitator
        );
        assert_eq!(
            RoleProfile::Manager(ManagerProfile::default()).role(),
            Role::Manager
        );
    }

    #[test]
    fn job_envelope_round_trips_through_json() {
        let job = JobEnvelope::manager_alert(Uuid::now_v7(), Uuid::now_v7(), 12, "missed");
        let bytes = serde_json::to_vec(&job).unwrap();
        let parsed: JobEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.kind, JobKind::ManagerAlert);
        assert_eq!(parsed.user_id, job.user_id);
        assert_eq!(parsed.data["week_number"], 12);
        assert_eq!(parsed.attempt, 0);
    }
}

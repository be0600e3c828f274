use chrono::Utc;
use uuid::Uuid;

use campus_domain::activity::TaskStatus;
use campus_domain::validate;

use crate::domain::repository::{ActivityLogRepository, OfferingRepository};
use crate::domain::types::ActivityLog;
use crate::error::ApiError;

// ── CreateActivityLog ────────────────────────────────────────────────────────

pub struct CreateActivityLogInput {
    pub offering_id: Uuid,
    pub week_number: i32,
    pub attendance: Option<serde_json::Value>,
    pub formative_one_grading: Option<TaskStatus>,
    pub formative_two_grading: Option<TaskStatus>,
    pub summative_grading: Option<TaskStatus>,
    pub course_moderation: Option<TaskStatus>,
    pub intranet_sync: Option<TaskStatus>,
    pub gradebook_status: Option<TaskStatus>,
    pub notes: Option<String>,
}

pub struct CreateActivityLogUseCase<A, O>
where
    A: ActivityLogRepository,
    O: OfferingRepository,
{
    pub logs: A,
    pub offerings: O,
}

impl<A, O> CreateActivityLogUseCase<A, O>
where
    A: ActivityLogRepository,
    O: OfferingRepository,
{
    pub async fn execute(&self, input: CreateActivityLogInput) -> Result<ActivityLog, ApiError> {
        validate::week_number(input.week_number)?;
        self.offerings
            .find_by_id(input.offering_id)
            .await?
            .ok_or(ApiError::OfferingNotFound)?;

        let now = Utc::now();
        let log = ActivityLog {
            id: Uuid::now_v7(),
            offering_id: input.offering_id,
            week_number: input.week_number,
            attendance: input.attendance.unwrap_or_else(|| serde_json::json!([])),
            formative_one_grading: input.formative_one_grading.unwrap_or_default(),
            formative_two_grading: input.formative_two_grading.unwrap_or_default(),
            summative_grading: input.summative_grading.unwrap_or_default(),
            course_moderation: input.course_moderation.unwrap_or_default(),
            intranet_sync: input.intranet_sync.unwrap_or_default(),
            gradebook_status: input.gradebook_status.unwrap_or_default(),
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.logs.create(&log).await?;
        Ok(log)
    }
}

// ── ListActivityLogs / GetActivityLog ────────────────────────────────────────

pub struct ListActivityLogsUseCase<A: ActivityLogRepository> {
    pub repo: A,
}

impl<A: ActivityLogRepository> ListActivityLogsUseCase<A> {
    pub async fn execute(&self, week_number: Option<i32>) -> Result<Vec<ActivityLog>, ApiError> {
        self.repo.list(week_number).await
    }
}

pub struct GetActivityLogUseCase<A: ActivityLogRepository> {
    pub repo: A,
}

impl<A: ActivityLogRepository> GetActivityLogUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<ActivityLog, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ActivityLogNotFound)
    }
}

// ── UpdateActivityLog ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateActivityLogInput {
    pub week_number: Option<i32>,
    pub attendance: Option<serde_json::Value>,
    pub formative_one_grading: Option<TaskStatus>,
    pub formative_two_grading: Option<TaskStatus>,
    pub summative_grading: Option<TaskStatus>,
    pub course_moderation: Option<TaskStatus>,
    pub intranet_sync: Option<TaskStatus>,
    pub gradebook_status: Option<TaskStatus>,
    pub notes: Option<String>,
}

pub struct UpdateActivityLogUseCase<A: ActivityLogRepository> {
    pub repo: A,
}

impl<A: ActivityLogRepository> UpdateActivityLogUseCase<A> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateActivityLogInput,
    ) -> Result<ActivityLog, ApiError> {
        let mut log = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ActivityLogNotFound)?;

        if let Some(week_number) = input.week_number {
            validate::week_number(week_number)?;
            log.week_number = week_number;
        }
        if let Some(attendance) = input.attendance {
            log.attendance = attendance;
        }
        if let Some(status) = input.formative_one_grading {
            log.formative_one_grading = status;
        }
        if let Some(status) = input.formative_two_grading {
            log.formative_two_grading = status;
        }
        if let Some(status) = input.summative_grading {
            log.summative_grading = status;
        }
        if let Some(status) = input.course_moderation {
            log.course_moderation = status;
        }
        if let Some(status) = input.intranet_sync {
            log.intranet_sync = status;
        }
        if let Some(status) = input.gradebook_status {
            log.gradebook_status = status;
        }
        if input.notes.is_some() {
            log.notes = input.notes;
        }

        log.updated_at = Utc::now();
        self.repo.update(&log).await?;
        Ok(log)
    }
}

// ── DeleteActivityLog ────────────────────────────────────────────────────────

pub struct DeleteActivityLogUseCase<A: ActivityLogRepository> {
    pub repo: A,
}

impl<A: ActivityLogRepository> DeleteActivityLogUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::ActivityLogNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use campus_domain::offering::OfferingStatus;

    use crate::domain::types::Offering;
    use crate::usecase::support::{MemActivityLogs, MemOfferings};

    fn seed_offering(offerings: &MemOfferings) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        offerings.insert(Offering {
            id,
            module_id: Uuid::now_v7(),
            class_id: Uuid::now_v7(),
            facilitator_id: Uuid::now_v7(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 3).unwrap(),
            status: OfferingStatus::Active,
            capacity: 30,
            current_enrollment: 10,
            created_at: now,
            updated_at: now,
        });
        id
    }

    fn input(offering_id: Uuid, week: i32) -> CreateActivityLogInput {
        CreateActivityLogInput {
            offering_id,
            week_number: week,
            attendance: None,
            formative_one_grading: None,
            formative_two_grading: None,
            summative_grading: None,
            course_moderation: None,
            intranet_sync: None,
            gradebook_status: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn should_create_log_with_defaults() {
        let offerings = MemOfferings::default();
        let offering_id = seed_offering(&offerings);
        let usecase = CreateActivityLogUseCase {
            logs: MemActivityLogs::default(),
            offerings,
        };
        let log = usecase.execute(input(offering_id, 3)).await.unwrap();
        assert_eq!(log.attendance, serde_json::json!([]));
        assert_eq!(log.formative_one_grading, TaskStatus::NotStarted);
        assert_eq!(log.gradebook_status, TaskStatus::NotStarted);
    }

    #[tokio::test]
    async fn should_reject_week_number_out_of_bounds() {
        let offerings = MemOfferings::default();
        let offering_id = seed_offering(&offerings);
        let usecase = CreateActivityLogUseCase {
            logs: MemActivityLogs::default(),
            offerings,
        };
        for week in [0, 53] {
            let err = usecase.execute(input(offering_id, week)).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
        assert_eq!(usecase.logs.len(), 0);
    }

    #[tokio::test]
    async fn should_reject_log_for_missing_offering() {
        let usecase = CreateActivityLogUseCase {
            logs: MemActivityLogs::default(),
            offerings: MemOfferings::default(),
        };
        let err = usecase.execute(input(Uuid::now_v7(), 3)).await.unwrap_err();
        assert!(matches!(err, ApiError::OfferingNotFound));
    }

    #[tokio::test]
    async fn should_update_task_statuses() {
        let offerings = MemOfferings::default();
        let offering_id = seed_offering(&offerings);
        let logs = MemActivityLogs::default();
        let log = CreateActivityLogUseCase {
            logs: logs.clone(),
            offerings,
        }
        .execute(input(offering_id, 3))
        .await
        .unwrap();

        let usecase = UpdateActivityLogUseCase { repo: logs };
        let updated = usecase
            .execute(
                log.id,
                UpdateActivityLogInput {
                    formative_one_grading: Some(TaskStatus::Done),
                    intranet_sync: Some(TaskStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.formative_one_grading, TaskStatus::Done);
        assert_eq!(updated.intranet_sync, TaskStatus::Pending);
        // untouched fields keep their stored values
        assert_eq!(updated.summative_grading, TaskStatus::NotStarted);
    }

    #[tokio::test]
    async fn should_list_logs_ordered_by_week() {
        let offerings = MemOfferings::default();
        let offering_id = seed_offering(&offerings);
        let logs = MemActivityLogs::default();
        let create = CreateActivityLogUseCase {
            logs: logs.clone(),
            offerings,
        };
        for week in [7, 2, 5] {
            create.execute(input(offering_id, week)).await.unwrap();
        }

        let usecase = ListActivityLogsUseCase { repo: logs };
        let all = usecase.execute(None).await.unwrap();
        let weeks: Vec<i32> = all.iter().map(|l| l.week_number).collect();
        assert_eq!(weeks, vec![2, 5, 7]);

        let only_week_5 = usecase.execute(Some(5)).await.unwrap();
        assert_eq!(only_week_5.len(), 1);
    }
}

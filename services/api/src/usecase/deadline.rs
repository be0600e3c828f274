//! Weekly activity-log deadline scan.
//!
//! Facilitators must submit an activity log for the current ISO week.
//! Thursday from 09:00 UTC a reminder goes to anyone still missing one;
//! Friday from 17:00 UTC the missing ones get a missed-deadline alert and
//! every manager is alerted as well. The time source is injected, so the
//! windows are testable without wall time.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use campus_domain::role::Role;

use crate::domain::repository::{ActivityLogRepository, Clock, NotificationQueue, UserRepository};
use crate::domain::types::JobEnvelope;
use crate::error::ApiError;

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeadlineScanOutcome {
    pub reminders: usize,
    pub missed: usize,
    pub manager_alerts: usize,
}

pub struct DeadlineScanUseCase<U, A, Q, C>
where
    U: UserRepository,
    A: ActivityLogRepository,
    Q: NotificationQueue,
    C: Clock,
{
    pub users: U,
    pub logs: A,
    pub queue: Q,
    pub clock: C,
}

impl<U, A, Q, C> DeadlineScanUseCase<U, A, Q, C>
where
    U: UserRepository,
    A: ActivityLogRepository,
    Q: NotificationQueue,
    C: Clock,
{
    pub async fn execute(&self) -> Result<DeadlineScanOutcome, ApiError> {
        let now = self.clock.now();
        let week = now.iso_week().week() as i32;
        let reminder_window = now.weekday() == Weekday::Thu && now.hour() >= 9;
        let missed_window = now.weekday() == Weekday::Fri && now.hour() >= 17;

        let mut outcome = DeadlineScanOutcome::default();
        if !reminder_window && !missed_window {
            return Ok(outcome);
        }

        let facilitators = self.users.list_by_role(Role::Facilitator).await?;
        let managers = if missed_window {
            self.users.list_by_role(Role::Manager).await?
        } else {
            Vec::new()
        };

        for facilitator in facilitators {
            if self
                .logs
                .facilitator_has_log_for_week(facilitator.id, week)
                .await?
            {
                continue;
            }
            if missed_window {
                self.queue
                    .enqueue(&JobEnvelope::facilitator_log_missed(facilitator.id, week))
                    .await?;
                outcome.missed += 1;
                for manager in &managers {
                    self.queue
                        .enqueue(&JobEnvelope::manager_alert(
                            manager.id,
                            facilitator.id,
                            week,
                            "missed",
                        ))
                        .await?;
                    outcome.manager_alerts += 1;
                }
            } else {
                self.queue
                    .enqueue(&JobEnvelope::facilitator_log_reminder(facilitator.id, week))
                    .await?;
                outcome.reminders += 1;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    use crate::domain::types::{
        ActivityLog, FacilitatorProfile, JobKind, ManagerProfile, RoleProfile, User,
    };
    use crate::usecase::support::{FixedClock, MemActivityLogs, MemQueue, MemUsers};

    fn seed(users: &MemUsers, role: Role) -> Uuid {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let profile = match role {
            Role::Facilitator => RoleProfile::Facilitator(FacilitatorProfile::default()),
            Role::Manager => RoleProfile::Manager(ManagerProfile::default()),
            Role::Student => unreachable!("scan never targets students"),
        };
        users.insert(
            User {
                id,
                username: format!("user-{id}"),
                email: format!("{id}@example.com"),
                password_hash: "hash".into(),
                role,
                first_name: "First".into(),
                last_name: "Last".into(),
                created_at: now,
                updated_at: now,
            },
            profile,
        );
        id
    }

    fn log_for(logs: &MemActivityLogs, facilitator_id: Uuid, week: i32) {
        let offering_id = Uuid::now_v7();
        logs.link_offering(offering_id, facilitator_id);
        let now = Utc::now();
        logs.insert(ActivityLog {
            id: Uuid::now_v7(),
            offering_id,
            week_number: week,
            attendance: serde_json::json!([]),
            formative_one_grading: Default::default(),
            formative_two_grading: Default::default(),
            summative_grading: Default::default(),
            course_moderation: Default::default(),
            intranet_sync: Default::default(),
            gradebook_status: Default::default(),
            notes: None,
            created_at: now,
            updated_at: now,
        });
    }

    // 2026-08-06 is a Thursday, 2026-08-07 a Friday (ISO week 32).
    fn thursday_morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap()
    }

    fn friday_evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 17, 30, 0).unwrap()
    }

    fn scan(
        users: MemUsers,
        logs: MemActivityLogs,
        queue: MemQueue,
        now: DateTime<Utc>,
    ) -> DeadlineScanUseCase<MemUsers, MemActivityLogs, MemQueue, FixedClock> {
        DeadlineScanUseCase {
            users,
            logs,
            queue,
            clock: FixedClock(now),
        }
    }

    #[tokio::test]
    async fn should_do_nothing_outside_the_windows() {
        let users = MemUsers::default();
        seed(&users, Role::Facilitator);
        let queue = MemQueue::default();
        let monday = Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).unwrap();

        let outcome = scan(users, MemActivityLogs::default(), queue.clone(), monday)
            .execute()
            .await
            .unwrap();
        assert_eq!(outcome, DeadlineScanOutcome::default());
        assert!(queue.jobs().is_empty());
    }

    #[tokio::test]
    async fn should_remind_facilitators_without_logs_on_thursday() {
        let users = MemUsers::default();
        let behind = seed(&users, Role::Facilitator);
        let on_time = seed(&users, Role::Facilitator);
        seed(&users, Role::Manager);

        let logs = MemActivityLogs::default();
        log_for(&logs, on_time, 32);

        let queue = MemQueue::default();
        let outcome = scan(users, logs, queue.clone(), thursday_morning())
            .execute()
            .await
            .unwrap();

        assert_eq!(outcome.reminders, 1);
        assert_eq!(outcome.missed, 0);
        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].kind, JobKind::FacilitatorLogReminder);
        assert_eq!(jobs[0].user_id, behind);
        assert_eq!(jobs[0].data["week_number"], 32);
    }

    #[tokio::test]
    async fn should_not_remind_before_9am_thursday() {
        let users = MemUsers::default();
        seed(&users, Role::Facilitator);
        let early = Utc.with_ymd_and_hms(2026, 8, 6, 8, 59, 0).unwrap();
        let queue = MemQueue::default();

        let outcome = scan(users, MemActivityLogs::default(), queue.clone(), early)
            .execute()
            .await
            .unwrap();
        assert_eq!(outcome.reminders, 0);
        assert!(queue.jobs().is_empty());
    }

    #[tokio::test]
    async fn should_alert_facilitator_and_managers_on_friday_evening() {
        let users = MemUsers::default();
        let behind = seed(&users, Role::Facilitator);
        seed(&users, Role::Manager);
        seed(&users, Role::Manager);

        let queue = MemQueue::default();
        let outcome = scan(
            users,
            MemActivityLogs::default(),
            queue.clone(),
            friday_evening(),
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(outcome.missed, 1);
        assert_eq!(outcome.manager_alerts, 2);
        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].kind, JobKind::FacilitatorLogMissed);
        assert_eq!(jobs[0].user_id, behind);
        assert!(
            jobs[1..]
                .iter()
                .all(|j| j.kind == JobKind::ManagerAlert
                    && j.data["facilitator_id"] == serde_json::json!(behind))
        );
    }

    #[tokio::test]
    async fn should_skip_facilitators_with_logs_for_the_week() {
        let users = MemUsers::default();
        let on_time = seed(&users, Role::Facilitator);
        seed(&users, Role::Manager);

        let logs = MemActivityLogs::default();
        log_for(&logs, on_time, 32);

        let queue = MemQueue::default();
        let outcome = scan(users, logs, queue.clone(), friday_evening())
            .execute()
            .await
            .unwrap();
        assert_eq!(outcome, DeadlineScanOutcome::default());
        assert!(queue.jobs().is_empty());
    }
}

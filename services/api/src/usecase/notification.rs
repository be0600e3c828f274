use uuid::Uuid;

use crate::domain::repository::{NotificationQueue, NotificationRepository};
use crate::domain::types::{JobEnvelope, Notification};
use crate::error::ApiError;

/// Default page size for a user's notification feed.
const DEFAULT_LIMIT: u64 = 10;

// ── ListNotifications ────────────────────────────────────────────────────────

pub struct ListNotificationsUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> ListNotificationsUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Notification>, ApiError> {
        self.repo
            .list_for_user(user_id, limit.unwrap_or(DEFAULT_LIMIT))
            .await
    }
}

// ── MarkNotificationRead ─────────────────────────────────────────────────────

pub struct MarkNotificationReadUseCase<R: NotificationRepository> {
    pub repo: R,
}

impl<R: NotificationRepository> MarkNotificationReadUseCase<R> {
    /// Scoped to the owner: marking someone else's notification reads as
    /// not found.
    pub async fn execute(&self, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        if !self.repo.mark_read(id, user_id).await? {
            return Err(ApiError::NotificationNotFound);
        }
        Ok(())
    }
}

// ── SendTestNotification ─────────────────────────────────────────────────────

/// Test kinds accepted by `POST /notifications/test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestNotificationKind {
    Reminder,
    Missed,
}

pub struct SendTestNotificationUseCase<Q: NotificationQueue> {
    pub queue: Q,
}

impl<Q: NotificationQueue> SendTestNotificationUseCase<Q> {
    /// Enqueue a canned job (week 1) addressed to the caller.
    pub async fn execute(
        &self,
        user_id: Uuid,
        kind: TestNotificationKind,
    ) -> Result<JobEnvelope, ApiError> {
        let job = match kind {
            TestNotificationKind::Reminder => JobEnvelope::facilitator_log_reminder(user_id, 1),
            TestNotificationKind::Missed => JobEnvelope::facilitator_log_missed(user_id, 1),
        };
        self.queue.enqueue(&job).await?;
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use campus_domain::notification::NotificationKind;

    use crate::domain::types::JobKind;
    use crate::usecase::support::{MemNotifications, MemQueue};

    fn notification(user_id: Uuid) -> Notification {
        Notification {
            id: Uuid::now_v7(),
            user_id,
            title: "Activity Log Reminder".into(),
            message: "Please submit your activity log for week 3".into(),
            kind: NotificationKind::Reminder,
            is_read: false,
            metadata: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn should_list_only_own_notifications() {
        let repo = MemNotifications::default();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();
        repo.insert(notification(alice));
        repo.insert(notification(bob));

        let usecase = ListNotificationsUseCase { repo };
        let list = usecase.execute(alice, None).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].user_id, alice);
    }

    #[tokio::test]
    async fn should_mark_own_notification_read() {
        let repo = MemNotifications::default();
        let alice = Uuid::now_v7();
        let n = notification(alice);
        let id = n.id;
        repo.insert(n);

        let usecase = MarkNotificationReadUseCase { repo: repo.clone() };
        usecase.execute(id, alice).await.unwrap();
        assert!(repo.get(id).unwrap().is_read);
    }

    #[tokio::test]
    async fn marking_someone_elses_notification_is_not_found() {
        let repo = MemNotifications::default();
        let alice = Uuid::now_v7();
        let n = notification(alice);
        let id = n.id;
        repo.insert(n);

        let usecase = MarkNotificationReadUseCase { repo };
        let err = usecase.execute(id, Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotificationNotFound));
    }

    #[tokio::test]
    async fn should_enqueue_test_reminder_job() {
        let queue = MemQueue::default();
        let usecase = SendTestNotificationUseCase {
            queue: queue.clone(),
        };
        let user_id = Uuid::now_v7();
        let job = usecase
            .execute(user_id, TestNotificationKind::Reminder)
            .await
            .unwrap();
        assert_eq!(job.kind, JobKind::FacilitatorLogReminder);
        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].user_id, user_id);
    }
}

//! Notification worker: consumes job envelopes, renders the notification,
//! persists it, and emits the email content via tracing (mail transport is
//! an external concern).

use std::time::Duration;

use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use campus_domain::notification::NotificationKind;

use crate::domain::repository::{NotificationQueue as _, NotificationRepository as _, UserRepository as _};
use crate::domain::types::{JobEnvelope, JobKind, Notification, User};
use crate::error::ApiError;
use crate::infra::db::{DbNotificationRepository, DbUserRepository};
use crate::infra::queue::{NOTIFICATION_QUEUE_KEY, RedisNotificationQueue};

/// A job is dropped after this many failed attempts.
const MAX_ATTEMPTS: u32 = 3;

/// Poll interval while the queue is empty.
const IDLE_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq, Eq)]
pub struct RenderedNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub email_subject: String,
    pub email_body: String,
}

/// Render the notification and email for a job. `facilitator` is the
/// subject of a manager alert; other kinds ignore it.
pub fn render_notification(
    job: &JobEnvelope,
    user: &User,
    facilitator: Option<&User>,
) -> Result<RenderedNotification, ApiError> {
    let week = job
        .data
        .get("week_number")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("job {} missing week_number", job.id)))?;

    let rendered = match job.kind {
        JobKind::FacilitatorLogReminder => RenderedNotification {
            title: "Activity Log Reminder".into(),
            message: format!("Please submit your activity log for week {week}"),
            kind: NotificationKind::Reminder,
            email_subject: "Activity Log Submission Reminder".into(),
            email_body: format!(
                "Dear {},\n\nThis is a reminder to submit your activity log for week {week}.\n\nBest regards,\nThe Education Team",
                user.first_name
            ),
        },
        JobKind::FacilitatorLogMissed => RenderedNotification {
            title: "Missed Activity Log Deadline".into(),
            message: format!("You missed the deadline for week {week}"),
            kind: NotificationKind::Alert,
            email_subject: "Missed Activity Log Deadline".into(),
            email_body: format!(
                "Dear {},\n\nYou missed the deadline for submitting your activity log for week {week}.\n\nBest regards,\nThe Education Team",
                user.first_name
            ),
        },
        JobKind::ManagerAlert => {
            let facilitator = facilitator.ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!("manager alert {} without facilitator", job.id))
            })?;
            let status = job
                .data
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("missed");
            let message = format!(
                "Facilitator {} {} has {status} their activity log for week {week}",
                facilitator.first_name, facilitator.last_name
            );
            RenderedNotification {
                title: "Facilitator Log Status".into(),
                message: message.clone(),
                kind: NotificationKind::Alert,
                email_subject: "Facilitator Log Status Update".into(),
                email_body: message,
            }
        }
    };
    Ok(rendered)
}

pub struct NotificationWorker {
    pub db: DatabaseConnection,
    pub redis: Pool,
}

impl NotificationWorker {
    /// Consume jobs until the process is stopped.
    pub async fn run(&self) {
        tracing::info!("notification worker started");
        loop {
            match self.pop().await {
                Ok(Some(job)) => self.handle(job).await,
                Ok(None) => tokio::time::sleep(IDLE_POLL).await,
                Err(e) => {
                    tracing::error!(error = %e, "queue pop failed");
                    tokio::time::sleep(IDLE_POLL).await;
                }
            }
        }
    }

    async fn pop(&self) -> Result<Option<JobEnvelope>, ApiError> {
        let mut conn = self
            .redis
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let payload: Option<Vec<u8>> = conn
            .rpop(NOTIFICATION_QUEUE_KEY, None)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        let Some(payload) = payload else {
            return Ok(None);
        };
        match serde_json::from_slice::<JobEnvelope>(&payload) {
            Ok(job) => Ok(Some(job)),
            Err(e) => {
                // Undecodable envelopes are dropped, not retried.
                tracing::error!(error = %e, "discarding malformed job envelope");
                Ok(None)
            }
        }
    }

    async fn handle(&self, job: JobEnvelope) {
        match self.process(&job).await {
            Ok(()) => {
                tracing::info!(job_id = %job.id, user_id = %job.user_id, "notification job completed");
            }
            Err(e) => {
                tracing::warn!(job_id = %job.id, attempt = job.attempt, error = %e, "notification job failed");
                self.retry(job).await;
            }
        }
    }

    async fn process(&self, job: &JobEnvelope) -> Result<(), ApiError> {
        let users = DbUserRepository {
            db: self.db.clone(),
        };
        let user = users
            .find_by_id(job.user_id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("user {} not found", job.user_id)))?;

        let facilitator = match job.kind {
            JobKind::ManagerAlert => {
                let id = job
                    .data
                    .get("facilitator_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse::<Uuid>().ok())
                    .ok_or_else(|| {
                        ApiError::Internal(anyhow::anyhow!("job {} missing facilitator_id", job.id))
                    })?;
                users.find_by_id(id).await?
            }
            _ => None,
        };

        let rendered = render_notification(job, &user, facilitator.as_ref())?;

        let now = chrono::Utc::now();
        DbNotificationRepository {
            db: self.db.clone(),
        }
        .create(&Notification {
            id: Uuid::now_v7(),
            user_id: user.id,
            title: rendered.title,
            message: rendered.message,
            kind: rendered.kind,
            is_read: false,
            metadata: Some(job.data.clone()),
            created_at: now,
            updated_at: now,
        })
        .await?;

        tracing::info!(
            to = %user.email,
            subject = %rendered.email_subject,
            body = %rendered.email_body,
            "email dispatched"
        );
        Ok(())
    }

    /// Re-enqueue with exponential backoff; drop after [`MAX_ATTEMPTS`].
    async fn retry(&self, mut job: JobEnvelope) {
        job.attempt += 1;
        if job.attempt >= MAX_ATTEMPTS {
            tracing::error!(job_id = %job.id, "notification job dropped after {MAX_ATTEMPTS} attempts");
            return;
        }
        let delay = Duration::from_secs(1 << job.attempt);
        let queue = RedisNotificationQueue {
            pool: self.redis.clone(),
        };
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = queue.enqueue(&job).await {
                tracing::error!(job_id = %job.id, error = %e, "failed to re-enqueue job");
            }
        });
    }
}

use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::NotificationQueue;
use crate::domain::types::JobEnvelope;
use crate::error::ApiError;

/// Redis list the notification worker consumes from.
pub const NOTIFICATION_QUEUE_KEY: &str = "notifications";

/// Producer side of the notification queue: JSON envelopes pushed onto a
/// Redis list. Callers on the request path treat enqueue as
/// fire-and-forget and must not fail the request on queue errors.
#[derive(Clone)]
pub struct RedisNotificationQueue {
    pub pool: Pool,
}

impl NotificationQueue for RedisNotificationQueue {
    async fn enqueue(&self, job: &JobEnvelope) -> Result<(), ApiError> {
        let payload = serde_json::to_vec(job).map_err(|e| ApiError::Internal(e.into()))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let (): () = conn
            .lpush(NOTIFICATION_QUEUE_KEY, payload)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }
}

use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbActivityLogRepository, DbClassRepository, DbCohortRepository, DbGradeRepository,
    DbModuleRepository, DbNotificationRepository, DbOfferingRepository, DbUserRepository,
};
use crate::infra::queue::RedisNotificationQueue;

/// Shared application state passed to every handler via axum `State`.
///
/// The database handle is constructed once at startup and injected here;
/// nothing in the service reaches for a global connection.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn cohort_repo(&self) -> DbCohortRepository {
        DbCohortRepository {
            db: self.db.clone(),
        }
    }

    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            db: self.db.clone(),
        }
    }

    pub fn module_repo(&self) -> DbModuleRepository {
        DbModuleRepository {
            db: self.db.clone(),
        }
    }

    pub fn offering_repo(&self) -> DbOfferingRepository {
        DbOfferingRepository {
            db: self.db.clone(),
        }
    }

    pub fn activity_log_repo(&self) -> DbActivityLogRepository {
        DbActivityLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn grade_repo(&self) -> DbGradeRepository {
        DbGradeRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_queue(&self) -> RedisNotificationQueue {
        RedisNotificationQueue {
            pool: self.redis.clone(),
        }
    }
}

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use campus_core::health::{healthz, readyz};
use campus_core::middleware::request_id_layer;

use crate::handlers::{
    activity_log::{
        create_activity_log, delete_activity_log, get_activity_log, list_activity_logs,
        update_activity_log,
    },
    auth::{login, me, register_facilitator, register_manager, register_student},
    class::{create_class, delete_class, get_class, list_classes, update_class},
    cohort::{create_cohort, delete_cohort, get_cohort, list_cohorts, update_cohort},
    grade::{create_grade, delete_grade, get_grade, list_grades, publish_grade, update_grade},
    module::{create_module, delete_module, get_module, list_modules, update_module},
    notification::{list_notifications, mark_notification_read, test_notification},
    offering::{create_offering, delete_offering, get_offering, list_offerings, update_offering},
    user::{assign_student_class, delete_user, get_user, list_users, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register/student", post(register_student))
        .route("/auth/register/facilitator", post(register_facilitator))
        .route("/auth/register/manager", post(register_manager))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        // Users
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", patch(update_user))
        .route("/users/{id}", delete(delete_user))
        .route("/users/students/{id}/class", patch(assign_student_class))
        // Cohorts
        .route("/cohorts", post(create_cohort))
        .route("/cohorts", get(list_cohorts))
        .route("/cohorts/{id}", get(get_cohort))
        .route("/cohorts/{id}", patch(update_cohort))
        .route("/cohorts/{id}", delete(delete_cohort))
        // Classes
        .route("/classes", post(create_class))
        .route("/classes", get(list_classes))
        .route("/classes/{id}", get(get_class))
        .route("/classes/{id}", patch(update_class))
        .route("/classes/{id}", delete(delete_class))
        // Modules
        .route("/modules", post(create_module))
        .route("/modules", get(list_modules))
        .route("/modules/{id}", get(get_module))
        .route("/modules/{id}", patch(update_module))
        .route("/modules/{id}", delete(delete_module))
        // Course offerings
        .route("/course-offerings", post(create_offering))
        .route("/course-offerings", get(list_offerings))
        .route("/course-offerings/{id}", get(get_offering))
        .route("/course-offerings/{id}", patch(update_offering))
        .route("/course-offerings/{id}", delete(delete_offering))
        // Grades
        .route("/grades", post(create_grade))
        .route("/grades", get(list_grades))
        .route("/grades/{id}", get(get_grade))
        .route("/grades/{id}", patch(update_grade))
        .route("/grades/{id}/publish", patch(publish_grade))
        .route("/grades/{id}", delete(delete_grade))
        // Activity logs
        .route("/activity-logs", post(create_activity_log))
        .route("/activity-logs", get(list_activity_logs))
        .route("/activity-logs/{id}", get(get_activity_log))
        .route("/activity-logs/{id}", put(update_activity_log))
        .route("/activity-logs/{id}", delete(delete_activity_log))
        // Notifications
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", patch(mark_notification_read))
        .route("/notifications/test", post(test_notification))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

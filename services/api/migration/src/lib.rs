use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_cohorts;
mod m20260801_000003_create_classes;
mod m20260801_000004_create_students;
mod m20260801_000005_create_facilitators;
mod m20260801_000006_create_managers;
mod m20260801_000007_create_modules;
mod m20260801_000008_create_course_offerings;
mod m20260801_000009_create_activity_logs;
mod m20260801_000010_create_grades;
mod m20260801_000011_create_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_cohorts::Migration),
            Box::new(m20260801_000003_create_classes::Migration),
            Box::new(m20260801_000004_create_students::Migration),
            Box::new(m20260801_000005_create_facilitators::Migration),
            Box::new(m20260801_000006_create_managers::Migration),
            Box::new(m20260801_000007_create_modules::Migration),
            Box::new(m20260801_000008_create_course_offerings::Migration),
            Box::new(m20260801_000009_create_activity_logs::Migration),
            Box::new(m20260801_000010_create_grades::Migration),
            Box::new(m20260801_000011_create_notifications::Migration),
        ]
    }
}

//! sea-orm entity definitions for the campus API.

pub mod activity_logs;
pub mod classes;
pub mod cohorts;
pub mod course_offerings;
pub mod facilitators;
pub mod grades;
pub mod managers;
pub mod modules;
pub mod notifications;
pub mod students;
pub mod users;

pub mod activity_log;
pub mod auth;
pub mod class;
pub mod cohort;
pub mod deadline;
pub mod grade;
pub mod module;
pub mod notification;
pub mod offering;
pub mod user;

#[cfg(test)]
pub(crate) mod support;

//! Domain types shared across the campus platform.
//!
//! This crate contains only pure types and invariant checks with no
//! framework dependencies. Import in `usecase/` and `domain/` layers;
//! never in `infra/` or `handlers/`.

pub mod activity;
pub mod class;
pub mod cohort;
pub mod grade;
pub mod notification;
pub mod offering;
pub mod pagination;
pub mod role;
pub mod validate;

use chrono::Utc;
use uuid::Uuid;

use campus_domain::class::{ClassMode, IntakePeriod};
use campus_domain::pagination::PageRequest;

use crate::domain::repository::{ClassRepository, CohortRepository};
use crate::domain::types::{Class, ClassFilter};
use crate::domain::view::ClassDetail;
use crate::error::ApiError;

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassInput {
    pub name: String,
    pub code: String,
    pub trimester: String,
    pub intake_period: IntakePeriod,
    pub mode: ClassMode,
    pub cohort_id: Uuid,
}

pub struct CreateClassUseCase<C: ClassRepository, H: CohortRepository> {
    pub classes: C,
    pub cohorts: H,
}

impl<C: ClassRepository, H: CohortRepository> CreateClassUseCase<C, H> {
    pub async fn execute(&self, input: CreateClassInput) -> Result<ClassDetail, ApiError> {
        self.cohorts
            .find_by_id(input.cohort_id)
            .await?
            .ok_or(ApiError::CohortNotFound)?;
        if self.classes.code_exists(&input.code, None).await? {
            return Err(ApiError::conflict("class code must be unique"));
        }
        if self.classes.name_exists(&input.name, None).await? {
            return Err(ApiError::conflict("class name must be unique"));
        }

        let now = Utc::now();
        let class = Class {
            id: Uuid::now_v7(),
            name: input.name,
            code: input.code,
            trimester: input.trimester,
            intake_period: input.intake_period,
            mode: input.mode,
            cohort_id: input.cohort_id,
            created_at: now,
            updated_at: now,
        };
        self.classes.create(&class).await?;
        self.classes
            .find_detail(class.id)
            .await?
            .ok_or(ApiError::ClassNotFound)
    }
}

// ── ListClasses / GetClass ───────────────────────────────────────────────────

pub struct ListClassesUseCase<C: ClassRepository> {
    pub repo: C,
}

impl<C: ClassRepository> ListClassesUseCase<C> {
    pub async fn execute(
        &self,
        filter: ClassFilter,
        page: PageRequest,
    ) -> Result<(u64, Vec<ClassDetail>), ApiError> {
        self.repo.list(filter, page.clamped()).await
    }
}

pub struct GetClassUseCase<C: ClassRepository> {
    pub repo: C,
}

impl<C: ClassRepository> GetClassUseCase<C> {
    pub async fn execute(&self, id: Uuid) -> Result<ClassDetail, ApiError> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or(ApiError::ClassNotFound)
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateClassInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub trimester: Option<String>,
    pub intake_period: Option<IntakePeriod>,
    pub mode: Option<ClassMode>,
    pub cohort_id: Option<Uuid>,
}

pub struct UpdateClassUseCase<C: ClassRepository, H: CohortRepository> {
    pub classes: C,
    pub cohorts: H,
}

impl<C: ClassRepository, H: CohortRepository> UpdateClassUseCase<C, H> {
    pub async fn execute(&self, id: Uuid, input: UpdateClassInput) -> Result<ClassDetail, ApiError> {
        let mut class = self
            .classes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ClassNotFound)?;

        if let Some(cohort_id) = input.cohort_id {
            self.cohorts
                .find_by_id(cohort_id)
                .await?
                .ok_or(ApiError::CohortNotFound)?;
            class.cohort_id = cohort_id;
        }
        if let Some(ref code) = input.code {
            if self.classes.code_exists(code, Some(id)).await? {
                return Err(ApiError::conflict("class code must be unique"));
            }
            class.code = code.clone();
        }
        if let Some(ref name) = input.name {
            if self.classes.name_exists(name, Some(id)).await? {
                return Err(ApiError::conflict("class name must be unique"));
            }
            class.name = name.clone();
        }
        if let Some(trimester) = input.trimester {
            class.trimester = trimester;
        }
        if let Some(intake_period) = input.intake_period {
            class.intake_period = intake_period;
        }
        if let Some(mode) = input.mode {
            class.mode = mode;
        }

        class.updated_at = Utc::now();
        self.classes.update(&class).await?;
        self.classes
            .find_detail(id)
            .await?
            .ok_or(ApiError::ClassNotFound)
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<C: ClassRepository> {
    pub repo: C,
}

impl<C: ClassRepository> DeleteClassUseCase<C> {
    /// Referential-deletion guard: a class with enrolled students or
    /// offerings is kept, with a remediation hint in the error.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ClassNotFound)?;

        if self.repo.has_enrolled_students(id).await? {
            return Err(ApiError::conflict_with_hint(
                "cannot delete class with enrolled students",
                "remove all enrollments before deleting this class",
            ));
        }
        if self.repo.has_offerings(id).await? {
            return Err(ApiError::conflict_with_hint(
                "cannot delete class with course offerings",
                "remove the class's course offerings first",
            ));
        }
        if !self.repo.delete(id).await? {
            return Err(ApiError::ClassNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use campus_domain::cohort::CohortStatus;

    use crate::domain::types::Cohort;
    use crate::usecase::support::{MemClasses, MemCohorts};

    fn seed_cohort(cohorts: &MemCohorts) -> Uuid {
        let id = Uuid::now_v7();
        let now = Utc::now();
        cohorts.insert(Cohort {
            id,
            name: "2026 Spring".into(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            status: CohortStatus::Active,
            created_at: now,
            updated_at: now,
        });
        id
    }

    fn class_input(cohort_id: Uuid, name: &str, code: &str) -> CreateClassInput {
        CreateClassInput {
            name: name.into(),
            code: code.into(),
            trimester: "T1".into(),
            intake_period: IntakePeriod::Ht1,
            mode: ClassMode::Online,
            cohort_id,
        }
    }

    #[tokio::test]
    async fn should_create_class_under_existing_cohort() {
        let cohorts = MemCohorts::default();
        let cohort_id = seed_cohort(&cohorts);
        let usecase = CreateClassUseCase {
            classes: MemClasses::default(),
            cohorts,
        };
        let detail = usecase
            .execute(class_input(cohort_id, "2026J", "C-01"))
            .await
            .unwrap();
        assert_eq!(detail.class.code, "C-01");
        assert_eq!(detail.cohort.id, cohort_id);
    }

    #[tokio::test]
    async fn should_reject_class_for_missing_cohort() {
        let usecase = CreateClassUseCase {
            classes: MemClasses::default(),
            cohorts: MemCohorts::default(),
        };
        let err = usecase
            .execute(class_input(Uuid::now_v7(), "2026J", "C-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::CohortNotFound));
    }

    #[tokio::test]
    async fn should_reject_duplicate_class_code() {
        let cohorts = MemCohorts::default();
        let cohort_id = seed_cohort(&cohorts);
        let usecase = CreateClassUseCase {
            classes: MemClasses::default(),
            cohorts,
        };
        usecase
            .execute(class_input(cohort_id, "2026J", "C-01"))
            .await
            .unwrap();
        let err = usecase
            .execute(class_input(cohort_id, "2026K", "C-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
        assert_eq!(usecase.classes.len(), 1);
    }

    #[tokio::test]
    async fn should_block_deleting_class_with_enrollments() {
        let cohorts = MemCohorts::default();
        let cohort_id = seed_cohort(&cohorts);
        let classes = MemClasses::default();
        let detail = CreateClassUseCase {
            classes: classes.clone(),
            cohorts,
        }
        .execute(class_input(cohort_id, "2026J", "C-01"))
        .await
        .unwrap();

        classes.mark_enrolled(detail.class.id);
        let usecase = DeleteClassUseCase {
            repo: classes.clone(),
        };
        let err = usecase.execute(detail.class.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
        // the class row still exists
        assert_eq!(classes.len(), 1);
    }

    #[tokio::test]
    async fn should_delete_class_without_references() {
        let cohorts = MemCohorts::default();
        let cohort_id = seed_cohort(&cohorts);
        let classes = MemClasses::default();
        let detail = CreateClassUseCase {
            classes: classes.clone(),
            cohorts,
        }
        .execute(class_input(cohort_id, "2026J", "C-01"))
        .await
        .unwrap();

        DeleteClassUseCase {
            repo: classes.clone(),
        }
        .execute(detail.class.id)
        .await
        .unwrap();
        assert_eq!(classes.len(), 0);
    }

    #[tokio::test]
    async fn should_filter_and_paginate_class_listing() {
        let cohorts = MemCohorts::default();
        let cohort_id = seed_cohort(&cohorts);
        let classes = MemClasses::default();
        let create = CreateClassUseCase {
            classes: classes.clone(),
            cohorts,
        };
        for i in 0..3 {
            create
                .execute(class_input(cohort_id, &format!("2026-{i}"), &format!("C-{i}")))
                .await
                .unwrap();
        }

        let usecase = ListClassesUseCase { repo: classes };
        let (total, page) = usecase
            .execute(
                ClassFilter {
                    cohort_id: Some(cohort_id),
                    ..Default::default()
                },
                PageRequest {
                    per_page: 2,
                    page: 1,
                },
            )
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
    }
}

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use campus_domain::cohort::CohortStatus;
use campus_domain::validate;

use crate::domain::repository::CohortRepository;
use crate::domain::types::Cohort;
use crate::error::ApiError;

// ── CreateCohort ─────────────────────────────────────────────────────────────

pub struct CreateCohortInput {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<CohortStatus>,
}

pub struct CreateCohortUseCase<R: CohortRepository> {
    pub repo: R,
}

impl<R: CohortRepository> CreateCohortUseCase<R> {
    pub async fn execute(&self, input: CreateCohortInput) -> Result<Cohort, ApiError> {
        validate::date_range(input.start_date, input.end_date)?;
        if self.repo.name_exists(&input.name, None).await? {
            return Err(ApiError::conflict("cohort name already exists"));
        }

        let now = Utc::now();
        let cohort = Cohort {
            id: Uuid::now_v7(),
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&cohort).await?;
        Ok(cohort)
    }
}

// ── ListCohorts / GetCohort ──────────────────────────────────────────────────

pub struct ListCohortsUseCase<R: CohortRepository> {
    pub repo: R,
}

impl<R: CohortRepository> ListCohortsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Cohort>, ApiError> {
        self.repo.list().await
    }
}

pub struct GetCohortUseCase<R: CohortRepository> {
    pub repo: R,
}

impl<R: CohortRepository> GetCohortUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Cohort, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CohortNotFound)
    }
}

// ── UpdateCohort ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateCohortInput {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CohortStatus>,
}

pub struct UpdateCohortUseCase<R: CohortRepository> {
    pub repo: R,
}

impl<R: CohortRepository> UpdateCohortUseCase<R> {
    /// Patch is merged onto the stored row before validation, so a
    /// one-sided date change still re-validates the full range.
    pub async fn execute(&self, id: Uuid, input: UpdateCohortInput) -> Result<Cohort, ApiError> {
        let mut cohort = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CohortNotFound)?;

        if let Some(ref name) = input.name {
            if self.repo.name_exists(name, Some(id)).await? {
                return Err(ApiError::conflict("cohort name already exists"));
            }
            cohort.name = name.clone();
        }
        if let Some(start_date) = input.start_date {
            cohort.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            cohort.end_date = end_date;
        }
        if let Some(status) = input.status {
            cohort.status = status;
        }
        validate::date_range(cohort.start_date, cohort.end_date)?;

        cohort.updated_at = Utc::now();
        self.repo.update(&cohort).await?;
        Ok(cohort)
    }
}

// ── DeleteCohort ─────────────────────────────────────────────────────────────

pub struct DeleteCohortUseCase<R: CohortRepository> {
    pub repo: R,
}

impl<R: CohortRepository> DeleteCohortUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::CohortNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::support::MemCohorts;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str, start: NaiveDate, end: NaiveDate) -> CreateCohortInput {
        CreateCohortInput {
            name: name.into(),
            start_date: start,
            end_date: end,
            status: None,
        }
    }

    #[tokio::test]
    async fn should_create_cohort_with_default_status() {
        let repo = MemCohorts::default();
        let usecase = CreateCohortUseCase { repo };
        let cohort = usecase
            .execute(input("2026 Spring", date(2026, 1, 1), date(2026, 6, 30)))
            .await
            .unwrap();
        assert_eq!(cohort.status, CohortStatus::Planned);
    }

    #[tokio::test]
    async fn should_reject_end_date_not_after_start_date_and_persist_nothing() {
        let repo = MemCohorts::default();
        let usecase = CreateCohortUseCase { repo };
        let err = usecase
            .execute(input("2026 Spring", date(2026, 6, 30), date(2026, 6, 30)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(usecase.repo.len(), 0);
    }

    #[tokio::test]
    async fn should_reject_duplicate_cohort_name() {
        let usecase = CreateCohortUseCase {
            repo: MemCohorts::default(),
        };
        usecase
            .execute(input("2026 Spring", date(2026, 1, 1), date(2026, 6, 30)))
            .await
            .unwrap();
        let err = usecase
            .execute(input("2026 Spring", date(2026, 7, 1), date(2026, 12, 20)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn should_revalidate_date_range_on_one_sided_update() {
        let repo = MemCohorts::default();
        let created = CreateCohortUseCase { repo: repo.clone() }
            .execute(input("2026 Spring", date(2026, 1, 1), date(2026, 6, 30)))
            .await
            .unwrap();

        // moving only the end date before the stored start date must fail
        let usecase = UpdateCohortUseCase { repo };
        let err = usecase
            .execute(
                created.id,
                UpdateCohortInput {
                    end_date: Some(date(2025, 12, 31)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn should_update_status_without_touching_dates() {
        let repo = MemCohorts::default();
        let created = CreateCohortUseCase { repo: repo.clone() }
            .execute(input("2026 Spring", date(2026, 1, 1), date(2026, 6, 30)))
            .await
            .unwrap();

        let usecase = UpdateCohortUseCase { repo };
        let updated = usecase
            .execute(
                created.id,
                UpdateCohortInput {
                    status: Some(CohortStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, CohortStatus::Active);
        assert_eq!(updated.start_date, created.start_date);
    }

    #[tokio::test]
    async fn should_delete_cohort_once() {
        let repo = MemCohorts::default();
        let created = CreateCohortUseCase { repo: repo.clone() }
            .execute(input("2026 Spring", date(2026, 1, 1), date(2026, 6, 30)))
            .await
            .unwrap();

        let usecase = DeleteCohortUseCase { repo };
        usecase.execute(created.id).await.unwrap();
        let err = usecase.execute(created.id).await.unwrap_err();
        assert!(matches!(err, ApiError::CohortNotFound));
    }
}

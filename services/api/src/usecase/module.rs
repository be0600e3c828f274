use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::ModuleRepository;
use crate::domain::types::Module;
use crate::error::ApiError;

// ── CreateModule ─────────────────────────────────────────────────────────────

pub struct CreateModuleInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: Option<bool>,
}

pub struct CreateModuleUseCase<R: ModuleRepository> {
    pub repo: R,
}

impl<R: ModuleRepository> CreateModuleUseCase<R> {
    pub async fn execute(&self, input: CreateModuleInput) -> Result<Module, ApiError> {
        if self.repo.code_exists(&input.code, None).await? {
            return Err(ApiError::conflict("module code must be unique"));
        }

        let now = Utc::now();
        let module = Module {
            id: Uuid::now_v7(),
            code: input.code,
            name: input.name,
            description: input.description,
            credits: input.credits,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&module).await?;
        Ok(module)
    }
}

// ── ListModules / GetModule ──────────────────────────────────────────────────

pub struct ListModulesUseCase<R: ModuleRepository> {
    pub repo: R,
}

impl<R: ModuleRepository> ListModulesUseCase<R> {
    pub async fn execute(&self, active: Option<bool>) -> Result<Vec<Module>, ApiError> {
        self.repo.list(active).await
    }
}

pub struct GetModuleUseCase<R: ModuleRepository> {
    pub repo: R,
}

impl<R: ModuleRepository> GetModuleUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Module, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ModuleNotFound)
    }
}

// ── UpdateModule ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateModuleInput {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

pub struct UpdateModuleUseCase<R: ModuleRepository> {
    pub repo: R,
}

impl<R: ModuleRepository> UpdateModuleUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateModuleInput) -> Result<Module, ApiError> {
        let mut module = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ModuleNotFound)?;

        if let Some(ref code) = input.code {
            if self.repo.code_exists(code, Some(id)).await? {
                return Err(ApiError::conflict("module code must be unique"));
            }
            module.code = code.clone();
        }
        if let Some(name) = input.name {
            module.name = name;
        }
        if input.description.is_some() {
            module.description = input.description;
        }
        if let Some(credits) = input.credits {
            module.credits = credits;
        }
        if let Some(is_active) = input.is_active {
            module.is_active = is_active;
        }

        module.updated_at = Utc::now();
        self.repo.update(&module).await?;
        Ok(module)
    }
}

// ── DeleteModule ─────────────────────────────────────────────────────────────

pub struct DeleteModuleUseCase<R: ModuleRepository> {
    pub repo: R,
}

impl<R: ModuleRepository> DeleteModuleUseCase<R> {
    /// Referential-deletion guard: a module referenced by offerings is
    /// kept; the caller is told to deactivate it instead.
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ModuleNotFound)?;

        if self.repo.has_offerings(id).await? {
            return Err(ApiError::conflict_with_hint(
                "cannot delete module with course offerings",
                "deactivate the module instead of deleting it",
            ));
        }
        if !self.repo.delete(id).await? {
            return Err(ApiError::ModuleNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::support::MemModules;

    fn input(code: &str) -> CreateModuleInput {
        CreateModuleInput {
            code: code.into(),
            name: "Systems Programming".into(),
            description: None,
            credits: 10,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn should_create_module_active_by_default() {
        let usecase = CreateModuleUseCase {
            repo: MemModules::default(),
        };
        let module = usecase.execute(input("M-100")).await.unwrap();
        assert!(module.is_active);
    }

    #[tokio::test]
    async fn should_reject_duplicate_module_code() {
        let usecase = CreateModuleUseCase {
            repo: MemModules::default(),
        };
        usecase.execute(input("M-100")).await.unwrap();
        let err = usecase.execute(input("M-100")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
        assert_eq!(usecase.repo.len(), 1);
    }

    #[tokio::test]
    async fn should_block_deleting_module_with_offerings() {
        let repo = MemModules::default();
        let module = CreateModuleUseCase { repo: repo.clone() }
            .execute(input("M-100"))
            .await
            .unwrap();
        repo.mark_offering(module.id);

        let usecase = DeleteModuleUseCase { repo: repo.clone() };
        let err = usecase.execute(module.id).await.unwrap_err();
        match err {
            ApiError::Conflict { hint, .. } => {
                assert_eq!(
                    hint.as_deref(),
                    Some("deactivate the module instead of deleting it")
                );
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn should_deactivate_module_via_update() {
        let repo = MemModules::default();
        let module = CreateModuleUseCase { repo: repo.clone() }
            .execute(input("M-100"))
            .await
            .unwrap();

        let usecase = UpdateModuleUseCase { repo };
        let updated = usecase
            .execute(
                module.id,
                UpdateModuleInput {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn should_filter_modules_by_active_flag() {
        let repo = MemModules::default();
        let create = CreateModuleUseCase { repo: repo.clone() };
        let active = create.execute(input("M-100")).await.unwrap();
        let inactive = create
            .execute(CreateModuleInput {
                is_active: Some(false),
                ..input("M-200")
            })
            .await
            .unwrap();

        let usecase = ListModulesUseCase { repo };
        let actives = usecase.execute(Some(true)).await.unwrap();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].id, active.id);
        let inactives = usecase.execute(Some(false)).await.unwrap();
        assert_eq!(inactives[0].id, inactive.id);
        assert_eq!(usecase.execute(None).await.unwrap().len(), 2);
    }
}

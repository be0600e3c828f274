use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use campus_api_schema::{
    activity_logs, classes, cohorts, course_offerings, facilitators, grades, managers, modules,
    notifications, students, users,
};
use campus_domain::activity::TaskStatus;
use campus_domain::class::{ClassMode, IntakePeriod};
use campus_domain::cohort::CohortStatus;
use campus_domain::grade::GradeStatus;
use campus_domain::notification::NotificationKind;
use campus_domain::offering::OfferingStatus;
use campus_domain::pagination::PageRequest;
use campus_domain::role::Role;

use crate::domain::repository::{
    ActivityLogRepository, ClassRepository, CohortRepository, GradeRepository, ModuleRepository,
    NotificationRepository, OfferingRepository, UserRepository,
};
use crate::domain::types::{
    ActivityLog, Class, ClassFilter, Cohort, FacilitatorProfile, Grade, ManagerProfile, Module,
    Notification, Offering, RoleProfile, StudentProfile, User,
};
use crate::domain::view::{ClassDetail, EntityRef, OfferingDetail, PersonRef};
use crate::error::ApiError;

/// Map write errors: constraint violations become conflicts (the database
/// is the authoritative uniqueness/referential check under races),
/// everything else is internal.
fn map_db_err(e: sea_orm::DbErr, ctx: &'static str) -> ApiError {
    match e.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            ApiError::conflict("record already exists")
        }
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
            ApiError::conflict("record is referenced by other records")
        }
        _ => ApiError::Internal(anyhow::Error::new(e).context(ctx)),
    }
}

fn invalid_enum(column: &'static str, value: &str) -> ApiError {
    ApiError::Internal(anyhow::anyhow!("invalid {column} value in database: {value}"))
}

fn parse_role(value: &str) -> Result<Role, ApiError> {
    Role::from_str(value).ok_or_else(|| invalid_enum("role", value))
}

fn parse_task_status(column: &'static str, value: &str) -> Result<TaskStatus, ApiError> {
    TaskStatus::from_str(value).ok_or_else(|| invalid_enum(column, value))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: parse_role(&model.role)?,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn student_profile_from_model(model: students::Model) -> StudentProfile {
    StudentProfile {
        student_number: model.student_number,
        class_id: model.class_id,
        enrollment_date: model.enrollment_date,
    }
}

fn facilitator_profile_from_model(model: facilitators::Model) -> FacilitatorProfile {
    FacilitatorProfile {
        faculty_position: model.faculty_position,
        specialization: model.specialization,
        office_location: model.office_location,
    }
}

fn manager_profile_from_model(model: managers::Model) -> ManagerProfile {
    ManagerProfile {
        department: model.department,
    }
}

impl DbUserRepository {
    async fn load_profile(&self, user: &User) -> Result<RoleProfile, ApiError> {
        let profile = match user.role {
            Role::Student => students::Entity::find()
                .filter(students::Column::UserId.eq(user.id))
                .one(&self.db)
                .await
                .context("find student profile")?
                .map(|m| RoleProfile::Student(student_profile_from_model(m))),
            Role::Facilitator => facilitators::Entity::find()
                .filter(facilitators::Column::UserId.eq(user.id))
                .one(&self.db)
                .await
                .context("find facilitator profile")?
                .map(|m| RoleProfile::Facilitator(facilitator_profile_from_model(m))),
            Role::Manager => managers::Entity::find()
                .filter(managers::Column::UserId.eq(user.id))
                .one(&self.db)
                .await
                .context("find manager profile")?
                .map(|m| RoleProfile::Manager(manager_profile_from_model(m))),
        };
        profile.ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "identity {} has no {} profile row",
                user.id,
                user.role
            ))
        })
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_with_profile(&self, id: Uuid) -> Result<Option<(User, RoleProfile)>, ApiError> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let profile = self.load_profile(&user).await?;
        Ok(Some((user, profile)))
    }

    async fn list_with_profiles(&self) -> Result<Vec<(User, RoleProfile)>, ApiError> {
        let user_models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;

        // Three bulk profile loads instead of one query per user.
        let mut student_rows: HashMap<Uuid, students::Model> = students::Entity::find()
            .all(&self.db)
            .await
            .context("list student profiles")?
            .into_iter()
            .map(|m| (m.user_id, m))
            .collect();
        let mut facilitator_rows: HashMap<Uuid, facilitators::Model> = facilitators::Entity::find()
            .all(&self.db)
            .await
            .context("list facilitator profiles")?
            .into_iter()
            .map(|m| (m.user_id, m))
            .collect();
        let mut manager_rows: HashMap<Uuid, managers::Model> = managers::Entity::find()
            .all(&self.db)
            .await
            .context("list manager profiles")?
            .into_iter()
            .map(|m| (m.user_id, m))
            .collect();

        let mut result = Vec::with_capacity(user_models.len());
        for model in user_models {
            let user = user_from_model(model)?;
            let profile = match user.role {
                Role::Student => student_rows
                    .remove(&user.id)
                    .map(|m| RoleProfile::Student(student_profile_from_model(m))),
                Role::Facilitator => facilitator_rows
                    .remove(&user.id)
                    .map(|m| RoleProfile::Facilitator(facilitator_profile_from_model(m))),
                Role::Manager => manager_rows
                    .remove(&user.id)
                    .map(|m| RoleProfile::Manager(manager_profile_from_model(m))),
            };
            let profile = profile.ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!(
                    "identity {} has no {} profile row",
                    user.id,
                    user.role
                ))
            })?;
            result.push((user, profile));
        }
        Ok(result)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .filter(users::Column::Role.eq(role.as_str()))
            .all(&self.db)
            .await
            .context("list users by role")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn username_exists(
        &self,
        username: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let mut query = users::Entity::find().filter(users::Column::Username.eq(username));
        if let Some(id) = exclude {
            query = query.filter(users::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count usernames")?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(users::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count emails")?;
        Ok(count > 0)
    }

    async fn student_number_exists(
        &self,
        student_number: &str,
        exclude_user: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let mut query =
            students::Entity::find().filter(students::Column::StudentNumber.eq(student_number));
        if let Some(id) = exclude_user {
            query = query.filter(students::Column::UserId.ne(id));
        }
        let count = query.count(&self.db).await.context("count student numbers")?;
        Ok(count > 0)
    }

    async fn create_with_profile(
        &self,
        user: &User,
        profile: &RoleProfile,
    ) -> Result<(), ApiError> {
        let user = user.clone();
        let profile = profile.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        username: Set(user.username.clone()),
                        email: Set(user.email.clone()),
                        password_hash: Set(user.password_hash.clone()),
                        role: Set(user.role.as_str().to_owned()),
                        first_name: Set(user.first_name.clone()),
                        last_name: Set(user.last_name.clone()),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    match profile {
                        RoleProfile::Student(student) => {
                            students::ActiveModel {
                                id: Set(Uuid::now_v7()),
                                user_id: Set(user.id),
                                student_number: Set(student.student_number.clone()),
                                class_id: Set(student.class_id),
                                enrollment_date: Set(student.enrollment_date),
                            }
                            .insert(txn)
                            .await?;
                        }
                        RoleProfile::Facilitator(facilitator) => {
                            facilitators::ActiveModel {
                                id: Set(Uuid::now_v7()),
                                user_id: Set(user.id),
                                faculty_position: Set(facilitator.faculty_position.clone()),
                                specialization: Set(facilitator.specialization.clone()),
                                office_location: Set(facilitator.office_location.clone()),
                            }
                            .insert(txn)
                            .await?;
                        }
                        RoleProfile::Manager(manager) => {
                            managers::ActiveModel {
                                id: Set(Uuid::now_v7()),
                                user_id: Set(user.id),
                                department: Set(manager.department.clone()),
                            }
                            .insert(txn)
                            .await?;
                        }
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                sea_orm::TransactionError::Connection(e)
                | sea_orm::TransactionError::Transaction(e) => {
                    map_db_err(e, "create user with profile")
                }
            })
    }

    async fn update_with_profile(
        &self,
        user: &User,
        profile: &RoleProfile,
    ) -> Result<(), ApiError> {
        let user = user.clone();
        let profile = profile.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        username: Set(user.username.clone()),
                        email: Set(user.email.clone()),
                        password_hash: Set(user.password_hash.clone()),
                        role: Set(user.role.as_str().to_owned()),
                        first_name: Set(user.first_name.clone()),
                        last_name: Set(user.last_name.clone()),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .update(txn)
                    .await?;

                    match profile {
                        RoleProfile::Student(student) => {
                            if let Some(row) = students::Entity::find()
                                .filter(students::Column::UserId.eq(user.id))
                                .one(txn)
                                .await?
                            {
                                let mut am = row.into_active_model();
                                am.student_number = Set(student.student_number.clone());
                                am.class_id = Set(student.class_id);
                                am.enrollment_date = Set(student.enrollment_date);
                                am.update(txn).await?;
                            }
                        }
                        RoleProfile::Facilitator(facilitator) => {
                            if let Some(row) = facilitators::Entity::find()
                                .filter(facilitators::Column::UserId.eq(user.id))
                                .one(txn)
                                .await?
                            {
                                let mut am = row.into_active_model();
                                am.faculty_position = Set(facilitator.faculty_position.clone());
                                am.specialization = Set(facilitator.specialization.clone());
                                am.office_location = Set(facilitator.office_location.clone());
                                am.update(txn).await?;
                            }
                        }
                        RoleProfile::Manager(manager) => {
                            if let Some(row) = managers::Entity::find()
                                .filter(managers::Column::UserId.eq(user.id))
                                .one(txn)
                                .await?
                            {
                                let mut am = row.into_active_model();
                                am.department = Set(manager.department.clone());
                                am.update(txn).await?;
                            }
                        }
                    }
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                sea_orm::TransactionError::Connection(e)
                | sea_orm::TransactionError::Transaction(e) => {
                    map_db_err(e, "update user with profile")
                }
            })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete user"))?;
        Ok(result.rows_affected > 0)
    }

    async fn set_student_class(
        &self,
        user_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let Some(row) = students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find student profile for class assignment")?
        else {
            return Ok(false);
        };
        let mut am = row.into_active_model();
        am.class_id = Set(class_id);
        am.update(&self.db)
            .await
            .context("assign student class")?;
        Ok(true)
    }
}

// ── Cohort repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCohortRepository {
    pub db: DatabaseConnection,
}

fn cohort_from_model(model: cohorts::Model) -> Result<Cohort, ApiError> {
    Ok(Cohort {
        id: model.id,
        name: model.name,
        start_date: model.start_date,
        end_date: model.end_date,
        status: CohortStatus::from_str(&model.status)
            .ok_or_else(|| invalid_enum("cohort status", &model.status))?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl CohortRepository for DbCohortRepository {
    async fn create(&self, cohort: &Cohort) -> Result<(), ApiError> {
        cohorts::ActiveModel {
            id: Set(cohort.id),
            name: Set(cohort.name.clone()),
            start_date: Set(cohort.start_date),
            end_date: Set(cohort.end_date),
            status: Set(cohort.status.as_str().to_owned()),
            created_at: Set(cohort.created_at),
            updated_at: Set(cohort.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create cohort"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cohort>, ApiError> {
        let model = cohorts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find cohort by id")?;
        model.map(cohort_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<Cohort>, ApiError> {
        let models = cohorts::Entity::find()
            .order_by_desc(cohorts::Column::StartDate)
            .all(&self.db)
            .await
            .context("list cohorts")?;
        models.into_iter().map(cohort_from_model).collect()
    }

    async fn update(&self, cohort: &Cohort) -> Result<(), ApiError> {
        cohorts::ActiveModel {
            id: Set(cohort.id),
            name: Set(cohort.name.clone()),
            start_date: Set(cohort.start_date),
            end_date: Set(cohort.end_date),
            status: Set(cohort.status.as_str().to_owned()),
            created_at: Set(cohort.created_at),
            updated_at: Set(cohort.updated_at),
        }
        .update(&self.db)
        .await
        .map_err(|e| map_db_err(e, "update cohort"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = cohorts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete cohort"))?;
        Ok(result.rows_affected > 0)
    }

    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let mut query = cohorts::Entity::find().filter(cohorts::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(cohorts::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count cohort names")?;
        Ok(count > 0)
    }
}

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassRepository {
    pub db: DatabaseConnection,
}

fn class_from_model(model: classes::Model) -> Result<Class, ApiError> {
    Ok(Class {
        id: model.id,
        name: model.name,
        code: model.code,
        trimester: model.trimester,
        intake_period: IntakePeriod::from_str(&model.intake_period)
            .ok_or_else(|| invalid_enum("intake period", &model.intake_period))?,
        mode: ClassMode::from_str(&model.mode)
            .ok_or_else(|| invalid_enum("class mode", &model.mode))?,
        cohort_id: model.cohort_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn class_detail(
    class: classes::Model,
    cohort: Option<cohorts::Model>,
) -> Result<ClassDetail, ApiError> {
    let cohort = cohort.ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("class {} has no cohort row", class.id))
    })?;
    Ok(ClassDetail {
        class: class_from_model(class)?,
        cohort: EntityRef {
            id: cohort.id,
            name: cohort.name,
        },
    })
}

impl ClassRepository for DbClassRepository {
    async fn create(&self, class: &Class) -> Result<(), ApiError> {
        classes::ActiveModel {
            id: Set(class.id),
            name: Set(class.name.clone()),
            code: Set(class.code.clone()),
            trimester: Set(class.trimester.clone()),
            intake_period: Set(class.intake_period.as_str().to_owned()),
            mode: Set(class.mode.as_str().to_owned()),
            cohort_id: Set(class.cohort_id),
            created_at: Set(class.created_at),
            updated_at: Set(class.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create class"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>, ApiError> {
        let model = classes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find class by id")?;
        model.map(class_from_model).transpose()
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<ClassDetail>, ApiError> {
        let row = classes::Entity::find_by_id(id)
            .find_also_related(cohorts::Entity)
            .one(&self.db)
            .await
            .context("find class with cohort")?;
        row.map(|(class, cohort)| class_detail(class, cohort))
            .transpose()
    }

    async fn list(
        &self,
        filter: ClassFilter,
        page: PageRequest,
    ) -> Result<(u64, Vec<ClassDetail>), ApiError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = classes::Entity::find();
        if let Some(cohort_id) = filter.cohort_id {
            query = query.filter(classes::Column::CohortId.eq(cohort_id));
        }
        if let Some(intake_period) = filter.intake_period {
            query = query.filter(classes::Column::IntakePeriod.eq(intake_period.as_str()));
        }
        if let Some(mode) = filter.mode {
            query = query.filter(classes::Column::Mode.eq(mode.as_str()));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count classes")?;

        let rows = query
            .find_also_related(cohorts::Entity)
            .order_by_desc(classes::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list classes")?;

        let details = rows
            .into_iter()
            .map(|(class, cohort)| class_detail(class, cohort))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((total, details))
    }

    async fn update(&self, class: &Class) -> Result<(), ApiError> {
        classes::ActiveModel {
            id: Set(class.id),
            name: Set(class.name.clone()),
            code: Set(class.code.clone()),
            trimester: Set(class.trimester.clone()),
            intake_period: Set(class.intake_period.as_str().to_owned()),
            mode: Set(class.mode.as_str().to_owned()),
            cohort_id: Set(class.cohort_id),
            created_at: Set(class.created_at),
            updated_at: Set(class.updated_at),
        }
        .update(&self.db)
        .await
        .map_err(|e| map_db_err(e, "update class"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = classes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete class"))?;
        Ok(result.rows_affected > 0)
    }

    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let mut query = classes::Entity::find().filter(classes::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(classes::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count class codes")?;
        Ok(count > 0)
    }

    async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let mut query = classes::Entity::find().filter(classes::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(classes::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count class names")?;
        Ok(count > 0)
    }

    async fn has_enrolled_students(&self, class_id: Uuid) -> Result<bool, ApiError> {
        let count = students::Entity::find()
            .filter(students::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .context("count class enrollments")?;
        Ok(count > 0)
    }

    async fn has_offerings(&self, class_id: Uuid) -> Result<bool, ApiError> {
        let count = course_offerings::Entity::find()
            .filter(course_offerings::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .context("count class offerings")?;
        Ok(count > 0)
    }
}

// ── Module repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbModuleRepository {
    pub db: DatabaseConnection,
}

fn module_from_model(model: modules::Model) -> Module {
    Module {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        credits: model.credits,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl ModuleRepository for DbModuleRepository {
    async fn create(&self, module: &Module) -> Result<(), ApiError> {
        modules::ActiveModel {
            id: Set(module.id),
            code: Set(module.code.clone()),
            name: Set(module.name.clone()),
            description: Set(module.description.clone()),
            credits: Set(module.credits),
            is_active: Set(module.is_active),
            created_at: Set(module.created_at),
            updated_at: Set(module.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create module"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Module>, ApiError> {
        let model = modules::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find module by id")?;
        Ok(model.map(module_from_model))
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<Module>, ApiError> {
        let mut query = modules::Entity::find().order_by_asc(modules::Column::Code);
        if let Some(active) = active {
            query = query.filter(modules::Column::IsActive.eq(active));
        }
        let models = query.all(&self.db).await.context("list modules")?;
        Ok(models.into_iter().map(module_from_model).collect())
    }

    async fn update(&self, module: &Module) -> Result<(), ApiError> {
        modules::ActiveModel {
            id: Set(module.id),
            code: Set(module.code.clone()),
            name: Set(module.name.clone()),
            description: Set(module.description.clone()),
            credits: Set(module.credits),
            is_active: Set(module.is_active),
            created_at: Set(module.created_at),
            updated_at: Set(module.updated_at),
        }
        .update(&self.db)
        .await
        .map_err(|e| map_db_err(e, "update module"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = modules::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete module"))?;
        Ok(result.rows_affected > 0)
    }

    async fn code_exists(&self, code: &str, exclude: Option<Uuid>) -> Result<bool, ApiError> {
        let mut query = modules::Entity::find().filter(modules::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(modules::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count module codes")?;
        Ok(count > 0)
    }

    async fn has_offerings(&self, module_id: Uuid) -> Result<bool, ApiError> {
        let count = course_offerings::Entity::find()
            .filter(course_offerings::Column::ModuleId.eq(module_id))
            .count(&self.db)
            .await
            .context("count module offerings")?;
        Ok(count > 0)
    }
}

// ── Offering repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOfferingRepository {
    pub db: DatabaseConnection,
}

fn offering_from_model(model: course_offerings::Model) -> Result<Offering, ApiError> {
    Ok(Offering {
        id: model.id,
        module_id: model.module_id,
        class_id: model.class_id,
        facilitator_id: model.facilitator_id,
        start_date: model.start_date,
        end_date: model.end_date,
        status: OfferingStatus::from_str(&model.status)
            .ok_or_else(|| invalid_enum("offering status", &model.status))?,
        capacity: model.capacity,
        current_enrollment: model.current_enrollment,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl DbOfferingRepository {
    /// Resolve whitelisted refs for a batch of offerings in three queries.
    async fn attach_refs(
        &self,
        offerings: Vec<Offering>,
    ) -> Result<Vec<OfferingDetail>, ApiError> {
        let module_ids: Vec<Uuid> = offerings.iter().map(|o| o.module_id).collect();
        let class_ids: Vec<Uuid> = offerings.iter().map(|o| o.class_id).collect();
        let facilitator_ids: Vec<Uuid> = offerings.iter().map(|o| o.facilitator_id).collect();

        let module_names: HashMap<Uuid, String> = modules::Entity::find()
            .filter(modules::Column::Id.is_in(module_ids))
            .all(&self.db)
            .await
            .context("load offering modules")?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();
        let class_names: HashMap<Uuid, String> = classes::Entity::find()
            .filter(classes::Column::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .context("load offering classes")?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();
        let facilitator_names: HashMap<Uuid, (String, String)> = users::Entity::find()
            .filter(users::Column::Id.is_in(facilitator_ids))
            .all(&self.db)
            .await
            .context("load offering facilitators")?
            .into_iter()
            .map(|m| (m.id, (m.first_name, m.last_name)))
            .collect();

        offerings
            .into_iter()
            .map(|offering| {
                let module_name = module_names.get(&offering.module_id).cloned();
                let class_name = class_names.get(&offering.class_id).cloned();
                let facilitator = facilitator_names.get(&offering.facilitator_id).cloned();
                match (module_name, class_name, facilitator) {
                    (Some(module_name), Some(class_name), Some((first_name, last_name))) => {
                        Ok(OfferingDetail {
                            module: EntityRef {
                                id: offering.module_id,
                                name: module_name,
                            },
                            class: EntityRef {
                                id: offering.class_id,
                                name: class_name,
                            },
                            facilitator: PersonRef {
                                id: offering.facilitator_id,
                                first_name,
                                last_name,
                            },
                            offering,
                        })
                    }
                    _ => Err(ApiError::Internal(anyhow::anyhow!(
                        "offering {} has a dangling reference",
                        offering.id
                    ))),
                }
            })
            .collect()
    }
}

impl OfferingRepository for DbOfferingRepository {
    async fn create(&self, offering: &Offering) -> Result<(), ApiError> {
        course_offerings::ActiveModel {
            id: Set(offering.id),
            module_id: Set(offering.module_id),
            class_id: Set(offering.class_id),
            facilitator_id: Set(offering.facilitator_id),
            start_date: Set(offering.start_date),
            end_date: Set(offering.end_date),
            status: Set(offering.status.as_str().to_owned()),
            capacity: Set(offering.capacity),
            current_enrollment: Set(offering.current_enrollment),
            created_at: Set(offering.created_at),
            updated_at: Set(offering.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create course offering"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offering>, ApiError> {
        let model = course_offerings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course offering by id")?;
        model.map(offering_from_model).transpose()
    }

    async fn find_detail(&self, id: Uuid) -> Result<Option<OfferingDetail>, ApiError> {
        let Some(offering) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut details = self.attach_refs(vec![offering]).await?;
        Ok(details.pop())
    }

    async fn list(&self, status: Option<OfferingStatus>) -> Result<Vec<OfferingDetail>, ApiError> {
        let mut query =
            course_offerings::Entity::find().order_by_desc(course_offerings::Column::StartDate);
        if let Some(status) = status {
            query = query.filter(course_offerings::Column::Status.eq(status.as_str()));
        }
        let models = query.all(&self.db).await.context("list course offerings")?;
        let offerings = models
            .into_iter()
            .map(offering_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_refs(offerings).await
    }

    async fn update(&self, offering: &Offering) -> Result<(), ApiError> {
        course_offerings::ActiveModel {
            id: Set(offering.id),
            module_id: Set(offering.module_id),
            class_id: Set(offering.class_id),
            facilitator_id: Set(offering.facilitator_id),
            start_date: Set(offering.start_date),
            end_date: Set(offering.end_date),
            status: Set(offering.status.as_str().to_owned()),
            capacity: Set(offering.capacity),
            current_enrollment: Set(offering.current_enrollment),
            created_at: Set(offering.created_at),
            updated_at: Set(offering.updated_at),
        }
        .update(&self.db)
        .await
        .map_err(|e| map_db_err(e, "update course offering"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = course_offerings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete course offering"))?;
        Ok(result.rows_affected > 0)
    }
}

// ── Activity-log repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivityLogRepository {
    pub db: DatabaseConnection,
}

fn activity_log_from_model(model: activity_logs::Model) -> Result<ActivityLog, ApiError> {
    Ok(ActivityLog {
        id: model.id,
        offering_id: model.offering_id,
        week_number: model.week_number,
        attendance: model.attendance,
        formative_one_grading: parse_task_status(
            "formative_one_grading",
            &model.formative_one_grading,
        )?,
        formative_two_grading: parse_task_status(
            "formative_two_grading",
            &model.formative_two_grading,
        )?,
        summative_grading: parse_task_status("summative_grading", &model.summative_grading)?,
        course_moderation: parse_task_status("course_moderation", &model.course_moderation)?,
        intranet_sync: parse_task_status("intranet_sync", &model.intranet_sync)?,
        gradebook_status: parse_task_status("gradebook_status", &model.gradebook_status)?,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn activity_log_active_model(log: &ActivityLog) -> activity_logs::ActiveModel {
    activity_logs::ActiveModel {
        id: Set(log.id),
        offering_id: Set(log.offering_id),
        week_number: Set(log.week_number),
        attendance: Set(log.attendance.clone()),
        formative_one_grading: Set(log.formative_one_grading.as_str().to_owned()),
        formative_two_grading: Set(log.formative_two_grading.as_str().to_owned()),
        summative_grading: Set(log.summative_grading.as_str().to_owned()),
        course_moderation: Set(log.course_moderation.as_str().to_owned()),
        intranet_sync: Set(log.intranet_sync.as_str().to_owned()),
        gradebook_status: Set(log.gradebook_status.as_str().to_owned()),
        notes: Set(log.notes.clone()),
        created_at: Set(log.created_at),
        updated_at: Set(log.updated_at),
    }
}

impl ActivityLogRepository for DbActivityLogRepository {
    async fn create(&self, log: &ActivityLog) -> Result<(), ApiError> {
        activity_log_active_model(log)
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, "create activity log"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ActivityLog>, ApiError> {
        let model = activity_logs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find activity log by id")?;
        model.map(activity_log_from_model).transpose()
    }

    async fn list(&self, week_number: Option<i32>) -> Result<Vec<ActivityLog>, ApiError> {
        let mut query =
            activity_logs::Entity::find().order_by_asc(activity_logs::Column::WeekNumber);
        if let Some(week) = week_number {
            query = query.filter(activity_logs::Column::WeekNumber.eq(week));
        }
        let models = query.all(&self.db).await.context("list activity logs")?;
        models.into_iter().map(activity_log_from_model).collect()
    }

    async fn update(&self, log: &ActivityLog) -> Result<(), ApiError> {
        activity_log_active_model(log)
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(e, "update activity log"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = activity_logs::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete activity log"))?;
        Ok(result.rows_affected > 0)
    }

    async fn facilitator_has_log_for_week(
        &self,
        facilitator_id: Uuid,
        week_number: i32,
    ) -> Result<bool, ApiError> {
        let count = activity_logs::Entity::find()
            .inner_join(course_offerings::Entity)
            .filter(activity_logs::Column::WeekNumber.eq(week_number))
            .filter(course_offerings::Column::FacilitatorId.eq(facilitator_id))
            .count(&self.db)
            .await
            .context("count facilitator logs for week")?;
        Ok(count > 0)
    }
}

// ── Grade repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGradeRepository {
    pub db: DatabaseConnection,
}

fn grade_from_model(model: grades::Model) -> Result<Grade, ApiError> {
    Ok(Grade {
        id: model.id,
        student_id: model.student_id,
        offering_id: model.offering_id,
        formative_one: model.formative_one,
        formative_two: model.formative_two,
        summative: model.summative,
        final_grade: model.final_grade,
        grade_status: GradeStatus::from_str(&model.grade_status)
            .ok_or_else(|| invalid_enum("grade status", &model.grade_status))?,
        feedback: model.feedback,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn grade_active_model(grade: &Grade) -> grades::ActiveModel {
    grades::ActiveModel {
        id: Set(grade.id),
        student_id: Set(grade.student_id),
        offering_id: Set(grade.offering_id),
        formative_one: Set(grade.formative_one),
        formative_two: Set(grade.formative_two),
        summative: Set(grade.summative),
        final_grade: Set(grade.final_grade),
        grade_status: Set(grade.grade_status.as_str().to_owned()),
        feedback: Set(grade.feedback.clone()),
        created_at: Set(grade.created_at),
        updated_at: Set(grade.updated_at),
    }
}

impl GradeRepository for DbGradeRepository {
    async fn create(&self, grade: &Grade) -> Result<(), ApiError> {
        grade_active_model(grade)
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, "create grade"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Grade>, ApiError> {
        let model = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find grade by id")?;
        model.map(grade_from_model).transpose()
    }

    async fn list(&self, status: Option<GradeStatus>) -> Result<Vec<Grade>, ApiError> {
        let mut query = grades::Entity::find().order_by_desc(grades::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(grades::Column::GradeStatus.eq(status.as_str()));
        }
        let models = query.all(&self.db).await.context("list grades")?;
        models.into_iter().map(grade_from_model).collect()
    }

    async fn update(&self, grade: &Grade) -> Result<(), ApiError> {
        grade_active_model(grade)
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(e, "update grade"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = grades::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, "delete grade"))?;
        Ok(result.rows_affected > 0)
    }
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

fn notification_from_model(model: notifications::Model) -> Result<Notification, ApiError> {
    Ok(Notification {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        message: model.message,
        kind: NotificationKind::from_str(&model.kind)
            .ok_or_else(|| invalid_enum("notification kind", &model.kind))?,
        is_read: model.is_read,
        metadata: model.metadata,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl NotificationRepository for DbNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), ApiError> {
        notifications::ActiveModel {
            id: Set(notification.id),
            user_id: Set(notification.user_id),
            title: Set(notification.title.clone()),
            message: Set(notification.message.clone()),
            kind: Set(notification.kind.as_str().to_owned()),
            is_read: Set(notification.is_read),
            metadata: Set(notification.metadata.clone()),
            created_at: Set(notification.created_at),
            updated_at: Set(notification.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_err(e, "create notification"))?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, ApiError> {
        let models = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list notifications")?;
        models.into_iter().map(notification_from_model).collect()
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, ApiError> {
        use sea_orm::sea_query::Expr;

        let result = notifications::Entity::update_many()
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .col_expr(notifications::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("mark notification read")?;
        Ok(result.rows_affected > 0)
    }
}

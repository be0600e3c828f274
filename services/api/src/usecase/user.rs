use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::repository::{ClassRepository, UserRepository};
use crate::domain::types::{RoleProfile, User};
use crate::error::ApiError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<(User, RoleProfile)>, ApiError> {
        self.repo.list_with_profiles().await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(User, RoleProfile), ApiError> {
        self.repo
            .find_with_profile(id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

/// Partial update. Base fields apply to everyone; profile fields persist
/// only when they belong to the target user's own role, and fields of
/// other roles are silently dropped rather than rejected.
#[derive(Default)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    // student
    pub student_number: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    // facilitator
    pub faculty_position: Option<String>,
    pub specialization: Option<String>,
    pub office_location: Option<String>,
    // manager
    pub department: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<(User, RoleProfile), ApiError> {
        let (mut user, mut profile) = self
            .repo
            .find_with_profile(id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if let Some(ref username) = input.username {
            if self.repo.username_exists(username, Some(id)).await? {
                return Err(ApiError::conflict("username already exists"));
            }
            user.username = username.clone();
        }
        if let Some(ref email) = input.email {
            if self.repo.email_exists(email, Some(id)).await? {
                return Err(ApiError::conflict("email already exists"));
            }
            user.email = email.clone();
        }
        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }

        match &mut profile {
            RoleProfile::Student(student) => {
                if let Some(ref number) = input.student_number {
                    if self.repo.student_number_exists(number, Some(id)).await? {
                        return Err(ApiError::conflict("student number already exists"));
                    }
                    student.student_number = number.clone();
                }
                if input.enrollment_date.is_some() {
                    student.enrollment_date = input.enrollment_date;
                }
            }
            RoleProfile::Facilitator(facilitator) => {
                if input.faculty_position.is_some() {
                    facilitator.faculty_position = input.faculty_position;
                }
                if input.specialization.is_some() {
                    facilitator.specialization = input.specialization;
                }
                if input.office_location.is_some() {
                    facilitator.office_location = input.office_location;
                }
            }
            RoleProfile::Manager(manager) => {
                if input.department.is_some() {
                    manager.department = input.department;
                }
            }
        }

        user.updated_at = Utc::now();
        self.repo.update_with_profile(&user, &profile).await?;
        Ok((user, profile))
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}

// ── AssignStudentClass ───────────────────────────────────────────────────────

pub struct AssignStudentClassUseCase<R: UserRepository, C: ClassRepository> {
    pub users: R,
    pub classes: C,
}

impl<R: UserRepository, C: ClassRepository> AssignStudentClassUseCase<R, C> {
    /// Assign (or clear, with `None`) a student's class.
    pub async fn execute(
        &self,
        user_id: Uuid,
        class_id: Option<Uuid>,
    ) -> Result<(User, RoleProfile), ApiError> {
        if let Some(class_id) = class_id {
            self.classes
                .find_by_id(class_id)
                .await?
                .ok_or(ApiError::ClassNotFound)?;
        }
        if !self.users.set_student_class(user_id, class_id).await? {
            // no such user, or the user is not a student
            return Err(ApiError::UserNotFound);
        }
        self.users
            .find_with_profile(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_domain::class::{ClassMode, IntakePeriod};

    use crate::domain::types::{Class, FacilitatorProfile, StudentProfile};
    use crate::usecase::support::{MemClasses, MemUsers};

    fn seed_user(repo: &MemUsers, username: &str, profile: RoleProfile) -> Uuid {
        let now = Utc::now();
        let id = Uuid::now_v7();
        repo.insert(
            User {
                id,
                username: username.into(),
                email: format!("{username}@example.com"),
                password_hash: "hash".into(),
                role: profile.role(),
                first_name: "First".into(),
                last_name: "Last".into(),
                created_at: now,
                updated_at: now,
            },
            profile,
        );
        id
    }

    fn student_profile(number: &str) -> RoleProfile {
        RoleProfile::Student(StudentProfile {
            student_number: number.into(),
            class_id: None,
            enrollment_date: None,
        })
    }

    #[tokio::test]
    async fn should_update_base_and_own_role_fields() {
        let repo = MemUsers::default();
        let id = seed_user(&repo, "alice", student_profile("S-001"));

        let usecase = UpdateUserUseCase { repo };
        let (user, profile) = usecase
            .execute(
                id,
                UpdateUserInput {
                    first_name: Some("Alicia".into()),
                    student_number: Some("S-002".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.first_name, "Alicia");
        match profile {
            RoleProfile::Student(s) => assert_eq!(s.student_number, "S-002"),
            _ => panic!("expected student profile"),
        }
    }

    #[tokio::test]
    async fn should_silently_drop_fields_of_other_roles() {
        let repo = MemUsers::default();
        let id = seed_user(&repo, "alice", student_profile("S-001"));

        let usecase = UpdateUserUseCase { repo };
        let (_, profile) = usecase
            .execute(
                id,
                UpdateUserInput {
                    faculty_position: Some("Lecturer".into()),
                    department: Some("Ops".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // the student profile is untouched; no error is raised either
        match profile {
            RoleProfile::Student(s) => assert_eq!(s.student_number, "S-001"),
            _ => panic!("expected student profile"),
        }
    }

    #[tokio::test]
    async fn should_reject_username_taken_by_someone_else() {
        let repo = MemUsers::default();
        seed_user(&repo, "alice", student_profile("S-001"));
        let bob = seed_user(&repo, "bob", student_profile("S-002"));

        let usecase = UpdateUserUseCase { repo };
        let err = usecase
            .execute(
                bob,
                UpdateUserInput {
                    username: Some("alice".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn should_allow_keeping_own_username_on_update() {
        let repo = MemUsers::default();
        let id = seed_user(&repo, "alice", student_profile("S-001"));

        let usecase = UpdateUserUseCase { repo };
        let result = usecase
            .execute(
                id,
                UpdateUserInput {
                    username: Some("alice".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_user() {
        let usecase = GetUserUseCase {
            repo: MemUsers::default(),
        };
        let err = usecase.execute(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }

    #[tokio::test]
    async fn should_delete_existing_user() {
        let repo = MemUsers::default();
        let id = seed_user(&repo, "alice", student_profile("S-001"));

        let usecase = DeleteUserUseCase { repo: repo.clone() };
        usecase.execute(id).await.unwrap();
        assert_eq!(repo.len(), 0);

        let err = usecase.execute(id).await.unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }

    #[tokio::test]
    async fn should_assign_student_to_existing_class() {
        let users = MemUsers::default();
        let classes = MemClasses::default();
        let student = seed_user(&users, "alice", student_profile("S-001"));

        let class_id = Uuid::now_v7();
        let now = Utc::now();
        classes.insert(Class {
            id: class_id,
            name: "2026J".into(),
            code: "C-01".into(),
            trimester: "T1".into(),
            intake_period: IntakePeriod::Ht1,
            mode: ClassMode::Online,
            cohort_id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
        });

        let usecase = AssignStudentClassUseCase { users, classes };
        let (_, profile) = usecase.execute(student, Some(class_id)).await.unwrap();
        match profile {
            RoleProfile::Student(s) => assert_eq!(s.class_id, Some(class_id)),
            _ => panic!("expected student profile"),
        }
    }

    #[tokio::test]
    async fn should_reject_assignment_to_missing_class() {
        let users = MemUsers::default();
        let student = seed_user(&users, "alice", student_profile("S-001"));

        let usecase = AssignStudentClassUseCase {
            users,
            classes: MemClasses::default(),
        };
        let err = usecase
            .execute(student, Some(Uuid::now_v7()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ClassNotFound));
    }

    #[tokio::test]
    async fn should_reject_class_assignment_for_non_students() {
        let users = MemUsers::default();
        let facilitator = seed_user(
            &users,
            "frank",
            RoleProfile::Facilitator(FacilitatorProfile::default()),
        );

        let usecase = AssignStudentClassUseCase {
            users,
            classes: MemClasses::default(),
        };
        let err = usecase.execute(facilitator, None).await.unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }
}

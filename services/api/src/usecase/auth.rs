use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use campus_auth_types::token::issue_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::{RoleProfile, User};
use crate::error::ApiError;

/// Hash a password with Argon2id, PHC string format.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a password against a stored PHC hash. Unparseable hashes count
/// as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Role-specific profile; its variant decides the identity's role.
    pub profile: RoleProfile,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    /// Create an identity and its role profile in one transaction.
    ///
    /// The uniqueness pre-checks give friendly errors on the fast path;
    /// the database unique constraints stay authoritative under races.
    pub async fn execute(
        &self,
        input: RegisterUserInput,
    ) -> Result<(User, RoleProfile), ApiError> {
        if self.repo.username_exists(&input.username, None).await? {
            return Err(ApiError::conflict("username already exists"));
        }
        if self.repo.email_exists(&input.email, None).await? {
            return Err(ApiError::conflict("email already exists"));
        }
        if let RoleProfile::Student(student) = &input.profile {
            if self
                .repo
                .student_number_exists(&student.student_number, None)
                .await?
            {
                return Err(ApiError::conflict("student number already exists"));
            }
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role: input.profile.role(),
            first_name: input.first_name,
            last_name: input.last_name,
            created_at: now,
            updated_at: now,
        };
        self.repo.create_with_profile(&user, &input.profile).await?;
        Ok((user, input.profile))
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub token_exp: u64,
    pub user: User,
    pub profile: RoleProfile,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Verify credentials and issue a session token.
    ///
    /// Wrong username and wrong password are indistinguishable to the
    /// caller: both fail with 401.
    pub async fn execute(&self, username: &str, password: &str) -> Result<LoginOutput, ApiError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::Unauthenticated)?;

        if !verify_password(password, &user.password_hash) {
            return Err(ApiError::Unauthenticated);
        }

        let (user, profile) = self
            .repo
            .find_with_profile(user.id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("identity without role profile")))?;

        let (token, token_exp) = issue_token(user.id, user.role, &self.jwt_secret)
            .map_err(|e| ApiError::Internal(e.into()))?;

        Ok(LoginOutput {
            token,
            token_exp,
            user,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_domain::role::Role;

    use crate::domain::types::StudentProfile;
    use crate::usecase::support::MemUsers;

    fn student_input(username: &str, email: &str, student_number: &str) -> RegisterUserInput {
        RegisterUserInput {
            username: username.into(),
            email: email.into(),
            password: "pw123456".into(),
            first_name: "Alice".into(),
            last_name: "Doe".into(),
            profile: RoleProfile::Student(StudentProfile {
                student_number: student_number.into(),
                class_id: None,
                enrollment_date: None,
            }),
        }
    }

    #[test]
    fn should_verify_hashed_password() {
        let hash = hash_password("pw123456").unwrap();
        assert!(verify_password("pw123456", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("pw123456", "not-a-phc-hash"));
    }

    #[tokio::test]
    async fn should_register_student_with_profile() {
        let usecase = RegisterUserUseCase {
            repo: MemUsers::default(),
        };
        let (user, profile) = usecase
            .execute(student_input("alice", "alice@x.com", "S-001"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Student);
        assert!(matches!(profile, RoleProfile::Student(_)));
        assert_ne!(user.password_hash, "pw123456");
    }

    #[tokio::test]
    async fn should_reject_duplicate_username() {
        let repo = MemUsers::default();
        let usecase = RegisterUserUseCase { repo };
        usecase
            .execute(student_input("alice", "alice@x.com", "S-001"))
            .await
            .unwrap();

        let err = usecase
            .execute(student_input("alice", "other@x.com", "S-002"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
        // the first registration is unaffected
        assert_eq!(usecase.repo.len(), 1);
    }

    #[tokio::test]
    async fn should_reject_duplicate_email() {
        let usecase = RegisterUserUseCase {
            repo: MemUsers::default(),
        };
        usecase
            .execute(student_input("alice", "alice@x.com", "S-001"))
            .await
            .unwrap();

        let err = usecase
            .execute(student_input("bob", "alice@x.com", "S-002"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn should_login_with_correct_password() {
        let repo = MemUsers::default();
        RegisterUserUseCase { repo: repo.clone() }
            .execute(student_input("alice", "alice@x.com", "S-001"))
            .await
            .unwrap();

        let usecase = LoginUseCase {
            repo,
            jwt_secret: "secret".into(),
        };
        let out = usecase.execute("alice", "pw123456").await.unwrap();
        assert_eq!(out.user.username, "alice");
        assert!(matches!(out.profile, RoleProfile::Student(_)));
        assert!(!out.token.is_empty());
    }

    #[tokio::test]
    async fn should_reject_wrong_password_with_401() {
        let repo = MemUsers::default();
        RegisterUserUseCase { repo: repo.clone() }
            .execute(student_input("alice", "alice@x.com", "S-001"))
            .await
            .unwrap();

        let usecase = LoginUseCase {
            repo,
            jwt_secret: "secret".into(),
        };
        let err = usecase.execute("alice", "nope").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn should_reject_unknown_username_with_401() {
        let usecase = LoginUseCase {
            repo: MemUsers::default(),
            jwt_secret: "secret".into(),
        };
        let err = usecase.execute("ghost", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}

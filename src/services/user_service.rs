//! User service - account lifecycle and progression grants.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::GUEST_USERNAME_PREFIX;
use crate::domain::{apply_xp, LevelMode, UpdateProfile, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
///
/// Lookups return `Option`: absence of a user is a normal outcome the
/// caller decides how to handle, not an error of this layer.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Guest login: create a user, or return the existing one when the
    /// username is already taken. Generates a guest username when none
    /// is provided.
    async fn login_or_create(&self, username: Option<String>) -> AppResult<User>;

    /// Create a user with a unique username (level 1, 0 points)
    async fn create_user(&self, username: &str) -> AppResult<User>;

    /// Get a user by id
    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;

    /// Get a user by exact username
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users ordered by creation id
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Replace username and optional profile fields in one update
    async fn update_profile(&self, id: i64, profile: UpdateProfile) -> AppResult<User>;

    /// Grant XP from an external source (bonus games).
    ///
    /// `LevelMode::Recompute` re-derives the level from the new total;
    /// `LevelMode::Preserve` keeps the stored level and only moves
    /// points. Both call sites in the HTTP surface exist, with different
    /// modes.
    async fn add_external_xp(&self, id: i64, amount: i64, mode: LevelMode) -> AppResult<User>;

    /// Delete a user; visits and reviews are removed by cascade.
    /// Idempotent: deleting an unknown id succeeds.
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Generate a guest username that is effectively unique.
fn generate_guest_username() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", GUEST_USERNAME_PREFIX, &suffix[..12])
}

/// Concrete implementation of `UserService` over the Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn login_or_create(&self, username: Option<String>) -> AppResult<User> {
        let username = username
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(generate_guest_username);

        match self.create_user(&username).await {
            Ok(user) => Ok(user),
            // Documented tolerance: a taken username on login means the
            // account already exists, so return it instead of failing.
            Err(AppError::DuplicateUsername) => self
                .uow
                .users()
                .find_by_username(&username)
                .await?
                .ok_or_else(|| AppError::internal("existing user vanished during login")),
            Err(e) => Err(e),
        }
    }

    async fn create_user(&self, username: &str) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("username must not be empty"));
        }
        self.uow.users().insert(username).await
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.uow.users().find_by_username(username).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn update_profile(&self, id: i64, mut profile: UpdateProfile) -> AppResult<User> {
        profile.username = profile.username.trim().to_owned();
        if profile.username.is_empty() {
            return Err(AppError::validation("username must not be empty"));
        }

        self.uow
            .users()
            .update_profile(id, profile)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn add_external_xp(&self, id: i64, amount: i64, mode: LevelMode) -> AppResult<User> {
        if amount < 0 {
            return Err(AppError::validation("xp amount must not be negative"));
        }

        // Read-modify-write on the shared connection; last write wins,
        // matching the original external-XP behavior.
        let user = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let progress = apply_xp(user.points, amount);
        let level = match mode {
            LevelMode::Recompute => progress.level,
            LevelMode::Preserve => user.level,
        };

        self.uow
            .users()
            .update_progress(id, progress.points, level)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        // Rows affected intentionally ignored: deleting an absent user
        // is a success at this layer.
        self.uow.users().delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MockReviewRepository, MockUserRepository, MockVisitRepository, ReviewRepository,
        TransactionContext, UserRepository, VisitRepository,
    };
    use mockall::predicate::eq;

    fn test_user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            level: 1,
            points: 0,
            email: None,
            bio: None,
            profile_pic: None,
        }
    }

    /// Unit-of-work stub wrapping mock repositories.
    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
    }

    impl TestUnitOfWork {
        fn new(users: MockUserRepository) -> Self {
            Self {
                users: Arc::new(users),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn visits(&self) -> Arc<dyn VisitRepository> {
            Arc::new(MockVisitRepository::new())
        }

        fn reviews(&self) -> Arc<dyn ReviewRepository> {
            Arc::new(MockReviewRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("transactions not supported in test stub"))
        }
    }

    #[tokio::test]
    async fn create_user_rejects_blank_username() {
        let repo = MockUserRepository::new();
        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));

        let result = service.create_user("   ").await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_user_trims_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .with(eq("wanderer"))
            .returning(|name| Ok(test_user(1, name)));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let user = service.create_user("  wanderer  ").await.unwrap();
        assert_eq!(user.username, "wanderer");
    }

    #[tokio::test]
    async fn login_returns_existing_user_on_collision() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::DuplicateUsername));
        repo.expect_find_by_username()
            .with(eq("wanderer"))
            .returning(|name| Ok(Some(test_user(7, name))));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let user = service
            .login_or_create(Some("wanderer".to_string()))
            .await
            .unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn login_generates_guest_username_when_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|name| name.starts_with(GUEST_USERNAME_PREFIX))
            .returning(|name| Ok(test_user(3, name)));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let user = service.login_or_create(None).await.unwrap();
        assert!(user.username.starts_with(GUEST_USERNAME_PREFIX));
    }

    #[tokio::test]
    async fn external_xp_preserve_keeps_level() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(1)).returning(|id| {
            let mut user = test_user(id, "wanderer");
            user.points = 200;
            user.level = 1;
            Ok(Some(user))
        });
        repo.expect_update_progress()
            .with(eq(1), eq(300), eq(1))
            .returning(|id, points, level| {
                let mut user = test_user(id, "wanderer");
                user.points = points;
                user.level = level;
                Ok(Some(user))
            });

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let user = service
            .add_external_xp(1, 100, LevelMode::Preserve)
            .await
            .unwrap();
        assert_eq!(user.points, 300);
        assert_eq!(user.level, 1);
    }

    #[tokio::test]
    async fn external_xp_recompute_rederives_level() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(1)).returning(|id| {
            let mut user = test_user(id, "wanderer");
            user.points = 200;
            Ok(Some(user))
        });
        repo.expect_update_progress()
            .with(eq(1), eq(300), eq(2))
            .returning(|id, points, level| {
                let mut user = test_user(id, "wanderer");
                user.points = points;
                user.level = level;
                Ok(Some(user))
            });

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let user = service
            .add_external_xp(1, 100, LevelMode::Recompute)
            .await
            .unwrap();
        assert_eq!(user.level, 2);
    }

    #[tokio::test]
    async fn external_xp_rejects_negative_amount() {
        let repo = MockUserRepository::new();
        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));

        let result = service.add_external_xp(1, -5, LevelMode::Recompute).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_user_is_idempotent() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(42)).returning(|_| Ok(0));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        assert!(service.delete_user(42).await.is_ok());
    }

    #[tokio::test]
    async fn update_profile_maps_missing_user_to_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_profile().returning(|_, _| Ok(None));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let result = service
            .update_profile(
                9,
                UpdateProfile {
                    username: "ghost".to_string(),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }
}

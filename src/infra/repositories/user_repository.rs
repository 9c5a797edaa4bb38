//! User repository - persistence operations for users.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use super::entities::user::{ActiveModel, Column, Entity as UserEntity};
use crate::domain::{UpdateProfile, User};
use crate::errors::{AppError, AppResult};

/// Map a unique-constraint violation on the username to its own error
/// kind so the API layer can answer with a conflict status.
pub(crate) fn map_unique_violation(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateUsername,
        _ => AppError::Database(e),
    }
}

/// User persistence operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with default progression state
    async fn insert(&self, username: &str) -> AppResult<User>;

    /// Find a user by id; absence is a normal outcome
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users ordered by id ascending
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Replace all four profile fields in one update; `None` when the id
    /// is unknown
    async fn update_profile(&self, id: i64, profile: UpdateProfile) -> AppResult<Option<User>>;

    /// Persist a new points/level pair; `None` when the id is unknown
    async fn update_progress(&self, id: i64, points: i64, level: i32) -> AppResult<Option<User>>;

    /// Delete a user, returning the number of rows removed
    async fn delete(&self, id: i64) -> AppResult<u64>;

    /// Top users by points desc, level desc, id asc
    async fn top_by_points(&self, limit: u64) -> AppResult<Vec<User>>;
}

/// SeaORM-backed implementation of `UserRepository`.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, username: &str) -> AppResult<User> {
        let active = ActiveModel {
            username: Set(username.to_owned()),
            level: Set(1),
            points: Set(0),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(map_unique_violation)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn update_profile(&self, id: i64, profile: UpdateProfile) -> AppResult<Option<User>> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.username = Set(profile.username);
        active.email = Set(profile.email);
        active.bio = Set(profile.bio);
        active.profile_pic = Set(profile.profile_pic);

        let model = active.update(&self.db).await.map_err(map_unique_violation)?;
        Ok(Some(model.into()))
    }

    async fn update_progress(&self, id: i64, points: i64, level: i32) -> AppResult<Option<User>> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.points = Set(points);
        active.level = Set(level);

        let model = active.update(&self.db).await?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i64) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn top_by_points(&self, limit: u64) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_desc(Column::Points)
            .order_by_desc(Column::Level)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }
}

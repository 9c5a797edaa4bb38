//! Visit repository - persistence operations for visits.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::visit::{ActiveModel, Column, Entity as VisitEntity};
use crate::domain::Visit;
use crate::errors::AppResult;

/// Visit persistence operations. Visits are append-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Insert a visit stamped with the current time
    async fn insert(&self, user_id: i64, location: &str) -> AppResult<Visit>;

    /// Visits for a user, newest first (visited_at desc, id desc)
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Visit>>;

    /// Number of visits recorded by a user
    async fn count_for_user(&self, user_id: i64) -> AppResult<u64>;
}

/// SeaORM-backed implementation of `VisitRepository`.
pub struct VisitStore {
    db: DatabaseConnection,
}

impl VisitStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VisitRepository for VisitStore {
    async fn insert(&self, user_id: i64, location: &str) -> AppResult<Visit> {
        let active = ActiveModel {
            user_id: Set(user_id),
            location: Set(location.to_owned()),
            visited_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Visit>> {
        let models = VisitEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::VisitedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Visit::from).collect())
    }

    async fn count_for_user(&self, user_id: i64) -> AppResult<u64> {
        let count = VisitEntity::find()
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

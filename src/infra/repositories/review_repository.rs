//! Review repository - persistence operations for reviews.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::review::{ActiveModel, Column, Entity as ReviewEntity};
use crate::domain::Review;
use crate::errors::AppResult;

/// Review persistence operations. Reviews are append-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review stamped with the current time
    async fn insert(
        &self,
        user_id: i64,
        location: &str,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review>;

    /// Reviews for a location (case-insensitive exact match), newest first
    async fn list_for_location(&self, location: &str) -> AppResult<Vec<Review>>;

    /// Most recent reviews across all locations
    async fn recent(&self, limit: u64) -> AppResult<Vec<Review>>;

    /// Average rating given by a user; `None` when they have no reviews
    async fn average_rating_for_user(&self, user_id: i64) -> AppResult<Option<f64>>;
}

/// SeaORM-backed implementation of `ReviewRepository`.
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn insert(
        &self,
        user_id: i64,
        location: &str,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review> {
        let active = ActiveModel {
            user_id: Set(user_id),
            location: Set(location.to_owned()),
            rating: Set(rating),
            comment: Set(comment),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn list_for_location(&self, location: &str) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(Column::Location)))
                    .eq(location.trim().to_lowercase()),
            )
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn average_rating_for_user(&self, user_id: i64) -> AppResult<Option<f64>> {
        let avg_expr: SimpleExpr = Func::avg(Expr::col(Column::Rating)).into();
        let avg: Option<Option<f64>> = ReviewEntity::find()
            .select_only()
            .column_as(avg_expr, "avg_rating")
            .filter(Column::UserId.eq(user_id))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(avg.flatten())
    }
}

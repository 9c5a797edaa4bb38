//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages the one transactional
//! boundary in the system: recording a visit together with its XP
//! credit. Everything else is a single-statement operation on the
//! shared connection.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

use super::repositories::{
    ReviewRepository, ReviewStore, UserRepository, UserStore, VisitRepository, VisitStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The transaction method is generic, so this trait is not
/// object-safe; services take the Unit of Work as a type parameter.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get visit repository
    fn visits(&self) -> Arc<dyn VisitRepository>;

    /// Get review repository
    fn reviews(&self) -> Arc<dyn ReviewRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    /// SQLite serializes writes, so no isolation level is configured.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All operations performed through this context are part of the same
/// database transaction; the context borrows the transaction so it can
/// never outlive it.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    /// Get visit repository for this transaction
    pub fn visits(&self) -> TxVisitRepository<'_> {
        TxVisitRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork over the shared connection.
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    visit_repo: Arc<VisitStore>,
    review_repo: Arc<ReviewStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let visit_repo = Arc::new(VisitStore::new(db.clone()));
        let review_repo = Arc::new(ReviewStore::new(db.clone()));
        Self {
            db,
            user_repo,
            visit_repo,
            review_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn visits(&self) -> Arc<dyn VisitRepository> {
        self.visit_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
///
/// Exposes only the operations the visit/XP sequence needs.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find a user by id within the transaction
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<crate::domain::User>> {
        use super::repositories::entities::user::Entity as UserEntity;
        use sea_orm::EntityTrait;

        let model = UserEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(model.map(crate::domain::User::from))
    }

    /// Persist a new points/level pair within the transaction
    pub async fn update_progress(
        &self,
        id: i64,
        points: i64,
        level: i32,
    ) -> AppResult<Option<crate::domain::User>> {
        use super::repositories::entities::user::Entity as UserEntity;
        use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};

        let Some(model) = UserEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.points = Set(points);
        active.level = Set(level);

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(Some(model.into()))
    }
}

/// Transaction-aware visit repository.
pub struct TxVisitRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxVisitRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a visit within the transaction
    pub async fn insert(&self, user_id: i64, location: &str) -> AppResult<crate::domain::Visit> {
        use super::repositories::entities::visit::ActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let active = ActiveModel {
            user_id: Set(user_id),
            location: Set(location.to_owned()),
            visited_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active.insert(self.txn).await.map_err(AppError::from)?;
        Ok(model.into())
    }
}

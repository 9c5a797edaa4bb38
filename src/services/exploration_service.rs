//! Exploration service - visits, reviews, and aggregate reads.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, MAX_RATING, MIN_RATING, VISIT_XP};
use crate::domain::{apply_xp, Review, User, Visit};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// A leaderboard row: user progression plus activity aggregates.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub username: String,
    pub level: i32,
    pub points: i64,
    pub visits: u64,
    /// Average rating the user has given, rounded to 2 decimal places;
    /// null when they have no reviews
    pub avg_rating: Option<f64>,
}

/// Exploration service trait for dependency injection.
#[async_trait]
pub trait ExplorationService: Send + Sync {
    /// Record a visit and credit the fixed visit XP.
    ///
    /// The visit insert and the progression update run in a single
    /// transaction: either the visit and its XP credit both land, or
    /// neither does. Returns the updated user and the stored visit.
    async fn record_visit(&self, user_id: i64, location: &str) -> AppResult<(User, Visit)>;

    /// Visits for a user, newest first
    async fn visits_for_user(&self, user_id: i64) -> AppResult<Vec<Visit>>;

    /// Record a review; no XP is granted for reviews
    async fn record_review(
        &self,
        user_id: i64,
        location: &str,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review>;

    /// Reviews for a location (case-insensitive exact match), newest first
    async fn reviews_for_location(&self, location: &str) -> AppResult<Vec<Review>>;

    /// Most recent reviews across all locations; limit defaults to 10
    /// when absent or non-positive
    async fn recent_reviews(&self, limit: Option<i64>) -> AppResult<Vec<Review>>;

    /// Top users by points desc, level desc, id asc, enriched with
    /// visit counts and average ratings
    async fn leaderboard(&self, limit: Option<i64>) -> AppResult<Vec<LeaderboardEntry>>;

    /// Number of visits a user has recorded
    async fn visit_count(&self, user_id: i64) -> AppResult<u64>;

    /// Average rating the user has given, rounded to 2 decimal places
    async fn average_rating(&self, user_id: i64) -> AppResult<Option<f64>>;
}

/// Clamp a caller-supplied list limit to a sane positive value.
fn sanitize_limit(limit: Option<i64>) -> u64 {
    match limit {
        Some(l) if l > 0 => (l as u64).min(MAX_LIST_LIMIT),
        _ => DEFAULT_LIST_LIMIT,
    }
}

/// Round a raw SQL average to 2 decimal places.
fn round_rating(avg: f64) -> f64 {
    (avg * 100.0).round() / 100.0
}

/// Concrete implementation of `ExplorationService` over the Unit of Work.
pub struct ExplorationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ExplorationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ExplorationService for ExplorationManager<U> {
    async fn record_visit(&self, user_id: i64, location: &str) -> AppResult<(User, Visit)> {
        let location = location.trim().to_owned();
        if location.is_empty() {
            return Err(AppError::validation("location must not be empty"));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let user = ctx
                        .users()
                        .find_by_id(user_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let visit = ctx.visits().insert(user_id, &location).await?;

                    let progress = apply_xp(user.points, VISIT_XP);
                    let user = ctx
                        .users()
                        .update_progress(user_id, progress.points, progress.level)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    Ok((user, visit))
                })
            })
            .await
    }

    async fn visits_for_user(&self, user_id: i64) -> AppResult<Vec<Visit>> {
        self.uow.visits().list_for_user(user_id).await
    }

    async fn record_review(
        &self,
        user_id: i64,
        location: &str,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AppError::validation("location must not be empty"));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        // User must resolve before anything is inserted
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow
            .reviews()
            .insert(user_id, location, rating, comment)
            .await
    }

    async fn reviews_for_location(&self, location: &str) -> AppResult<Vec<Review>> {
        self.uow.reviews().list_for_location(location).await
    }

    async fn recent_reviews(&self, limit: Option<i64>) -> AppResult<Vec<Review>> {
        self.uow.reviews().recent(sanitize_limit(limit)).await
    }

    async fn leaderboard(&self, limit: Option<i64>) -> AppResult<Vec<LeaderboardEntry>> {
        let users = self.uow.users().top_by_points(sanitize_limit(limit)).await?;

        let mut entries = Vec::with_capacity(users.len());
        for user in users {
            let visits = self.uow.visits().count_for_user(user.id).await?;
            let avg_rating = self.average_rating(user.id).await?;
            entries.push(LeaderboardEntry {
                id: user.id,
                username: user.username,
                level: user.level,
                points: user.points,
                visits,
                avg_rating,
            });
        }

        Ok(entries)
    }

    async fn visit_count(&self, user_id: i64) -> AppResult<u64> {
        self.uow.visits().count_for_user(user_id).await
    }

    async fn average_rating(&self, user_id: i64) -> AppResult<Option<f64>> {
        let avg = self.uow.reviews().average_rating_for_user(user_id).await?;
        Ok(avg.map(round_rating))
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

    fn test_user(id: i64) -> User {
        User {
            id,
            username: format!("user{}", id),
            level: 1,
            points: 0,
            email: None,
            bio: None,
            profile_pic: None,
        }
    }

    #[derive(Default)]
    struct TestUnitOfWork {
        users: Option<Arc<MockUserRepository>>,
        visits: Option<Arc<MockVisitRepository>>,
        reviews: Option<Arc<MockReviewRepository>>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users
                .clone()
                .unwrap_or_else(|| Arc::new(MockUserRepository::new()))
        }

        fn visits(&self) -> Arc<dyn VisitRepository> {
            self.visits
                .clone()
                .unwrap_or_else(|| Arc::new(MockVisitRepository::new()))
        }

        fn reviews(&self) -> Arc<dyn ReviewRepository> {
            self.reviews
                .clone()
                .unwrap_or_else(|| Arc::new(MockReviewRepository::new()))
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

    #[test]
    fn limit_defaults_when_absent_or_invalid() {
        assert_eq!(sanitize_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(sanitize_limit(Some(0)), DEFAULT_LIST_LIMIT);
        assert_eq!(sanitize_limit(Some(-3)), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(sanitize_limit(Some(3)), 3);
        assert_eq!(sanitize_limit(Some(100_000)), MAX_LIST_LIMIT);
    }

    #[test]
    fn average_rounds_to_two_places() {
        assert_eq!(round_rating(3.333333), 3.33);
        assert_eq!(round_rating(4.675), 4.68);
    }

    #[tokio::test]
    async fn record_review_rejects_out_of_range_rating() {
        let service = ExplorationManager::new(Arc::new(TestUnitOfWork::default()));

        let result = service.record_review(1, "Japan", 6, None).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

        let result = service.record_review(1, "Japan", 0, None).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn record_review_requires_existing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let uow = TestUnitOfWork {
            users: Some(Arc::new(users)),
            ..Default::default()
        };
        let service = ExplorationManager::new(Arc::new(uow));

        let result = service.record_review(99, "Japan", 4, None).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn record_visit_rejects_blank_location() {
        let service = ExplorationManager::new(Arc::new(TestUnitOfWork::default()));

        let result = service.record_visit(1, "   ").await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn leaderboard_enriches_users_with_aggregates() {
        let mut users = MockUserRepository::new();
        users.expect_top_by_points().with(eq(10)).returning(|_| {
            let mut first = test_user(1);
            first.points = 500;
            first.level = 3;
            Ok(vec![first, test_user(2)])
        });

        let mut visits = MockVisitRepository::new();
        visits
            .expect_count_for_user()
            .returning(|id| Ok(if id == 1 { 20 } else { 0 }));

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_average_rating_for_user()
            .returning(|id| Ok(if id == 1 { Some(4.333333) } else { None }));

        let uow = TestUnitOfWork {
            users: Some(Arc::new(users)),
            visits: Some(Arc::new(visits)),
            reviews: Some(Arc::new(reviews)),
        };
        let service = ExplorationManager::new(Arc::new(uow));

        let board = service.leaderboard(None).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].visits, 20);
        assert_eq!(board[0].avg_rating, Some(4.33));
        assert_eq!(board[1].avg_rating, None);
    }
}

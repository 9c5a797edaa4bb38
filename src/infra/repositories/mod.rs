//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! All queries go through SeaORM with bound parameters; no SQL text is
//! ever built from user input.

pub(crate) mod entities;
mod review_repository;
mod user_repository;
mod visit_repository;

pub use review_repository::{ReviewRepository, ReviewStore};
pub use user_repository::{UserRepository, UserStore};
pub use visit_repository::{VisitRepository, VisitStore};

#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;

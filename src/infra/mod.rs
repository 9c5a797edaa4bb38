//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repositories over the SQLite store
//! - Unit of Work for the transactional visit/XP write

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ReviewRepository, ReviewStore, UserRepository, UserStore, VisitRepository, VisitStore,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(test)]
pub use repositories::{MockReviewRepository, MockUserRepository, MockVisitRepository};

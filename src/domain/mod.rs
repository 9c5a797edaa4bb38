//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns:
//! entities, the progression engine, and the static destination
//! catalog.

pub mod catalog;
pub mod progression;
pub mod review;
pub mod user;
pub mod visit;

pub use catalog::{Catalog, Destination};
pub use progression::{apply_xp, level_for, LevelMode, Progress};
pub use review::Review;
pub use user::{UpdateProfile, User, UserSummary};
pub use visit::Visit;

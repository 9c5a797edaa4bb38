//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod review;
pub mod user;
pub mod visit;

//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Progression
// =============================================================================

/// XP granted for each recorded visit
pub const VISIT_XP: i64 = 25;

/// Accumulated points required to advance one level
pub const POINTS_PER_LEVEL: i64 = 250;

// =============================================================================
// Reviews
// =============================================================================

/// Lowest accepted review rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted review rating
pub const MAX_RATING: i32 = 5;

// =============================================================================
// List limits
// =============================================================================

/// Default number of entries for limited lists (leaderboard, recent reviews)
pub const DEFAULT_LIST_LIMIT: u64 = 10;

/// Maximum allowed list limit to prevent excessive queries
pub const MAX_LIST_LIMIT: u64 = 100;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (single-file SQLite, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://zyscope.sqlite?mode=rwc";

// =============================================================================
// Users
// =============================================================================

/// Prefix for generated guest usernames
pub const GUEST_USERNAME_PREFIX: &str = "guest_";

//! HTTP request handlers.

pub mod catalog_handler;
pub mod explore_handler;
pub mod leaderboard_handler;
pub mod review_handler;
pub mod user_handler;

pub use review_handler::review_routes;
pub use user_handler::user_routes;

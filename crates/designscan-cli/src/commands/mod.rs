//! Command implementations.

pub mod analyze;
pub mod categories;
pub mod config;

pub use self::analyze::execute_analyze;
pub use self::categories::execute_categories;
pub use self::config::execute_config;

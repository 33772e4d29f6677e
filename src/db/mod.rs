pub mod pool;
pub mod repository;

pub use pool::{create_pool, run_migrations};
pub use repository::{PgSettingsRepository, SettingsRepository};

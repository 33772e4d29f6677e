pub mod health;
pub mod settings;
pub mod validation;

pub use health::health_check;
pub use settings::{get_user_settings, update_user_settings};
pub use validation::{settings_from_body, user_id_from_path};

use serde::{Deserialize, Serialize};

/// User identity row
///
/// Provisioned outside this service; only ever read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}

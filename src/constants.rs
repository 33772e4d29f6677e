/// Default base URL of the external preferences service
pub const DEFAULT_PREFERENCES_BASE_URL: &str = "https://preferences.example.com";

/// Default timeout for outbound sync calls (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Path appended to the preferences base URL for sync notifications
pub const PREFERENCES_SYNC_PATH: &str = "/sync";

// =============================================================================
// Column widths
//
// These mirror the VARCHAR widths in
// migrations/20250101000000_create_users_and_settings.sql. The API layer does
// not check them; oversized values are rejected by the database.
// =============================================================================

/// Width of `user_settings.setting_key`
pub const MAX_SETTING_KEY_LEN: usize = 100;

/// Width of `user_settings.setting_value`
pub const MAX_SETTING_VALUE_LEN: usize = 500;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for a missing user
pub const ERR_USER_NOT_FOUND: &str = "User not found";

/// Error message for a non-integer user ID path segment
pub const ERR_INVALID_USER_ID: &str = "User ID must be an integer";

/// Error message for unhandled storage failures
pub const ERR_INTERNAL: &str = "Internal server error";

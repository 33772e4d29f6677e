pub mod setting;
pub mod user;

pub use setting::{
    coerce_setting_value, SettingEntry, SettingsEnvelope, SettingsUpdateRequest,
    SettingsUpdateResponse, UserSetting,
};
pub use user::User;

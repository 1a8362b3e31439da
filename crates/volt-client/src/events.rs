use volt_shared::Ulid;
use volt_store::UserSettings;

pub const EVENT_USER_SETTINGS_UPDATE: &str = "UserSettingsUpdate";

/// Emitted after a pushed settings update has been applied.
#[derive(Debug, Clone)]
pub struct UserSettingsUpdateEvent {
    pub current_user_id: Ulid,
    /// Only the keys that changed.
    pub partial: UserSettings,
    /// Settings as they were before the update.
    pub before: UserSettings,
    /// Settings after the update. Equal to `before` when settings are mocked.
    pub after: UserSettings,
}

impl UserSettingsUpdateEvent {
    /// Keys whose stored value differs between `before` and `after`.
    pub fn changed_keys(&self) -> Vec<&str> {
        self.partial
            .raw()
            .keys()
            .filter(|key| self.before.get(key) != self.after.get(key))
            .map(String::as_str)
            .collect()
    }
}

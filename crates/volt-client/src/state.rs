//! Per-session client state.
//!
//! [`ClientState`] owns the settings record and the HTTP collaborator. It is
//! driven by the event feed (`on_ready`, `on_settings_update`) and by explicit
//! syncs; it is not shared, so every mutation takes `&mut self`.

use std::sync::Arc;

use tracing::{debug, info};
use volt_shared::error::HttpError;
use volt_shared::protocol::{FetchSettings, RawSettings, UserSettingsUpdate};
use volt_shared::Ulid;
use volt_store::UserSettings;

use crate::config::ClientConfig;
use crate::events::{UserSettingsUpdateEvent, EVENT_USER_SETTINGS_UPDATE};
use crate::http::HttpClient;

pub struct ClientState {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,

    /// Set once the event feed reports who we are.
    user_id: Option<Ulid>,

    /// Mocked until the first snapshot arrives, and for good in HTTP-only
    /// mode.
    settings: UserSettings,
}

impl ClientState {
    pub fn new(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http,
            user_id: None,
            settings: UserSettings::mocked(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &Arc<dyn HttpClient> {
        &self.http
    }

    pub fn user_id(&self) -> Option<&Ulid> {
        self.user_id.as_ref()
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// The feed is ready: store our id and the full settings snapshot.
    pub fn on_ready(&mut self, user_id: Ulid, snapshot: RawSettings) {
        info!(user = %user_id, keys = snapshot.len(), "Client ready");
        self.user_id = Some(user_id);
        if self.config.http_only {
            debug!("HTTP-only mode, ignoring settings snapshot");
            return;
        }
        self.settings = UserSettings::new(snapshot, false);
    }

    /// Apply a pushed settings delta and describe the change.
    pub fn on_settings_update(&mut self, update: UserSettingsUpdate) -> UserSettingsUpdateEvent {
        debug!(
            event = EVENT_USER_SETTINGS_UPDATE,
            user = %update.id,
            keys = update.update.len(),
            "Applying pushed settings"
        );
        let partial = UserSettings::new(update.update, true);
        let before = self.settings.clone();
        self.apply(&partial);

        UserSettingsUpdateEvent {
            current_user_id: update.id,
            partial,
            before,
            after: self.settings.clone(),
        }
    }

    /// Fetch `keys` from the server and merge them as a partial delta.
    pub async fn sync_settings(&mut self, keys: &[String]) -> Result<&UserSettings, HttpError> {
        debug!(keys = ?keys, "Fetching settings");
        let body = FetchSettings {
            keys: keys.to_vec(),
        };
        let fetched = self.http.fetch_user_settings(&body).await?;
        self.apply(&UserSettings::new(fetched, true));
        Ok(&self.settings)
    }

    fn apply(&mut self, delta: &UserSettings) {
        if self.settings.is_mocked() {
            debug!(keys = delta.raw().len(), "Settings are mocked, skipping merge");
            return;
        }
        self.settings.merge(delta);
    }
}

#[cfg(test)]
mod tests {
    use volt_shared::enums::AndroidTheme;
    use volt_shared::Language;

    use super::*;
    use crate::http::testing::{Call, MockHttp};

    const USER: &str = "01HZ8G1Y3K9V0QW7E5M2N4P6RS";

    fn raw(entries: &[(&str, i64, &str)]) -> RawSettings {
        entries
            .iter()
            .map(|(key, revision, value)| (key.to_string(), (*revision, value.to_string())))
            .collect()
    }

    fn ready(config: ClientConfig, http: MockHttp) -> (ClientState, Arc<MockHttp>) {
        let http = Arc::new(http);
        let mut state = ClientState::new(config, http.clone());
        state.on_ready(
            Ulid::parse(USER).unwrap(),
            raw(&[
                ("locale", 1, r#"{"lang":"de"}"#),
                ("android", 1, r#"{"theme":"Light"}"#),
            ]),
        );
        (state, http)
    }

    #[test]
    fn test_settings_mocked_before_ready() {
        let state = ClientState::new(ClientConfig::default(), Arc::new(MockHttp::default()));
        assert!(state.settings().is_mocked());
        assert!(state.user_id().is_none());
    }

    #[test]
    fn test_update_event_carries_before_and_after() {
        let (mut state, _) = ready(ClientConfig::default(), MockHttp::default());
        let event = state.on_settings_update(UserSettingsUpdate {
            id: Ulid::parse(USER).unwrap(),
            update: raw(&[("locale", 2, r#"{"lang":"fr"}"#)]),
        });

        assert!(event.partial.is_partial());
        assert_eq!(event.before.revite().unwrap().language(), Language::German);
        assert_eq!(event.after.revite().unwrap().language(), Language::French);
        assert_eq!(event.changed_keys(), vec!["locale"]);
        assert_eq!(
            state.settings().android().unwrap().theme(),
            AndroidTheme::Light
        );
    }

    #[test]
    fn test_http_only_never_merges() {
        let config = ClientConfig {
            http_only: true,
            ..Default::default()
        };
        let (mut state, _) = ready(config, MockHttp::default());
        assert!(state.settings().is_mocked());

        let event = state.on_settings_update(UserSettingsUpdate {
            id: Ulid::parse(USER).unwrap(),
            update: raw(&[("locale", 2, r#"{"lang":"fr"}"#)]),
        });
        assert!(event.after.raw().is_empty());
        assert!(event.changed_keys().is_empty());
        assert_eq!(event.after.revite().unwrap().language(), Language::English);
    }

    #[tokio::test]
    async fn test_sync_settings_merges_fetched_keys() {
        let http = MockHttp {
            stored: raw(&[
                ("jolt:low-data-mode", 5, "true"),
                ("theme", 5, "{}"),
            ]),
            ..Default::default()
        };
        let (mut state, http) = ready(ClientConfig::default(), http);

        let keys = vec!["jolt:low-data-mode".to_string()];
        let settings = state.sync_settings(&keys).await.unwrap();
        assert!(settings.jolt().unwrap().is_low_data_mode_enabled());
        assert_eq!(settings.get("theme"), None);
        assert_eq!(settings.revite().unwrap().language(), Language::German);
        assert_eq!(http.calls(), vec![Call::FetchSettings(keys)]);
    }

    #[tokio::test]
    async fn test_settings_edit_through_trait_object() {
        let (state, http) = ready(ClientConfig::default(), MockHttp::default());
        let revite = state.settings().revite().unwrap();
        let patch = revite.payload_for(&volt_store::RevitePatch {
            language: Some(Language::Japanese),
            ..Default::default()
        });

        revite
            .edit(
                &**state.http(),
                &volt_store::RevitePatch {
                    language: Some(Language::Japanese),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(http.calls(), vec![Call::EditSettings(patch, None)]);
    }
}

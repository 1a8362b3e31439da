//! The REST calls the settings store depends on.

use async_trait::async_trait;
use volt_shared::error::HttpError;
use volt_shared::protocol::{FetchSettings, RawSettings, Revision, SettingsPatch};

/// Settings endpoints of the HTTP collaborator.
///
/// Implementations own transport, authentication and retries; the store only
/// forwards requests and passes failures back untouched.
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// `POST /sync/settings/set`, with `revision` sent as the `timestamp`
    /// query parameter when present (see
    /// [`SetSettingsOptions`](volt_shared::protocol::SetSettingsOptions)).
    async fn edit_user_settings(
        &self,
        patch: &SettingsPatch,
        revision: Option<Revision>,
    ) -> Result<(), HttpError>;

    /// `POST /sync/settings/fetch`. Keys the server does not know are absent
    /// from the result.
    async fn fetch_user_settings(&self, body: &FetchSettings) -> Result<RawSettings, HttpError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every edit and answers fetches from a canned map.
    #[derive(Default)]
    pub(crate) struct RecordingApi {
        pub edits: Mutex<Vec<(SettingsPatch, Option<Revision>)>>,
        pub stored: RawSettings,
        pub fail_with: Option<HttpError>,
    }

    impl RecordingApi {
        pub fn failing(error: HttpError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        pub fn edits(&self) -> Vec<(SettingsPatch, Option<Revision>)> {
            self.edits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SettingsApi for RecordingApi {
        async fn edit_user_settings(
            &self,
            patch: &SettingsPatch,
            revision: Option<Revision>,
        ) -> Result<(), HttpError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.edits.lock().unwrap().push((patch.clone(), revision));
            Ok(())
        }

        async fn fetch_user_settings(
            &self,
            body: &FetchSettings,
        ) -> Result<RawSettings, HttpError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            Ok(self
                .stored
                .iter()
                .filter(|(k, _)| body.keys.contains(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect())
        }
    }
}

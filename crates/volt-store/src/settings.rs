//! The user settings record and its per-namespace view cache.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use volt_shared::constants::{JOLT_KEYS, KEY_ANDROID, REVITE_KEYS};
use volt_shared::error::HttpError;
use volt_shared::protocol::{RawSettings, Revision, SettingsPatch};

use crate::android::AndroidSettings;
use crate::api::SettingsApi;
use crate::decode;
use crate::error::DecodeError;
use crate::jolt::JoltSettings;
use crate::revite::ReviteSettings;

/// Synced user settings: `key -> (revision, JSON string)`.
///
/// The raw map is the source of truth. Each client namespace is decoded into
/// a typed view when the record is built and re-derived on every
/// [`merge`](Self::merge); a namespace that fails to decode keeps its error
/// until a later merge brings a new value for one of its keys. A broken
/// namespace never affects the others or the raw map.
///
/// `merge` takes `&mut self`. Sharing a record across tasks is up to the
/// owner.
#[derive(Debug, Clone)]
pub struct UserSettings {
    raw: RawSettings,
    mocked: bool,
    partial: bool,
    android: Result<AndroidSettings, DecodeError>,
    revite: Result<ReviteSettings, DecodeError>,
    jolt: Result<JoltSettings, DecodeError>,
}

impl UserSettings {
    /// Build a record from server data. `partial` marks a delta rather than
    /// a full snapshot.
    pub fn new(raw: RawSettings, partial: bool) -> Self {
        let mut settings = Self {
            raw,
            mocked: false,
            partial,
            android: Ok(AndroidSettings::default()),
            revite: Ok(ReviteSettings::default()),
            jolt: Ok(JoltSettings::default()),
        };
        settings.rebuild();
        settings
    }

    /// An empty local record for sessions that never receive settings from
    /// the server (logged out, or HTTP-only).
    pub fn mocked() -> Self {
        Self {
            mocked: true,
            ..Self::new(RawSettings::new(), false)
        }
    }

    pub fn is_mocked(&self) -> bool {
        self.mocked
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn raw(&self) -> &RawSettings {
        &self.raw
    }

    /// The stored JSON string for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(|(_, value)| value.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// When `key` was last written.
    pub fn revision(&self, key: &str) -> Option<i64> {
        self.raw.get(key).map(|(revision, _)| *revision)
    }

    /// `key -> value`, without revisions.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.raw
            .iter()
            .map(|(key, (_, value))| (key.clone(), value.clone()))
            .collect()
    }

    pub fn android(&self) -> Result<&AndroidSettings, DecodeError> {
        self.android.as_ref().map_err(Clone::clone)
    }

    pub fn revite(&self) -> Result<&ReviteSettings, DecodeError> {
        self.revite.as_ref().map_err(Clone::clone)
    }

    pub fn jolt(&self) -> Result<&JoltSettings, DecodeError> {
        self.jolt.as_ref().map_err(Clone::clone)
    }

    /// Fold `delta` into this record.
    ///
    /// Every key of `delta` overwrites ours, in call order; revisions are
    /// not compared, so callers must merge deltas oldest first.
    ///
    /// A full snapshot (`delta.is_partial() == false`) replaces the whole
    /// map and re-decodes every namespace, so namespaces it lacks go back to
    /// their defaults. A partial delta only touches the namespaces whose
    /// keys it carries: a healthy view takes the new values field by field,
    /// a failed view is decoded again from the combined map.
    pub fn merge(&mut self, delta: &UserSettings) {
        if !delta.partial {
            debug!(keys = delta.raw.len(), "Replacing settings with full snapshot");
            self.raw = delta.raw.clone();
            self.partial = false;
            self.rebuild();
            return;
        }

        debug!(
            keys = ?delta.raw.keys().collect::<Vec<_>>(),
            "Merging partial settings update"
        );
        for (key, entry) in &delta.raw {
            self.raw.insert(key.clone(), entry.clone());
        }

        if delta.raw.contains_key(KEY_ANDROID) {
            // One key holds the whole namespace, so decoding it again is the
            // same as applying the delta.
            self.android = AndroidSettings::decode(decode::raw_value(&self.raw, KEY_ANDROID));
            report("android", &self.android);
        }

        if touches(&delta.raw, &REVITE_KEYS) {
            match &mut self.revite {
                Ok(view) => {
                    if let Err(e) = view.update(&delta.raw, false) {
                        self.revite = Err(e);
                    }
                }
                Err(_) => self.revite = ReviteSettings::decode(&self.raw),
            }
            report("revite", &self.revite);
        }

        if touches(&delta.raw, &JOLT_KEYS) {
            match &mut self.jolt {
                Ok(view) => {
                    if let Err(e) = view.update(&delta.raw, false) {
                        self.jolt = Err(e);
                    }
                }
                Err(_) => self.jolt = JoltSettings::decode(&self.raw),
            }
            report("jolt", &self.jolt);
        }
    }

    /// Send a raw edit. Local state is left alone; the change comes back
    /// through [`merge`](Self::merge) once the server pushes it.
    pub async fn edit<A: SettingsApi + ?Sized>(
        &self,
        api: &A,
        patch: &SettingsPatch,
        revision: Option<Revision>,
    ) -> Result<(), HttpError> {
        submit(api, patch, revision).await
    }

    fn rebuild(&mut self) {
        self.android = AndroidSettings::decode(decode::raw_value(&self.raw, KEY_ANDROID));
        self.revite = ReviteSettings::decode(&self.raw);
        self.jolt = JoltSettings::decode(&self.raw);
        report("android", &self.android);
        report("revite", &self.revite);
        report("jolt", &self.jolt);
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self::new(RawSettings::new(), false)
    }
}

pub(crate) async fn submit<A: SettingsApi + ?Sized>(
    api: &A,
    patch: &SettingsPatch,
    revision: Option<Revision>,
) -> Result<(), HttpError> {
    debug!(
        keys = ?patch.keys().collect::<Vec<_>>(),
        revision = ?revision.map(|r| r.0),
        "Sending settings edit"
    );
    api.edit_user_settings(patch, revision).await
}

fn touches(delta: &RawSettings, keys: &[&str]) -> bool {
    keys.iter().any(|key| delta.contains_key(*key))
}

fn report<T>(namespace: &str, view: &Result<T, DecodeError>) {
    if let Err(e) = view {
        warn!(namespace, key = e.key(), error = %e, "Failed to decode settings namespace");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use volt_shared::enums::{AndroidTheme, ReviteFont};
    use volt_shared::Language;

    use super::*;
    use crate::api::testing::RecordingApi;

    fn raw(entries: &[(&str, i64, &str)]) -> RawSettings {
        entries
            .iter()
            .map(|(key, revision, value)| (key.to_string(), (*revision, value.to_string())))
            .collect()
    }

    fn snapshot() -> UserSettings {
        UserSettings::new(
            raw(&[
                ("android", 10, r#"{"theme":"Light"}"#),
                ("locale", 10, r#"{"lang":"de"}"#),
                ("theme", 10, r#"{"appearance:theme:font":"Lato"}"#),
                ("jolt:compact-mode", 10, "true"),
            ]),
            false,
        )
    }

    #[test]
    fn test_raw_access() {
        let settings = snapshot();
        assert_eq!(settings.get("locale"), Some(r#"{"lang":"de"}"#));
        assert_eq!(settings.get("missing"), None);
        assert_eq!(settings.get_or("missing", "{}"), "{}");
        assert_eq!(settings.revision("android"), Some(10));
        assert_eq!(settings.as_map()["jolt:compact-mode"], "true");
        assert!(!settings.is_mocked());
        assert!(!settings.is_partial());
    }

    #[test]
    fn test_mocked_settings_are_empty() {
        let settings = UserSettings::mocked();
        assert!(settings.is_mocked());
        assert!(settings.raw().is_empty());
        assert_eq!(settings.android().unwrap().theme(), AndroidTheme::System);
    }

    #[test]
    fn test_corrupt_namespace_is_isolated() {
        let settings = UserSettings::new(
            raw(&[
                ("android", 1, "{oops"),
                ("locale", 1, r#"{"lang":"es"}"#),
            ]),
            false,
        );
        let err = settings.android().unwrap_err();
        assert!(matches!(err, DecodeError::Json { .. }));
        // Same error on every access.
        assert_eq!(settings.android().unwrap_err().key(), "android");
        assert_eq!(settings.revite().unwrap().language(), Language::Spanish);
        assert!(settings.jolt().is_ok());
        assert_eq!(settings.get("android"), Some("{oops"));
    }

    #[test]
    fn test_partial_merge_leaves_other_namespaces() {
        let mut settings = snapshot();
        let delta = UserSettings::new(raw(&[("locale", 20, r#"{"lang":"fr"}"#)]), true);
        settings.merge(&delta);

        assert_eq!(settings.revite().unwrap().language(), Language::French);
        assert_eq!(settings.revite().unwrap().font(), ReviteFont::Lato);
        assert_eq!(settings.android().unwrap().theme(), AndroidTheme::Light);
        assert!(settings.jolt().unwrap().is_compact_mode_enabled());
        assert_eq!(settings.revision("locale"), Some(20));
        assert_eq!(settings.revision("android"), Some(10));
    }

    #[test]
    fn test_full_merge_resets_absent_namespaces() {
        let mut settings = snapshot();
        let full = UserSettings::new(raw(&[("locale", 30, r#"{"lang":"it"}"#)]), false);
        settings.merge(&full);

        assert_eq!(settings.revite().unwrap().language(), Language::Italian);
        assert_eq!(settings.revite().unwrap().get_font(), None);
        assert_eq!(settings.android().unwrap().get_theme(), None);
        assert!(!settings.jolt().unwrap().is_compact_mode_enabled());
        assert_eq!(settings.get("android"), None);
    }

    #[test]
    fn test_merge_is_last_writer_wins() {
        let mut settings = snapshot();
        let stale = UserSettings::new(raw(&[("locale", 1, r#"{"lang":"pl"}"#)]), true);
        settings.merge(&stale);
        assert_eq!(settings.revite().unwrap().language(), Language::Polish);
        assert_eq!(settings.revision("locale"), Some(1));
    }

    #[test]
    fn test_error_state_recovers_on_new_value() {
        let mut settings = UserSettings::new(raw(&[("locale", 1, r#"{"lang":"xx"}"#)]), false);
        assert!(settings.revite().is_err());

        // A delta that misses the broken key keeps the error.
        settings.merge(&UserSettings::new(raw(&[("android", 2, "{}")]), true));
        assert!(settings.revite().is_err());

        settings.merge(&UserSettings::new(raw(&[("locale", 3, r#"{"lang":"uk"}"#)]), true));
        assert_eq!(settings.revite().unwrap().language(), Language::Ukrainian);
    }

    #[test]
    fn test_failed_delta_moves_view_to_error() {
        let mut settings = snapshot();
        settings.merge(&UserSettings::new(
            raw(&[("jolt:compact-mode", 11, "maybe")]),
            true,
        ));
        assert!(settings.jolt().is_err());
        assert!(settings.revite().is_ok());

        settings.merge(&UserSettings::new(
            raw(&[("jolt:compact-mode", 12, "false")]),
            true,
        ));
        assert!(!settings.jolt().unwrap().is_compact_mode_enabled());
    }

    #[test]
    fn test_android_errors_recover_from_combined_map() {
        let mut settings = UserSettings::new(raw(&[("android", 1, "[]")]), false);
        assert!(settings.android().is_err());

        settings.merge(&UserSettings::new(
            raw(&[("android", 2, r#"{"theme":"Amoled"}"#)]),
            true,
        ));
        assert_eq!(settings.android().unwrap().theme(), AndroidTheme::Amoled);
    }

    #[test]
    fn test_payload_for_round_trip_through_merge() {
        let mut settings = snapshot();
        let patch = settings.revite().unwrap().payload_for(&crate::RevitePatch {
            language: Some(Language::Korean),
            ..Default::default()
        });
        let echoed: RawSettings = patch.into_iter().map(|(k, v)| (k, (40, v))).collect();
        settings.merge(&UserSettings::new(echoed, true));

        let revite = settings.revite().unwrap();
        assert_eq!(revite.language(), Language::Korean);
        assert_eq!(revite.font(), ReviteFont::Lato);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(settings.get("locale").unwrap()).unwrap(),
            json!({"lang": "ko"})
        );
    }

    #[tokio::test]
    async fn test_edit_does_not_touch_local_state() {
        let api = RecordingApi::default();
        let settings = snapshot();
        let patch = SettingsPatch::from([("locale".to_string(), r#"{"lang":"sv"}"#.to_string())]);

        settings.edit(&api, &patch, Some(Revision(99))).await.unwrap();

        assert_eq!(api.edits(), vec![(patch, Some(Revision(99)))]);
        assert_eq!(settings.revite().unwrap().language(), Language::German);
    }

    #[tokio::test]
    async fn test_edit_propagates_http_errors() {
        let api = RecordingApi::failing(HttpError::Unauthorized {
            kind: "InvalidSession".into(),
        });
        let err = snapshot()
            .edit(&api, &SettingsPatch::new(), None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            HttpError::Unauthorized {
                kind: "InvalidSession".into()
            }
        );
    }
}

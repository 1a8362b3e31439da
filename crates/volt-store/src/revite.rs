//! The Revite (web client) namespaces.
//!
//! Revite spreads its preferences over six keys, each holding one JSON
//! object. The view keeps the last decoded object per key so edits can be
//! layered on top of fields it does not model, such as the deprecated
//! `appearance:theme:light` flag.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;
use volt_shared::constants::{
    KEY_APPEARANCE, KEY_CHANGELOG, KEY_LOCALE, KEY_NOTIFICATIONS, KEY_ORDERING, KEY_THEME,
};
use volt_shared::enums::{
    ReviteBaseTheme, ReviteChangelogEntry, ReviteEmojiPack, ReviteFont, ReviteMonoFont,
    ReviteNotificationState,
};
use volt_shared::error::HttpError;
use volt_shared::protocol::{RawSettings, Revision, SettingsPatch};
use volt_shared::{HasId, Language, Patch};

use crate::api::SettingsApi;
use crate::decode::{self, apply, JsonObject};
use crate::error::{DecodeError, Result};

const VIEWED: &str = "viewed";
const LANG: &str = "lang";
const SERVER: &str = "server";
const CHANNEL: &str = "channel";
const SERVERS: &str = "servers";
const EMOJI: &str = "appearance:emoji";
const SEASONAL: &str = "appearance:seasonal";
const TRANSPARENCY: &str = "appearance:transparency";
const LIGATURES: &str = "appearance:ligatures";
const THEME_BASE: &str = "appearance:theme:base";
const THEME_CSS: &str = "appearance:theme:css";
const THEME_FONT: &str = "appearance:theme:font";
const THEME_MONOFONT: &str = "appearance:theme:monoFont";
const THEME_OVERRIDES: &str = "appearance:theme:overrides";

/// One decoded key: the object as stored plus what we understood of it.
#[derive(Debug, Clone, PartialEq)]
struct Section<T> {
    payload: JsonObject,
    data: T,
}

/// Per-server and per-channel notification levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationOptions {
    pub servers: BTreeMap<String, ReviteNotificationState>,
    pub channels: BTreeMap<String, ReviteNotificationState>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Appearance {
    emoji_pack: Option<ReviteEmojiPack>,
    seasonal: Option<bool>,
    transparent: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Theme {
    ligatures: Option<bool>,
    base: Option<ReviteBaseTheme>,
    css: Option<String>,
    font: Option<ReviteFont>,
    monofont: Option<ReviteMonoFont>,
    overrides: Option<BTreeMap<String, String>>,
}

/// Typed view over the Revite keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviteSettings {
    changelog: Option<Section<ReviteChangelogEntry>>,
    locale: Option<Section<Language>>,
    notifications: Option<Section<NotificationOptions>>,
    ordering: Option<Section<Vec<String>>>,
    appearance: Option<Section<Appearance>>,
    theme: Option<Section<Theme>>,
}

impl ReviteSettings {
    pub(crate) fn decode(source: &RawSettings) -> Result<Self> {
        let mut view = Self::default();
        view.update(source, true)?;
        Ok(view)
    }

    /// Re-read every Revite key present in `source`.
    ///
    /// Keys missing from `source` are reset when `full` is set and kept
    /// otherwise.
    pub(crate) fn update(&mut self, source: &RawSettings, full: bool) -> Result<()> {
        refresh(&mut self.changelog, source, KEY_CHANGELOG, full, decode_changelog)?;
        refresh(&mut self.locale, source, KEY_LOCALE, full, decode_locale)?;
        refresh(
            &mut self.notifications,
            source,
            KEY_NOTIFICATIONS,
            full,
            decode_notifications,
        )?;
        refresh(&mut self.ordering, source, KEY_ORDERING, full, decode_ordering)?;
        refresh(&mut self.appearance, source, KEY_APPEARANCE, full, decode_appearance)?;
        refresh(&mut self.theme, source, KEY_THEME, full, decode_theme)?;
        Ok(())
    }

    /// The last decoded object stored under one of the Revite keys.
    pub fn payload(&self, key: &str) -> Option<&JsonObject> {
        match key {
            KEY_CHANGELOG => self.changelog.as_ref().map(|s| &s.payload),
            KEY_LOCALE => self.locale.as_ref().map(|s| &s.payload),
            KEY_NOTIFICATIONS => self.notifications.as_ref().map(|s| &s.payload),
            KEY_ORDERING => self.ordering.as_ref().map(|s| &s.payload),
            KEY_APPEARANCE => self.appearance.as_ref().map(|s| &s.payload),
            KEY_THEME => self.theme.as_ref().map(|s| &s.payload),
            _ => None,
        }
    }

    pub fn last_viewed_changelog_entry(&self) -> Option<ReviteChangelogEntry> {
        self.changelog.as_ref().map(|s| s.data)
    }

    pub fn get_language(&self) -> Option<Language> {
        self.locale.as_ref().map(|s| s.data)
    }

    pub fn language(&self) -> Language {
        self.get_language().unwrap_or(Language::English)
    }

    pub fn get_notification_options(&self) -> Option<&NotificationOptions> {
        self.notifications.as_ref().map(|s| &s.data)
    }

    pub fn notification_options(&self) -> NotificationOptions {
        self.get_notification_options().cloned().unwrap_or_default()
    }

    pub fn get_ordering(&self) -> Option<&[String]> {
        self.ordering.as_ref().map(|s| s.data.as_slice())
    }

    /// Server ids in sidebar order.
    pub fn ordering(&self) -> &[String] {
        self.get_ordering().unwrap_or(&[])
    }

    fn appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref().map(|s| &s.data)
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref().map(|s| &s.data)
    }

    pub fn get_emoji_pack(&self) -> Option<ReviteEmojiPack> {
        self.appearance().and_then(|a| a.emoji_pack)
    }

    pub fn emoji_pack(&self) -> ReviteEmojiPack {
        self.get_emoji_pack().unwrap_or(ReviteEmojiPack::MutantRemix)
    }

    pub fn get_seasonal(&self) -> Option<bool> {
        self.appearance().and_then(|a| a.seasonal)
    }

    /// Holiday effects on the home tab. On unless explicitly disabled.
    pub fn is_seasonal(&self) -> bool {
        self.get_seasonal() != Some(false)
    }

    pub fn get_transparent(&self) -> Option<bool> {
        self.appearance().and_then(|a| a.transparent)
    }

    pub fn is_transparent(&self) -> bool {
        self.get_transparent() != Some(false)
    }

    pub fn get_ligatures(&self) -> Option<bool> {
        self.theme().and_then(|t| t.ligatures)
    }

    /// Font ligatures such as `->` rendered as an arrow. Only some fonts
    /// support them.
    pub fn is_ligatures_enabled(&self) -> bool {
        self.get_ligatures() != Some(false)
    }

    pub fn get_base_theme(&self) -> Option<ReviteBaseTheme> {
        self.theme().and_then(|t| t.base)
    }

    pub fn base_theme(&self) -> ReviteBaseTheme {
        self.get_base_theme().unwrap_or(ReviteBaseTheme::Dark)
    }

    pub fn custom_css(&self) -> Option<&str> {
        self.theme().and_then(|t| t.css.as_deref())
    }

    pub fn get_font(&self) -> Option<ReviteFont> {
        self.theme().and_then(|t| t.font)
    }

    pub fn font(&self) -> ReviteFont {
        self.get_font().unwrap_or(ReviteFont::OpenSans)
    }

    pub fn get_monofont(&self) -> Option<ReviteMonoFont> {
        self.theme().and_then(|t| t.monofont)
    }

    pub fn monofont(&self) -> ReviteMonoFont {
        self.get_monofont().unwrap_or(ReviteMonoFont::FiraCode)
    }

    pub fn get_theme_overrides(&self) -> Option<&BTreeMap<String, String>> {
        self.theme().and_then(|t| t.overrides.as_ref())
    }

    /// CSS variable overrides, keyed by variable name.
    pub fn theme_overrides(&self) -> BTreeMap<String, String> {
        self.get_theme_overrides().cloned().unwrap_or_default()
    }

    /// Build the keys touched by `patch`, each re-encoded as a JSON string.
    ///
    /// A key appears in the result only when at least one of its fields is
    /// set or cleared.
    pub fn payload_for(&self, patch: &RevitePatch) -> SettingsPatch {
        let mut out = SettingsPatch::new();

        if let Some(viewed) = patch.last_viewed_changelog_entry {
            let mut changelog = base(&patch.initial_changelog_payload, &self.changelog);
            changelog.insert(VIEWED.to_string(), Value::from(viewed));
            out.insert(KEY_CHANGELOG.to_string(), decode::encode(changelog));
        }

        if let Some(language) = patch.language {
            let mut locale = base(&patch.initial_locale_payload, &self.locale);
            locale.insert(LANG.to_string(), Value::from(language.as_raw()));
            out.insert(KEY_LOCALE.to_string(), decode::encode(locale));
        }

        if patch.server_notifications.is_some() || patch.channel_notifications.is_some() {
            let mut notifications =
                base(&patch.initial_notifications_payload, &self.notifications);
            for (field, updates, merge) in [
                (
                    SERVER,
                    &patch.server_notifications,
                    patch.merge_server_notifications,
                ),
                (
                    CHANNEL,
                    &patch.channel_notifications,
                    patch.merge_channel_notifications,
                ),
            ] {
                let mut collection = match notifications.get(field) {
                    Some(Value::Object(existing)) if merge || updates.is_none() => {
                        existing.clone()
                    }
                    _ => JsonObject::new(),
                };
                if let Some(updates) = updates {
                    collection.extend(
                        updates
                            .iter()
                            .map(|(id, state)| (id.clone(), Value::from(state.as_raw()))),
                    );
                }
                notifications.insert(field.to_string(), Value::Object(collection));
            }
            out.insert(KEY_NOTIFICATIONS.to_string(), decode::encode(notifications));
        }

        if let Some(servers) = &patch.ordering {
            let mut ordering = base(&patch.initial_ordering_payload, &self.ordering);
            ordering.insert(SERVERS.to_string(), Value::from(servers.clone()));
            out.insert(KEY_ORDERING.to_string(), decode::encode(ordering));
        }

        let appearance_touched = patch.emoji_pack.is_defined()
            || patch.seasonal.is_defined()
            || patch.transparent.is_defined();
        if appearance_touched {
            let mut appearance = base(&patch.initial_appearance_payload, &self.appearance);
            apply(
                &mut appearance,
                EMOJI,
                patch.emoji_pack.as_ref().map(|e| Value::from(e.as_raw())),
            );
            apply(&mut appearance, SEASONAL, patch.seasonal.clone().map(Value::Bool));
            apply(&mut appearance, TRANSPARENCY, patch.transparent.clone().map(Value::Bool));
            out.insert(KEY_APPEARANCE.to_string(), decode::encode(appearance));
        }

        let theme_touched = patch.ligatures.is_defined()
            || patch.base_theme.is_defined()
            || patch.custom_css.is_defined()
            || patch.font.is_defined()
            || patch.monofont.is_defined()
            || patch.overrides.is_defined();
        if theme_touched {
            let mut theme = base(&patch.initial_theme_payload, &self.theme);
            apply(&mut theme, LIGATURES, patch.ligatures.clone().map(Value::Bool));
            apply(
                &mut theme,
                THEME_BASE,
                patch.base_theme.as_ref().map(|b| Value::from(b.as_raw())),
            );
            apply(&mut theme, THEME_CSS, patch.custom_css.clone().map(Value::String));
            apply(&mut theme, THEME_FONT, patch.font.as_ref().map(|f| Value::from(f.as_raw())));
            apply(
                &mut theme,
                THEME_MONOFONT,
                patch.monofont.as_ref().map(|f| Value::from(f.as_raw())),
            );
            apply(
                &mut theme,
                THEME_OVERRIDES,
                patch.overrides.as_ref().map(|overrides| {
                    let variables: JsonObject = overrides
                        .iter()
                        .map(|(name, value)| (name.clone(), Value::from(value.as_str())))
                        .collect();
                    Value::Object(variables)
                }),
            );
            out.insert(KEY_THEME.to_string(), decode::encode(theme));
        }

        out
    }

    pub async fn edit<A: SettingsApi + ?Sized>(
        &self,
        api: &A,
        patch: &RevitePatch,
        revision: Option<Revision>,
    ) -> std::result::Result<(), HttpError> {
        let body = self.payload_for(patch);
        debug!(keys = ?body.keys().collect::<Vec<_>>(), "Editing Revite settings");
        crate::settings::submit(api, &body, revision).await
    }
}

fn refresh<T>(
    slot: &mut Option<Section<T>>,
    source: &RawSettings,
    key: &str,
    full: bool,
    parse: fn(&str) -> Result<Section<T>>,
) -> Result<()> {
    match decode::raw_value(source, key) {
        Some(raw) => *slot = Some(parse(raw)?),
        None if full => *slot = None,
        None => {}
    }
    Ok(())
}

fn base<T>(initial: &Option<JsonObject>, current: &Option<Section<T>>) -> JsonObject {
    initial
        .clone()
        .or_else(|| current.as_ref().map(|s| s.payload.clone()))
        .unwrap_or_default()
}

fn decode_changelog(raw: &str) -> Result<Section<ReviteChangelogEntry>> {
    let payload = decode::parse_object(KEY_CHANGELOG, raw)?;
    let viewed = decode::opt_int_vocab(
        KEY_CHANGELOG,
        &payload,
        VIEWED,
        ReviteChangelogEntry::from_raw,
    )?;
    let data = decode::required(KEY_CHANGELOG, VIEWED, "an integer", viewed)?;
    Ok(Section { payload, data })
}

fn decode_locale(raw: &str) -> Result<Section<Language>> {
    let payload = decode::parse_object(KEY_LOCALE, raw)?;
    let lang = decode::opt_vocab(KEY_LOCALE, &payload, LANG, Language::from_raw)?;
    let data = decode::required(KEY_LOCALE, LANG, "a language code", lang)?;
    Ok(Section { payload, data })
}

fn decode_notifications(raw: &str) -> Result<Section<NotificationOptions>> {
    let payload = decode::parse_object(KEY_NOTIFICATIONS, raw)?;
    let states = |field: &str| -> Result<BTreeMap<String, ReviteNotificationState>> {
        let raw_states: BTreeMap<String, String> = decode::opt_typed(
            KEY_NOTIFICATIONS,
            &payload,
            field,
            "a map of notification states",
        )?
        .unwrap_or_default();
        raw_states
            .into_iter()
            .map(|(id, state)| {
                ReviteNotificationState::from_raw(&state)
                    .map(|state| (id, state))
                    .map_err(|source| DecodeError::Vocabulary {
                        key: KEY_NOTIFICATIONS.to_string(),
                        source,
                    })
            })
            .collect()
    };
    let data = NotificationOptions {
        servers: states(SERVER)?,
        channels: states(CHANNEL)?,
    };
    Ok(Section { payload, data })
}

fn decode_ordering(raw: &str) -> Result<Section<Vec<String>>> {
    let payload = decode::parse_object(KEY_ORDERING, raw)?;
    let servers = decode::opt_typed(KEY_ORDERING, &payload, SERVERS, "a list of server ids")?;
    let data = decode::required(KEY_ORDERING, SERVERS, "a list of server ids", servers)?;
    Ok(Section { payload, data })
}

fn decode_appearance(raw: &str) -> Result<Section<Appearance>> {
    let payload = decode::parse_object(KEY_APPEARANCE, raw)?;
    let data = Appearance {
        emoji_pack: decode::opt_vocab(KEY_APPEARANCE, &payload, EMOJI, ReviteEmojiPack::from_raw)?,
        seasonal: decode::opt_bool(KEY_APPEARANCE, &payload, SEASONAL)?,
        transparent: decode::opt_bool(KEY_APPEARANCE, &payload, TRANSPARENCY)?,
    };
    Ok(Section { payload, data })
}

fn decode_theme(raw: &str) -> Result<Section<Theme>> {
    let payload = decode::parse_object(KEY_THEME, raw)?;
    let data = Theme {
        ligatures: decode::opt_bool(KEY_THEME, &payload, LIGATURES)?,
        base: decode::opt_vocab(KEY_THEME, &payload, THEME_BASE, ReviteBaseTheme::from_raw)?,
        css: decode::opt_str(KEY_THEME, &payload, THEME_CSS)?.map(str::to_string),
        font: decode::opt_vocab(KEY_THEME, &payload, THEME_FONT, ReviteFont::from_raw)?,
        monofont: decode::opt_vocab(KEY_THEME, &payload, THEME_MONOFONT, ReviteMonoFont::from_raw)?,
        overrides: decode::opt_typed(
            KEY_THEME,
            &payload,
            THEME_OVERRIDES,
            "a map of CSS variables",
        )?,
    };
    Ok(Section { payload, data })
}

/// Field edits for [`ReviteSettings::payload_for`].
///
/// Each `initial_*_payload` replaces the stored object that key's edits are
/// layered on. The notification `merge_*` flags default to `true`: new
/// entries are added to the existing collection. With `false`, a collection
/// that receives new entries is replaced by them.
#[derive(Debug, Clone)]
pub struct RevitePatch {
    pub initial_changelog_payload: Option<JsonObject>,
    /// Raw entry number; [`ReviteChangelogEntry`] converts into it.
    pub last_viewed_changelog_entry: Option<i64>,

    pub initial_locale_payload: Option<JsonObject>,
    pub language: Option<Language>,

    pub initial_notifications_payload: Option<JsonObject>,
    pub server_notifications: Option<BTreeMap<String, ReviteNotificationState>>,
    pub merge_server_notifications: bool,
    pub channel_notifications: Option<BTreeMap<String, ReviteNotificationState>>,
    pub merge_channel_notifications: bool,

    pub initial_ordering_payload: Option<JsonObject>,
    pub ordering: Option<Vec<String>>,

    pub initial_appearance_payload: Option<JsonObject>,
    pub emoji_pack: Patch<ReviteEmojiPack>,
    pub seasonal: Patch<bool>,
    pub transparent: Patch<bool>,

    pub initial_theme_payload: Option<JsonObject>,
    pub ligatures: Patch<bool>,
    pub base_theme: Patch<ReviteBaseTheme>,
    pub custom_css: Patch<String>,
    pub font: Patch<ReviteFont>,
    pub monofont: Patch<ReviteMonoFont>,
    pub overrides: Patch<BTreeMap<String, String>>,
}

impl Default for RevitePatch {
    fn default() -> Self {
        Self {
            initial_changelog_payload: None,
            last_viewed_changelog_entry: None,
            initial_locale_payload: None,
            language: None,
            initial_notifications_payload: None,
            server_notifications: None,
            merge_server_notifications: true,
            channel_notifications: None,
            merge_channel_notifications: true,
            initial_ordering_payload: None,
            ordering: None,
            initial_appearance_payload: None,
            emoji_pack: Patch::Omitted,
            seasonal: Patch::Omitted,
            transparent: Patch::Omitted,
            initial_theme_payload: None,
            ligatures: Patch::Omitted,
            base_theme: Patch::Omitted,
            custom_css: Patch::Omitted,
            font: Patch::Omitted,
            monofont: Patch::Omitted,
            overrides: Patch::Omitted,
        }
    }
}

impl RevitePatch {
    pub fn server_notification(
        mut self,
        server: impl HasId,
        state: ReviteNotificationState,
    ) -> Self {
        self.server_notifications
            .get_or_insert_with(BTreeMap::new)
            .insert(server.id().to_string(), state);
        self
    }

    pub fn channel_notification(
        mut self,
        channel: impl HasId,
        state: ReviteNotificationState,
    ) -> Self {
        self.channel_notifications
            .get_or_insert_with(BTreeMap::new)
            .insert(channel.id().to_string(), state);
        self
    }

    pub fn ordering<I>(mut self, servers: I) -> Self
    where
        I: IntoIterator,
        I::Item: HasId,
    {
        self.ordering = Some(servers.into_iter().map(|s| s.id().to_string()).collect());
        self
    }
}

//! The `android` namespace: one JSON object written by the Android client.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;
use volt_shared::constants::{DEFAULT_AVATAR_RADIUS, KEY_ANDROID};
use volt_shared::enums::{AndroidMessageReplyStyle, AndroidTheme};
use volt_shared::error::HttpError;
use volt_shared::protocol::{Revision, SettingsPatch};
use volt_shared::Patch;

use crate::api::SettingsApi;
use crate::decode::{self, apply, JsonObject};
use crate::error::Result;

const THEME: &str = "theme";
const COLOUR_OVERRIDES: &str = "colourOverrides";
const REPLY_STYLE: &str = "messageReplyStyle";
const AVATAR_RADIUS: &str = "avatarRadius";
const SPECIAL_EMBEDS: &str = "specialEmbedSettings";
const EMBED_YOUTUBE: &str = "embedYouTube";
const EMBED_APPLE_MUSIC: &str = "embedAppleMusic";

/// Typed view over the `android` settings key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndroidSettings {
    payload: JsonObject,
    theme: Option<AndroidTheme>,
    colour_overrides: Option<BTreeMap<String, i64>>,
    reply_style: Option<AndroidMessageReplyStyle>,
    avatar_radius: Option<i64>,
    special_embeds: Option<JsonObject>,
}

impl AndroidSettings {
    /// Decode the stored value; a missing key decodes as an empty object.
    pub(crate) fn decode(raw: Option<&str>) -> Result<Self> {
        let payload = decode::parse_object(KEY_ANDROID, raw.unwrap_or("{}"))?;
        Self::from_payload(payload)
    }

    fn from_payload(payload: JsonObject) -> Result<Self> {
        let theme = decode::opt_vocab(KEY_ANDROID, &payload, THEME, AndroidTheme::from_raw)?;
        let colour_overrides = decode::opt_typed(
            KEY_ANDROID,
            &payload,
            COLOUR_OVERRIDES,
            "a map of colour integers",
        )?;
        let reply_style = decode::opt_vocab(
            KEY_ANDROID,
            &payload,
            REPLY_STYLE,
            AndroidMessageReplyStyle::from_raw,
        )?;
        let avatar_radius = decode::opt_i64(KEY_ANDROID, &payload, AVATAR_RADIUS)?;
        let special_embeds: Option<JsonObject> =
            decode::opt_typed(KEY_ANDROID, &payload, SPECIAL_EMBEDS, "an object")?;
        if let Some(embeds) = &special_embeds {
            decode::opt_bool(KEY_ANDROID, embeds, EMBED_YOUTUBE)?;
            decode::opt_bool(KEY_ANDROID, embeds, EMBED_APPLE_MUSIC)?;
        }

        Ok(Self {
            payload,
            theme,
            colour_overrides,
            reply_style,
            avatar_radius,
            special_embeds,
        })
    }

    /// The last decoded object, including fields this view does not model.
    pub fn payload(&self) -> &JsonObject {
        &self.payload
    }

    pub fn get_theme(&self) -> Option<AndroidTheme> {
        self.theme
    }

    /// Defaults to following the system theme.
    pub fn theme(&self) -> AndroidTheme {
        self.theme.unwrap_or(AndroidTheme::System)
    }

    pub fn get_colour_overrides(&self) -> Option<&BTreeMap<String, i64>> {
        self.colour_overrides.as_ref()
    }

    pub fn colour_overrides(&self) -> BTreeMap<String, i64> {
        self.colour_overrides.clone().unwrap_or_default()
    }

    pub fn get_reply_style(&self) -> Option<AndroidMessageReplyStyle> {
        self.reply_style
    }

    pub fn reply_style(&self) -> AndroidMessageReplyStyle {
        self.reply_style.unwrap_or(AndroidMessageReplyStyle::SwipeToReply)
    }

    pub fn get_avatar_radius(&self) -> Option<i64> {
        self.avatar_radius
    }

    /// Avatar corner radius; see [`AndroidProfilePictureShape`] for presets.
    ///
    /// [`AndroidProfilePictureShape`]: volt_shared::enums::AndroidProfilePictureShape
    pub fn profile_picture_shape(&self) -> i64 {
        self.avatar_radius.unwrap_or(DEFAULT_AVATAR_RADIUS)
    }

    pub fn embed_youtube(&self) -> bool {
        self.embed_flag(EMBED_YOUTUBE)
    }

    pub fn embed_apple_music(&self) -> bool {
        self.embed_flag(EMBED_APPLE_MUSIC)
    }

    fn embed_flag(&self, name: &str) -> bool {
        self.special_embeds
            .as_ref()
            .and_then(|embeds| embeds.get(name))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Build the new `android` object.
    ///
    /// Starts from `patch.initial_payload` if given, else the stored object.
    /// Fields the patch leaves omitted are copied through unchanged.
    pub fn payload_for(&self, patch: &AndroidPatch) -> JsonObject {
        let mut payload = patch
            .initial_payload
            .clone()
            .unwrap_or_else(|| self.payload.clone());

        apply(&mut payload, THEME, patch.theme.as_ref().map(|t| Value::from(t.as_raw())));
        apply(
            &mut payload,
            COLOUR_OVERRIDES,
            patch
                .colour_overrides
                .as_ref()
                .map(|overrides| {
                    let colours: JsonObject = overrides
                        .iter()
                        .map(|(name, colour)| (name.clone(), Value::from(*colour)))
                        .collect();
                    Value::Object(colours)
                }),
        );
        apply(
            &mut payload,
            REPLY_STYLE,
            patch.reply_style.as_ref().map(|s| Value::from(s.as_raw())),
        );
        apply(
            &mut payload,
            AVATAR_RADIUS,
            patch.avatar_radius.as_ref().map(|r| Value::from(*r)),
        );

        let flags_given = patch.embed_youtube.is_some() || patch.embed_apple_music.is_some();
        let mut embeds = match &patch.initial_special_embed_settings {
            // Left as stored, whatever its shape.
            Patch::Omitted if !flags_given => return payload,
            Patch::Omitted => match payload.get(SPECIAL_EMBEDS) {
                Some(Value::Object(existing)) => existing.clone(),
                _ => JsonObject::new(),
            },
            Patch::Cleared if !flags_given => {
                payload.shift_remove(SPECIAL_EMBEDS);
                return payload;
            }
            Patch::Cleared => JsonObject::new(),
            Patch::Set(initial) => initial.clone(),
        };

        if flags_given {
            for (name, flag) in [
                (EMBED_YOUTUBE, patch.embed_youtube),
                (EMBED_APPLE_MUSIC, patch.embed_apple_music),
            ] {
                match flag {
                    Some(flag) => {
                        embeds.insert(name.to_string(), Value::Bool(flag));
                    }
                    None => {
                        embeds.entry(name.to_string()).or_insert(Value::Bool(true));
                    }
                }
            }
        }
        payload.insert(SPECIAL_EMBEDS.to_string(), Value::Object(embeds));

        payload
    }

    /// Send [`payload_for`](Self::payload_for) under the `android` key.
    pub async fn edit<A: SettingsApi + ?Sized>(
        &self,
        api: &A,
        patch: &AndroidPatch,
        revision: Option<Revision>,
    ) -> std::result::Result<(), HttpError> {
        let mut body = SettingsPatch::new();
        body.insert(KEY_ANDROID.to_string(), decode::encode(self.payload_for(patch)));
        debug!(key = KEY_ANDROID, "Editing Android settings");
        crate::settings::submit(api, &body, revision).await
    }
}

/// Field edits for [`AndroidSettings::payload_for`].
#[derive(Debug, Clone, Default)]
pub struct AndroidPatch {
    /// Base object to patch instead of the stored one.
    pub initial_payload: Option<JsonObject>,
    pub theme: Patch<AndroidTheme>,
    pub colour_overrides: Patch<BTreeMap<String, i64>>,
    pub reply_style: Patch<AndroidMessageReplyStyle>,
    /// Any radius; [`AndroidProfilePictureShape`] converts into the presets.
    ///
    /// [`AndroidProfilePictureShape`]: volt_shared::enums::AndroidProfilePictureShape
    pub avatar_radius: Patch<i64>,
    pub embed_youtube: Option<bool>,
    pub embed_apple_music: Option<bool>,
    /// Base embed object. `Cleared` drops `specialEmbedSettings` unless an
    /// embed flag is also set.
    pub initial_special_embed_settings: Patch<JsonObject>,
}

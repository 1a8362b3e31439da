//! The Jolt client namespace: four flat keys, each holding `"true"` or
//! `"false"`.

use tracing::debug;
use volt_shared::constants::{
    KEY_JOLT_COMPACT_MODE, KEY_JOLT_LOW_DATA_MODE, KEY_JOLT_RECEIVE_TYPING, KEY_JOLT_SEND_TYPING,
};
use volt_shared::error::HttpError;
use volt_shared::protocol::{RawSettings, Revision, SettingsPatch};

use crate::api::SettingsApi;
use crate::decode;
use crate::error::{DecodeError, Result};

/// Typed view over the `jolt:*` keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoltSettings {
    low_data_mode: Option<bool>,
    compact_mode: Option<bool>,
    send_typing_indicators: Option<bool>,
    receive_typing_indicators: Option<bool>,
}

impl JoltSettings {
    pub(crate) fn decode(source: &RawSettings) -> Result<Self> {
        let mut view = Self::default();
        view.update(source, true)?;
        Ok(view)
    }

    pub(crate) fn update(&mut self, source: &RawSettings, full: bool) -> Result<()> {
        for (key, slot) in [
            (KEY_JOLT_LOW_DATA_MODE, &mut self.low_data_mode),
            (KEY_JOLT_COMPACT_MODE, &mut self.compact_mode),
            (KEY_JOLT_SEND_TYPING, &mut self.send_typing_indicators),
            (KEY_JOLT_RECEIVE_TYPING, &mut self.receive_typing_indicators),
        ] {
            match decode::raw_value(source, key) {
                Some(raw) => *slot = Some(parse_flag(key, raw)?),
                None if full => *slot = None,
                None => {}
            }
        }
        Ok(())
    }

    pub fn get_low_data_mode(&self) -> Option<bool> {
        self.low_data_mode
    }

    /// Skip image loading and fetching users missing from the cache.
    pub fn is_low_data_mode_enabled(&self) -> bool {
        self.low_data_mode == Some(true)
    }

    pub fn get_compact_mode(&self) -> Option<bool> {
        self.compact_mode
    }

    /// Hide avatars in chat.
    pub fn is_compact_mode_enabled(&self) -> bool {
        self.compact_mode == Some(true)
    }

    pub fn get_send_typing_indicators(&self) -> Option<bool> {
        self.send_typing_indicators
    }

    pub fn is_send_typing_indicators(&self) -> bool {
        self.send_typing_indicators != Some(false)
    }

    pub fn get_receive_typing_indicators(&self) -> Option<bool> {
        self.receive_typing_indicators
    }

    pub fn is_receive_typing_indicators(&self) -> bool {
        self.receive_typing_indicators != Some(false)
    }

    /// One entry per flag the patch sets; the stored values play no part.
    pub fn payload_for(&self, patch: &JoltPatch) -> SettingsPatch {
        [
            (KEY_JOLT_LOW_DATA_MODE, patch.low_data_mode),
            (KEY_JOLT_COMPACT_MODE, patch.compact_mode),
            (KEY_JOLT_SEND_TYPING, patch.send_typing_indicators),
            (KEY_JOLT_RECEIVE_TYPING, patch.receive_typing_indicators),
        ]
        .into_iter()
        .filter_map(|(key, flag)| flag.map(|flag| (key.to_string(), encode_flag(flag).to_string())))
        .collect()
    }

    pub async fn edit<A: SettingsApi + ?Sized>(
        &self,
        api: &A,
        patch: &JoltPatch,
        revision: Option<Revision>,
    ) -> std::result::Result<(), HttpError> {
        let body = self.payload_for(patch);
        debug!(keys = body.len(), "Editing Jolt settings");
        crate::settings::submit(api, &body, revision).await
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DecodeError::shape(key, key, "\"true\" or \"false\"")),
    }
}

fn encode_flag(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// Field edits for [`JoltSettings::payload_for`]. These flags can be set but
/// not cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoltPatch {
    pub low_data_mode: Option<bool>,
    pub compact_mode: Option<bool>,
    pub send_typing_indicators: Option<bool>,
    pub receive_typing_indicators: Option<bool>,
}

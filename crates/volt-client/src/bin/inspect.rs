//! Decode a settings dump and print what each client namespace sees.
//!
//! Usage: `volt-inspect <settings.json>`, where the file holds the body of a
//! settings fetch: `{"key": [revision, "json string"], ...}`.

use anyhow::{bail, Context};
use tracing::{info, warn};
use volt_client::config::ClientConfig;
use volt_shared::constants::APP_NAME;
use volt_shared::protocol::RawSettings;
use volt_store::UserSettings;

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    volt_client::init_tracing(&config);
    info!("{APP_NAME} settings inspector v{}", env!("CARGO_PKG_VERSION"));

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: volt-inspect <settings.json>");
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let raw: RawSettings =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!(path = %path, keys = raw.len(), "Loaded settings dump");

    let settings = UserSettings::new(raw, false);

    match settings.android() {
        Ok(android) => {
            println!("android.theme          = {}", android.theme());
            println!("android.reply_style    = {}", android.reply_style());
            println!("android.avatar_radius  = {}", android.profile_picture_shape());
            println!("android.embed_youtube  = {}", android.embed_youtube());
        }
        Err(e) => warn!(error = %e, "android settings are unreadable"),
    }

    match settings.revite() {
        Ok(revite) => {
            println!("revite.language        = {}", revite.language());
            println!("revite.emoji_pack      = {}", revite.emoji_pack());
            println!("revite.base_theme      = {}", revite.base_theme());
            println!("revite.font            = {}", revite.font());
            println!("revite.monofont        = {}", revite.monofont());
            println!("revite.server_ordering = {:?}", revite.ordering());
            let notifications = revite.notification_options();
            println!(
                "revite.notifications   = {} servers, {} channels",
                notifications.servers.len(),
                notifications.channels.len()
            );
        }
        Err(e) => warn!(error = %e, "revite settings are unreadable"),
    }

    match settings.jolt() {
        Ok(jolt) => {
            println!("jolt.low_data_mode     = {}", jolt.is_low_data_mode_enabled());
            println!("jolt.compact_mode      = {}", jolt.is_compact_mode_enabled());
            println!("jolt.send_typing       = {}", jolt.is_send_typing_indicators());
            println!("jolt.receive_typing    = {}", jolt.is_receive_typing_indicators());
        }
        Err(e) => warn!(error = %e, "jolt settings are unreadable"),
    }

    Ok(())
}

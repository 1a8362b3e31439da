/// Application name
pub const APP_NAME: &str = "Volt";

/// Length of a textual identifier (ULID, Crockford base32)
pub const ULID_LEN: usize = 26;

/// Number of leading identifier characters that carry the timestamp
pub const ULID_TIME_LEN: usize = 10;

/// The all-zero identifier
pub const ZERO_ID: &str = "00000000000000000000000000";

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.revolt.chat";

// Settings keys. Each maps to one `(revision, JSON string)` entry.

/// Android client settings (one JSON object)
pub const KEY_ANDROID: &str = "android";

/// Revite: last viewed changelog entry
pub const KEY_CHANGELOG: &str = "changelog";
/// Revite: interface language
pub const KEY_LOCALE: &str = "locale";
/// Revite: per-server and per-channel notification states
pub const KEY_NOTIFICATIONS: &str = "notifications";
/// Revite: server sidebar ordering
pub const KEY_ORDERING: &str = "ordering";
/// Revite: emoji pack and visual effects
pub const KEY_APPEARANCE: &str = "appearance";
/// Revite: theme, fonts and custom CSS
pub const KEY_THEME: &str = "theme";

pub const REVITE_KEYS: [&str; 6] = [
    KEY_CHANGELOG,
    KEY_LOCALE,
    KEY_NOTIFICATIONS,
    KEY_ORDERING,
    KEY_APPEARANCE,
    KEY_THEME,
];

/// Jolt: skip image loading and uncached user fetches
pub const KEY_JOLT_LOW_DATA_MODE: &str = "jolt:low-data-mode";
/// Jolt: hide avatars in chat
pub const KEY_JOLT_COMPACT_MODE: &str = "jolt:compact-mode";
/// Jolt: send typing indicators
pub const KEY_JOLT_SEND_TYPING: &str = "jolt:send-typing-indicators";
/// Jolt: show typing indicators
pub const KEY_JOLT_RECEIVE_TYPING: &str = "jolt:receive-typing-indicators";

pub const JOLT_KEYS: [&str; 4] = [
    KEY_JOLT_LOW_DATA_MODE,
    KEY_JOLT_COMPACT_MODE,
    KEY_JOLT_SEND_TYPING,
    KEY_JOLT_RECEIVE_TYPING,
];

/// Default Android avatar corner radius (fully circular)
pub const DEFAULT_AVATAR_RADIUS: i64 = 50;

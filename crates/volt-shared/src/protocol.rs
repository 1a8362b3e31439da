use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::MfaMethod;
use crate::types::Ulid;

/// Settings as stored server-side: key -> (revision, JSON-encoded value).
pub type RawSettings = BTreeMap<String, (i64, String)>;

/// Body of a settings edit: key -> JSON-encoded value.
pub type SettingsPatch = BTreeMap<String, String>;

/// Revision stamp attached to a settings edit, in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(pub i64);

impl From<i64> for Revision {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Sub-second precision is dropped.
impl From<DateTime<Utc>> for Revision {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp())
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Request body for fetching a subset of settings keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    pub keys: Vec<String>,
}

/// Query options for a settings edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSettingsOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl From<Option<Revision>> for SetSettingsOptions {
    fn from(revision: Option<Revision>) -> Self {
        Self {
            timestamp: revision.map(|r| r.0),
        }
    }
}

/// Pushed when another session of the same user edits settings.
/// `update` only carries the keys that changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettingsUpdate {
    pub id: Ulid,
    pub update: RawSettings,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPushSubscriptionPayload {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// A full session, as returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub user_id: Ulid,
    pub token: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<WebPushSubscriptionPayload>,
}

/// Session listing entry; carries no token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    pub friendly_name: String,
}

// ---------------------------------------------------------------------------
// Accounts & MFA
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaTicketPayload {
    #[serde(rename = "_id")]
    pub id: Ulid,
    pub account_id: Ulid,
    pub token: String,
    pub validated: bool,
    pub authorised: bool,
    pub last_totp_code: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFactorStatus {
    #[serde(default)]
    pub email_otp: bool,
    #[serde(default)]
    pub trusted_handover: bool,
    #[serde(default)]
    pub email_mfa: bool,
    pub totp_mfa: bool,
    #[serde(default)]
    pub security_key_mfa: bool,
    pub recovery_active: bool,
}

/// Proof submitted to complete an MFA challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MfaResponse {
    Password { password: String },
    RecoveryCode { recovery_code: String },
    Totp { totp_code: String },
}

impl MfaResponse {
    pub fn password(password: impl Into<String>) -> Self {
        Self::Password {
            password: password.into(),
        }
    }

    pub fn recovery_code(code: impl Into<String>) -> Self {
        Self::RecoveryCode {
            recovery_code: code.into(),
        }
    }

    pub fn totp(code: impl Into<String>) -> Self {
        Self::Totp {
            totp_code: code.into(),
        }
    }

    /// The method this proof answers.
    pub fn method(&self) -> MfaMethod {
        match self {
            Self::Password { .. } => MfaMethod::Password,
            Self::RecoveryCode { .. } => MfaMethod::Recovery,
            Self::Totp { .. } => MfaMethod::Totp,
        }
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLogin {
    pub email: String,
    pub password: String,
    pub friendly_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaLogin {
    pub mfa_ticket: String,
    pub mfa_response: Option<MfaResponse>,
    pub friendly_name: Option<String>,
}

/// Server answer to a login attempt, discriminated by `result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum ResponseLogin {
    Success(SessionPayload),
    #[serde(rename = "MFA")]
    Mfa {
        ticket: String,
        allowed_methods: Vec<MfaMethod>,
    },
    Disabled {
        user_id: Ulid,
    },
}

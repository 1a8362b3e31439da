//! Account, session and login records.
//!
//! These are plain data. Operations that talk to the server take the
//! [`HttpClient`] explicitly and return new records instead of mutating the
//! receiver.

use tracing::{debug, info};
use volt_shared::enums::MfaMethod;
use volt_shared::protocol::{
    AccountInfo, EditSession, EmailLogin, MfaLogin, MfaResponse, MfaTicketPayload,
    MultiFactorStatus, ResponseLogin, SessionInfo, SessionPayload, WebPushSubscriptionPayload,
};
use volt_shared::{Patch, Ulid};

use crate::error::{AuthError, Result};
use crate::http::HttpClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialAccount {
    pub id: Ulid,
    pub email: String,
}

impl From<AccountInfo> for PartialAccount {
    fn from(raw: AccountInfo) -> Self {
        Self {
            id: raw.id,
            email: raw.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaTicket {
    pub id: Ulid,
    pub account_id: Ulid,
    pub token: String,
    /// Whether the ticket has been validated.
    pub validated: bool,
    /// Whether the ticket may be used to perform the action it was issued for.
    pub authorized: bool,
    pub last_totp_code: Option<String>,
}

impl From<MfaTicketPayload> for MfaTicket {
    fn from(raw: MfaTicketPayload) -> Self {
        Self {
            id: raw.id,
            account_id: raw.account_id,
            token: raw.token,
            validated: raw.validated,
            authorized: raw.authorised,
            last_totp_code: raw.last_totp_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPushSubscription {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

impl From<WebPushSubscriptionPayload> for WebPushSubscription {
    fn from(raw: WebPushSubscriptionPayload) -> Self {
        Self {
            endpoint: raw.endpoint,
            p256dh: raw.p256dh,
            auth: raw.auth,
        }
    }
}

/// A session as listed by the server, without its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSession {
    pub id: Ulid,
    pub name: String,
}

impl PartialSession {
    /// Rename the session. With no new name the current one is returned and
    /// nothing is sent.
    pub async fn edit<C: HttpClient + ?Sized>(
        &self,
        http: &C,
        friendly_name: Option<String>,
    ) -> Result<PartialSession> {
        let Some(friendly_name) = friendly_name else {
            return Ok(self.clone());
        };
        debug!(session = %self.id, name = %friendly_name, "Renaming session");
        let info = http
            .edit_session(&self.id, &EditSession { friendly_name })
            .await?;
        Ok(info.into())
    }

    pub async fn revoke<C: HttpClient + ?Sized>(&self, http: &C) -> Result<()> {
        debug!(session = %self.id, "Revoking session");
        http.revoke_session(&self.id).await?;
        Ok(())
    }
}

impl From<SessionInfo> for PartialSession {
    fn from(raw: SessionInfo) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

/// A session this client owns, with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Ulid,
    pub name: String,
    pub user_id: Ulid,
    pub token: String,
    pub subscription: Option<WebPushSubscription>,
}

impl Session {
    pub fn as_partial(&self) -> PartialSession {
        PartialSession {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub async fn edit<C: HttpClient + ?Sized>(
        &self,
        http: &C,
        friendly_name: Option<String>,
    ) -> Result<PartialSession> {
        self.as_partial().edit(http, friendly_name).await
    }

    pub async fn revoke<C: HttpClient + ?Sized>(&self, http: &C) -> Result<()> {
        self.as_partial().revoke(http).await
    }
}

impl From<SessionPayload> for Session {
    fn from(raw: SessionPayload) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            user_id: raw.user_id,
            token: raw.token,
            subscription: raw.subscription.map(Into::into),
        }
    }
}

/// The account exists but has been disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDisabled {
    pub user_id: Ulid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MfaStatus {
    pub totp_mfa: bool,
    pub recovery_active: bool,
}

impl From<MultiFactorStatus> for MfaStatus {
    fn from(raw: MultiFactorStatus) -> Self {
        Self {
            totp_mfa: raw.totp_mfa,
            recovery_active: raw.recovery_active,
        }
    }
}

/// Outcome of an email/password login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Session(Session),
    MfaRequired(MfaRequired),
    Disabled(AccountDisabled),
}

/// Outcome of answering an MFA challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MfaLoginResult {
    Session(Session),
    Disabled(AccountDisabled),
}

/// The login needs a second factor before a session is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaRequired {
    pub ticket: String,
    pub allowed_methods: Vec<MfaMethod>,
    /// Name given to the first login attempt; reused unless a continuation
    /// overrides it.
    pub friendly_name: Option<String>,
}

impl MfaRequired {
    pub fn allows(&self, method: &MfaMethod) -> bool {
        self.allowed_methods.contains(method)
    }

    pub async fn use_totp<C: HttpClient + ?Sized>(
        &self,
        http: &C,
        code: impl Into<String>,
        friendly_name: Patch<String>,
    ) -> Result<MfaLoginResult> {
        self.answer(http, MfaResponse::totp(code), friendly_name).await
    }

    pub async fn use_recovery_code<C: HttpClient + ?Sized>(
        &self,
        http: &C,
        code: impl Into<String>,
        friendly_name: Patch<String>,
    ) -> Result<MfaLoginResult> {
        self.answer(http, MfaResponse::recovery_code(code), friendly_name)
            .await
    }

    pub async fn use_password<C: HttpClient + ?Sized>(
        &self,
        http: &C,
        password: impl Into<String>,
        friendly_name: Patch<String>,
    ) -> Result<MfaLoginResult> {
        self.answer(http, MfaResponse::password(password), friendly_name)
            .await
    }

    /// Submit `proof` for this ticket. `Omitted` keeps the remembered
    /// friendly name, `Cleared` sends none.
    pub async fn answer<C: HttpClient + ?Sized>(
        &self,
        http: &C,
        proof: MfaResponse,
        friendly_name: Patch<String>,
    ) -> Result<MfaLoginResult> {
        let method = proof.method();
        if !self.allows(&method) {
            return Err(AuthError::MethodNotAllowed(method));
        }

        let friendly_name = match friendly_name {
            Patch::Omitted => self.friendly_name.clone(),
            Patch::Cleared => None,
            Patch::Set(name) => Some(name),
        };
        debug!(%method, "Answering MFA challenge");
        let response = http
            .login_with_mfa(&MfaLogin {
                mfa_ticket: self.ticket.clone(),
                mfa_response: Some(proof),
                friendly_name,
            })
            .await?;

        match response {
            ResponseLogin::Success(session) => {
                info!(user = %session.user_id, "Logged in after MFA");
                Ok(MfaLoginResult::Session(session.into()))
            }
            ResponseLogin::Disabled { user_id } => {
                info!(user = %user_id, "Account is disabled");
                Ok(MfaLoginResult::Disabled(AccountDisabled { user_id }))
            }
            ResponseLogin::Mfa { .. } => Err(AuthError::UnexpectedMfa),
        }
    }
}

/// Start a login with email and password.
pub async fn login_with_email<C: HttpClient + ?Sized>(
    http: &C,
    email: &str,
    password: &str,
    friendly_name: Option<String>,
) -> Result<LoginResult> {
    debug!(email, "Logging in with email");
    let response = http
        .login_with_email(&EmailLogin {
            email: email.to_string(),
            password: password.to_string(),
            friendly_name: friendly_name.clone(),
        })
        .await?;

    Ok(match response {
        ResponseLogin::Success(session) => {
            info!(user = %session.user_id, "Logged in");
            LoginResult::Session(session.into())
        }
        ResponseLogin::Mfa {
            ticket,
            allowed_methods,
        } => {
            info!(methods = ?allowed_methods, "Login requires MFA");
            LoginResult::MfaRequired(MfaRequired {
                ticket,
                allowed_methods,
                friendly_name,
            })
        }
        ResponseLogin::Disabled { user_id } => {
            info!(user = %user_id, "Account is disabled");
            LoginResult::Disabled(AccountDisabled { user_id })
        }
    })
}

/// All sessions of the current account.
pub async fn fetch_sessions<C: HttpClient + ?Sized>(http: &C) -> Result<Vec<PartialSession>> {
    let sessions = http.fetch_sessions().await?;
    Ok(sessions.into_iter().map(Into::into).collect())
}

/// Revoke every session, optionally including the current one.
pub async fn revoke_all_sessions<C: HttpClient + ?Sized>(
    http: &C,
    revoke_self: bool,
) -> Result<()> {
    debug!(revoke_self, "Revoking all sessions");
    http.revoke_all_sessions(revoke_self).await?;
    Ok(())
}

pub async fn logout<C: HttpClient + ?Sized>(http: &C) -> Result<()> {
    http.logout().await?;
    info!("Logged out");
    Ok(())
}

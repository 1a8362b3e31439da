//! The REST collaborator.
//!
//! Transport, tokens and retries live behind this trait. Every method is a
//! single request whose failure is returned as-is.

use async_trait::async_trait;
use volt_shared::error::HttpError;
use volt_shared::protocol::{EditSession, EmailLogin, MfaLogin, ResponseLogin, SessionInfo};
use volt_shared::Ulid;
use volt_store::SettingsApi;

#[async_trait]
pub trait HttpClient: SettingsApi {
    /// `PATCH /auth/session/{id}`
    async fn edit_session(&self, id: &Ulid, body: &EditSession) -> Result<SessionInfo, HttpError>;

    /// `DELETE /auth/session/{id}`
    async fn revoke_session(&self, id: &Ulid) -> Result<(), HttpError>;

    /// `DELETE /auth/session/all`, optionally including the current session.
    async fn revoke_all_sessions(&self, revoke_self: bool) -> Result<(), HttpError>;

    /// `GET /auth/session/all`
    async fn fetch_sessions(&self) -> Result<Vec<SessionInfo>, HttpError>;

    /// `POST /auth/session/login` with email and password.
    async fn login_with_email(&self, body: &EmailLogin) -> Result<ResponseLogin, HttpError>;

    /// `POST /auth/session/login` with an MFA ticket and proof.
    async fn login_with_mfa(&self, body: &MfaLogin) -> Result<ResponseLogin, HttpError>;

    /// `POST /auth/session/logout`
    async fn logout(&self) -> Result<(), HttpError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use volt_shared::protocol::{FetchSettings, RawSettings, Revision, SettingsPatch};

    use super::*;

    /// One recorded collaborator call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        EditSettings(SettingsPatch, Option<Revision>),
        FetchSettings(Vec<String>),
        EditSession(Ulid, EditSession),
        RevokeSession(Ulid),
        RevokeAll(bool),
        FetchSessions,
        LoginWithEmail(EmailLogin),
        LoginWithMfa(MfaLogin),
        Logout,
    }

    /// Records calls and answers logins from a queue.
    #[derive(Default)]
    pub(crate) struct MockHttp {
        pub calls: Mutex<Vec<Call>>,
        pub logins: Mutex<VecDeque<ResponseLogin>>,
        pub sessions: Vec<SessionInfo>,
        pub stored: RawSettings,
        pub fail_with: Option<HttpError>,
    }

    impl MockHttp {
        pub fn answering(responses: impl IntoIterator<Item = ResponseLogin>) -> Self {
            Self {
                logins: Mutex::new(responses.into_iter().collect()),
                ..Default::default()
            }
        }

        pub fn failing(error: HttpError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<(), HttpError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn next_login(&self) -> Result<ResponseLogin, HttpError> {
            self.logins
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| HttpError::Transport("no login response queued".into()))
        }
    }

    #[async_trait]
    impl SettingsApi for MockHttp {
        async fn edit_user_settings(
            &self,
            patch: &SettingsPatch,
            revision: Option<Revision>,
        ) -> Result<(), HttpError> {
            self.record(Call::EditSettings(patch.clone(), revision))
        }

        async fn fetch_user_settings(
            &self,
            body: &FetchSettings,
        ) -> Result<RawSettings, HttpError> {
            self.record(Call::FetchSettings(body.keys.clone()))?;
            Ok(self
                .stored
                .iter()
                .filter(|(k, _)| body.keys.contains(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect())
        }
    }

    #[async_trait]
    impl HttpClient for MockHttp {
        async fn edit_session(
            &self,
            id: &Ulid,
            body: &EditSession,
        ) -> Result<SessionInfo, HttpError> {
            self.record(Call::EditSession(id.clone(), body.clone()))?;
            Ok(SessionInfo {
                id: id.clone(),
                name: body.friendly_name.clone(),
            })
        }

        async fn revoke_session(&self, id: &Ulid) -> Result<(), HttpError> {
            self.record(Call::RevokeSession(id.clone()))
        }

        async fn revoke_all_sessions(&self, revoke_self: bool) -> Result<(), HttpError> {
            self.record(Call::RevokeAll(revoke_self))
        }

        async fn fetch_sessions(&self) -> Result<Vec<SessionInfo>, HttpError> {
            self.record(Call::FetchSessions)?;
            Ok(self.sessions.clone())
        }

        async fn login_with_email(&self, body: &EmailLogin) -> Result<ResponseLogin, HttpError> {
            self.record(Call::LoginWithEmail(body.clone()))?;
            self.next_login()
        }

        async fn login_with_mfa(&self, body: &MfaLogin) -> Result<ResponseLogin, HttpError> {
            self.record(Call::LoginWithMfa(body.clone()))?;
            self.next_login()
        }

        async fn logout(&self) -> Result<(), HttpError> {
            self.record(Call::Logout)
        }
    }
}

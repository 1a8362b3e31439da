use thiserror::Error;
use volt_shared::enums::MfaMethod;
use volt_shared::error::HttpError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("MFA method {0} is not allowed for this ticket")]
    MethodNotAllowed(MfaMethod),

    #[error("Server answered an MFA login with another MFA challenge")]
    UnexpectedMfa,
}

pub type Result<T> = std::result::Result<T, AuthError>;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Failure of a portal operation.
///
/// Nothing is retried internally: every failed request surfaces here,
/// carrying the underlying transport error where there is one.
#[derive(Debug, Error)]
pub enum Error {
    /// The token exchange failed, or its payload carried no usable token.
    #[error("authentication failed: {context}")]
    Auth {
        context: String,

        #[source]
        source: Option<reqwest::Error>,
    },

    /// A data request failed: transport error, non-2xx status, or undecodable body.
    #[error("portal request failed: {context}")]
    Api {
        context: String,

        #[source]
        source: Option<reqwest::Error>,
    },
}

impl Error {
    pub(crate) fn auth(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Auth { context: context.into(), source: Some(source) }
    }

    pub(crate) fn missing_access_token() -> Self {
        Self::Auth {
            context: "the token response contained no `access_token`".to_owned(),
            source: None,
        }
    }

    pub(crate) fn api(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Api { context: context.into(), source: Some(source) }
    }

    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// HTTP status of the failed request, when the failure carries one.
    ///
    /// [`StatusCode::UNAUTHORIZED`] on a data call means the stored token is
    /// no longer accepted and the caller should log in again.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Auth { source, .. } | Self::Api { source, .. } => {
                source.as_ref().and_then(reqwest::Error::status)
            }
        }
    }
}

use std::fmt;

use crate::error::{AppError, AppResult, AwsError};

const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AwsCredentials {
    /// Uses explicit keys when both are given, otherwise the standard
    /// `AWS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source provides an access/secret pair.
    pub fn resolve(
        access_key: Option<String>,
        secret_key: Option<String>,
        session_token: Option<String>,
    ) -> AppResult<Self> {
        if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
            return Ok(Self {
                access_key,
                secret_key,
                session_token,
            });
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        match (non_empty(ACCESS_KEY_ENV), non_empty(SECRET_KEY_ENV)) {
            (Some(access_key), Some(secret_key)) => Ok(Self {
                access_key,
                secret_key,
                session_token: non_empty(SESSION_TOKEN_ENV),
            }),
            (None | Some(_), None) | (None, Some(_)) => {
                Err(AppError::aws(AwsError::MissingCredentials))
            }
        }
    }
}

//! Credential providers
//!
//! The provisioning loops never read credentials; the AWS adapter asks a
//! [`CredentialProvider`] once at startup.

use crate::error::{ProvisionError, Result};

pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";

/// Access key pair
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl StaticCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

// secrets never reach logs
impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

pub trait CredentialProvider: Send + Sync {
    /// Short name shown in diagnostics (e.g. "environment")
    fn source(&self) -> &str;

    fn credentials(&self) -> Result<StaticCredentials>;
}

/// Reads `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialProvider;

impl CredentialProvider for EnvCredentialProvider {
    fn source(&self) -> &str {
        "environment"
    }

    fn credentials(&self) -> Result<StaticCredentials> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ProvisionError::Credentials(format!("{} is not set", name)))
        };

        Ok(StaticCredentials::new(
            read(ACCESS_KEY_ENV)?,
            read(SECRET_KEY_ENV)?,
        ))
    }
}

/// Fixed credentials supplied by the caller
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: StaticCredentials,
}

impl StaticCredentialProvider {
    pub fn new(credentials: StaticCredentials) -> Self {
        Self { credentials }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn source(&self) -> &str {
        "static"
    }

    fn credentials(&self) -> Result<StaticCredentials> {
        Ok(self.credentials.clone())
    }
}

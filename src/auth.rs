use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

const BASIC_SCHEME: &str = "Basic ";

/// Why a request was refused. Every variant produces the same wire response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("authorization header missing or not using the Basic scheme")]
    MissingHeader,

    #[error("authorization header is not valid base64 `user:password`")]
    MalformedEncoding,

    #[error("credentials do not match")]
    InvalidCredentials,
}

/// A username/password pair decoded from a single request. Never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Decodes the raw `Authorization` header value into a credential pair.
///
/// The decoded text is split on the first `:` only, so passwords may contain colons.
pub fn verify(header: Option<&str>) -> Result<Credential, AuthFailure> {
    let encoded = header
        .and_then(|value| value.strip_prefix(BASIC_SCHEME))
        .ok_or(AuthFailure::MissingHeader)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthFailure::MalformedEncoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthFailure::MalformedEncoding)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthFailure::MalformedEncoding)?;

    Ok(Credential {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// The single username/password pair the service accepts.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// Verifies the header and checks it against the configured pair.
    pub fn authorize(&self, header: Option<&str>) -> Result<Credential, AuthFailure> {
        let credential = verify(header)?;

        if self.matches(&credential.username, &credential.password) {
            Ok(credential)
        } else {
            Err(AuthFailure::InvalidCredentials)
        }
    }
}

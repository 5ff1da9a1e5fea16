//! Wire types for the Porchlight `/chat` exchange, shared by console and server.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a generated session token.
const SESSION_ID_LEN: usize = 14;

const SESSION_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque identifier correlating one console run's messages server-side.
///
/// Generated once at startup and sent unchanged with every request. The
/// token is base-36 and random; nothing beyond that randomness guarantees
/// uniqueness, and it is not a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let token = (0..SESSION_ID_LEN)
            .map(|_| SESSION_ALPHABET[rng.random_range(0..SESSION_ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Session the message belongs to.
    pub session_id: SessionId,
    /// Raw user message text.
    pub message: String,
}

/// Body of a successful `POST /chat` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant text to render as a bot message.
    pub reply: String,
}

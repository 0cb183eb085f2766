use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Session token issued by the booking service on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub value: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    pub fn expiring_at(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: Some(expires_at),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Where the client keeps session tokens, keyed by `host[:port]`.
pub trait SessionStore: Send + Sync {
    fn get(&self, host: &str) -> Option<SessionToken>;
    fn set(&self, host: &str, token: SessionToken);
    fn remove(&self, host: &str);
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    tokens: RwLock<HashMap<String, SessionToken>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, host: &str) -> Option<SessionToken> {
        self.tokens
            .read()
            .get(host)
            .filter(|token| !token.is_expired(Utc::now()))
            .cloned()
    }

    fn set(&self, host: &str, token: SessionToken) {
        self.tokens.write().insert(host.to_string(), token);
    }

    fn remove(&self, host: &str) {
        self.tokens.write().remove(host);
    }
}

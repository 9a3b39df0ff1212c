//! Assessment session identity

use serde::{Deserialize, Serialize};

/// Session identifier as returned by the server.
///
/// The backend uses integer keys, but the client also needs to carry a
/// textual placeholder when session creation fails, so the id is kept as
/// text and accepts either JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSessionId", into = "String")]
pub struct SessionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSessionId {
    Number(i64),
    Text(String),
}

impl From<RawSessionId> for SessionId {
    fn from(raw: RawSessionId) -> Self {
        match raw {
            RawSessionId::Number(n) => SessionId(n.to_string()),
            RawSessionId::Text(s) => SessionId(s),
        }
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of the session-creation endpoint (only `id` is used)
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreated {
    pub id: SessionId,
}

/// The session an attempt is running under (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    placeholder: bool,
}

impl Session {
    /// A session the server created
    pub fn created(id: SessionId) -> Self {
        Self {
            id,
            placeholder: false,
        }
    }

    /// A locally generated stand-in used when session creation failed.
    ///
    /// Answers submitted under a placeholder are not persisted by the server.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(label),
            placeholder: true,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

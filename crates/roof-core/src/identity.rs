use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity gateway.
///
/// Produced by `roof-auth`, observed by `roof-session`. Never built from user
/// input; the gateway owns its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned unique user ID.
    pub uid: String,
    /// Email address the account was registered with.
    pub email: String,
}

impl Identity {
    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

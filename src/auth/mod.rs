use std::fmt;

/// Decides whether a submitted reset token may wipe the tally.
pub trait ResetAuth: Send + Sync {
    fn verify(&self, token: &str) -> bool;
}

/// Shared-secret check against a token held only by the server.
///
/// Comparison is plain string equality, not constant-time. That is accepted
/// for a low-stakes poll and must be revisited before guarding anything real.
pub struct TokenAuth {
    token: String,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl ResetAuth for TokenAuth {
    fn verify(&self, token: &str) -> bool {
        token == self.token
    }
}

impl fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuth").field("token", &"<redacted>").finish()
    }
}

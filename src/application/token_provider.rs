// Session token access
use std::sync::RwLock;

/// Source of the bearer token passed to every backend call.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: String);
    fn clear(&self);
}

/// In-memory session holding at most one token.
#[derive(Debug, Default)]
pub struct SessionTokenProvider {
    token: RwLock<Option<String>>,
}

impl SessionTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.is_empty())),
        }
    }
}

impl TokenProvider for SessionTokenProvider {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, token: String) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
    }

    fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_lifecycle() {
        let session = SessionTokenProvider::new(Some(String::new()));
        assert_eq!(session.token(), None);

        session.store("abc".to_string());
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.clear();
        assert_eq!(session.token(), None);
    }
}

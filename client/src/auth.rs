use std::sync::{Arc, RwLock};

/// Injected credential holder for the API client.
///
/// The token lives behind an explicit handle with `set`/`get`/`clear`
/// lifecycle instead of ambient module state, so tests and callers control
/// exactly which session a client uses. Cloning shares the same slot.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(token.into());
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner.read().ok().and_then(|slot| slot.clone())
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.get().is_some()
    }

    /// `Authorization` header value, if a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.get().map(|token| format!("Bearer {}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear_round_trip() {
        let store = TokenStore::new();
        assert!(!store.is_signed_in());

        store.set("abc123");
        assert_eq!(store.get().as_deref(), Some("abc123"));
        assert_eq!(store.bearer().as_deref(), Some("Bearer abc123"));

        store.clear();
        assert!(store.get().is_none());
        assert!(store.bearer().is_none());
    }

    #[test]
    fn clones_share_the_same_slot() {
        let store = TokenStore::with_token("one");
        let other = store.clone();
        other.set("two");
        assert_eq!(store.get().as_deref(), Some("two"));
        other.clear();
        assert!(!store.is_signed_in());
    }
}

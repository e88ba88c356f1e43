//! Session gate
//!
//! The explorer only needs to know whether a credential exists and how to
//! drop it. Where the token lives (a file, memory, a keychain) is up to the
//! `TokenStore` implementation.

use std::sync::Mutex;

use thiserror::Error;

/// Errors raised by token stores
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the backing storage failed
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The token to store is empty or whitespace
    #[error("Refusing to store an empty token")]
    EmptyToken,

    /// No storage location could be determined
    #[error("No token storage location available: {0}")]
    NoLocation(String),
}

/// Capability for reading and clearing the stored credential
///
/// Tokens are opaque. Nothing here checks expiry or signatures; a revoked
/// token only shows up as failing requests.
pub trait TokenStore: Send + Sync {
    /// The stored token, if any
    fn current_token(&self) -> Option<String>;

    /// Replaces the stored token
    fn store(&self, token: &str) -> Result<(), SessionError>;

    /// Forgets the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Client-side routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Open route where the user obtains a token
    Login,
    /// Repository explorer, requires a token
    Dashboard,
}

/// Whether the store holds a usable (non-blank) token
pub fn is_authenticated(store: &dyn TokenStore) -> bool {
    store
        .current_token()
        .is_some_and(|token| !token.trim().is_empty())
}

/// Resolves the route a caller actually lands on
pub fn gate(requested: Route, store: &dyn TokenStore) -> Route {
    match requested {
        Route::Dashboard if !is_authenticated(store) => Route::Login,
        route => route,
    }
}

/// Clears the credential and returns the route to navigate to
pub fn logout(store: &dyn TokenStore) -> Result<Route, SessionError> {
    store.clear()?;
    tracing::info!("Token cleared");
    Ok(Route::Login)
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn current_token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        Ok(())
    }
}

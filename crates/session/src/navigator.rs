//! Login-entry navigation seam

/// Performed when a session ends involuntarily and the user must be sent
/// back to the login entry point. Embeddings supply the real navigation
/// (router push, window relocation); the session layer only decides when.
pub trait Navigator: Send + Sync {
    /// Send the user to the login entry point
    fn to_login(&self);
}

/// Navigator for embeddings with nothing to navigate (tests, headless tools)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_login(&self) {}
}

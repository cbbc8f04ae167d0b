use jsonwebtoken::Algorithm;

/// Security settings, built once at startup and passed by reference.
///
/// There is deliberately no way to swap the signing key at runtime;
/// concurrent reads need no synchronization.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Symmetric key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Token algorithm (HS256)
    pub algorithm: Algorithm,
    /// Shared secret required by the create-admin endpoint (`X-Admin-Key`)
    pub admin_key: String,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            admin_key: String::new(),
        }
    }

    pub fn with_admin_key(mut self, admin_key: impl Into<String>) -> Self {
        self.admin_key = admin_key.into();
        self
    }
}

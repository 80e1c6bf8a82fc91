//! Secret store collaborator
//!
//! Bearer tokens are supplied externally; this trait is the seam they
//! arrive through. Token lifecycle (issuing, rotation, revocation) is
//! out of scope.

/// A named secret store
pub trait SecretStore: Send + Sync {
    /// Fetch a secret by name
    fn get(&self, name: &str) -> Option<String>;

    /// Store a secret, replacing any previous value
    fn set(&self, name: &str, value: &str);
}

/// Secret store backed by process environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl EnvSecrets {
    /// Create an environment-backed store
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for EnvSecrets {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn set(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

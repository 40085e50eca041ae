//! Session client identifier.

use std::fmt;

/// Number of random characters appended to the configured prefix.
pub const CLIENT_ID_SUFFIX_LEN: usize = 8;

const ALPHANUMERIC: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Identifier presented to the broker when a session is opened.
///
/// Generated once per process as `prefix` followed by
/// [`CLIENT_ID_SUFFIX_LEN`] random alphanumeric characters, so two devices
/// flashed with the same configuration never collide on the broker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Generate a new identifier with a random suffix.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        let random = uuid::Uuid::new_v4();
        Self::with_suffix(prefix, &alphanumeric_suffix(random.as_bytes()))
    }

    /// Build an identifier from a fixed suffix.
    #[must_use]
    pub fn with_suffix(prefix: &str, suffix: &str) -> Self {
        Self(format!("{prefix}{suffix}"))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Map the first [`CLIENT_ID_SUFFIX_LEN`] random bytes onto `[0-9A-Za-z]`.
fn alphanumeric_suffix(random: &[u8]) -> String {
    random
        .iter()
        .take(CLIENT_ID_SUFFIX_LEN)
        .map(|byte| char::from(ALPHANUMERIC[usize::from(*byte) % ALPHANUMERIC.len()]))
        .collect()
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

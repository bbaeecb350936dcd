//! Shared-secret admin gate.
//!
//! A single process-wide secret distinguishes the site owner from anonymous
//! visitors. Deletion handlers check it on every request; no client-asserted
//! role is ever trusted.

use std::fmt;

use thiserror::Error;

/// Validation errors raised when constructing an [`AdminKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminKeyValidationError {
    /// Secret is empty after trimming whitespace.
    #[error("admin key must not be empty")]
    Empty,
}

/// The configured admin secret.
///
/// Authorisation is granted iff a caller-supplied key is byte-equal to this
/// value. The comparison is plain equality, matching the low stakes of a
/// personal guestbook; swap in a constant-time comparison before reusing
/// this gate for anything larger. `Debug` output redacts the secret so it
/// cannot leak through logs.
///
/// # Examples
/// ```
/// use backend::domain::AdminKey;
///
/// let key = AdminKey::new("open-sesame").expect("valid key");
/// assert!(key.matches("open-sesame"));
/// assert!(!key.matches("open-sesame "));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AdminKey(String);

impl AdminKey {
    /// Validate and construct an [`AdminKey`].
    pub fn new(secret: impl Into<String>) -> Result<Self, AdminKeyValidationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(AdminKeyValidationError::Empty);
        }
        Ok(Self(secret))
    }

    /// Whether `candidate` is byte-equal to the configured secret.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes() == candidate.as_bytes()
    }
}

impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_secrets(#[case] secret: &str) {
        let err = AdminKey::new(secret).expect_err("blank secret rejected");
        assert_eq!(err, AdminKeyValidationError::Empty);
    }

    #[rstest]
    #[case("open-sesame", true)]
    #[case("open-sesam", false)]
    #[case("OPEN-SESAME", false)]
    #[case("", false)]
    fn matches_only_the_exact_secret(#[case] candidate: &str, #[case] expected: bool) {
        let key = AdminKey::new("open-sesame").expect("valid key");
        assert_eq!(key.matches(candidate), expected);
    }

    #[rstest]
    fn debug_output_redacts_the_secret() {
        let key = AdminKey::new("open-sesame").expect("valid key");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("sesame"));
        assert!(rendered.contains("redacted"));
    }
}

use std::fmt;

/// A credential value that never shows up in formatted output.
///
/// Host-supplied passwords travel through the provider inside `Secret`, so
/// `Debug`-printing [`Credentials`](crate::Credentials) or any tracing event
/// that captures them prints `[REDACTED]` instead of the value.
///
/// # Examples
///
/// ```
/// use delegated_auth::Secret;
///
/// let password = Secret::new("correct horse".to_string());
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert_eq!(password.expose_secret(), "correct horse");
/// ```
// Do not derive Clone, Debug or Default: each would copy or print the value.
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Borrows the wrapped value. Callers must not log what they get back.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

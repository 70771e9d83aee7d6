//! The inbound request abstraction consumed by the provider.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};

/// Multi-valued request parameters, as materialized by the host.
pub type ParameterValues = HashMap<String, Vec<String>>;

/// An inbound authentication request, as seen by this provider.
///
/// The host's boundary layer adapts its own request type to this trait. The
/// provider never inspects the concrete request type: whether parameters are
/// already materialized ("API-style") is an explicit flag.
///
/// # Body discipline
///
/// The body may be taken at most once. [`body_ready`](Self::body_ready)
/// reports whether the surrounding framework has already drained the body
/// (or none is expected); the provider only takes the body when it is not.
pub trait InboundRequest {
    /// True when the host pre-parsed the request into parameters and there
    /// is no raw body to read.
    fn is_api_style(&self) -> bool;

    /// All request parameters, each with its values in arrival order.
    fn parameters(&self) -> &ParameterValues;

    /// The first value of the named parameter.
    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters()
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// The raw `Content-Type` header value, if the request carries one.
    fn content_type(&self) -> Option<&str>;

    /// True when the body has already been consumed or none is expected.
    ///
    /// This reflects draining by the host framework only. Taking the body
    /// through [`take_body`](Self::take_body) does not make it ready, so a
    /// second pass classifies the same way and then fails on the take.
    fn body_ready(&self) -> bool;

    /// Takes the body stream. Fails if the body was already taken.
    fn take_body(&mut self) -> io::Result<Box<dyn Read + Send>>;
}

/// A single-consumer request body.
///
/// # Examples
///
/// ```
/// use delegated_auth::RequestBody;
///
/// let mut body = RequestBody::pending(&b"{}"[..]);
/// assert!(!body.is_ready());
/// assert!(body.take().is_ok());
/// assert!(body.take().is_err());
/// ```
pub struct RequestBody {
    reader: Option<Box<dyn Read + Send>>,
    ready: bool,
}

impl RequestBody {
    /// A body that has not been read yet and must be consumed by the provider.
    pub fn pending(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            ready: false,
        }
    }

    /// A body the framework has already drained, or that was never expected.
    pub fn drained() -> Self {
        Self {
            reader: None,
            ready: true,
        }
    }

    /// Returns true when the body is not available to this provider.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Takes the underlying reader, leaving the body consumed.
    pub fn take(&mut self) -> io::Result<Box<dyn Read + Send>> {
        self.reader.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "request body already consumed")
        })
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::drained()
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBody")
            .field("ready", &self.ready)
            .field("consumed", &self.reader.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_body_is_taken_once() {
        let mut body = RequestBody::pending(io::Cursor::new(b"abc".to_vec()));
        let mut buf = String::new();
        body.take().unwrap().read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "abc");

        let err = body.take().err().expect("second take fails");
        assert!(err.to_string().contains("already consumed"));
    }

    #[test]
    fn taking_a_pending_body_does_not_mark_it_ready() {
        let mut body = RequestBody::pending(io::Cursor::new(b"{}".to_vec()));
        let _ = body.take().unwrap();
        assert!(!body.is_ready());
    }

    #[test]
    fn drained_body_is_ready_and_empty() {
        let mut body = RequestBody::drained();
        assert!(body.is_ready());
        assert!(body.take().is_err());
    }

    #[test]
    fn debug_does_not_leak_body_content() {
        let body = RequestBody::pending(io::Cursor::new(b"password=hunter2".to_vec()));
        let out = format!("{:?}", body);
        assert!(out.contains("ready: false"));
        assert!(!out.contains("hunter2"));
    }
}

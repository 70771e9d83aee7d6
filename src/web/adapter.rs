//! Request adapter for mapping host requests onto [`InboundRequest`].

use std::io::{self, Read};

use crate::request::{InboundRequest, ParameterValues, RequestBody};

/// Owned, framework-agnostic implementation of [`InboundRequest`].
///
/// `RequestAdapter` is the primary integration point between a host
/// framework and this crate. Host glue code builds one per inbound request;
/// it holds simple owned data so the provider stays decoupled from any
/// specific framework's request types.
///
/// # Examples
///
/// ```
/// use delegated_auth::web::RequestAdapter;
/// use delegated_auth::InboundRequest;
///
/// // A form POST the host already parsed into parameters
/// let mut adapter = RequestAdapter::raw();
/// adapter.set_content_type("application/x-www-form-urlencoded");
/// adapter.add_param("token".to_string(), "abc".to_string());
///
/// assert!(!adapter.is_api_style());
/// assert_eq!(adapter.parameter("token"), Some("abc"));
/// assert!(adapter.body_ready());
/// ```
#[derive(Debug, Default)]
pub struct RequestAdapter {
    /// Parameters were pre-parsed by the host API layer
    api_style: bool,
    /// All request parameters, multi-valued
    params: ParameterValues,
    /// Raw Content-Type header
    content_type: Option<String>,
    /// Single-consumer body
    body: RequestBody,
}

impl RequestAdapter {
    /// Creates an adapter for an API-style request whose parameters the host
    /// has already materialized.
    pub fn api() -> Self {
        Self {
            api_style: true,
            ..Self::default()
        }
    }

    /// Creates an adapter for a raw request. The body starts out drained;
    /// attach one with [`set_body`](Self::set_body).
    pub fn raw() -> Self {
        Self::default()
    }

    /// Adds one value to a parameter, keeping earlier values first.
    pub fn add_param(&mut self, key: String, value: String) {
        self.params.entry(key).or_default().push(value);
    }

    /// Sets the `Content-Type` header value.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    /// Attaches an unread body stream.
    pub fn set_body(&mut self, reader: impl Read + Send + 'static) {
        self.body = RequestBody::pending(reader);
    }

    /// Builder-style [`add_param`](Self::add_param).
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_param(key.into(), value.into());
        self
    }

    /// Builder-style [`set_content_type`](Self::set_content_type).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.set_content_type(content_type);
        self
    }

    /// Builder-style [`set_body`](Self::set_body).
    pub fn with_body(mut self, reader: impl Read + Send + 'static) -> Self {
        self.set_body(reader);
        self
    }
}

impl InboundRequest for RequestAdapter {
    fn is_api_style(&self) -> bool {
        self.api_style
    }

    fn parameters(&self) -> &ParameterValues {
        &self.params
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn body_ready(&self) -> bool {
        self.body.is_ready()
    }

    fn take_body(&mut self) -> io::Result<Box<dyn Read + Send>> {
        self.body.take()
    }
}

//! Decides which extraction strategy applies to an inbound request.

use std::fmt;

use crate::media::ContentType;
use crate::request::InboundRequest;

/// The extraction strategy chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Parameters are pre-parsed; read them directly.
    ApiParams,
    /// The body is an unread JSON document.
    JsonBody {
        /// The parsed content type, carrying the charset
        content_type: ContentType,
    },
    /// A form POST carrying a `token`: another mechanism owns it.
    FormToken,
    /// An unread body of a type this provider does not accept.
    Unsupported {
        /// The rejected type without parameters, as it will be reported
        content_type: String,
    },
    /// The body was already consumed or none is expected.
    NoBody,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiParams => write!(f, "api-params"),
            Self::JsonBody { .. } => write!(f, "json-body"),
            Self::FormToken => write!(f, "form-token"),
            Self::Unsupported { .. } => write!(f, "unsupported"),
            Self::NoBody => write!(f, "no-body"),
        }
    }
}

/// Classifies a request without touching its body.
///
/// The body-readiness check runs before any content-type inspection, so a
/// body the framework already drained is never read a second time.
///
/// # Examples
///
/// ```
/// use delegated_auth::web::RequestAdapter;
/// use delegated_auth::{classify, Classification};
///
/// let req = RequestAdapter::raw()
///     .with_content_type("text/plain")
///     .with_body(&b"hello"[..]);
///
/// assert_eq!(
///     classify(&req),
///     Classification::Unsupported { content_type: "text/plain".to_string() }
/// );
/// ```
pub fn classify<R: InboundRequest + ?Sized>(req: &R) -> Classification {
    if req.is_api_style() {
        return Classification::ApiParams;
    }
    if req.body_ready() {
        return Classification::NoBody;
    }

    let raw = match req.content_type() {
        Some(raw) => raw,
        None => {
            return Classification::Unsupported {
                content_type: String::from("(none)"),
            }
        }
    };
    let content_type: ContentType = match raw.parse() {
        Ok(ct) => ct,
        Err(_) => {
            return Classification::Unsupported {
                content_type: raw.trim().to_string(),
            }
        }
    };

    if content_type.is("application", "json") {
        Classification::JsonBody { content_type }
    } else if content_type.is("application", "x-www-form-urlencoded")
        && req.parameter("token").is_some()
    {
        Classification::FormToken
    } else {
        Classification::Unsupported {
            content_type: content_type.essence().to_string(),
        }
    }
}

use std::fmt;
use std::io;

/// Errors surfaced by the delegated authentication provider.
///
/// Every variant is terminal for the request attempt that produced it. A
/// request this provider does not claim is *not* an error: it is reported as
/// `Ok(None)` by [`AuthenticationProvider::authenticate`](crate::AuthenticationProvider::authenticate).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field was absent from the request.
    #[error("required parameter \"{0}\" is missing")]
    MissingParameter(&'static str),

    /// The request body was not a well-formed configuration document.
    #[error("error parsing configuration")]
    MalformedBody(#[source] serde_json::Error),

    /// The request body was declared with a media type this provider does not read.
    #[error("expecting application/json, got {0}")]
    UnsupportedContentType(String),

    /// The declared charset of a JSON body is not a known encoding label.
    #[error("unsupported charset \"{0}\"")]
    UnsupportedCharset(String),

    /// The request body could not be read.
    #[error("error retrieving configuration from the request body")]
    Io(#[from] io::Error),

    /// A mutation was attempted against the read-only session topology.
    #[error("permission denied")]
    PermissionDenied,
}

impl Error {
    /// Returns the kind of this error, for matching without borrowing payloads.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingParameter(_) => ErrorKind::MissingParameter,
            Error::MalformedBody(_) => ErrorKind::MalformedBody,
            Error::UnsupportedContentType(_) => ErrorKind::UnsupportedContentType,
            Error::UnsupportedCharset(_) => ErrorKind::UnsupportedCharset,
            Error::Io(_) => ErrorKind::Io,
            Error::PermissionDenied => ErrorKind::PermissionDenied,
        }
    }
}

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `protocol` or `parameters` absent
    MissingParameter,
    /// JSON shape or syntax invalid
    MalformedBody,
    /// Raw body with a content type other than JSON
    UnsupportedContentType,
    /// Unknown charset label on a JSON body
    UnsupportedCharset,
    /// Body unreadable or already consumed
    Io,
    /// Mutation of a read-only directory
    PermissionDenied,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter => write!(f, "missing parameter"),
            Self::MalformedBody => write!(f, "malformed body"),
            Self::UnsupportedContentType => write!(f, "unsupported content type"),
            Self::UnsupportedCharset => write!(f, "unsupported charset"),
            Self::Io => write!(f, "i/o failure"),
            Self::PermissionDenied => write!(f, "permission denied"),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

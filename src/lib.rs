//! Delegated authentication: request-to-session resolution.
//!
//! A delegated provider trusts that credentials were validated upstream and
//! only supplies *where to connect*. For each inbound request it decides
//! whether the request is its to handle and, if so, reads a connection
//! configuration from it and exposes that configuration as a fixed,
//! read-only session.
//!
//! # Core Types
//!
//! - [`InboundRequest`]: The request abstraction adapted from the host
//! - [`classify`] / [`extract`]: Strategy selection and configuration extraction
//! - [`Configuration`]: Protocol plus named string parameters
//! - [`SessionTopology`]: One user, one connection, one root group
//! - [`SingletonDirectory<T>`]: Read-only single-entry [`Directory`]
//! - [`DelegatedAuthenticationProvider`]: The lifecycle facade
//!
//! # Outcomes
//!
//! | Request                                         | Result                       |
//! |-------------------------------------------------|------------------------------|
//! | API-style, `protocol` present                   | session                      |
//! | API-style, no `protocol`                        | `MissingParameter`           |
//! | unread `application/json` body                  | session, or a body error     |
//! | unread form body with a `token` parameter       | deferred (`Ok(None)`)        |
//! | unread body of any other type                   | `UnsupportedContentType`     |
//! | body already drained                            | deferred (`Ok(None)`)        |
//!
//! # Examples
//!
//! ```
//! use delegated_auth::web::RequestAdapter;
//! use delegated_auth::{AuthenticationProvider, Credentials, DelegatedAuthenticationProvider};
//!
//! let provider = DelegatedAuthenticationProvider::default();
//!
//! // A token exchange belongs to another mechanism
//! let token_post = RequestAdapter::raw()
//!     .with_content_type("application/x-www-form-urlencoded")
//!     .with_param("token", "abc123")
//!     .with_body(&b"token=abc123"[..]);
//! let mut credentials = Credentials::new(token_post);
//! assert!(provider.authenticate(&mut credentials).unwrap().is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod config;
mod configuration;
mod directory;
mod error;
mod extract;
mod intern;
mod media;
mod provider;
mod request;
mod secret;
mod topology;
pub mod web;

pub use classify::{classify, Classification};
pub use config::ProviderConfig;
pub use configuration::{Configuration, ConfigurationBuilder, Parameters};
pub use directory::{Directory, Identifiable, SimpleDirectory, SingletonDirectory};
pub use error::{Error, ErrorKind, Result};
pub use extract::{extract, extract_with_limit, Extraction, DEFAULT_MAX_BODY_BYTES};
pub use intern::{intern, Symbol};
pub use media::ContentType;
pub use provider::{
    AuthenticatedSession, AuthenticationProvider, Credentials, DelegatedAuthenticationProvider,
};
pub use request::{InboundRequest, ParameterValues, RequestBody};
pub use secret::Secret;
pub use topology::{
    ActiveConnection, Connection, ConnectionGroup, ConnectionRecord, SessionTopology, User,
    DEFAULT_CONNECTION, ROOT_GROUP,
};

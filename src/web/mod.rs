//! Web framework integration surface.
//!
//! This module is the boundary between a host's HTTP stack and the
//! provider. Host glue code:
//! 1. Builds a [`RequestAdapter`] from its own request type, flagging
//!    pre-parsed API requests with [`RequestAdapter::api`]
//! 2. Attaches the unread body only when the framework has not drained it
//! 3. Wraps the adapter in [`Credentials`](crate::Credentials) and offers it
//!    to [`DelegatedAuthenticationProvider`](crate::DelegatedAuthenticationProvider)
//!
//! Nothing here depends on a particular framework.
//!
//! # Example Flow
//!
//! ```
//! use delegated_auth::web::RequestAdapter;
//! use delegated_auth::{AuthenticationProvider, Credentials, DelegatedAuthenticationProvider};
//!
//! let provider = DelegatedAuthenticationProvider::default();
//!
//! let adapter = RequestAdapter::api()
//!     .with_param("protocol", "rdp")
//!     .with_param("hostname", "win.internal");
//! let mut credentials = Credentials::new(adapter).with_username("alice");
//!
//! match provider.authenticate(&mut credentials) {
//!     Ok(Some(session)) => assert_eq!(session.configuration().protocol(), "rdp"),
//!     Ok(None) => unreachable!("API requests are always claimed"),
//!     Err(err) => panic!("{}", err),
//! }
//! ```

mod adapter;

pub use adapter::RequestAdapter;

//! The provider facade the host authentication framework talks to.

use std::fmt;

use crate::classify::classify;
use crate::config::ProviderConfig;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::extract::{extract_with_limit, Extraction};
use crate::request::InboundRequest;
use crate::secret::Secret;
use crate::topology::SessionTopology;

/// What the host hands a provider for one authentication attempt.
///
/// The same credentials are offered to each provider in turn, so
/// [`AuthenticationProvider::authenticate`] borrows them mutably rather than
/// consuming them: a deferring provider leaves them for the next one.
pub struct Credentials {
    username: Option<String>,
    password: Option<Secret<String>>,
    remote_address: Option<String>,
    request: Box<dyn InboundRequest + Send>,
}

impl Credentials {
    /// Wraps an inbound request with no user-supplied credentials.
    pub fn new(request: impl InboundRequest + Send + 'static) -> Self {
        Self {
            username: None,
            password: None,
            remote_address: None,
            request: Box::new(request),
        }
    }

    /// Sets the username validated upstream.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password validated upstream.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Secret::new(password.into()));
        self
    }

    /// Sets the address the request came from.
    pub fn with_remote_address(mut self, remote_address: impl Into<String>) -> Self {
        self.remote_address = Some(remote_address.into());
        self
    }

    /// The username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The password, if any.
    pub fn password(&self) -> Option<&Secret<String>> {
        self.password.as_ref()
    }

    /// The remote address, if known.
    pub fn remote_address(&self) -> Option<&str> {
        self.remote_address.as_deref()
    }

    /// The inbound request.
    pub fn request(&self) -> &(dyn InboundRequest + Send) {
        self.request.as_ref()
    }

    /// The inbound request, mutably (needed to take its body).
    pub fn request_mut(&mut self) -> &mut (dyn InboundRequest + Send) {
        self.request.as_mut()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("remote_address", &self.remote_address)
            .field("api_style", &self.request.is_api_style())
            .finish()
    }
}

/// A successful authentication bound to its connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    provider_identifier: String,
    username: Option<String>,
    remote_address: Option<String>,
    configuration: Configuration,
}

impl AuthenticatedSession {
    /// Identifier of the provider that authenticated this session.
    pub fn provider_identifier(&self) -> &str {
        &self.provider_identifier
    }

    /// Username from the credentials, if the host supplied one.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Remote address from the credentials, if known.
    pub fn remote_address(&self) -> Option<&str> {
        self.remote_address.as_deref()
    }

    /// The configuration extracted from the request.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}

/// The lifecycle contract between a host framework and a provider.
///
/// Returning `Ok(None)` from [`authenticate`](Self::authenticate) means "not
/// my request": the host moves on to its next provider.
pub trait AuthenticationProvider {
    /// Identifier of this provider.
    fn identifier(&self) -> &str;

    /// Attempts to authenticate the request carried by `credentials`.
    fn authenticate(&self, credentials: &mut Credentials) -> Result<Option<AuthenticatedSession>>;

    /// Revises a session on re-authentication.
    fn update_authenticated_session(
        &self,
        session: AuthenticatedSession,
        credentials: &mut Credentials,
    ) -> Result<AuthenticatedSession>;

    /// Builds the session context for an authenticated session.
    fn build_context(&self, session: &AuthenticatedSession) -> Result<SessionTopology>;

    /// Revises a session context on re-authentication.
    fn update_session_context(
        &self,
        context: SessionTopology,
        session: &AuthenticatedSession,
    ) -> Result<SessionTopology>;
}

/// Provider that trusts upstream authentication and only supplies the
/// connection configuration carried by the request.
///
/// # Examples
///
/// ```
/// use delegated_auth::web::RequestAdapter;
/// use delegated_auth::{AuthenticationProvider, Credentials, DelegatedAuthenticationProvider, Directory};
///
/// let provider = DelegatedAuthenticationProvider::default();
///
/// let body = r#"{"protocol":"vnc","parameters":{"hostname":"h","port":"5900"}}"#;
/// let request = RequestAdapter::raw()
///     .with_content_type("application/json")
///     .with_body(std::io::Cursor::new(body.as_bytes().to_vec()));
/// let mut credentials = Credentials::new(request);
///
/// let session = provider.authenticate(&mut credentials).unwrap().expect("claimed");
/// let context = provider.build_context(&session).unwrap();
///
/// let connection = context.connections().get("default").unwrap();
/// assert_eq!(connection.configuration().parameter("port"), Some("5900"));
/// assert_eq!(context.self_user().username(), "delegated");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelegatedAuthenticationProvider {
    config: ProviderConfig,
}

impl DelegatedAuthenticationProvider {
    /// Creates a provider with the given settings.
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// The provider's settings.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl AuthenticationProvider for DelegatedAuthenticationProvider {
    fn identifier(&self) -> &str {
        &self.config.identifier
    }

    fn authenticate(&self, credentials: &mut Credentials) -> Result<Option<AuthenticatedSession>> {
        let request = credentials.request_mut();
        let classification = classify(&*request);
        tracing::debug!(
            provider = %self.config.identifier,
            classification = %classification,
            "classified authentication request"
        );

        match extract_with_limit(request, classification, self.config.max_body_bytes) {
            Extraction::Configuration(configuration) => {
                tracing::debug!(
                    provider = %self.config.identifier,
                    protocol = %configuration.protocol(),
                    parameters = configuration.parameters().len(),
                    "connection configuration extracted"
                );
                Ok(Some(AuthenticatedSession {
                    provider_identifier: self.config.identifier.clone(),
                    username: credentials.username.clone(),
                    remote_address: credentials.remote_address.clone(),
                    configuration,
                }))
            }
            Extraction::Deferred => {
                tracing::debug!(provider = %self.config.identifier, "request deferred");
                Ok(None)
            }
            Extraction::Failed(err) => {
                tracing::debug!(
                    provider = %self.config.identifier,
                    error_kind = %err.kind(),
                    "configuration extraction failed"
                );
                Err(err)
            }
        }
    }

    fn update_authenticated_session(
        &self,
        session: AuthenticatedSession,
        _credentials: &mut Credentials,
    ) -> Result<AuthenticatedSession> {
        Ok(session)
    }

    fn build_context(&self, session: &AuthenticatedSession) -> Result<SessionTopology> {
        Ok(SessionTopology::build(
            self.config.identifier.clone(),
            self.config.user_name.clone(),
            session.configuration.clone(),
        ))
    }

    fn update_session_context(
        &self,
        context: SessionTopology,
        _session: &AuthenticatedSession,
    ) -> Result<SessionTopology> {
        Ok(context)
    }
}

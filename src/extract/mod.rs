//! Turns a classified request into a connection configuration.

mod json;

use crate::classify::Classification;
use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::intern::intern;
use crate::request::InboundRequest;

/// Default cap on how much of a JSON body is read.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Outcome of extracting a configuration from a request.
#[derive(Debug)]
pub enum Extraction {
    /// The request carried a configuration.
    Configuration(Configuration),
    /// This provider does not claim the request; the host should try the
    /// next authentication mechanism.
    Deferred,
    /// The request was claimed but its configuration could not be read.
    Failed(Error),
}

impl Extraction {
    /// Collapses the outcome into the shape the provider returns to its host:
    /// deferral becomes `Ok(None)`.
    pub fn into_result(self) -> Result<Option<Configuration>> {
        match self {
            Extraction::Configuration(config) => Ok(Some(config)),
            Extraction::Deferred => Ok(None),
            Extraction::Failed(err) => Err(err),
        }
    }

    /// Returns true for [`Extraction::Deferred`].
    pub fn is_deferred(&self) -> bool {
        matches!(self, Extraction::Deferred)
    }
}

impl From<Result<Configuration>> for Extraction {
    fn from(result: Result<Configuration>) -> Self {
        match result {
            Ok(config) => Extraction::Configuration(config),
            Err(err) => Extraction::Failed(err),
        }
    }
}

/// Extracts a configuration using the default body limit.
///
/// # Examples
///
/// ```
/// use delegated_auth::web::RequestAdapter;
/// use delegated_auth::{classify, extract, Extraction};
///
/// let mut req = RequestAdapter::api()
///     .with_param("protocol", "ssh")
///     .with_param("hostname", "bastion");
///
/// let classification = classify(&req);
/// match extract(&mut req, classification) {
///     Extraction::Configuration(config) => {
///         assert_eq!(config.protocol(), "ssh");
///         assert_eq!(config.parameter("hostname"), Some("bastion"));
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
pub fn extract<R: InboundRequest + ?Sized>(req: &mut R, classification: Classification) -> Extraction {
    extract_with_limit(req, classification, DEFAULT_MAX_BODY_BYTES)
}

/// Extracts a configuration, reading at most `max_body_bytes` of a JSON body.
pub fn extract_with_limit<R: InboundRequest + ?Sized>(
    req: &mut R,
    classification: Classification,
    max_body_bytes: u64,
) -> Extraction {
    match classification {
        Classification::ApiParams => from_parameters(req).into(),
        Classification::JsonBody { content_type } => {
            from_json_body(req, content_type.charset(), max_body_bytes).into()
        }
        Classification::FormToken | Classification::NoBody => Extraction::Deferred,
        Classification::Unsupported { content_type } => {
            Extraction::Failed(Error::UnsupportedContentType(content_type))
        }
    }
}

/// Copies pre-parsed parameters through, first value per name.
///
/// `protocol` itself stays in the parameter map alongside the explicit field.
fn from_parameters<R: InboundRequest + ?Sized>(req: &R) -> Result<Configuration> {
    let protocol = req
        .parameter("protocol")
        .filter(|p| !p.is_empty())
        .ok_or(Error::MissingParameter("protocol"))?;

    let mut builder = Configuration::builder(protocol);
    for (name, values) in req.parameters() {
        if let Some(first) = values.first() {
            builder.set_parameter(intern(name), first.clone());
        }
    }
    Ok(builder.build())
}

fn from_json_body<R: InboundRequest + ?Sized>(
    req: &mut R,
    charset: Option<&str>,
    max_body_bytes: u64,
) -> Result<Configuration> {
    let body = req.take_body()?;
    let document = json::read_document(body, charset, max_body_bytes)?;

    let protocol = document
        .protocol
        .filter(|p| !p.is_empty())
        .ok_or(Error::MissingParameter("protocol"))?;
    let parameters = document
        .parameters
        .ok_or(Error::MissingParameter("parameters"))?;

    let mut builder = Configuration::builder(protocol);
    for (name, value) in parameters {
        builder.set_parameter(name, value);
    }
    Ok(builder.build())
}

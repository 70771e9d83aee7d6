use std::collections::HashMap;

use crate::intern::{intern, Symbol};

/// Connection parameters keyed by interned name.
pub type Parameters = HashMap<Symbol, String>;

/// A target-service connection configuration.
///
/// A protocol identifier plus unordered named string parameters. Built once
/// through [`ConfigurationBuilder`] and immutable afterwards.
///
/// # Examples
///
/// ```
/// use delegated_auth::Configuration;
///
/// let config = Configuration::builder("vnc")
///     .parameter("hostname", "desktop.internal")
///     .parameter("port", "5900")
///     .build();
///
/// assert_eq!(config.protocol(), "vnc");
/// assert_eq!(config.parameter("port"), Some("5900"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    protocol: String,
    parameters: Parameters,
}

impl Configuration {
    /// Starts building a configuration for `protocol`.
    pub fn builder(protocol: impl Into<String>) -> ConfigurationBuilder {
        ConfigurationBuilder {
            protocol: protocol.into(),
            parameters: Parameters::new(),
        }
    }

    /// The protocol identifier, e.g. `vnc` or `rdp`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Looks up a single parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// All parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}

/// Accumulates parameters for a [`Configuration`]. Later writes to the same
/// name replace earlier ones.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    protocol: String,
    parameters: Parameters,
}

impl ConfigurationBuilder {
    /// Sets a parameter, interning its name.
    pub fn parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_parameter(intern(name), value.into());
        self
    }

    /// Sets a parameter whose name is already interned.
    pub fn set_parameter(&mut self, name: Symbol, value: String) {
        self.parameters.insert(name, value);
    }

    /// Replaces the protocol.
    pub fn set_protocol(&mut self, protocol: impl Into<String>) {
        self.protocol = protocol.into();
    }

    /// Finishes the configuration.
    pub fn build(self) -> Configuration {
        Configuration {
            protocol: self.protocol,
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let config = Configuration::builder("rdp")
            .parameter("port", "3389")
            .parameter("port", "3390")
            .build();
        assert_eq!(config.parameter("port"), Some("3390"));
        assert_eq!(config.parameters().len(), 1);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Configuration::builder("ssh")
            .parameter("hostname", "h")
            .parameter("username", "u")
            .build();
        let b = Configuration::builder("ssh")
            .parameter("username", "u")
            .parameter("hostname", "h")
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn set_protocol_replaces_the_initial_protocol() {
        let mut builder = Configuration::builder("vnc").parameter("hostname", "h");
        builder.set_protocol("rdp");
        let config = builder.build();
        assert_eq!(config.protocol(), "rdp");
        assert_eq!(config.parameter("hostname"), Some("h"));
    }

    #[test]
    fn missing_parameter_is_none() {
        let config = Configuration::builder("vnc").build();
        assert_eq!(config.parameter("hostname"), None);
    }
}

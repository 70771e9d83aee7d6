//! The fixed session topology handed to the host after authentication.
//!
//! A session always holds exactly one user, one connection named
//! [`DEFAULT_CONNECTION`], and one root group named [`ROOT_GROUP`] containing
//! that connection. Nothing is nested and nothing is persisted.

use std::collections::BTreeSet;

use crate::configuration::Configuration;
use crate::directory::{Identifiable, SimpleDirectory, SingletonDirectory};

/// Identifier and display name of the single connection.
pub const DEFAULT_CONNECTION: &str = "default";

/// Identifier and display name of the root connection group.
pub const ROOT_GROUP: &str = "ROOT";

/// The session's user and what it may reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    connection_identifiers: BTreeSet<String>,
    connection_group_identifiers: BTreeSet<String>,
}

impl User {
    /// The user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Connections this user may open.
    pub fn connection_identifiers(&self) -> &BTreeSet<String> {
        &self.connection_identifiers
    }

    /// Connection groups this user may browse.
    pub fn connection_group_identifiers(&self) -> &BTreeSet<String> {
        &self.connection_group_identifiers
    }
}

impl Identifiable for User {
    fn identifier(&self) -> &str {
        &self.username
    }
}

/// A connection to the remote service, wrapping its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    identifier: String,
    name: String,
    parent_identifier: String,
    configuration: Configuration,
}

impl Connection {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the group containing this connection.
    pub fn parent_identifier(&self) -> &str {
        &self.parent_identifier
    }

    /// The extracted connection configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}

impl Identifiable for Connection {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// A group of connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionGroup {
    identifier: String,
    name: String,
    connection_identifiers: BTreeSet<String>,
    child_group_identifiers: BTreeSet<String>,
}

impl ConnectionGroup {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connections directly inside this group.
    pub fn connection_identifiers(&self) -> &BTreeSet<String> {
        &self.connection_identifiers
    }

    /// Groups directly inside this group.
    pub fn child_group_identifiers(&self) -> &BTreeSet<String> {
        &self.child_group_identifiers
    }
}

impl Identifiable for ConnectionGroup {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// A connection currently in use by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConnection {
    /// Identifier of this tunnel
    pub identifier: String,
    /// The connection it was opened against
    pub connection_identifier: String,
    /// Who opened it
    pub username: String,
    /// Where it was opened from, if known
    pub remote_host: Option<String>,
}

impl Identifiable for ActiveConnection {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// A historical record of a connection's use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// The connection used
    pub connection_identifier: String,
    /// Who used it
    pub username: String,
    /// Where it was used from, if known
    pub remote_host: Option<String>,
}

/// The in-memory session context built for one authenticated request.
///
/// # Examples
///
/// ```
/// use delegated_auth::{Configuration, Directory, SessionTopology};
///
/// let config = Configuration::builder("vnc").parameter("hostname", "h").build();
/// let topology = SessionTopology::build("delegated", "delegated", config);
///
/// let connection = topology.connections().get("default").unwrap();
/// assert_eq!(connection.parent_identifier(), "ROOT");
/// assert_eq!(connection.configuration().protocol(), "vnc");
/// assert!(topology.root_connection_group().connection_identifiers().contains("default"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTopology {
    provider_identifier: String,
    users: SingletonDirectory<User>,
    connections: SingletonDirectory<Connection>,
    connection_groups: SingletonDirectory<ConnectionGroup>,
    active_connections: SimpleDirectory<ActiveConnection>,
}

impl SessionTopology {
    /// Builds the single-user, single-connection topology around `configuration`.
    pub fn build(
        provider_identifier: impl Into<String>,
        user_name: impl Into<String>,
        configuration: Configuration,
    ) -> Self {
        let user_name = user_name.into();

        let connection = Connection {
            identifier: DEFAULT_CONNECTION.to_string(),
            name: DEFAULT_CONNECTION.to_string(),
            parent_identifier: ROOT_GROUP.to_string(),
            configuration,
        };
        let connections = SingletonDirectory::new(DEFAULT_CONNECTION, connection);
        let connection_ids = BTreeSet::from([connections.identifier().to_string()]);

        let group = ConnectionGroup {
            identifier: ROOT_GROUP.to_string(),
            name: ROOT_GROUP.to_string(),
            connection_identifiers: connection_ids.clone(),
            child_group_identifiers: BTreeSet::new(),
        };
        let connection_groups = SingletonDirectory::new(ROOT_GROUP, group);
        let group_ids = BTreeSet::from([connection_groups.identifier().to_string()]);

        let user = User {
            username: user_name.clone(),
            connection_identifiers: connection_ids,
            connection_group_identifiers: group_ids,
        };

        Self {
            provider_identifier: provider_identifier.into(),
            users: SingletonDirectory::new(user_name, user),
            connections,
            connection_groups,
            active_connections: SimpleDirectory::new(),
        }
    }

    /// Identifier of the provider that produced this session.
    pub fn provider_identifier(&self) -> &str {
        &self.provider_identifier
    }

    /// The session's own user.
    pub fn self_user(&self) -> &User {
        self.users.value()
    }

    /// The root connection group.
    pub fn root_connection_group(&self) -> &ConnectionGroup {
        self.connection_groups.value()
    }

    /// The user directory.
    pub fn users(&self) -> &SingletonDirectory<User> {
        &self.users
    }

    /// Mutable access to the user directory; every mutation is refused.
    pub fn users_mut(&mut self) -> &mut SingletonDirectory<User> {
        &mut self.users
    }

    /// The connection directory.
    pub fn connections(&self) -> &SingletonDirectory<Connection> {
        &self.connections
    }

    /// Mutable access to the connection directory; every mutation is refused.
    pub fn connections_mut(&mut self) -> &mut SingletonDirectory<Connection> {
        &mut self.connections
    }

    /// The connection group directory.
    pub fn connection_groups(&self) -> &SingletonDirectory<ConnectionGroup> {
        &self.connection_groups
    }

    /// Mutable access to the group directory; every mutation is refused.
    pub fn connection_groups_mut(&mut self) -> &mut SingletonDirectory<ConnectionGroup> {
        &mut self.connection_groups
    }

    /// Connections currently open in this session.
    pub fn active_connections(&self) -> &SimpleDirectory<ActiveConnection> {
        &self.active_connections
    }

    /// Mutable access to the active-connection directory.
    pub fn active_connections_mut(&mut self) -> &mut SimpleDirectory<ActiveConnection> {
        &mut self.active_connections
    }

    /// Past connection use. Nothing is recorded, so this is always empty.
    pub fn connection_history(&self) -> Vec<ConnectionRecord> {
        Vec::new()
    }
}

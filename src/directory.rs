//! Directory abstractions over identifiable session entities.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};

/// An entity addressable by a string identifier.
pub trait Identifiable {
    /// Returns the identifier of this entity.
    fn identifier(&self) -> &str;
}

/// A queryable, possibly mutable, collection of entities.
///
/// This is the surface the host uses to browse users, connections and
/// connection groups of a session.
pub trait Directory<T: Identifiable> {
    /// Returns the entity with the given identifier.
    fn get(&self, identifier: &str) -> Option<&T>;

    /// Returns the entities matching `identifiers`.
    fn get_all(&self, identifiers: &[&str]) -> Vec<&T>;

    /// Returns every identifier in the directory.
    fn identifiers(&self) -> BTreeSet<String>;

    /// Adds an entity.
    fn add(&mut self, object: T) -> Result<()>;

    /// Replaces the entity sharing `object`'s identifier.
    fn update(&mut self, object: T) -> Result<()>;

    /// Removes the entity with the given identifier.
    fn remove(&mut self, identifier: &str) -> Result<()>;
}

/// A read-only directory holding exactly one entity.
///
/// Every mutation fails with [`Error::PermissionDenied`] and leaves the
/// directory unchanged.
///
/// # Examples
///
/// ```
/// use delegated_auth::{Directory, ErrorKind, Identifiable, SingletonDirectory};
///
/// #[derive(Debug, PartialEq)]
/// struct Room(String);
///
/// impl Identifiable for Room {
///     fn identifier(&self) -> &str {
///         &self.0
///     }
/// }
///
/// let mut rooms = SingletonDirectory::new("lobby", Room("lobby".to_string()));
/// assert!(rooms.get("lobby").is_some());
/// assert!(rooms.get_all(&["lobby", "attic"]).len() == 1);
/// assert!(rooms.get_all(&["attic"]).is_empty());
///
/// let err = rooms.remove("lobby").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::PermissionDenied);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonDirectory<T> {
    identifier: String,
    value: T,
}

impl<T> SingletonDirectory<T> {
    /// Wraps `value` under `identifier`.
    pub fn new(identifier: impl Into<String>, value: T) -> Self {
        Self {
            identifier: identifier.into(),
            value,
        }
    }

    /// Returns the single entity.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the single identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl<T: Identifiable> Directory<T> for SingletonDirectory<T> {
    fn get(&self, identifier: &str) -> Option<&T> {
        (identifier == self.identifier).then_some(&self.value)
    }

    /// All-or-nothing: the single entity is returned only when `identifiers`
    /// covers the directory's whole key set.
    fn get_all(&self, identifiers: &[&str]) -> Vec<&T> {
        if identifiers.contains(&self.identifier.as_str()) {
            vec![&self.value]
        } else {
            Vec::new()
        }
    }

    fn identifiers(&self) -> BTreeSet<String> {
        BTreeSet::from([self.identifier.clone()])
    }

    fn add(&mut self, _object: T) -> Result<()> {
        Err(Error::PermissionDenied)
    }

    fn update(&mut self, _object: T) -> Result<()> {
        Err(Error::PermissionDenied)
    }

    fn remove(&mut self, _identifier: &str) -> Result<()> {
        Err(Error::PermissionDenied)
    }
}

/// A mutable in-memory directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDirectory<T> {
    objects: HashMap<String, T>,
}

impl<T> SimpleDirectory<T> {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    /// Number of entities held.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true when the directory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T> Default for SimpleDirectory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable> Directory<T> for SimpleDirectory<T> {
    fn get(&self, identifier: &str) -> Option<&T> {
        self.objects.get(identifier)
    }

    fn get_all(&self, identifiers: &[&str]) -> Vec<&T> {
        identifiers
            .iter()
            .filter_map(|id| self.objects.get(*id))
            .collect()
    }

    fn identifiers(&self) -> BTreeSet<String> {
        self.objects.keys().cloned().collect()
    }

    fn add(&mut self, object: T) -> Result<()> {
        self.objects.insert(object.identifier().to_string(), object);
        Ok(())
    }

    fn update(&mut self, object: T) -> Result<()> {
        self.add(object)
    }

    fn remove(&mut self, identifier: &str) -> Result<()> {
        self.objects.remove(identifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(&'static str);

    impl Identifiable for Item {
        fn identifier(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn singleton_get_matches_only_its_key() {
        let dir = SingletonDirectory::new("a", Item("a"));
        assert_eq!(dir.get("a"), Some(&Item("a")));
        assert_eq!(dir.get("b"), None);
    }

    #[test]
    fn singleton_get_all_is_all_or_nothing() {
        let dir = SingletonDirectory::new("a", Item("a"));
        assert_eq!(dir.get_all(&["a"]).len(), 1);
        assert_eq!(dir.get_all(&["b", "a", "c"]).len(), 1);
        assert!(dir.get_all(&["b"]).is_empty());
        assert!(dir.get_all(&[]).is_empty());
    }

    #[test]
    fn singleton_rejects_every_mutation() {
        let mut dir = SingletonDirectory::new("a", Item("a"));
        let before = dir.clone();

        assert_eq!(dir.add(Item("b")).unwrap_err().kind(), ErrorKind::PermissionDenied);
        assert_eq!(dir.update(Item("a")).unwrap_err().kind(), ErrorKind::PermissionDenied);
        assert_eq!(dir.remove("a").unwrap_err().kind(), ErrorKind::PermissionDenied);
        assert_eq!(dir, before);
    }

    #[test]
    fn singleton_identifiers_is_one_key() {
        let dir = SingletonDirectory::new("a", Item("a"));
        assert_eq!(dir.identifiers(), BTreeSet::from(["a".to_string()]));
    }

    #[test]
    fn simple_directory_supports_mutation() {
        let mut dir = SimpleDirectory::new();
        assert!(dir.is_empty());

        dir.add(Item("x")).unwrap();
        dir.add(Item("y")).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.get_all(&["x", "z"]), vec![&Item("x")]);

        dir.remove("x").unwrap();
        assert_eq!(dir.identifiers(), BTreeSet::from(["y".to_string()]));
    }
}

//! Entities exempt from providing contact information.
//!
//! Private suffixes normally need at least one maintainer contact. For a
//! few entities, typically zones operated by a government, contact
//! information isn’t expected. Which entities these are is policy rather
//! than a rule of the validator, so it is kept as data: a
//! [`ContactExemptions`] set that can be read from a file, or any other
//! [`ContactPolicy`] such as a closure.

use std::collections::HashSet;
use std::path::Path;
use std::{fs, io};

//------------ ContactPolicy -------------------------------------------------

/// Decides whether an entity needs to provide contact information.
pub trait ContactPolicy {
    /// Returns whether the entity with the given name is exempt.
    fn is_exempt(&self, entity: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ContactPolicy for F {
    fn is_exempt(&self, entity: &str) -> bool {
        (self)(entity)
    }
}

//------------ ContactExemptions ---------------------------------------------

/// A set of entity names exempt from providing contact information.
///
/// Names are compared exactly, as they appear in the list’s entity header.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContactExemptions {
    names: HashSet<String>,
}

impl ContactExemptions {
    /// Creates an empty set. Nobody is exempt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from an iterator of entity names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContactExemptions {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a set from text.
    ///
    /// The text contains one entity name per line. Leading and trailing
    /// white space is removed. Empty lines and lines starting with `#` or
    /// `//` are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| {
                    !line.is_empty()
                        && !line.starts_with('#')
                        && !line.starts_with("//")
                }),
        )
    }

    /// Reads a set from the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Adds an entity name to the set.
    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Returns whether the set contains the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ContactPolicy for ContactExemptions {
    fn is_exempt(&self, entity: &str) -> bool {
        self.contains(entity)
    }
}

//============ Testing =======================================================

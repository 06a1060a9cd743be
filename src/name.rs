//! Domain names as they appear in the suffix list.
//!
//! The list contains names in their textual presentation form, one name per
//! rule. This module provides [`DomainName`], an owned sequence of labels
//! that is kept in canonical form: all ASCII letters are lowercased and a
//! trailing root dot is dropped. The canonical string of a name is what the
//! validation rules use to decide whether two rules are the same.
//!
//! Labels may contain ASCII letters, digits, the hyphen, the underscore, and
//! any non-ASCII character. The latter allows internationalized names to be
//! given in their Unicode form, which the list does.

use core::str::FromStr;
use std::fmt;

//------------ Label ---------------------------------------------------------

/// A single label of a domain name.
///
/// The label is stored in canonical form, i.e., with ASCII letters
/// lowercased. It is never empty and never longer than [`Label::MAX_LEN`]
/// octets.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Label(String);

impl Label {
    /// Domain name labels have a maximum length of 63 octets.
    pub const MAX_LEN: usize = 63;

    /// Creates a label from its textual form.
    pub fn from_text(text: &str) -> Result<Self, NameError> {
        if text.is_empty() {
            return Err(NameError::EmptyLabel);
        }
        if text.len() > Self::MAX_LEN {
            return Err(NameError::LongLabel);
        }
        if let Some(ch) = text.chars().find(|ch| !Self::is_allowed(*ch)) {
            return Err(NameError::DisallowedChar(ch));
        }
        Ok(Label(text.to_ascii_lowercase()))
    }

    /// Returns the label’s text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the label in octets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the label is empty.
    ///
    /// This is never true for a label that was successfully created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_allowed(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
    }
}

//--- Display

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//------------ DomainName ----------------------------------------------------

/// A domain name in canonical form.
///
/// Names are relative to the root but are always rendered without the
/// trailing dot. The empty name is not a valid suffix and cannot be
/// created.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DomainName {
    /// The labels, leftmost label first.
    labels: Vec<Label>,
}

/// # Creation
///
impl DomainName {
    /// Domain names in presentation form have a maximum length of 253
    /// octets without the trailing dot.
    ///
    /// This corresponds to the 255 octets limit of the wire format.
    pub const MAX_LEN: usize = 253;

    /// Creates a domain name from a sequence of labels.
    pub fn from_labels(labels: Vec<Label>) -> Result<Self, NameError> {
        if labels.is_empty() {
            return Err(NameError::EmptyName);
        }
        let res = DomainName { labels };
        if res.text_len() > Self::MAX_LEN {
            return Err(NameError::LongName);
        }
        Ok(res)
    }

    /// Returns a new name with `label` prepended to this name.
    ///
    /// This is used to turn the exception of a wildcard rule into the full
    /// name it excludes. The method fails if `label` isn’t a valid label or
    /// the resulting name would be too long.
    pub fn add_prefix(&self, label: &str) -> Result<Self, NameError> {
        let label = Label::from_text(label)?;
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.push(label);
        labels.extend(self.labels.iter().cloned());
        Self::from_labels(labels)
    }
}

/// # Properties
///
impl DomainName {
    /// Returns an iterator over the labels, leftmost label first.
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.labels.iter()
    }

    /// Returns the number of labels in the name.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the length of the presentation form in octets.
    fn text_len(&self) -> usize {
        self.labels.iter().map(Label::len).sum::<usize>()
            + self.labels.len().saturating_sub(1)
    }
}

//--- FromStr

impl FromStr for DomainName {
    type Err = NameError;

    /// Parses a name from its textual form.
    ///
    /// A single trailing dot is accepted and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix('.').unwrap_or(s);
        if s.is_empty() {
            return Err(NameError::EmptyName);
        }
        let labels = s
            .split('.')
            .map(Label::from_text)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_labels(labels)
    }
}

//--- Display

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut labels = self.labels.iter();
        if let Some(first) = labels.next() {
            first.fmt(f)?;
        }
        for label in labels {
            write!(f, ".{}", label)?;
        }
        Ok(())
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for DomainName {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DomainName {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        DomainName::from_str(&s).map_err(serde::de::Error::custom)
    }
}

//------------ NameError -----------------------------------------------------

/// An error happened while creating a domain name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name did not contain any labels.
    EmptyName,

    /// An empty label was encountered.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 253 octets.
    LongName,

    /// A disallowed character was encountered.
    DisallowedChar(char),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameError::EmptyName => f.write_str("empty domain name"),
            NameError::EmptyLabel => f.write_str("empty domain name label"),
            NameError::LongLabel => {
                f.write_str("domain name label longer than 63 bytes")
            }
            NameError::LongName => {
                f.write_str("domain name longer than 253 bytes")
            }
            NameError::DisallowedChar(ch) => {
                write!(f, "disallowed character {:?} in domain name", ch)
            }
        }
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

//! The parsed suffix list.
//!
//! A suffix list is turned into a tree of blocks by a parser that lives
//! outside of this crate. The root of the tree is a [`List`]. It contains
//! [`Section`]s which in turn contain the [`Suffixes`] blocks of the
//! individual entities. Each of those holds the actual rules, either as a
//! plain [`Suffix`] or as a [`Wildcard`] with its exceptions.
//!
//! Every block carries a _changed_ flag. The parser sets it when it diffs
//! the list against a baseline revision and the block differs from it. The
//! validation rules only report problems that involve at least one changed
//! block, so that a change is never blamed for problems it didn’t introduce.
//! The flag is never recomputed once the tree has been built.
//!
//! All types have builder-style methods so that a parser (or a test) can
//! assemble a tree conveniently:
//!
//! ```
//! use psl_validate::list::{List, Section, Suffix, Suffixes};
//!
//! let list = List::new()
//!     .push(Section::new("PRIVATE DOMAINS").push(
//!         Suffixes::new("Example Ltd")
//!             .changed(true)
//!             .push(Suffix::new("example.com".parse().unwrap())),
//!     ));
//! assert!(list.section("PRIVATE DOMAINS").is_some());
//! ```

use crate::name::DomainName;
use std::fmt;

pub use self::walk::{blocks_of_type, Tree};

mod walk;

//------------ SourceRange ---------------------------------------------------

/// The lines of the source file a block was parsed from.
///
/// Lines are counted from one and both ends are inclusive.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub first_line: usize,
    pub last_line: usize,
}

impl SourceRange {
    /// Creates a range covering the given lines.
    #[must_use]
    pub fn new(first_line: usize, last_line: usize) -> Self {
        SourceRange {
            first_line,
            last_line,
        }
    }

    /// Creates a range covering a single line.
    #[must_use]
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.first_line >= self.last_line {
            write!(f, "line {}", self.first_line)
        } else {
            write!(f, "lines {}-{}", self.first_line, self.last_line)
        }
    }
}

//------------ Block ---------------------------------------------------------

/// A block below the root of the list.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    Section(Section),
    Suffixes(Suffixes),
    Suffix(Suffix),
    Wildcard(Wildcard),
    Comment(Comment),
}

impl Block {
    /// Returns the block as a tree node.
    pub fn as_tree(&self) -> &dyn Tree {
        match self {
            Block::Section(inner) => inner,
            Block::Suffixes(inner) => inner,
            Block::Suffix(inner) => inner,
            Block::Wildcard(inner) => inner,
            Block::Comment(inner) => inner,
        }
    }

    /// Returns whether the block differs from the baseline.
    pub fn is_changed(&self) -> bool {
        self.as_tree().is_changed()
    }
}

//--- From

impl From<Section> for Block {
    fn from(src: Section) -> Self {
        Block::Section(src)
    }
}

impl From<Suffixes> for Block {
    fn from(src: Suffixes) -> Self {
        Block::Suffixes(src)
    }
}

impl From<Suffix> for Block {
    fn from(src: Suffix) -> Self {
        Block::Suffix(src)
    }
}

impl From<Wildcard> for Block {
    fn from(src: Wildcard) -> Self {
        Block::Wildcard(src)
    }
}

impl From<Comment> for Block {
    fn from(src: Comment) -> Self {
        Block::Comment(src)
    }
}

//------------ List ----------------------------------------------------------

/// The root of a parsed suffix list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    pub blocks: Vec<Block>,
}

impl List {
    /// The name of the section holding the ICANN-delegated suffixes.
    pub const ICANN_SECTION: &'static str = "ICANN DOMAINS";

    /// The name of the section holding privately registered suffixes.
    pub const PRIVATE_SECTION: &'static str = "PRIVATE DOMAINS";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a top-level block.
    #[must_use]
    pub fn push(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Returns all blocks of type `T` in document order.
    pub fn blocks_of_type<T: Tree>(&self) -> Vec<&T> {
        blocks_of_type(self)
    }

    /// Returns the first section with the given name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.blocks_of_type::<Section>()
            .into_iter()
            .find(|section| section.name == name)
    }
}

//------------ Section -------------------------------------------------------

/// A named top-level section of the list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub name: String,
    pub source_range: SourceRange,
    pub blocks: Vec<Block>,
    pub changed: bool,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }

    #[must_use]
    pub fn at(mut self, source_range: SourceRange) -> Self {
        self.source_range = source_range;
        self
    }

    #[must_use]
    pub fn push(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }
}

//------------ Suffixes ------------------------------------------------------

/// The block of suffixes registered by a single entity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suffixes {
    pub info: Info,
    pub source_range: SourceRange,
    pub blocks: Vec<Block>,
    pub changed: bool,
}

impl Suffixes {
    /// Creates a new, empty block for the entity with the given name.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Suffixes {
            info: Info {
                name: entity.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }

    #[must_use]
    pub fn at(mut self, source_range: SourceRange) -> Self {
        self.source_range = source_range;
        self
    }

    #[must_use]
    pub fn maintainer(mut self, maintainer: Maintainer) -> Self {
        self.info.maintainers.push(maintainer);
        self
    }

    #[must_use]
    pub fn push(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }
}

//------------ Info ----------------------------------------------------------

/// Information about the entity that registered a block of suffixes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Info {
    /// The name of the entity.
    ///
    /// This is empty if the block’s header didn’t provide one.
    pub name: String,

    /// Web sites of the entity.
    pub urls: Vec<String>,

    /// Contacts responsible for the entity’s entries.
    pub maintainers: Vec<Maintainer>,

    /// Any header lines that didn’t fit elsewhere.
    pub other: Vec<String>,
}

//------------ Maintainer ----------------------------------------------------

/// A contact responsible for a block of suffixes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maintainer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub github: Option<String>,
}

impl Maintainer {
    /// Creates a maintainer known only by their email address.
    #[must_use]
    pub fn email(email: impl Into<String>) -> Self {
        Maintainer {
            email: Some(email.into()),
            ..Default::default()
        }
    }
}

//------------ Suffix --------------------------------------------------------

/// A single public suffix.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suffix {
    pub domain: DomainName,
    pub source_range: SourceRange,
    pub changed: bool,
}

impl Suffix {
    #[must_use]
    pub fn new(domain: DomainName) -> Self {
        Suffix {
            domain,
            source_range: SourceRange::default(),
            changed: false,
        }
    }

    #[must_use]
    pub fn changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }

    #[must_use]
    pub fn at(mut self, source_range: SourceRange) -> Self {
        self.source_range = source_range;
        self
    }
}

//------------ Wildcard ------------------------------------------------------

/// A wildcard suffix.
///
/// The wildcard makes every label directly below `domain` a public suffix,
/// except for the labels listed in `exceptions`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wildcard {
    /// The base name below which the wildcard applies.
    pub domain: DomainName,

    /// Labels excluded from the wildcard, in source order.
    pub exceptions: Vec<String>,

    pub source_range: SourceRange,
    pub changed: bool,
}

impl Wildcard {
    #[must_use]
    pub fn new(domain: DomainName) -> Self {
        Wildcard {
            domain,
            exceptions: Vec::new(),
            source_range: SourceRange::default(),
            changed: false,
        }
    }

    #[must_use]
    pub fn except(mut self, label: impl Into<String>) -> Self {
        self.exceptions.push(label.into());
        self
    }

    #[must_use]
    pub fn changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }

    #[must_use]
    pub fn at(mut self, source_range: SourceRange) -> Self {
        self.source_range = source_range;
        self
    }
}

//------------ Comment -------------------------------------------------------

/// A comment or run of blank lines.
///
/// Comments are kept in the tree so it can be rendered back into text.
/// They are irrelevant for validation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub text: Vec<String>,
    pub source_range: SourceRange,
    pub changed: bool,
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> DomainName {
        s.parse().unwrap()
    }

    #[test]
    fn source_range_display() {
        assert_eq!(SourceRange::line(7).to_string(), "line 7");
        assert_eq!(SourceRange::new(7, 9).to_string(), "lines 7-9");
    }

    #[test]
    fn section_lookup() {
        let list = List::new()
            .push(Comment::default())
            .push(Section::new(List::ICANN_SECTION))
            .push(Section::new(List::PRIVATE_SECTION).changed(true))
            .push(Section::new(List::PRIVATE_SECTION));
        let private = list.section(List::PRIVATE_SECTION).unwrap();
        assert!(private.changed);
        assert!(list.section("OTHER DOMAINS").is_none());
    }

    #[test]
    fn changed_flag() {
        let block: Block = Suffix::new(name("example.com")).changed(true).into();
        assert!(block.is_changed());
        let block: Block = Wildcard::new(name("example.com")).into();
        assert!(!block.is_changed());
    }
}

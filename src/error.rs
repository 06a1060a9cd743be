//! Validation errors.
//!
//! Every problem found in a list is reported as an [`Error`]. The error
//! borrows the block or blocks that caused it from the list, so that a
//! caller can render a precise message or point at the source lines.

use crate::list::{Section, SourceRange, Suffix, Suffixes, Wildcard};
use crate::name::{DomainName, NameError};
use std::{error, fmt, io};

//------------ Error ---------------------------------------------------------

/// A problem found in a suffix list.
#[derive(Debug)]
pub enum Error<'a> {
    /// A changed entity block has no entity name.
    MissingEntityName { suffixes: &'a Suffixes },

    /// A changed entity block has no maintainer contact.
    MissingEntityEmail { suffixes: &'a Suffixes },

    /// A changed section has a name that isn’t allowed.
    UnknownSection { section: &'a Section },

    /// Two sections share a name and at least one of them changed.
    DuplicateSection {
        section: &'a Section,
        first: &'a Section,
    },

    /// One of the required sections is missing.
    MissingSection { name: &'static str },

    /// A suffix appears twice and at least one of them changed.
    ///
    /// For wildcards, `name` is the rule as written, i.e., with the
    /// leading `*.`.
    DuplicateSuffix {
        name: String,
        block: DuplicateBlock<'a>,
    },

    /// A wildcard exception is also registered as a suffix.
    ConflictingSuffixAndException {
        suffix: &'a Suffix,
        wildcard: &'a Wildcard,
    },

    /// An exception of a changed wildcard doesn’t make a valid name.
    InvalidException {
        wildcard: &'a Wildcard,
        exception: &'a str,
        error: NameError,
    },

    /// The `_psl` record of a changed suffix names the wrong change.
    ///
    /// If `declared` is `None`, the suffix has TXT records at `_psl` but
    /// none of them contains a change URL.
    IncorrectDnsRecord {
        domain: &'a DomainName,
        source_range: SourceRange,
        expected: u64,
        declared: Option<u64>,
    },

    /// Looking up the `_psl` record of a suffix failed.
    DnsLookupFailed {
        domain: &'a DomainName,
        source_range: SourceRange,
        error: LookupError,
    },

    /// A changed entity contains a wildcard.
    ///
    /// Wildcards can’t be verified through DNS yet and need to be checked
    /// by hand.
    UnsupportedWildcardVerification { wildcard: &'a Wildcard },
}

impl<'a> Error<'a> {
    /// Returns the location in the source the error refers to.
    ///
    /// This is `None` for errors that refer to something missing.
    pub fn source_range(&self) -> Option<SourceRange> {
        match *self {
            Error::MissingEntityName { suffixes }
            | Error::MissingEntityEmail { suffixes } => {
                Some(suffixes.source_range)
            }
            Error::UnknownSection { section }
            | Error::DuplicateSection { section, .. } => {
                Some(section.source_range)
            }
            Error::MissingSection { .. } => None,
            Error::DuplicateSuffix { ref block, .. } => {
                Some(block.source_range())
            }
            Error::ConflictingSuffixAndException { wildcard, .. }
            | Error::InvalidException { wildcard, .. }
            | Error::UnsupportedWildcardVerification { wildcard } => {
                Some(wildcard.source_range)
            }
            Error::IncorrectDnsRecord { source_range, .. }
            | Error::DnsLookupFailed { source_range, .. } => {
                Some(source_range)
            }
        }
    }
}

impl<'a> fmt::Display for Error<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingEntityName { suffixes } => write!(
                f,
                "{}: suffix block has no entity name",
                suffixes.source_range
            ),
            Error::MissingEntityEmail { suffixes } => write!(
                f,
                "{}: suffix block for {:?} has no contact information",
                suffixes.source_range, suffixes.info.name
            ),
            Error::UnknownSection { section } => write!(
                f,
                "{}: unknown section {:?}",
                section.source_range, section.name
            ),
            Error::DuplicateSection { section, first } => write!(
                f,
                "{}: section {:?} already defined at {}",
                section.source_range, section.name, first.source_range
            ),
            Error::MissingSection { name } => {
                write!(f, "missing required section {:?}", name)
            }
            Error::DuplicateSuffix { ref name, ref block } => write!(
                f,
                "{}: suffix {} already defined at {}",
                block.source_range(),
                name,
                block.first_source_range()
            ),
            Error::ConflictingSuffixAndException { suffix, wildcard } => {
                write!(
                    f,
                    "{}: suffix {} conflicts with an exception \
                     of wildcard *.{} at {}",
                    suffix.source_range,
                    suffix.domain,
                    wildcard.domain,
                    wildcard.source_range
                )
            }
            Error::InvalidException {
                wildcard,
                exception,
                error,
            } => write!(
                f,
                "{}: invalid exception {:?} of wildcard *.{}: {}",
                wildcard.source_range, exception, wildcard.domain, error
            ),
            Error::IncorrectDnsRecord {
                domain,
                source_range,
                expected,
                declared: Some(declared),
            } => write!(
                f,
                "{}: _psl.{} names change {} instead of {}",
                source_range, domain, declared, expected
            ),
            Error::IncorrectDnsRecord {
                domain,
                source_range,
                expected,
                declared: None,
            } => write!(
                f,
                "{}: _psl.{} has no record naming change {}",
                source_range, domain, expected
            ),
            Error::DnsLookupFailed {
                domain,
                source_range,
                ref error,
            } => write!(
                f,
                "{}: looking up _psl.{} failed: {}",
                source_range, domain, error
            ),
            Error::UnsupportedWildcardVerification { wildcard } => write!(
                f,
                "{}: DNS verification of wildcard *.{} is not supported",
                wildcard.source_range, wildcard.domain
            ),
        }
    }
}

impl<'a> error::Error for Error<'a> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidException { error, .. } => Some(error),
            Error::DnsLookupFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

//------------ DuplicateBlock ------------------------------------------------

/// The pair of blocks involved in a duplicate suffix.
#[derive(Clone, Copy, Debug)]
pub enum DuplicateBlock<'a> {
    /// Two plain suffixes, the later one first.
    Suffix {
        suffix: &'a Suffix,
        first: &'a Suffix,
    },

    /// Two wildcards with the same base name, the later one first.
    Wildcard {
        wildcard: &'a Wildcard,
        first: &'a Wildcard,
    },
}

impl<'a> DuplicateBlock<'a> {
    /// Returns the location of the later of the two blocks.
    pub fn source_range(&self) -> SourceRange {
        match *self {
            DuplicateBlock::Suffix { suffix, .. } => suffix.source_range,
            DuplicateBlock::Wildcard { wildcard, .. } => wildcard.source_range,
        }
    }

    /// Returns the location of the earlier of the two blocks.
    pub fn first_source_range(&self) -> SourceRange {
        match *self {
            DuplicateBlock::Suffix { first, .. } => first.source_range,
            DuplicateBlock::Wildcard { first, .. } => first.source_range,
        }
    }
}

//------------ LookupError ---------------------------------------------------

/// Looking up a `_psl` record failed.
#[derive(Debug)]
pub enum LookupError {
    /// The name to look up couldn’t be constructed.
    Name(NameError),

    /// The resolver didn’t accept the name to look up.
    QueryName(String),

    /// The resolver failed to produce an answer.
    Io(io::Error),

    /// No answer arrived within the configured time.
    Timeout,

    /// The answer carried an error response code, e.g., NXDOMAIN.
    ///
    /// The value is the textual form of the response code.
    Response(String),

    /// The name exists but has no TXT records.
    NoRecords,

    /// The answer could not be parsed.
    Parse(String),

    /// A record contained a change URL with an unusable number.
    BadChangeId(String),
}

impl From<NameError> for LookupError {
    fn from(err: NameError) -> Self {
        LookupError::Name(err)
    }
}

impl From<io::Error> for LookupError {
    fn from(err: io::Error) -> Self {
        LookupError::Io(err)
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LookupError::Name(ref err) => err.fmt(f),
            LookupError::QueryName(ref err) => {
                write!(f, "cannot query name: {}", err)
            }
            LookupError::Io(ref err) => err.fmt(f),
            LookupError::Timeout => f.write_str("query timed out"),
            LookupError::Response(ref rcode) => {
                write!(f, "server responded with {}", rcode)
            }
            LookupError::NoRecords => f.write_str("no TXT records found"),
            LookupError::Parse(ref err) => {
                write!(f, "malformed answer: {}", err)
            }
            LookupError::BadChangeId(ref text) => {
                write!(f, "invalid change number {:?}", text)
            }
        }
    }
}

impl error::Error for LookupError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            LookupError::Name(err) => Some(err),
            LookupError::Io(err) => Some(err),
            _ => None,
        }
    }
}

//============ Testing =======================================================

//! Looking up the `_psl` records of suffixes.
//!
//! Whoever asks for a private suffix to be added to the list proves that
//! they control the domain by publishing a TXT record at the `_psl` label
//! below it. The record contains the URL of the change request that adds
//! the suffix, e.g.:
//!
//! ```text
//! _psl.example.com. IN TXT "https://github.com/publicsuffix/list/pull/482"
//! ```
//!
//! The number at the end of the URL is the change identifier. This module
//! finds it.
//!
//! Resolution is abstracted by the [`TxtResolver`] trait. It is implemented
//! for the stub resolver of the `domain` crate, which uses the system’s
//! resolver configuration.

use crate::error::LookupError;
use crate::name::DomainName;
use core::future::Future;
use core::pin::Pin;
use core::str::FromStr;
use domain::base::iana::Rtype;
use domain::base::name::Name;
use domain::rdata::Txt;
use domain::resolv::StubResolver;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::trace;

//------------ Module Configuration ------------------------------------------

/// The label below a suffix that holds its verification record.
pub const PSL_LABEL: &str = "_psl";

/// A URL whose last path segment is a number.
static CHANGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://.*/([0-9]+)").expect("invalid change URL pattern")
});

//------------ TxtResolver ---------------------------------------------------

/// A type that can look up TXT records.
pub trait TxtResolver {
    /// The future resolving into the records.
    type Query<'a>: Future<Output = Result<Vec<String>, LookupError>>
    where
        Self: 'a;

    /// Returns a future looking up the TXT records at `qname`.
    ///
    /// The future resolves into the records in the order the resolver
    /// returned them. The character strings of each record are joined
    /// into a single string. If the name exists but has no TXT records,
    /// the future resolves into an empty vec. It is up to the caller to
    /// decide whether that is an error. [`lookup_change_id`] treats it as
    /// [`LookupError::NoRecords`].
    ///
    /// A name that doesn’t exist or any other response code than NOERROR
    /// is an error.
    fn query_txt<'a>(&'a self, qname: &DomainName) -> Self::Query<'a>;
}

impl TxtResolver for StubResolver {
    type Query<'a> = Pin<
        Box<dyn Future<Output = Result<Vec<String>, LookupError>> + 'a>,
    >;

    fn query_txt<'a>(&'a self, qname: &DomainName) -> Self::Query<'a> {
        let qname = Name::<Vec<u8>>::from_str(&qname.to_string())
            .map_err(|err| LookupError::QueryName(err.to_string()));
        Box::pin(async move {
            let answer = self.query((qname?, Rtype::TXT)).await?;
            if !answer.no_error() {
                return Err(LookupError::Response(
                    answer.header().rcode().to_string(),
                ));
            }
            let section = answer
                .answer()
                .map_err(|err| LookupError::Parse(err.to_string()))?;
            let mut res = Vec::new();
            for record in section.limit_to::<Txt<_>>() {
                let record =
                    record.map_err(|err| LookupError::Parse(err.to_string()))?;
                let text: Vec<u8> =
                    record.data().iter().flatten().copied().collect();
                res.push(String::from_utf8_lossy(&text).into_owned());
            }
            Ok(res)
        })
    }
}

//------------ parse_change_id -----------------------------------------------

/// Extracts the change identifier from the text of a TXT record.
///
/// Returns `Ok(None)` if the text doesn’t contain a change URL and an
/// error if it does but the number doesn’t fit.
pub fn parse_change_id(text: &str) -> Result<Option<u64>, LookupError> {
    let number = match CHANGE_URL.captures(text).and_then(|caps| caps.get(1))
    {
        Some(number) => number.as_str(),
        None => return Ok(None),
    };
    number
        .parse()
        .map(Some)
        .map_err(|_| LookupError::BadChangeId(number.into()))
}

//------------ lookup_change_id ----------------------------------------------

/// Looks up the change identifier published for a suffix.
///
/// Queries the TXT records at `_psl.<domain>` and returns the identifier
/// from the first record that contains a change URL. Returns `Ok(None)` if
/// there are records but none of them contains a change URL. If there are
/// no TXT records at all, the lookup fails with
/// [`LookupError::NoRecords`].
///
/// The lookup fails with [`LookupError::Timeout`] if it takes longer than
/// `timeout`.
pub async fn lookup_change_id<R: TxtResolver>(
    resolver: &R,
    domain: &DomainName,
    timeout: Duration,
) -> Result<Option<u64>, LookupError> {
    let qname = domain.add_prefix(PSL_LABEL)?;
    trace!("Looking up TXT records for {}", qname);
    let records = tokio::time::timeout(timeout, resolver.query_txt(&qname))
        .await
        .map_err(|_| LookupError::Timeout)??;
    if records.is_empty() {
        trace!("{} has no TXT records", qname);
        return Err(LookupError::NoRecords);
    }
    for text in &records {
        if let Some(id) = parse_change_id(text)? {
            trace!("{} declares change {}", qname, id);
            return Ok(Some(id));
        }
    }
    trace!("{} has no change URL in {} record(s)", qname, records.len());
    Ok(None)
}

//============ Testing =======================================================

//! The online checks.

use crate::conf::ValidateConf;
use crate::error::{Error, LookupError};
use crate::list::{blocks_of_type, List, Section, Suffix, Suffixes, Wildcard};
use crate::lookup::{lookup_change_id, TxtResolver};
use core::future::{pending, Future};
use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

//------------ OnlineReport --------------------------------------------------

/// The outcome of an online validation that may have been cancelled.
#[derive(Debug)]
pub struct OnlineReport<'a> {
    /// The problems found, in document order.
    pub errors: Vec<Error<'a>>,

    /// Whether validation stopped before all lookups were done.
    pub cancelled: bool,
}

//------------ validate_online -----------------------------------------------

/// Runs all checks that need network access.
///
/// For every changed entity in the private section, the `_psl` TXT record
/// of each of its suffixes is looked up via `resolver`. A failed lookup
/// is reported for the suffix and validation continues with the next one.
/// If `expected` is given, the record of each changed suffix has to name
/// that change.
///
/// Lookups run concurrently as configured in `conf` but the errors are
/// always returned in the order of the suffixes in the list.
pub async fn validate_online<'a, R: TxtResolver>(
    list: &'a List,
    expected: Option<u64>,
    resolver: &R,
    conf: &ValidateConf,
) -> Vec<Error<'a>> {
    validate_online_until(list, expected, resolver, conf, pending())
        .await
        .errors
}

/// Runs all checks that need network access until cancelled.
///
/// This is the same as [`validate_online`] except that validation stops
/// once `cancel` resolves. No new lookups are started after that and
/// lookups still in flight are dropped. The report contains all problems
/// found up to that point.
pub async fn validate_online_until<'a, R, C>(
    list: &'a List,
    expected: Option<u64>,
    resolver: &R,
    conf: &ValidateConf,
    cancel: C,
) -> OnlineReport<'a>
where
    R: TxtResolver,
    C: Future<Output = ()>,
{
    // Every check gets the position of its block so the errors can be
    // put back into document order.
    let mut found: Vec<(usize, Error<'a>)> = Vec::new();
    let mut lookups: Vec<(usize, &'a Suffix)> = Vec::new();
    let mut pos = 0;
    for suffixes in changed_entities(list) {
        for suffix in blocks_of_type::<Suffix>(suffixes) {
            lookups.push((pos, suffix));
            pos += 1;
        }
        for wildcard in blocks_of_type::<Wildcard>(suffixes) {
            found.push((pos, unsupported(wildcard)));
            pos += 1;
        }
    }
    debug!("Looking up _psl records for {} suffix(es)", lookups.len());

    let timeout = conf.lookup_timeout;
    let results = stream::iter(lookups)
        .map(move |(pos, suffix)| async move {
            let res = lookup_change_id(resolver, &suffix.domain, timeout).await;
            (pos, suffix, res)
        })
        .buffer_unordered(conf.concurrency());
    tokio::pin!(results);
    tokio::pin!(cancel);

    let mut cancelled = false;
    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => {
                warn!("Online validation cancelled");
                cancelled = true;
                break;
            }
            item = results.next() => match item {
                Some((pos, suffix, res)) => {
                    if let Some(err) = check_declared(suffix, expected, res) {
                        found.push((pos, err));
                    }
                }
                None => break,
            }
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    let errors: Vec<_> = found.into_iter().map(|(_, err)| err).collect();
    debug!("Online validation found {} problem(s)", errors.len());
    OnlineReport { errors, cancelled }
}

/// Returns the changed entities of all private sections.
fn changed_entities(list: &List) -> impl Iterator<Item = &Suffixes> + '_ {
    list.blocks_of_type::<Section>()
        .into_iter()
        .filter(|section| section.name == List::PRIVATE_SECTION)
        .flat_map(|section| blocks_of_type::<Suffixes>(section))
        .filter(|suffixes| suffixes.changed)
}

/// Turns the outcome of a lookup into an error, if necessary.
///
/// The declared change is only compared if the suffix itself changed and
/// the caller knows which change to expect.
fn check_declared<'a>(
    suffix: &'a Suffix,
    expected: Option<u64>,
    declared: Result<Option<u64>, LookupError>,
) -> Option<Error<'a>> {
    let declared = match declared {
        Ok(declared) => declared,
        Err(error) => {
            warn!("Looking up _psl.{} failed: {}", suffix.domain, error);
            return Some(Error::DnsLookupFailed {
                domain: &suffix.domain,
                source_range: suffix.source_range,
                error,
            });
        }
    };
    let expected = expected.filter(|_| suffix.changed)?;
    if declared == Some(expected) {
        return None;
    }
    Some(Error::IncorrectDnsRecord {
        domain: &suffix.domain,
        source_range: suffix.source_range,
        expected,
        declared,
    })
}

fn unsupported(wildcard: &Wildcard) -> Error<'_> {
    warn!("Cannot verify wildcard *.{} through DNS", wildcard.domain);
    Error::UnsupportedWildcardVerification { wildcard }
}

//============ Testing =======================================================

//! Helpers shared by the integration tests.
#![allow(dead_code)]

use core::future::Future;
use core::pin::Pin;
use psl_validate::error::LookupError;
use psl_validate::list::{Suffix, Wildcard};
use psl_validate::lookup::TxtResolver;
use psl_validate::name::DomainName;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

//------------ MockResolver --------------------------------------------------

/// A resolver answering from memory.
///
/// Names without an entry produce an NXDOMAIN error. Every answer can be
/// delayed to simulate a slow server. All queried names are recorded in
/// the order the queries were started.
#[derive(Debug, Default)]
pub struct MockResolver {
    entries: HashMap<String, Entry>,
    queried: Mutex<Vec<String>>,
}

#[derive(Clone, Debug)]
struct Entry {
    records: Vec<String>,
    delay: Duration,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds TXT records for a name.
    pub fn txt(self, qname: &str, records: &[&str]) -> Self {
        self.delayed_txt(qname, records, Duration::ZERO)
    }

    /// Adds TXT records for a name that are only returned after `delay`.
    pub fn delayed_txt(
        mut self,
        qname: &str,
        records: &[&str],
        delay: Duration,
    ) -> Self {
        self.entries.insert(
            qname.into(),
            Entry {
                records: records.iter().map(|s| String::from(*s)).collect(),
                delay,
            },
        );
        self
    }

    /// Returns the names queried so far.
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

impl TxtResolver for MockResolver {
    type Query<'a> = Pin<
        Box<dyn Future<Output = Result<Vec<String>, LookupError>> + 'a>,
    >;

    fn query_txt<'a>(&'a self, qname: &DomainName) -> Self::Query<'a> {
        let qname = qname.to_string();
        self.queried.lock().unwrap().push(qname.clone());
        let entry = self.entries.get(&qname).cloned();
        Box::pin(async move {
            let entry = match entry {
                Some(entry) => entry,
                None => return Err(LookupError::Response("NXDOMAIN".into())),
            };
            if !entry.delay.is_zero() {
                tokio::time::sleep(entry.delay).await;
            }
            Ok(entry.records)
        })
    }
}

//------------ Block helpers -------------------------------------------------

pub fn name(s: &str) -> DomainName {
    s.parse().unwrap()
}

pub fn suffix(s: &str, line: usize) -> Suffix {
    Suffix::new(name(s)).at(psl_validate::list::SourceRange::line(line))
}

pub fn wildcard(s: &str, line: usize) -> Wildcard {
    Wildcard::new(name(s)).at(psl_validate::list::SourceRange::line(line))
}

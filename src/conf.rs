//! Validation configuration.

use crate::exempt::ContactExemptions;
use std::time::Duration;

//------------ ValidateConf --------------------------------------------------

/// Options for validating a list.
///
/// The default configuration exempts no entity from providing contact
/// information, allows ten seconds per DNS lookup, and keeps up to sixteen
/// lookups in flight.
#[derive(Clone, Debug)]
pub struct ValidateConf {
    /// Entities that don’t need maintainer contacts.
    pub exemptions: ContactExemptions,

    /// How long to wait for the answer to a single `_psl` lookup.
    pub lookup_timeout: Duration,

    /// How many `_psl` lookups may be in flight at the same time.
    ///
    /// A value of zero is treated as one.
    pub max_concurrent_lookups: usize,
}

impl ValidateConf {
    /// The default timeout for a single lookup.
    pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

    /// The default number of lookups in flight.
    pub const DEFAULT_CONCURRENT_LOOKUPS: usize = 16;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exemptions(mut self, exemptions: ContactExemptions) -> Self {
        self.exemptions = exemptions;
        self
    }

    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, max: usize) -> Self {
        self.max_concurrent_lookups = max;
        self
    }

    /// Returns the effective number of concurrent lookups.
    pub(crate) fn concurrency(&self) -> usize {
        self.max_concurrent_lookups.max(1)
    }
}

impl Default for ValidateConf {
    fn default() -> Self {
        ValidateConf {
            exemptions: ContactExemptions::default(),
            lookup_timeout: Self::DEFAULT_LOOKUP_TIMEOUT,
            max_concurrent_lookups: Self::DEFAULT_CONCURRENT_LOOKUPS,
        }
    }
}

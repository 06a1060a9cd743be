//! The offline checks.

use crate::conf::ValidateConf;
use crate::error::{DuplicateBlock, Error};
use crate::exempt::ContactPolicy;
use crate::list::{blocks_of_type, List, Section, Suffix, Suffixes, Wildcard};
use crate::name::DomainName;
use std::collections::HashMap;
use tracing::debug;

/// The sections every list must have, in the order they are reported.
const WANTED_SECTIONS: [&str; 2] = [List::ICANN_SECTION, List::PRIVATE_SECTION];

//------------ validate_offline ----------------------------------------------

/// Runs all checks that don’t need network access.
///
/// Entities are exempt from providing contact information according to
/// `conf.exemptions`.
pub fn validate_offline<'a>(
    list: &'a List,
    conf: &ValidateConf,
) -> Vec<Error<'a>> {
    validate_offline_with(list, &conf.exemptions)
}

/// Runs all checks that don’t need network access with the given policy.
///
/// The errors of the individual checks are returned in this order: entity
/// metadata of the private section, expected sections, and suffix
/// uniqueness.
pub fn validate_offline_with<'a, P: ContactPolicy + ?Sized>(
    list: &'a List,
    policy: &P,
) -> Vec<Error<'a>> {
    let mut res = Vec::new();
    if let Some(section) = list.section(List::PRIVATE_SECTION) {
        entity_metadata(section, policy, &mut res);
    }
    expected_sections(list, &mut res);
    suffix_uniqueness(list, &mut res);
    debug!("Offline validation found {} problem(s)", res.len());
    res
}

//------------ entity_metadata -----------------------------------------------

/// Checks that changed entities have a name and a contact.
fn entity_metadata<'a, P: ContactPolicy + ?Sized>(
    section: &'a Section,
    policy: &P,
    res: &mut Vec<Error<'a>>,
) {
    for suffixes in blocks_of_type::<Suffixes>(section) {
        if !suffixes.changed {
            continue;
        }
        if suffixes.info.name.is_empty() {
            res.push(Error::MissingEntityName { suffixes });
        }
        if suffixes.info.maintainers.is_empty()
            && !policy.is_exempt(&suffixes.info.name)
        {
            res.push(Error::MissingEntityEmail { suffixes });
        }
    }
}

//------------ expected_sections ---------------------------------------------

/// Checks that exactly the two wanted sections are present.
fn expected_sections<'a>(list: &'a List, res: &mut Vec<Error<'a>>) {
    let mut found: HashMap<&str, &Section> = HashMap::new();
    for section in list.blocks_of_type::<Section>() {
        let name = section.name.as_str();
        if !WANTED_SECTIONS.contains(&name) && section.changed {
            res.push(Error::UnknownSection { section });
            continue;
        }
        match found.get(name).copied() {
            Some(first) if section.changed || first.changed => {
                res.push(Error::DuplicateSection { section, first });
            }
            _ => {
                found.insert(name, section);
            }
        }
    }

    for name in WANTED_SECTIONS {
        if !found.contains_key(name) {
            res.push(Error::MissingSection { name });
        }
    }
}

//------------ suffix_uniqueness ---------------------------------------------

/// Checks that suffixes and wildcards appear only once.
///
/// Also checks that no exception of a wildcard is registered as a suffix.
fn suffix_uniqueness<'a>(list: &'a List, res: &mut Vec<Error<'a>>) {
    let mut suffixes: HashMap<&DomainName, &Suffix> = HashMap::new();
    let mut wildcards: HashMap<&DomainName, &Wildcard> = HashMap::new();

    for suffix in list.blocks_of_type::<Suffix>() {
        match suffixes.get(&suffix.domain).copied() {
            Some(first) if suffix.changed || first.changed => {
                res.push(Error::DuplicateSuffix {
                    name: suffix.domain.to_string(),
                    block: DuplicateBlock::Suffix { suffix, first },
                });
            }
            _ => {
                suffixes.insert(&suffix.domain, suffix);
            }
        }
    }

    for wildcard in list.blocks_of_type::<Wildcard>() {
        match wildcards.get(&wildcard.domain).copied() {
            Some(first) if wildcard.changed || first.changed => {
                res.push(Error::DuplicateSuffix {
                    name: format!("*.{}", wildcard.domain),
                    block: DuplicateBlock::Wildcard { wildcard, first },
                });
            }
            _ => {
                wildcards.insert(&wildcard.domain, wildcard);
            }
        }

        for exception in &wildcard.exceptions {
            let name = match wildcard.domain.add_prefix(exception) {
                Ok(name) => name,
                Err(error) => {
                    // Broken exceptions that predate the change are left
                    // alone.
                    if wildcard.changed {
                        res.push(Error::InvalidException {
                            wildcard,
                            exception,
                            error,
                        });
                    }
                    continue;
                }
            };
            if let Some(&suffix) = suffixes.get(&name) {
                if wildcard.changed || suffix.changed {
                    res.push(Error::ConflictingSuffixAndException {
                        suffix,
                        wildcard,
                    });
                }
            }
        }
    }
}

//============ Testing =======================================================

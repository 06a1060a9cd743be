//! Validating the Public Suffix List.
//!
//! This crate checks a parsed suffix list before changes to it are
//! accepted. It doesn’t parse the list itself. Instead, a parser produces
//! a [`List`][list::List], a tree of sections, entity blocks, and suffixes,
//! with each block marked whether it was changed relative to a baseline
//! revision. The rules in this crate then look at that tree and report
//! every problem that involves at least one changed block.
//!
//! # Modules
//!
//! * [list] contains the tree of blocks the rules work on and a function
//!   to collect blocks of a certain type from it,
//! * [name] contains the domain name type used for suffixes,
//! * [validate] contains the two validation passes, and
//! * [error] contains the errors they produce.
//!
//! The offline pass, [`validate_offline`], checks the structure of the
//! list. The online pass, [`validate_online`], looks up a `_psl` TXT record
//! for every suffix of a changed private entity and compares the change
//! identifier it contains with the change under review. How these records
//! are looked up lives in [lookup]. Both passes are configured through
//! [`ValidateConf`][conf::ValidateConf] which also carries the
//! [exemptions][exempt] from the contact information requirement.
//!
//! # Example
//!
//! ```no_run
//! use psl_validate::conf::ValidateConf;
//! use psl_validate::list::{List, Section, Suffix, Suffixes};
//! use psl_validate::{validate_offline, validate_online};
//! use domain::resolv::StubResolver;
//!
//! # async fn run() {
//! let list = List::new()
//!     .push(Section::new("ICANN DOMAINS"))
//!     .push(Section::new("PRIVATE DOMAINS").push(
//!         Suffixes::new("Example Ltd")
//!             .changed(true)
//!             .push(Suffix::new("example.com".parse().unwrap()).changed(true)),
//!     ));
//! let conf = ValidateConf::default();
//!
//! for err in validate_offline(&list, &conf) {
//!     println!("{}", err);
//! }
//! let resolver = StubResolver::new();
//! for err in validate_online(&list, Some(482), &resolver, &conf).await {
//!     println!("{}", err);
//! }
//! # }
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serializing and deserializing the block tree via
//!   [serde](https://serde.rs/), so it can be handed over by a parser
//!   running elsewhere.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod conf;
pub mod error;
pub mod exempt;
pub mod list;
pub mod logging;
pub mod lookup;
pub mod name;
pub mod validate;

pub use self::error::Error;
pub use self::validate::{
    validate_offline, validate_offline_with, validate_online,
    validate_online_until, OnlineReport,
};

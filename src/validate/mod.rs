//! Validating a suffix list.
//!
//! Validation happens in two independent passes. The offline pass,
//! [`validate_offline`], only looks at the list itself: it checks that
//! the expected sections are there, that no suffix appears twice, and that
//! the entities owning private suffixes have provided a name and a
//! contact. It does no I/O and always produces the same errors for the
//! same list.
//!
//! The online pass, [`validate_online`], looks up the `_psl` TXT record of
//! every suffix of a changed private entity. The record has to exist and,
//! if the caller knows which change is being validated, name exactly that
//! change.
//!
//! Both passes collect all problems they find rather than stopping at the
//! first one, and both report them in the order of the blocks in the list.
//! A problem is only reported if at least one block involved is marked as
//! changed.

pub use self::offline::{validate_offline, validate_offline_with};
pub use self::online::{validate_online, validate_online_until, OnlineReport};

mod offline;
mod online;

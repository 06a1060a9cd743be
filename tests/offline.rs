mod common;

use common::{suffix, wildcard};
use psl_validate::conf::ValidateConf;
use psl_validate::error::DuplicateBlock;
use psl_validate::exempt::ContactExemptions;
use psl_validate::list::{List, Maintainer, Section, SourceRange, Suffixes};
use psl_validate::{validate_offline, validate_offline_with, Error};
use rstest::rstest;

/// Returns a well-formed list where nothing changed.
fn baseline() -> List {
    List::new()
        .push(
            Section::new("ICANN DOMAINS")
                .at(SourceRange::new(1, 10))
                .push(
                    Suffixes::new("Example Registry")
                        .push(suffix("com", 2))
                        .push(suffix("example", 3)),
                ),
        )
        .push(
            Section::new("PRIVATE DOMAINS")
                .at(SourceRange::new(11, 30))
                .push(
                    Suffixes::new("Example Ltd")
                        .maintainer(Maintainer::email("dns@example.com"))
                        .push(suffix("example.com", 13))
                        .push(wildcard("cloud.example.com", 14).except("www")),
                ),
        )
}

fn kinds(errs: &[Error]) -> Vec<&'static str> {
    errs.iter()
        .map(|err| match err {
            Error::MissingEntityName { .. } => "MissingEntityName",
            Error::MissingEntityEmail { .. } => "MissingEntityEmail",
            Error::UnknownSection { .. } => "UnknownSection",
            Error::DuplicateSection { .. } => "DuplicateSection",
            Error::MissingSection { .. } => "MissingSection",
            Error::DuplicateSuffix { .. } => "DuplicateSuffix",
            Error::ConflictingSuffixAndException { .. } => {
                "ConflictingSuffixAndException"
            }
            Error::InvalidException { .. } => "InvalidException",
            Error::IncorrectDnsRecord { .. } => "IncorrectDnsRecord",
            Error::DnsLookupFailed { .. } => "DnsLookupFailed",
            Error::UnsupportedWildcardVerification { .. } => {
                "UnsupportedWildcardVerification"
            }
        })
        .collect()
}

#[test]
fn baseline_is_clean() {
    let list = baseline();
    assert!(validate_offline(&list, &ValidateConf::default()).is_empty());
}

#[rstest]
#[case(&[], &["ICANN DOMAINS", "PRIVATE DOMAINS"])]
#[case(&["ICANN DOMAINS"], &["PRIVATE DOMAINS"])]
#[case(&["PRIVATE DOMAINS"], &["ICANN DOMAINS"])]
#[case(&["PRIVATE DOMAINS", "ICANN DOMAINS"], &[])]
fn missing_sections(#[case] present: &[&str], #[case] missing: &[&str]) {
    let list = present
        .iter()
        .fold(List::new(), |list, name| list.push(Section::new(*name)));
    let errs = validate_offline(&list, &ValidateConf::default());
    let reported: Vec<_> = errs
        .iter()
        .map(|err| match *err {
            Error::MissingSection { name } => name,
            ref err => panic!("unexpected error {}", err),
        })
        .collect();
    assert_eq!(reported, missing);
}

#[rstest]
#[case(false, false, 0)]
#[case(true, false, 1)]
#[case(false, true, 1)]
#[case(true, true, 1)]
fn duplicate_sections(
    #[case] first_changed: bool,
    #[case] second_changed: bool,
    #[case] expected: usize,
) {
    let list = List::new()
        .push(Section::new("ICANN DOMAINS").changed(first_changed))
        .push(Section::new("PRIVATE DOMAINS"))
        .push(Section::new("ICANN DOMAINS").changed(second_changed));
    let errs = validate_offline(&list, &ValidateConf::default());
    assert_eq!(errs.len(), expected);
    assert!(errs
        .iter()
        .all(|err| matches!(err, Error::DuplicateSection { .. })));
}

#[rstest]
#[case(false, false, 0)]
#[case(true, false, 1)]
#[case(false, true, 1)]
#[case(true, true, 1)]
fn duplicate_suffixes(
    #[case] first_changed: bool,
    #[case] second_changed: bool,
    #[case] expected: usize,
) {
    let list = baseline().push(
        Section::new("PRIVATE DOMAINS").push(
            Suffixes::new("Other Ltd")
                .maintainer(Maintainer::email("dns@other.example"))
                .push(suffix("shop.example", 40).changed(first_changed))
                .push(suffix("shop.example", 41).changed(second_changed)),
        ),
    );
    let errs: Vec<_> = validate_offline(&list, &ValidateConf::default())
        .into_iter()
        .filter(|err| matches!(err, Error::DuplicateSuffix { .. }))
        .collect();
    assert_eq!(errs.len(), expected);
    if let Some(Error::DuplicateSuffix {
        name,
        block: DuplicateBlock::Suffix { suffix, first },
    }) = errs.first()
    {
        assert_eq!(name, "shop.example");
        assert_eq!(suffix.source_range, SourceRange::line(41));
        assert_eq!(first.source_range, SourceRange::line(40));
    }
}

#[test]
fn wildcard_exception_conflicts_with_suffix() {
    let list = List::new()
        .push(Section::new("ICANN DOMAINS"))
        .push(
            Section::new("PRIVATE DOMAINS").push(
                Suffixes::new("Example Ltd")
                    .maintainer(Maintainer::email("dns@example.com"))
                    .push(suffix("x.example.com", 5))
                    .push(wildcard("example.com", 6).except("x").changed(true)),
            ),
        );
    let errs = validate_offline(&list, &ValidateConf::default());
    assert_eq!(kinds(&errs), ["ConflictingSuffixAndException"]);
    match errs[0] {
        Error::ConflictingSuffixAndException { suffix, wildcard } => {
            assert_eq!(suffix.source_range, SourceRange::line(5));
            assert_eq!(wildcard.source_range, SourceRange::line(6));
        }
        ref err => panic!("unexpected error {}", err),
    }
}

#[test]
fn entity_metadata() {
    let list = List::new()
        .push(Section::new("ICANN DOMAINS"))
        .push(
            Section::new("PRIVATE DOMAINS")
                .push(
                    Suffixes::new("")
                        .changed(true)
                        .push(suffix("a.example", 3)),
                )
                .push(
                    Suffixes::new("Ministry of Examples")
                        .changed(true)
                        .push(suffix("gov.example", 5)),
                ),
        );

    let errs = validate_offline(&list, &ValidateConf::default());
    assert_eq!(
        kinds(&errs),
        ["MissingEntityName", "MissingEntityEmail", "MissingEntityEmail"]
    );

    let conf = ValidateConf::default().with_exemptions(
        ContactExemptions::from_names(["Ministry of Examples"]),
    );
    let errs = validate_offline(&list, &conf);
    assert_eq!(kinds(&errs), ["MissingEntityName", "MissingEntityEmail"]);

    // An exempt empty name still has to be fixed.
    let errs = validate_offline_with(&list, &|name: &str| {
        name.is_empty() || name.starts_with("Ministry of ")
    });
    assert_eq!(kinds(&errs), ["MissingEntityName"]);
}

#[test]
fn entity_metadata_only_checks_private_section() {
    let list = List::new()
        .push(
            Section::new("ICANN DOMAINS")
                .push(Suffixes::new("").changed(true).push(suffix("a", 2))),
        )
        .push(Section::new("PRIVATE DOMAINS"));
    assert!(validate_offline(&list, &ValidateConf::default()).is_empty());
}

#[test]
fn error_order() {
    let list = List::new()
        .push(
            Section::new("ICANN DOMAINS")
                .push(Suffixes::new("Registry").push(suffix("example", 2))),
        )
        .push(Section::new("OTHER DOMAINS").changed(true))
        .push(
            Section::new("PRIVATE DOMAINS").push(
                Suffixes::new("")
                    .changed(true)
                    .maintainer(Maintainer::email("dns@example.com"))
                    .push(suffix("example", 9).changed(true)),
            ),
        );
    let errs = validate_offline(&list, &ValidateConf::default());
    assert_eq!(
        kinds(&errs),
        ["MissingEntityName", "UnknownSection", "DuplicateSuffix"]
    );
}

#[test]
fn idempotent() {
    let list = baseline()
        .push(Section::new("ICANN DOMAINS").changed(true))
        .push(
            Section::new("PRIVATE DOMAINS").push(
                Suffixes::new("")
                    .changed(true)
                    .push(suffix("example.com", 50).changed(true))
                    .push(wildcard("cloud.example.com", 51).changed(true))
                    .push(suffix("www.cloud.example.com", 52).changed(true)),
            ),
        );
    let conf = ValidateConf::default();
    let first: Vec<String> = validate_offline(&list, &conf)
        .iter()
        .map(ToString::to_string)
        .collect();
    let second: Vec<String> = validate_offline(&list, &conf)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

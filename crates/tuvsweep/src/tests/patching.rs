//! Tests for one-off patches and reference checks

use tuvsweep_core::{ParamKind, ParamValue};

use super::{Installation, REFERENCE_USRINP, field};
use crate::driver::{CatalogDiscrepancy, check_reference, patch_input};
use crate::error::SweepError;

#[test]
fn test_patch_changes_only_named_fields() {
    let install = Installation::new();
    let overrides = vec![
        ("imonth".to_string(), ParamValue::Int(7)),
        ("lat".to_string(), ParamValue::Float(-33.9)),
        ("lzenit".to_string(), ParamValue::Bool(true)),
    ];

    let path = patch_input(&install.settings, &overrides).unwrap();
    assert_eq!(path, install.settings.input_path());

    let input = install.input().unwrap();
    assert_eq!(field(&input, "imonth"), "7");
    assert_eq!(field(&input, "lat"), "-33.900");
    assert_eq!(field(&input, "lzenit"), "T");

    // Everything else keeps the reference text, including the odd formats
    assert_eq!(field(&input, "nt"), "10");
    assert_eq!(field(&input, "tmzone"), "0.0");
    assert_eq!(field(&input, "zaird"), "-9.990E+02");

    let trailer = "************* Can overwrite basic inputs here manually:";
    assert!(input.contains(trailer));
    assert_eq!(input.lines().count(), REFERENCE_USRINP.lines().count());
}

#[test]
fn test_patch_is_repeatable() {
    let install = Installation::new();
    patch_input(&install.settings, &[("nt".to_string(), ParamValue::Int(3))]).unwrap();
    patch_input(&install.settings, &[("iday".to_string(), ParamValue::Int(9))]).unwrap();

    // Each patch starts from the reference, not from the previous input
    let input = install.input().unwrap();
    assert_eq!(field(&input, "nt"), "10");
    assert_eq!(field(&input, "iday"), "9");
}

#[test]
fn test_patch_unknown_name_writes_nothing() {
    let install = Installation::new();
    let overrides = vec![
        ("nt".to_string(), ParamValue::Int(3)),
        ("ozone".to_string(), ParamValue::Float(300.0)),
    ];

    let err = patch_input(&install.settings, &overrides).unwrap_err();
    assert!(matches!(err, SweepError::Catalog(_)));
    assert!(install.input().is_none());
}

#[test]
fn test_patch_kind_mismatch_writes_nothing() {
    let install = Installation::new();
    let overrides = vec![("lzenit".to_string(), ParamValue::Float(1.0))];

    let err = patch_input(&install.settings, &overrides).unwrap_err();
    assert!(matches!(err, SweepError::InputFile(_)));
    assert!(install.input().is_none());
}

#[test]
fn test_stock_reference_matches_catalog() {
    let install = Installation::new();
    assert!(check_reference(&install.settings).unwrap().is_empty());
}

#[test]
fn test_reference_discrepancy_reported() {
    let modified = REFERENCE_USRINP.replace(
        "nt =              10",
        "nt =            10.0",
    );
    let install = Installation::with_reference(&modified);

    let found = check_reference(&install.settings).unwrap();
    assert_eq!(
        found,
        vec![CatalogDiscrepancy {
            name: "nt".to_string(),
            declared: Some(ParamKind::Int),
            inferred: ParamKind::Float,
        }]
    );
}

//! Tests for driving a working deck through a sweep mesh
//!
//! These tests verify:
//! - Coordinates land in the deck in mesh order
//! - A NaN coordinate does not leak into later points
//! - Constant parameters are untouched by the sweep

use crate::catalog::default_inputs;
use crate::mesh::{SweepAxis, SweepPlan};
use crate::tests::REFERENCE_USRINP;
use crate::usrinp::InputFile;
use crate::value::ParamValue;

#[test]
fn test_month_sweep_writes_each_month() {
    let plan = SweepPlan::new(
        vec![SweepAxis::range("imonth", 1.0, 12.0, 1.0).unwrap()],
        None,
    )
    .unwrap();
    let mut deck = default_inputs();
    deck.set("iday", 1i64).unwrap();

    let reference = InputFile::parse(REFERENCE_USRINP).unwrap();
    let mut months = Vec::new();
    for point in plan.iter() {
        point.assign_into(&mut deck).unwrap();
        let mut file = reference.clone();
        file.apply(&deck).unwrap();
        months.push(file.get("imonth").unwrap().to_string());
        assert_eq!(file.get("iday"), Some("1"));
    }

    let expected: Vec<String> = (1..=12).map(|m| m.to_string()).collect();
    assert_eq!(months, expected);
}

#[test]
fn test_nan_point_does_not_affect_next_point() {
    let plan = SweepPlan::new(
        vec![
            SweepAxis::new("imonth", vec![1.0, 2.0]),
            SweepAxis::new("lat", vec![f64::NAN, 30.0]),
        ],
        None,
    )
    .unwrap();

    let mut deck = default_inputs();
    let mut kept = Vec::new();
    for point in plan.iter() {
        point.assign_into(&mut deck).unwrap();
        if point.nan_assignment().is_some() {
            continue;
        }
        kept.push((
            point.label(),
            deck.get("imonth").cloned(),
            deck.get("lat").cloned(),
        ));
    }

    assert_eq!(
        kept,
        vec![
            (
                "0-1".to_string(),
                Some(ParamValue::Float(1.0)),
                Some(ParamValue::Float(30.0))
            ),
            (
                "1-1".to_string(),
                Some(ParamValue::Float(2.0)),
                Some(ParamValue::Float(30.0))
            ),
        ]
    );
}

#[test]
fn test_sweep_leaves_constants_alone() {
    let plan = SweepPlan::new(vec![SweepAxis::new("o3col", vec![250.0, 350.0])], None).unwrap();
    let mut deck = default_inputs();
    deck.set("tauaer", 0i64).unwrap();

    for point in plan.iter() {
        point.assign_into(&mut deck).unwrap();
    }
    assert_eq!(deck.get("tauaer"), Some(&ParamValue::Int(0)));
    assert_eq!(deck.get("o3col"), Some(&ParamValue::Float(350.0)));
}

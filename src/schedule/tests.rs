//! Tests for schedule assembly

use std::collections::HashMap;

use crate::data::{DayDose, Posology, Slot, SlotDose, Treatment};
use crate::schedule::*;

fn morning(amount: f64) -> DayDose {
    DayDose::new(
        SlotDose::new(amount, 1.0),
        SlotDose::default(),
        SlotDose::default(),
        SlotDose::default(),
    )
}

fn selections(tables: &[(&str, Posology)]) -> HashMap<String, SelectedPosology> {
    tables
        .iter()
        .map(|(label, posology)| {
            (
                label.to_string(),
                SelectedPosology::new("mg", posology.clone()),
            )
        })
        .collect()
}

fn seq(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

#[test]
fn plan_length_is_periods_times_period_len() {
    let tables = selections(&[
        ("A", Posology::new(vec![morning(1.0); 7], false)),
        ("B", Posology::new(vec![morning(2.0); 7], false)),
    ]);
    let plan = assemble(&seq(&["A", "B", "A", "B"]), &tables, 7, 0).unwrap();
    assert_eq!(plan.len(), 28);
    assert_eq!(plan.periods(), 4);
}

#[test]
fn day_indices_are_contiguous_from_origin() {
    let tables = selections(&[
        ("A", Posology::new(vec![morning(1.0); 2], false)),
        ("B", Posology::new(vec![morning(2.0); 2], false)),
    ]);
    let plan = assemble(&seq(&["A", "B"]), &tables, 2, 1).unwrap();
    let days: Vec<usize> = plan.entries().iter().map(|e| e.day).collect();
    assert_eq!(days, vec![1, 2, 3, 4]);
    assert_eq!(plan.origin(), 1);
}

#[test]
fn periods_follow_the_sequence() {
    let tables = selections(&[
        ("A", Posology::new(vec![morning(1.0); 2], false)),
        ("B", Posology::new(vec![morning(2.0); 2], false)),
    ]);
    let plan = assemble(&seq(&["B", "A"]), &tables, 2, 0).unwrap();
    assert_eq!(plan.treatment_sequence(), vec!["B", "A"]);
    assert_eq!(plan.entries()[0].doses.slot(Slot::Morning).amount(), 2.0);
    assert_eq!(plan.entries()[2].doses.slot(Slot::Morning).amount(), 1.0);
}

#[test]
fn repeat_last_continuation_repeats_final_day() {
    // Two-day table 10, 20 with repeat_last: the continuation period must be
    // a flat 20, 20 rather than restarting at 10.
    let tables = selections(&[
        (
            "P",
            Posology::new(vec![morning(10.0), morning(20.0)], true),
        ),
        ("Q", Posology::new(vec![morning(5.0); 2], false)),
    ]);
    let plan = assemble(&seq(&["P", "P"]), &tables, 2, 0).unwrap();
    let amounts: Vec<f64> = plan
        .entries()
        .iter()
        .map(|e| e.doses.slot(Slot::Morning).amount())
        .collect();
    assert_eq!(amounts, vec![10.0, 20.0, 20.0, 20.0]);
}

#[test]
fn repeat_last_does_not_trigger_without_flag() {
    let tables = selections(&[
        (
            "P",
            Posology::new(vec![morning(10.0), morning(20.0)], false),
        ),
        ("Q", Posology::new(vec![morning(5.0); 2], false)),
    ]);
    let plan = assemble(&seq(&["P", "P"]), &tables, 2, 0).unwrap();
    let amounts: Vec<f64> = plan
        .entries()
        .iter()
        .map(|e| e.doses.slot(Slot::Morning).amount())
        .collect();
    assert_eq!(amounts, vec![10.0, 20.0, 10.0, 20.0]);
}

#[test]
fn repeat_last_resets_after_interruption() {
    let tables = selections(&[
        (
            "P",
            Posology::new(vec![morning(10.0), morning(20.0)], true),
        ),
        ("Q", Posology::new(vec![morning(5.0); 2], false)),
    ]);
    let plan = assemble(&seq(&["P", "Q", "P"]), &tables, 2, 0).unwrap();
    let amounts: Vec<f64> = plan
        .entries()
        .iter()
        .map(|e| e.doses.slot(Slot::Morning).amount())
        .collect();
    // The second P period restarts the table: Q broke the continuation.
    assert_eq!(amounts, vec![10.0, 20.0, 5.0, 5.0, 10.0, 20.0]);
}

#[test]
fn missing_posology_is_rejected() {
    let tables = selections(&[("A", Posology::new(vec![morning(1.0); 2], false))]);
    let err = assemble(&seq(&["A", "B"]), &tables, 2, 0).unwrap_err();
    assert_eq!(err, ScheduleError::MissingPosology("B".to_string()));
}

#[test]
fn zero_period_length_is_rejected() {
    let tables = selections(&[("A", Posology::new(vec![], false))]);
    let err = assemble(&seq(&["A"]), &tables, 0, 0).unwrap_err();
    assert_eq!(err, ScheduleError::InvalidPeriodLength(0));
}

#[test]
fn table_must_cover_exactly_one_period() {
    let tables = selections(&[("A", Posology::new(vec![morning(1.0); 3], false))]);
    let err = assemble(&seq(&["A"]), &tables, 2, 0).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::PosologyLengthMismatch {
            treatment: "A".to_string(),
            days: 3,
            expected: 2,
        }
    );
}

#[test]
fn deserialization_rejects_zero_period_length() {
    // A hand-crafted persisted plan must not be able to smuggle in a
    // period length the assembler forbids.
    let json = r#"{"entries":[],"origin":0,"period_len":0}"#;
    let err = serde_json::from_str::<Schedule>(json).unwrap_err();
    assert!(err.to_string().contains("at least 1 day"));
}

#[test]
fn deserialization_rejects_truncated_plans() {
    let entry = r#"{"day":0,"treatment":"A","unit":"mg","doses":{
        "morning":{"amount":1.0,"fraction":1.0},
        "noon":{"amount":0.0,"fraction":0.0},
        "evening":{"amount":0.0,"fraction":0.0},
        "night":{"amount":0.0,"fraction":0.0}}}"#;
    let json = format!(r#"{{"entries":[{entry}],"origin":0,"period_len":2}}"#);
    let err = serde_json::from_str::<Schedule>(&json).unwrap_err();
    assert!(err.to_string().contains("not a multiple"));
}

#[test]
fn valid_plans_survive_deserialization() {
    let tables = selections(&[
        ("A", Posology::new(vec![morning(1.0); 2], false)),
        ("B", Posology::new(vec![morning(2.0); 2], false)),
    ]);
    let plan = assemble(&seq(&["A", "B"]), &tables, 2, 1).unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    let restored: Schedule = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, plan);
    assert_eq!(restored.periods(), 2);
}

#[test]
fn decreasing_blocks_fire_on_switch_away() {
    let taper = Posology::new(vec![morning(8.0), morning(4.0)], false);
    let treatments = vec![
        Treatment::new("A", "mg")
            .with_posology(Posology::new(vec![morning(10.0); 2], false))
            .with_decreasing(taper.clone()),
        Treatment::new("B", "mg").with_posology(Posology::new(vec![morning(5.0); 2], false)),
    ];
    let blocks = decreasing_blocks(&seq(&["A", "B", "A"]), &treatments, 2, 0);
    // Only the A -> B boundary tapers; B has no decreasing table.
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].treatment, "A");
    assert_eq!(blocks[0].start_day, 2);
    assert_eq!(blocks[0].doses, taper.days().to_vec());
}

#[test]
fn decreasing_blocks_skip_continuations() {
    let treatments = vec![
        Treatment::new("A", "mg").with_decreasing(Posology::new(vec![morning(8.0)], false)),
        Treatment::new("B", "mg"),
    ];
    let blocks = decreasing_blocks(&seq(&["A", "A", "B"]), &treatments, 3, 0);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].start_day, 6);
}

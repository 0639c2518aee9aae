// ==========================================
// Timestamp classifier tests
// ==========================================
// Coverage: every presence combination of the six optional quantities,
// every combination of the three primary indicators.
// ==========================================


use ntc_valid::domain::{Quantity, RawTimestampRecord};
use ntc_valid::engine::{ScenarioClassification, TimestampClassifier};
use test_helpers::create_test_record;

/// Builds a record from one presence bit per quantity, in the order:
/// full-import target, full-import base, full-export target,
/// export-corner target, export-corner base, ANTC.
fn record_from_bits(bits: u8) -> RawTimestampRecord {
    let q = |bit: u8| -> Option<Quantity> {
        if bits & (1 << bit) != 0 {
            Some(Quantity::of(100.0))
        } else {
            None
        }
    };
    let mut record = create_test_record();
    record.full_import_target = q(0);
    record.full_import_base = q(1);
    record.full_export_target = q(2);
    record.export_corner_target = q(3);
    record.export_corner_base = q(4);
    record.antc = q(5);
    record
}

#[test]
fn test_presence_predicates_over_all_64_combinations() {
    for bits in 0u8..64 {
        let record = record_from_bits(bits);
        assert_eq!(
            TimestampClassifier::has_full_import_target(&record),
            bits & 1 != 0
        );
        assert_eq!(
            TimestampClassifier::has_full_import_base(&record),
            bits & 2 != 0
        );
        assert_eq!(
            TimestampClassifier::has_full_export_target(&record),
            bits & 4 != 0
        );
        assert_eq!(
            TimestampClassifier::has_export_corner_target(&record),
            bits & 8 != 0
        );
        assert_eq!(
            TimestampClassifier::has_export_corner_base(&record),
            bits & 16 != 0
        );
        assert_eq!(TimestampClassifier::has_antc(&record), bits & 32 != 0);
    }
}

#[test]
fn test_single_indicator_selects_exactly_that_scenario_over_all_64_combinations() {
    for bits in 0u8..64 {
        let record = record_from_bits(bits);
        let import = bits & 1 != 0;
        let export = bits & 4 != 0;
        let corner = bits & 8 != 0;
        let indicator_count = [import, export, corner].iter().filter(|p| **p).count();
        if indicator_count != 1 {
            continue;
        }

        let expected = if import {
            ScenarioClassification::FullImport
        } else if export {
            ScenarioClassification::FullExport
        } else {
            ScenarioClassification::ExportCorner
        };
        assert_eq!(
            TimestampClassifier::classify(&record),
            expected,
            "bits {bits:06b}"
        );
    }
}

#[test]
fn test_contradictory_iff_two_or_more_indicators_over_all_8_combinations() {
    for bits in 0u8..8 {
        // map the three indicator bits onto the record layout
        let record_bits =
            (bits & 1) | ((bits & 2) << 1) | ((bits & 4) << 1);
        let record = record_from_bits(record_bits);
        let expected = bits.count_ones() >= 2;
        assert_eq!(
            TimestampClassifier::contradictory(&record),
            expected,
            "bits {bits:03b}"
        );
        if expected {
            assert_eq!(
                TimestampClassifier::classify(&record),
                ScenarioClassification::Contradictory
            );
        }
    }
}

#[test]
fn test_none_present_ignores_base_and_antc_quantities() {
    // base and ANTC present, every indicator absent
    let record = record_from_bits(0b110010);
    assert!(TimestampClassifier::none_present(&record));
    assert_eq!(
        TimestampClassifier::classify(&record),
        ScenarioClassification::NonePresent
    );
}

#[test]
fn test_empty_container_counts_as_absent() {
    let mut record = create_test_record();
    record.full_export_target = Some(Quantity::empty());
    assert!(!TimestampClassifier::has_full_export_target(&record));
    assert!(TimestampClassifier::none_present(&record));
}

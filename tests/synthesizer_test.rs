// ==========================================
// Result synthesizer tests
// ==========================================
// Coverage: every outcome variant, limiting-element selection and
// tie-break, result-slot round-trip.
// ==========================================


use ntc_valid::config::EngineConfig;
use ntc_valid::domain::{
    ComputationOutcome, DirectOutcome, LimitingElementReport, ResultStatus, Scenario,
};
use ntc_valid::engine::{LimitingElementExtractor, ResultSynthesizer};
use ntc_valid::domain::OutageElement;
use ntc_valid::external::Outage;
use std::sync::Arc;
use test_helpers::{create_test_record, flow_cnec, MockCrac, MockOptimizationResult};

fn synthesizer() -> ResultSynthesizer {
    ResultSynthesizer::new(Arc::new(EngineConfig::france_italy()))
}

// ==========================================
// Outcome mapping
// ==========================================

#[test]
fn test_data_error_becomes_rejected_entry_with_reason() {
    let entry = synthesizer().synthesize(ComputationOutcome::DataError("bad data".to_string()));
    assert_eq!(entry.status, ResultStatus::Rejected);
    assert_eq!(entry.red_flag_reason.as_deref(), Some("bad data"));
    assert_eq!(entry.value, None);
    assert!(entry.limiting_element.is_empty());
}

#[test]
fn test_search_failure_becomes_rejected_entry_with_fixed_message() {
    let entry = synthesizer().synthesize(ComputationOutcome::SearchFailure);
    assert_eq!(entry.status, ResultStatus::Rejected);
    assert_eq!(
        entry.red_flag_reason,
        Some(EngineConfig::france_italy().messages.search_failure)
    );
}

#[test]
fn test_direct_success_round_trip_through_result_slot() {
    let mut record = create_test_record();
    let outcome =
        ComputationOutcome::Direct(DirectOutcome::value(Scenario::FullImport, 842.5));

    let entry = synthesizer().write(&mut record, outcome);
    let stored = record.result.expect("result slot filled");
    assert_eq!(stored, entry);
    assert_eq!(stored.status, ResultStatus::Computed);
    assert_eq!(stored.scenario, Some(Scenario::FullImport));
    assert_eq!(stored.value, Some(842.5));
    assert!(stored.limiting_element.branches.is_empty());
    assert_eq!(stored.used_files, None);
}

#[test]
fn test_search_success_keeps_limiting_element_and_files() {
    let limiting = LimitingElementReport::empty();
    let files = ntc_valid::domain::UsedFileRefs {
        cgm: ntc_valid::domain::FileResource::new("cgm.uct", "store://cgm.uct"),
        glsk: ntc_valid::domain::FileResource::new("glsk.xml", "store://glsk.xml"),
        import_crac: ntc_valid::domain::FileResource::new("crac.json", "store://crac.json"),
        export_crac: None,
    };
    let entry = synthesizer().synthesize(ComputationOutcome::SearchSuccess {
        scenario: Scenario::ExportCorner,
        value: 1234.0,
        limiting_element: limiting,
        used_files: files.clone(),
    });
    assert_eq!(entry.status, ResultStatus::Computed);
    assert_eq!(entry.value, Some(1234.0));
    assert_eq!(entry.used_files, Some(files));
}

// ==========================================
// Limiting-element extraction
// ==========================================

#[test]
fn test_extraction_selects_smallest_margin() {
    let crac = MockCrac {
        cnecs: vec![
            flow_cnec("cnec-a", true),
            flow_cnec("cnec-b", true),
            flow_cnec("cnec-c", true),
        ],
    };
    let result = MockOptimizationResult::insecure()
        .with_margin("cnec-a", 42.3)
        .with_margin("cnec-b", 10.0)
        .with_margin("cnec-c", -5.0);

    let report = LimitingElementExtractor::extract(&crac, &result);
    assert_eq!(report.branches.len(), 1);
    assert_eq!(report.branches[0].name, "branch cnec-c");
    assert_eq!(report.branches[0].margin, -5.0);
}

#[test]
fn test_extraction_skips_constraints_not_subject_to_optimization() {
    let crac = MockCrac {
        cnecs: vec![flow_cnec("monitored-only", false), flow_cnec("optimized", true)],
    };
    let result = MockOptimizationResult::insecure()
        .with_margin("monitored-only", -50.0)
        .with_margin("optimized", 7.0);

    let report = LimitingElementExtractor::extract(&crac, &result);
    assert_eq!(report.branches[0].name, "branch optimized");
}

#[test]
fn test_extraction_ties_break_on_first_encountered_order() {
    let crac = MockCrac {
        cnecs: vec![flow_cnec("first", true), flow_cnec("second", true)],
    };
    let result = MockOptimizationResult::insecure()
        .with_margin("first", 3.0)
        .with_margin("second", 3.0);

    let report = LimitingElementExtractor::extract(&crac, &result);
    assert_eq!(report.branches[0].name, "branch first");
}

#[test]
fn test_extraction_with_no_qualifying_constraint_is_empty_not_absent() {
    let crac = MockCrac {
        cnecs: vec![flow_cnec("unscored", true)],
    };
    let result = MockOptimizationResult::secure();

    let report = LimitingElementExtractor::extract(&crac, &result);
    assert!(report.is_empty());
    assert_eq!(report.branches.len(), 0);
}

#[test]
fn test_extraction_carries_outage_elements() {
    let mut cnec = flow_cnec("under-outage", true);
    cnec.outage = Some(Outage {
        name: "loss of tie line".to_string(),
        elements: vec![OutageElement {
            name: "tie-line-1".to_string(),
            from_area: "FR".to_string(),
            to_area: "IT".to_string(),
        }],
    });
    let crac = MockCrac { cnecs: vec![cnec] };
    let result = MockOptimizationResult::insecure().with_margin("under-outage", -12.0);

    let report = LimitingElementExtractor::extract(&crac, &result);
    let branch = &report.branches[0];
    assert_eq!(branch.outage_name.as_deref(), Some("loss of tie line"));
    assert_eq!(branch.outage_elements.len(), 1);
    assert_eq!(branch.outage_elements[0].name, "tie-line-1");
}

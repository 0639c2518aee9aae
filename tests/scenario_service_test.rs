// ==========================================
// Scenario decision tests
// ==========================================
// Coverage: document-level terminal paths, full-export face value,
// full-import / export-corner shortcuts and data errors, input
// completeness messages. No scenario here reaches the search engine.
// ==========================================


use ntc_valid::config::{EngineConfig, FixedMessages};
use ntc_valid::domain::{
    CalculationDirection, Quantity, ResultStatus, Scenario, ShiftingFactor,
};
use ntc_valid::engine::ValidationHandler;
use std::sync::Arc;
use test_helpers::{
    create_test_document, create_test_record, create_test_request, MockServices,
};

fn handler(services: &MockServices) -> ValidationHandler {
    ValidationHandler::new(Arc::new(EngineConfig::france_italy()), services.bundle())
}

fn messages() -> FixedMessages {
    FixedMessages::default()
}

// ==========================================
// Document-level terminal paths
// ==========================================

#[tokio::test]
async fn test_missing_document_is_terminal_with_absence_message() {
    let services = MockServices::default();
    let report = handler(&services)
        .handle(&create_test_request(), None)
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(report.entry.value, None);
    assert_eq!(
        report.entry.note,
        Some(messages().missing_ttc_adjustment)
    );
}

#[tokio::test]
async fn test_unmatched_timestamp_is_terminal_with_absence_message() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.time = record.time + chrono::Duration::hours(6);
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(
        report.entry.note,
        Some(messages().missing_ttc_adjustment)
    );
    // nothing matched, so no slot was written
    assert!(document.records[0].result.is_none());
}

#[tokio::test]
async fn test_none_present_record_needs_no_adjustment() {
    let services = MockServices::default();
    let mut document = create_test_document(create_test_record());

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(report.entry.value, None);
    assert!(document.records[0].result.is_some());
}

#[tokio::test]
async fn test_contradictory_record_is_rejected() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_import_target = Some(Quantity::of(100.0));
    record.full_export_target = Some(Quantity::of(200.0));
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Rejected);
    assert_eq!(
        report.entry.red_flag_reason,
        Some(messages().contradictory_data)
    );
}

// ==========================================
// Full export: always face value, never searched
// ==========================================

#[tokio::test]
async fn test_full_export_is_accepted_at_face_value() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_export_target = Some(Quantity::of(1500.0));
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(report.entry.scenario, Some(Scenario::FullExport));
    assert_eq!(report.entry.value, Some(1500.0));
    assert!(!services.search_engine.was_invoked());
    assert_eq!(services.optimizer.call_count(), 0);
}

// ==========================================
// Full-import shortcuts
// ==========================================

#[tokio::test]
async fn test_full_import_without_base_and_antc_uses_raw_target() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_import_target = Some(Quantity::of(750.0));
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(report.entry.value, Some(750.0));
    assert!(!services.search_engine.was_invoked());
}

#[tokio::test]
async fn test_full_import_with_zero_base_and_zero_antc_uses_raw_target() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_import_target = Some(Quantity::of(750.0));
    record.full_import_base = Some(Quantity::of(0.0));
    record.antc = Some(Quantity::of(0.0));
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.value, Some(750.0));
    assert!(!services.search_engine.was_invoked());
}

#[tokio::test]
async fn test_full_import_with_only_base_is_missing_data() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_import_target = Some(Quantity::of(750.0));
    record.full_import_base = Some(Quantity::of(5.0));
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Rejected);
    assert_eq!(report.entry.red_flag_reason, Some(messages().missing_data));
}

#[tokio::test]
async fn test_full_import_already_sufficient_skips_the_search() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_import_target = Some(Quantity::of(5.0));
    record.full_import_base = Some(Quantity::of(10.0));
    record.antc = Some(Quantity::of(2.0));
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(report.entry.value, Some(8.0));
    assert!(!services.search_engine.was_invoked());
    assert_eq!(services.optimizer.call_count(), 0);
}

#[tokio::test]
async fn test_full_import_lists_exactly_the_missing_files() {
    let services = MockServices::default();
    let mut record = create_test_record();
    record.full_import_target = Some(Quantity::of(100.0));
    record.full_import_base = Some(Quantity::of(10.0));
    record.antc = Some(Quantity::of(2.0));
    let mut document = create_test_document(record);

    let mut request = create_test_request();
    request.cgm = None;
    request.glsk = None;

    let report = handler(&services)
        .handle(&request, Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Rejected);
    assert_eq!(
        report.entry.red_flag_reason.as_deref(),
        Some("Missing CGM file, GLSK file")
    );
}

// ==========================================
// Export-corner prerequisites
// ==========================================

fn export_corner_record() -> ntc_valid::domain::RawTimestampRecord {
    let mut record = create_test_record();
    record.export_corner_target = Some(Quantity::of(600.0));
    record.export_corner_base = Some(Quantity::of(100.0));
    record.antc = Some(Quantity::of(50.0));
    record
}

#[tokio::test]
async fn test_export_corner_without_shifting_factors_is_rejected() {
    let services = MockServices::default();
    let mut document = create_test_document(export_corner_record());

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Rejected);
    assert_eq!(
        report.entry.red_flag_reason,
        Some(messages().missing_shifting_factors)
    );
}

#[tokio::test]
async fn test_export_corner_without_directions_is_rejected() {
    let services = MockServices::default();
    let mut record = export_corner_record();
    record.shifting_factors = Some(vec![ShiftingFactor::new("10YIT-GRTN-----B", 1.0)]);
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    assert_eq!(report.entry.status, ResultStatus::Rejected);
    assert_eq!(
        report.entry.red_flag_reason,
        Some(messages().missing_calculation_directions)
    );
}

#[tokio::test]
async fn test_export_corner_already_sufficient_skips_prerequisite_files() {
    let services = MockServices::default();
    let mut record = export_corner_record();
    record.export_corner_target = Some(Quantity::of(40.0));
    record.shifting_factors = Some(vec![ShiftingFactor::new("10YIT-GRTN-----B", 1.0)]);
    record.calculation_directions = Some(vec![CalculationDirection::new(
        "10YIT-GRTN-----B",
        "10YFR-RTE------C",
    )]);
    let mut document = create_test_document(record);

    let report = handler(&services)
        .handle(&create_test_request(), Some(&mut document))
        .await
        .unwrap();

    // base - antc = 50 >= target 40
    assert_eq!(report.entry.status, ResultStatus::Computed);
    assert_eq!(report.entry.value, Some(50.0));
    assert!(!services.search_engine.was_invoked());
}

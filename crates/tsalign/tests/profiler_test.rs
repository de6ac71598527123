//! Integration tests for dataset parsing and column profiling.

use chrono::NaiveDate;
use tsalign::{
    parse_records, CellValue, Column, ColumnType, Parser, Profiler, TabularDataset,
    TsalignError,
};

#[test]
fn time_stamp_column_is_detected_and_coerced() {
    let mut dataset = parse_records(
        r#"[
            {"Time_Stamp": "2024-01-01 00:00:00.1", "value": 1.0},
            {"Time_Stamp": "2024-01-01 00:00:00.123456789", "value": 2.0}
        ]"#,
    )
    .expect("payload should parse");

    let profile = Profiler::new().profile(&mut dataset).expect("profiling failed");

    let ts_profile = &profile.columns[0];
    assert_eq!(ts_profile.name, "Time_Stamp");
    assert!(ts_profile.is_temporal);
    assert_eq!(ts_profile.column_type, ColumnType::Timestamp);

    // Sub-second precision is normalized to six digits before parsing:
    // ".1" pads to ".100000"; nine digits truncate to ".123456".
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(
        dataset.columns()[0].values,
        vec![
            CellValue::Timestamp(base.and_hms_micro_opt(0, 0, 0, 100_000).unwrap()),
            CellValue::Timestamp(base.and_hms_micro_opt(0, 0, 0, 123_456).unwrap()),
        ]
    );

    assert!(profile.has_temporal_column);
    assert_eq!(profile.temporal_column_names, vec!["Time_Stamp"]);
    assert_eq!(profile.numeric_column_count, Some(1));
}

#[test]
fn csv_payload_profiles_end_to_end() {
    let payload = b"timestamp,temperature,valve_state\n\
                    2024-03-01 08:00:00,21.5,open\n\
                    2024-03-01 08:01:00,21.7,open\n\
                    2024-03-01 08:02:00,22.1,closed\n";

    let (mut dataset, metadata) = Parser::new().parse_bytes(payload).expect("parse failed");
    assert_eq!(metadata.format, "csv");
    assert_eq!(metadata.row_count, 3);
    assert_eq!(metadata.column_count, 3);

    let profile = Profiler::new().profile(&mut dataset).expect("profiling failed");

    assert!(profile.columns[0].is_temporal);
    assert_eq!(profile.columns[0].column_type, ColumnType::Timestamp);
    assert!(profile.columns[1].is_numeric && profile.columns[1].is_float);
    assert!(profile.columns[2].is_text && profile.columns[2].is_categorical);
    assert_eq!(profile.numeric_column_count, Some(1));
}

#[test]
fn coercion_failures_are_per_cell() {
    let mut dataset = parse_records(
        r#"[
            {"event_time": "2024-01-01 10:00:00"},
            {"event_time": "garbage"},
            {"event_time": "2024-01-03 10:00:00"}
        ]"#,
    )
    .unwrap();

    let profile = Profiler::new().profile(&mut dataset).unwrap();
    assert!(profile.columns[0].is_temporal);

    let values = &dataset.columns()[0].values;
    assert!(matches!(values[0], CellValue::Timestamp(_)));
    assert_eq!(values[1], CellValue::Null);
    assert!(matches!(values[2], CellValue::Timestamp(_)));
}

#[test]
fn keyword_detection_keeps_temporal_flag_when_nothing_parses() {
    // Every cell fails to coerce; the name still marks the column temporal,
    // and the caller can see the all-null column to judge the coercion.
    let mut dataset =
        parse_records(r#"[{"timezone": "UTC+1"}, {"timezone": "UTC+2"}]"#).unwrap();
    let profile = Profiler::new().profile(&mut dataset).unwrap();

    assert!(profile.columns[0].is_temporal);
    assert!(dataset.columns()[0].values.iter().all(|v| v.is_null()));
    assert_eq!(profile.temporal_column_names, vec!["timezone"]);
}

#[test]
fn shape_mismatch_names_the_offending_column() {
    let err = TabularDataset::new(vec![
        Column::new("t", vec![CellValue::Int(1), CellValue::Int(2)]),
        Column::new("v", vec![CellValue::Int(1)]),
    ])
    .unwrap_err();

    match err {
        TsalignError::ShapeMismatch {
            column,
            expected,
            actual,
        } => {
            assert_eq!(column, "v");
            assert_eq!((expected, actual), (2, 1));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn malformed_payload_is_a_data_format_error() {
    assert!(matches!(
        parse_records(r#"{"not": "an array"}"#),
        Err(TsalignError::DataFormat(_))
    ));
    assert!(matches!(
        parse_records(r#"[{"a": {"nested": true}}]"#),
        Err(TsalignError::DataFormat(_))
    ));
}

#[test]
fn empty_rows_still_profile() {
    let mut dataset =
        TabularDataset::new(vec![Column::new("timestamp", vec![]), Column::new("v", vec![])])
            .unwrap();
    let profile = Profiler::new().profile(&mut dataset).unwrap();
    assert!(profile.columns[0].is_temporal);
    assert_eq!(profile.columns[1].column_type, ColumnType::Unknown);
    assert_eq!(profile.numeric_column_count, None);
}

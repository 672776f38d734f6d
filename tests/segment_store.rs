use chart_timing::{BpmPayload, LabelPayload, TimeSignaturePayload, TimingData, TimingError};

#[test]
fn bpm_segments_stay_sorted_regardless_of_insert_order() {
    let mut t = TimingData::new(0.0);
    t.set_bpm_at_row(192, BpmPayload { bpm: 150.0 }).unwrap();
    t.set_bpm_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
    t.set_bpm_at_row(96, BpmPayload { bpm: 135.0 }).unwrap();

    let rows: Vec<i32> = t.bpms().iter().map(|s| s.start_row).collect();
    assert_eq!(rows, vec![0, 96, 192]);
}

#[test]
fn setting_an_existing_row_replaces_rather_than_duplicates() {
    let mut t = TimingData::new(0.0);
    t.set_bpm_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
    t.set_bpm_at_row(0, BpmPayload { bpm: 180.0 }).unwrap();

    assert_eq!(t.bpms().as_slice().len(), 1);
    assert_eq!(t.bpms().as_slice()[0].payload.bpm, 180.0);
}

#[test]
fn inserting_an_effectively_equal_payload_is_a_no_op() {
    let mut t = TimingData::new(0.0);
    t.set_bpm_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
    t.set_bpm_at_row(48, BpmPayload { bpm: 120.0 }).unwrap();

    assert_eq!(t.bpms().as_slice().len(), 1, "redundant bpm insert should be suppressed");
}

#[test]
fn label_text_rejects_commas_and_equals_signs() {
    let mut t = TimingData::new(0.0);
    let err = t
        .set_label_at_row(0, LabelPayload { text: "verse,1".to_string() })
        .unwrap_err();
    assert!(matches!(err, TimingError::InvalidSegment(_)));

    let err = t
        .set_label_at_row(0, LabelPayload { text: "verse=1".to_string() })
        .unwrap_err();
    assert!(matches!(err, TimingError::InvalidSegment(_)));

    assert!(t.labels().is_empty());
}

#[test]
fn setting_an_empty_label_removes_it_instead_of_storing_a_blank_entry() {
    let mut t = TimingData::new(0.0);
    t.set_label_at_row(48, LabelPayload { text: "chorus".to_string() }).unwrap();
    t.set_label_at_row(48, LabelPayload { text: String::new() }).unwrap();
    assert!(t.labels().segment_at_row(48).is_none());
}

#[test]
fn time_signature_rejects_non_positive_numerator_or_denominator() {
    let mut t = TimingData::new(0.0);
    let err = t
        .set_time_signature_at_row(0, TimeSignaturePayload { numerator: 0, denominator: 4 })
        .unwrap_err();
    assert!(matches!(err, TimingError::InvalidSegment(_)));
}

#[test]
fn negative_row_is_rejected_without_mutating_the_store() {
    let mut t = TimingData::new(0.0);
    let err = t.set_bpm_at_row(-1, BpmPayload { bpm: 120.0 }).unwrap_err();
    assert_eq!(err, TimingError::OutOfRange { row: -1 });
    assert!(t.bpms().is_empty());
}

#[test]
fn removing_a_segment_that_was_never_set_is_harmless() {
    let mut t = TimingData::new(0.0);
    t.remove_stop_at_row(48);
    assert!(t.stops().is_empty());
}

use chart_timing::{BpmPayload, DelayPayload, StopPayload, TimingData, WarpPayload};

fn constant_tempo(bpm: f32) -> TimingData {
    let mut t = TimingData::new(0.0);
    t.set_bpm_at_row(0, BpmPayload { bpm }).unwrap();
    t
}

#[test]
fn constant_tempo_round_trips() {
    let t = constant_tempo(120.0);
    assert!((t.elapsed_time_from_beat(4.0) - 2.0).abs() < 1e-4);
    assert!((t.beat_and_bps_from_elapsed_time(2.0).beat - 4.0).abs() < 1e-4);
}

#[test]
fn offset_shifts_time_but_not_beat_math() {
    let mut t = constant_tempo(120.0);
    t.set_offset_seconds(-1.0);
    // beat 0 now lands at wall-clock time -1.0.
    assert!((t.elapsed_time_from_beat(0.0) - -1.0).abs() < 1e-4);
    assert!((t.elapsed_time_from_beat_no_offset(0.0)).abs() < 1e-4);
    assert!((t.beat_and_bps_from_elapsed_time(-1.0).beat).abs() < 1e-4);
}

#[test]
fn stop_freezes_beat_for_its_duration() {
    let mut t = constant_tempo(120.0);
    t.set_stop_at_row(48, StopPayload { seconds: 1.5 }).unwrap();

    let at_boundary = t.beat_and_bps_from_elapsed_time(0.5);
    assert!((at_boundary.beat - 1.0).abs() < 1e-4);
    assert!(!at_boundary.in_freeze);

    let mid_stop = t.beat_and_bps_from_elapsed_time(1.75);
    assert!((mid_stop.beat - 1.0).abs() < 1e-4);
    assert!(mid_stop.in_freeze);

    assert!((t.elapsed_time_from_beat(2.0) - 2.5).abs() < 1e-4);
}

#[test]
fn delay_applies_before_the_beat_lands() {
    let mut t = constant_tempo(120.0);
    t.set_delay_at_row(48, DelayPayload { seconds: 1.0 }).unwrap();

    assert!((t.elapsed_time_from_beat(1.0) - 1.5).abs() < 1e-4);

    let mid_delay = t.beat_and_bps_from_elapsed_time(0.9);
    assert!((mid_delay.beat - 1.0).abs() < 1e-4);
    assert!(mid_delay.in_delay);
}

#[test]
fn stop_and_delay_at_same_row_both_apply_delay_first() {
    let mut t = constant_tempo(120.0);
    t.set_delay_at_row(48, DelayPayload { seconds: 0.5 }).unwrap();
    t.set_stop_at_row(48, StopPayload { seconds: 0.25 }).unwrap();
    // beat 1 arrives at 0.5s (tempo), then delay (0.5s), then stop (0.25s).
    assert!((t.elapsed_time_from_beat(2.0) - (0.5 + 0.5 + 0.25 + 0.5)).abs() < 1e-4);
}

#[test]
fn warp_skips_beats_instantaneously() {
    let mut t = constant_tempo(120.0);
    t.set_warp_at_row(48, WarpPayload { length_beats: 2.0 }).unwrap();

    let landed = t.beat_and_bps_from_elapsed_time(0.5);
    assert!((landed.beat - 3.0).abs() < 1e-4);
    assert!((landed.warp_start_beat - 1.0).abs() < 1e-4);
    assert!((landed.warp_length_beats - 2.0).abs() < 1e-4);

    assert!((t.elapsed_time_from_beat(2.0) - 0.5).abs() < 1e-4);
    assert!(t.is_warp_at_row(72));
    assert!(!t.is_warp_at_row(144));
}

#[test]
fn bpm_change_at_warp_destination_governs_after_the_warp() {
    let mut t = constant_tempo(120.0);
    t.set_warp_at_row(48, WarpPayload { length_beats: 2.0 }).unwrap();
    t.set_bpm_at_row(48, BpmPayload { bpm: 240.0 }).unwrap();

    // Same wall-clock moment the warp lands (beat 3), but now at 240 bpm
    // (4 bps) afterward: one more beat takes 0.25s, not 0.5s.
    let just_after = t.elapsed_time_from_beat(4.0);
    assert!((just_after - (0.5 + 0.25)).abs() < 1e-4);
}

#[test]
fn negative_beat_extrapolates_first_tempo_backward() {
    let t = constant_tempo(120.0);
    assert!((t.elapsed_time_from_beat(-2.0) - -1.0).abs() < 1e-4);
}

#[test]
fn beat_time_round_trip_holds_away_from_stops_and_warps() {
    let mut t = constant_tempo(120.0);
    t.set_bpm_at_row(96, BpmPayload { bpm: 180.0 }).unwrap();
    t.set_stop_at_row(48, StopPayload { seconds: 1.5 }).unwrap();

    for beat in [0.0, 0.5, 2.0, 4.25, 10.0] {
        let time = t.elapsed_time_from_beat(beat) as f64;
        let back = t.beat_and_bps_from_elapsed_time(time);
        assert!(
            (back.beat as f64 - beat).abs() < 1e-3,
            "beat {beat} round-tripped to {}",
            back.beat
        );
    }
}

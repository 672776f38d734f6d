use crate::error::TimingError;
use crate::row::beat_to_row;
use crate::segment::{
    BpmPayload, ComboPayload, DelayPayload, FakePayload, LabelPayload, ScrollPayload,
    SpeedPayload, StopPayload, TickcountPayload, TimeSignaturePayload, WarpPayload,
};
use crate::timing::TimingData;

/// Per-kind mutator surface: `set_*_at_row`/`remove_*_at_row` plus
/// `_at_beat` convenience wrappers, mirroring the reference engine's
/// `Set*AtRow`/`Set*AtBeat` pairs. These are the only way to install or
/// remove a segment from outside the crate; `SegmentStore::set_at_row` is
/// `pub` but every field it lives behind is `pub(crate)`.
macro_rules! mutators {
    ($field:ident, $payload:ty, $set:ident, $set_beat:ident, $remove:ident, $remove_beat:ident) => {
        pub fn $set(&mut self, row: i32, payload: $payload) -> Result<(), TimingError> {
            self.$field.set_at_row(row, payload)
        }

        pub fn $set_beat(&mut self, beat: f64, payload: $payload) -> Result<(), TimingError> {
            self.$set(beat_to_row(beat), payload)
        }

        pub fn $remove(&mut self, row: i32) {
            self.$field.remove_at_row(row);
        }

        pub fn $remove_beat(&mut self, beat: f64) {
            self.$remove(beat_to_row(beat));
        }
    };
}

impl TimingData {
    mutators!(bpms, BpmPayload, set_bpm_at_row, set_bpm_at_beat, remove_bpm_at_row, remove_bpm_at_beat);
    mutators!(stops, StopPayload, set_stop_at_row, set_stop_at_beat, remove_stop_at_row, remove_stop_at_beat);
    mutators!(delays, DelayPayload, set_delay_at_row, set_delay_at_beat, remove_delay_at_row, remove_delay_at_beat);
    mutators!(warps, WarpPayload, set_warp_at_row, set_warp_at_beat, remove_warp_at_row, remove_warp_at_beat);
    mutators!(
        time_signatures,
        TimeSignaturePayload,
        set_time_signature_at_row,
        set_time_signature_at_beat,
        remove_time_signature_at_row,
        remove_time_signature_at_beat
    );
    mutators!(
        tickcounts,
        TickcountPayload,
        set_tickcount_at_row,
        set_tickcount_at_beat,
        remove_tickcount_at_row,
        remove_tickcount_at_beat
    );
    mutators!(combos, ComboPayload, set_combo_at_row, set_combo_at_beat, remove_combo_at_row, remove_combo_at_beat);
    mutators!(labels, LabelPayload, set_label_at_row, set_label_at_beat, remove_label_at_row, remove_label_at_beat);
    mutators!(speeds, SpeedPayload, set_speed_at_row, set_speed_at_beat, remove_speed_at_row, remove_speed_at_beat);
    mutators!(scrolls, ScrollPayload, set_scroll_at_row, set_scroll_at_beat, remove_scroll_at_row, remove_scroll_at_beat);
    mutators!(fakes, FakePayload, set_fake_at_row, set_fake_at_beat, remove_fake_at_row, remove_fake_at_beat);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_remove_round_trip() {
        let mut t = TimingData::new(0.0);
        t.set_bpm_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
        assert_eq!(t.bpms().as_slice().len(), 1);
        t.remove_bpm_at_row(0);
        assert!(t.bpms().is_empty());
    }

    #[test]
    fn at_beat_wrappers_convert_through_rows() {
        let mut t = TimingData::new(0.0);
        t.set_stop_at_beat(1.0, StopPayload { seconds: 0.5 }).unwrap();
        assert_eq!(t.stops().as_slice()[0].start_row, crate::row::ROWS_PER_BEAT);
        t.remove_stop_at_beat(1.0);
        assert!(t.stops().is_empty());
    }

    #[test]
    fn set_rejects_invalid_payload_without_mutating() {
        let mut t = TimingData::new(0.0);
        let err = t.set_bpm_at_row(0, BpmPayload { bpm: -1.0 }).unwrap_err();
        assert!(matches!(err, TimingError::InvalidSegment(_)));
        assert!(t.bpms().is_empty());
    }
}

use crate::row::{beat_to_row, row_to_beat};
use crate::timing::TimingData;

/// Default payloads installed by `TidyUp`, also used as documented
/// fallbacks by queries against a `TimingData` that hasn't been tidied.
pub const DEFAULT_TIME_SIGNATURE: (i32, i32) = (4, 4);
pub const DEFAULT_TICKCOUNT: i32 = 4;
pub const DEFAULT_COMBO: (i32, i32) = (0, 0);
pub const DEFAULT_BPM: f32 = 60.0;

impl TimingData {
    pub fn bpm_at_row(&self, row: i32) -> f32 {
        self.bpms
            .segment_at_row(row)
            .map(|s| s.payload.bpm)
            .unwrap_or(DEFAULT_BPM)
    }

    pub fn bpm_at_beat(&self, beat: f64) -> f32 {
        self.bpm_at_row(beat_to_row(beat))
    }

    pub fn stop_seconds_at_row(&self, row: i32) -> f32 {
        self.stops
            .segment_at_row(row)
            .filter(|s| s.start_row == row)
            .map(|s| s.payload.seconds)
            .unwrap_or(0.0)
    }

    pub fn delay_seconds_at_row(&self, row: i32) -> f32 {
        self.delays
            .segment_at_row(row)
            .filter(|s| s.start_row == row)
            .map(|s| s.payload.seconds)
            .unwrap_or(0.0)
    }

    pub fn time_signature_at_row(&self, row: i32) -> (i32, i32) {
        self.time_signatures
            .segment_at_row(row)
            .map(|s| (s.payload.numerator, s.payload.denominator))
            .unwrap_or(DEFAULT_TIME_SIGNATURE)
    }

    pub fn tickcount_at_row(&self, row: i32) -> i32 {
        self.tickcounts
            .segment_at_row(row)
            .map(|s| s.payload.ticks)
            .unwrap_or(DEFAULT_TICKCOUNT)
    }

    pub fn combo_at_row(&self, row: i32) -> (i32, i32) {
        self.combos
            .segment_at_row(row)
            .map(|s| (s.payload.hit_combo, s.payload.miss_combo))
            .unwrap_or(DEFAULT_COMBO)
    }

    pub fn label_at_row(&self, row: i32) -> &str {
        self.labels
            .segment_at_row(row)
            .map(|s| s.payload.text.as_str())
            .unwrap_or("")
    }

    pub fn does_label_exist(&self, text: &str) -> bool {
        self.labels.iter().any(|s| s.payload.text == text)
    }

    pub fn is_warp_at_row(&self, row: i32) -> bool {
        self.warps
            .iter()
            .take_while(|s| s.start_row <= row)
            .any(|s| s.start_row + beat_to_row(s.payload.length_beats as f64) > row)
    }

    pub fn is_fake_at_row(&self, row: i32) -> bool {
        self.fakes
            .iter()
            .take_while(|s| s.start_row <= row)
            .any(|s| s.start_row + beat_to_row(s.payload.length_beats as f64) > row)
    }

    pub fn is_judgable_at_row(&self, row: i32) -> bool {
        !self.is_warp_at_row(row) && !self.is_fake_at_row(row)
    }

    /// Tracks the minimum and maximum BPM across all segments, clamping the
    /// maximum to `cap`. Returns `(DEFAULT_BPM, DEFAULT_BPM)` if there are
    /// no BPM segments at all.
    pub fn actual_bpm(&self, cap: f32) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for s in self.bpms.iter() {
            min = min.min(s.payload.bpm);
            max = max.max(s.payload.bpm.min(cap));
        }
        if !min.is_finite() || !max.is_finite() {
            (DEFAULT_BPM, DEFAULT_BPM)
        } else {
            (min, max)
        }
    }

    pub fn has_bpm_changes(&self) -> bool {
        self.bpms.len() > 1
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }

    pub fn has_delays(&self) -> bool {
        !self.delays.is_empty()
    }

    pub fn has_warps(&self) -> bool {
        !self.warps.is_empty()
    }

    pub fn has_fakes(&self) -> bool {
        !self.fakes.is_empty()
    }

    pub fn has_speed_changes(&self) -> bool {
        !self.speeds.is_empty()
    }

    pub fn has_scroll_changes(&self) -> bool {
        !self.scrolls.is_empty()
    }

    /// Splits `row` into measure index, beat-within-measure, and leftover
    /// rows, against the time signature active *at `row`* (not row 0).
    pub fn note_row_to_measure_and_beat(&self, row: i32) -> (i32, i32, i32) {
        let (numerator, denominator) = self.time_signature_at_row(row);
        let rows_per_beat = crate::row::ROWS_PER_BEAT * 4 / denominator.max(1);
        let rows_per_measure = rows_per_beat * numerator.max(1);

        let measure_start_row = self
            .time_signatures
            .segment_at_row(row)
            .map(|s| s.start_row)
            .unwrap_or(0);
        let rows_into_signature = row - measure_start_row;

        let measure_index = rows_into_signature.div_euclid(rows_per_measure.max(1));
        let remainder_in_measure = rows_into_signature.rem_euclid(rows_per_measure.max(1));
        let beat_index = remainder_in_measure / rows_per_beat.max(1);
        let rows_remainder = remainder_in_measure % rows_per_beat.max(1);

        (measure_index, beat_index, rows_remainder)
    }

    pub(crate) fn row_is_valid(row: i32) -> bool {
        row >= 0
    }

    pub(crate) fn beat_as_row(beat: f64) -> i32 {
        beat_to_row(beat)
    }

    pub(crate) fn row_as_beat(row: i32) -> f64 {
        row_to_beat(row)
    }
}

use crate::row::{beat_to_row, row_to_beat};
use crate::segment::SpeedUnit;
use crate::timing::TimingData;

impl TimingData {
    /// Displayed speed percent at `beat`/`music_seconds`: a linear ramp from
    /// the fully-resolved target of the preceding Speed segment (or `1.0`
    /// before any) to the active segment's `percent`, over its `wait`.
    /// Does not affect beat↔time conversion; visual-only.
    pub fn displayed_speed_percent(&self, beat: f64, music_seconds: f64) -> f32 {
        let segs = self.speeds.as_slice();
        let Some(idx) = self.speeds.index_at_row(beat_to_row(beat)) else {
            return 1.0;
        };
        let seg = &segs[idx];
        let prev_percent = if idx == 0 { 1.0f64 } else { segs[idx - 1].payload.percent as f64 };

        let wait = seg.payload.wait as f64;
        let progress = if wait <= 0.0 {
            1.0
        } else {
            let elapsed = match seg.payload.unit {
                SpeedUnit::Beats => beat - row_to_beat(seg.start_row),
                SpeedUnit::Seconds => {
                    music_seconds - self.elapsed_time_from_beat_no_offset(row_to_beat(seg.start_row)) as f64
                }
            };
            (elapsed / wait).clamp(0.0, 1.0)
        };

        (prev_percent + (seg.payload.percent as f64 - prev_percent) * progress) as f32
    }

    /// Displayed beat at `beat`: integrates Scroll segment ratios over
    /// `[0, beat]`, with an implicit ratio of `1.0` before the first Scroll
    /// segment (or everywhere, if there are none). Visual-only.
    pub fn displayed_beat(&self, beat: f64) -> f64 {
        let segs = self.scrolls.as_slice();
        if segs.is_empty() {
            return beat;
        }

        let mut result = 0.0f64;
        let mut prev_beat = 0.0f64;
        let mut prev_ratio = 1.0f64;
        for seg in segs {
            let seg_beat = row_to_beat(seg.start_row);
            if seg_beat > prev_beat {
                let span_end = seg_beat.min(beat);
                if span_end > prev_beat {
                    result += prev_ratio * (span_end - prev_beat);
                }
            }
            if seg_beat >= beat {
                return result;
            }
            prev_beat = seg_beat;
            prev_ratio = seg.payload.ratio as f64;
        }
        result += prev_ratio * (beat - prev_beat).max(0.0);
        result
    }
}

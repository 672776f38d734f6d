use crate::math::round_dp;
use crate::row::row_to_beat;
use crate::segment::{SegmentKind, SpeedUnit};
use crate::timing::TimingData;

fn fmt_f64(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}", round_dp(value, decimals))
}

fn fmt_f32(value: f32, decimals: usize) -> String {
    format!("{:.decimals$}", round_dp(value as f64, decimals))
}

impl TimingData {
    /// Renders every segment of `kind` as `<beat>=<payload fields>`, floats
    /// at `decimals` precision, booleans/enums as `0`/`1`. No trailing
    /// newline. Used by chart serializers.
    pub fn to_vector_string(&self, kind: SegmentKind, decimals: usize) -> Vec<String> {
        let beat = |row: i32| fmt_f64(row_to_beat(row), decimals);
        match kind {
            SegmentKind::Bpm => self
                .bpms
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), fmt_f32(s.payload.bpm, decimals)))
                .collect(),
            SegmentKind::Stop => self
                .stops
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), fmt_f32(s.payload.seconds, decimals)))
                .collect(),
            SegmentKind::Delay => self
                .delays
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), fmt_f32(s.payload.seconds, decimals)))
                .collect(),
            SegmentKind::Warp => self
                .warps
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), fmt_f32(s.payload.length_beats, decimals)))
                .collect(),
            SegmentKind::TimeSignature => self
                .time_signatures
                .iter()
                .map(|s| {
                    format!(
                        "{}={}={}",
                        beat(s.start_row),
                        s.payload.numerator,
                        s.payload.denominator
                    )
                })
                .collect(),
            SegmentKind::Tickcount => self
                .tickcounts
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), s.payload.ticks))
                .collect(),
            SegmentKind::Combo => self
                .combos
                .iter()
                .map(|s| format!("{}={}={}", beat(s.start_row), s.payload.hit_combo, s.payload.miss_combo))
                .collect(),
            SegmentKind::Label => self
                .labels
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), s.payload.text))
                .collect(),
            SegmentKind::Speed => self
                .speeds
                .iter()
                .map(|s| {
                    let unit = match s.payload.unit {
                        SpeedUnit::Beats => 0,
                        SpeedUnit::Seconds => 1,
                    };
                    format!(
                        "{}={}={}={}",
                        beat(s.start_row),
                        fmt_f32(s.payload.percent, decimals),
                        fmt_f32(s.payload.wait, decimals),
                        unit
                    )
                })
                .collect(),
            SegmentKind::Scroll => self
                .scrolls
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), fmt_f32(s.payload.ratio, decimals)))
                .collect(),
            SegmentKind::Fake => self
                .fakes
                .iter()
                .map(|s| format!("{}={}", beat(s.start_row), fmt_f32(s.payload.length_beats, decimals)))
                .collect(),
        }
    }

    /// `to_vector_string` at the documented default precision of 6 decimals.
    pub fn to_vector_string_default(&self, kind: SegmentKind) -> Vec<String> {
        self.to_vector_string(kind, 6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BpmPayload;

    #[test]
    fn bpm_renders_beat_equals_value() {
        let mut t = TimingData::new(0.0);
        t.bpms.set_at_row(0, BpmPayload { bpm: 120.5 }).unwrap();
        t.bpms.set_at_row(96, BpmPayload { bpm: 140.0 }).unwrap();
        let rendered = t.to_vector_string(SegmentKind::Bpm, 3);
        assert_eq!(rendered, vec!["0.000=120.500", "2.000=140.000"]);
    }

    #[test]
    fn time_signature_renders_three_fields() {
        let mut t = TimingData::new(0.0);
        t.time_signatures
            .set_at_row(
                0,
                crate::segment::TimeSignaturePayload {
                    numerator: 3,
                    denominator: 4,
                },
            )
            .unwrap();
        assert_eq!(
            t.to_vector_string_default(SegmentKind::TimeSignature),
            vec!["0.000000=3=4"]
        );
    }
}

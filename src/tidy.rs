use crate::query::{DEFAULT_BPM, DEFAULT_COMBO, DEFAULT_TICKCOUNT, DEFAULT_TIME_SIGNATURE};
use crate::segment::{BpmPayload, ComboPayload, LabelPayload, SegmentKind, TickcountPayload, TimeSignaturePayload};
use crate::timing::TimingData;

impl TimingData {
    /// Installs mandatory default segments and removes degenerate ones.
    /// Idempotent: running it twice leaves the data unchanged.
    pub fn tidy_up(&mut self) {
        if self.bpms.is_empty() {
            log::warn!(
                "timing data for {:?} has no BPM segments; synthesizing BPM(row 0, {})",
                self.source_file,
                DEFAULT_BPM
            );
            self.bpms
                .set_at_row(0, BpmPayload { bpm: DEFAULT_BPM })
                .expect("default bpm is always valid");
        }

        if self.time_signatures.segment_at_row(0).is_none() {
            let (numerator, denominator) = DEFAULT_TIME_SIGNATURE;
            self.time_signatures
                .set_at_row(0, TimeSignaturePayload { numerator, denominator })
                .expect("default time signature is always valid");
        }

        if self.tickcounts.segment_at_row(0).is_none() {
            self.tickcounts
                .set_at_row(0, TickcountPayload { ticks: DEFAULT_TICKCOUNT })
                .expect("default tickcount is always valid");
        }

        if self.combos.segment_at_row(0).is_none() {
            let (hit_combo, miss_combo) = DEFAULT_COMBO;
            self.combos
                .set_at_row(0, ComboPayload { hit_combo, miss_combo })
                .expect("default combo is always valid");
        }

        if self.labels.segment_at_row(0).is_none() {
            // An empty label at row 0 is the documented default sentinel;
            // install it directly, bypassing the non-empty-text validator.
            self.labels
                .entries_mut()
                .insert(0, crate::segment::Positioned::new(0, LabelPayload { text: String::new() }));
        }

        self.warps.retain(|s| s.payload.length_beats > 0.0);
        self.fakes.retain(|s| s.payload.length_beats > 0.0);

        let removed = self.bpms.coalesce_adjacent();
        self.log_rows(SegmentKind::Bpm, &removed);
        let removed = self.stops.coalesce_adjacent();
        self.log_rows(SegmentKind::Stop, &removed);
        let removed = self.delays.coalesce_adjacent();
        self.log_rows(SegmentKind::Delay, &removed);
        let removed = self.warps.coalesce_adjacent();
        self.log_rows(SegmentKind::Warp, &removed);
        let removed = self.time_signatures.coalesce_adjacent();
        self.log_rows(SegmentKind::TimeSignature, &removed);
        let removed = self.tickcounts.coalesce_adjacent();
        self.log_rows(SegmentKind::Tickcount, &removed);
        let removed = self.combos.coalesce_adjacent();
        self.log_rows(SegmentKind::Combo, &removed);
        let removed = self.labels.coalesce_adjacent();
        self.log_rows(SegmentKind::Label, &removed);
        let removed = self.speeds.coalesce_adjacent();
        self.log_rows(SegmentKind::Speed, &removed);
        let removed = self.scrolls.coalesce_adjacent();
        self.log_rows(SegmentKind::Scroll, &removed);
        let removed = self.fakes.coalesce_adjacent();
        self.log_rows(SegmentKind::Fake, &removed);
    }

    fn log_rows(&self, kind: SegmentKind, rows: &[i32]) {
        for row in rows {
            log::debug!("tidy_up coalesced redundant {kind:?} segment at row {row}");
        }
    }
}

use crate::segment::{
    BpmPayload, ComboPayload, DelayPayload, FakePayload, LabelPayload, ScrollPayload,
    SpeedPayload, StopPayload, TickcountPayload, TimeSignaturePayload, WarpPayload,
};
use crate::store::SegmentStore;

/// One timing object per song or per chart-difficulty: eleven sorted
/// segment sequences plus the song's wall-clock offset.
///
/// A value-like aggregate with no internal synchronization (see
/// concurrency notes in the crate docs): a single owner mutates, readers
/// observe only between mutations.
#[derive(Debug, Clone)]
pub struct TimingData {
    pub(crate) offset_seconds: f32,
    pub(crate) source_file: String,

    pub(crate) bpms: SegmentStore<BpmPayload>,
    pub(crate) stops: SegmentStore<StopPayload>,
    pub(crate) delays: SegmentStore<DelayPayload>,
    pub(crate) warps: SegmentStore<WarpPayload>,
    pub(crate) time_signatures: SegmentStore<TimeSignaturePayload>,
    pub(crate) tickcounts: SegmentStore<TickcountPayload>,
    pub(crate) combos: SegmentStore<ComboPayload>,
    pub(crate) labels: SegmentStore<LabelPayload>,
    pub(crate) speeds: SegmentStore<SpeedPayload>,
    pub(crate) scrolls: SegmentStore<ScrollPayload>,
    pub(crate) fakes: SegmentStore<FakePayload>,
}

/// Equality matches the reference engine's contract (SPEC_FULL §6):
/// `offset_seconds` bitwise plus each kind's segment sequence, element-wise.
/// `source_file` is informational only (§3) and deliberately excluded, so
/// e.g. a `copy_range` result can equal a hand-built `TimingData` with the
/// same offset and segments but a different (or absent) source file.
impl PartialEq for TimingData {
    fn eq(&self, other: &Self) -> bool {
        self.offset_seconds == other.offset_seconds
            && self.bpms == other.bpms
            && self.stops == other.stops
            && self.delays == other.delays
            && self.warps == other.warps
            && self.time_signatures == other.time_signatures
            && self.tickcounts == other.tickcounts
            && self.combos == other.combos
            && self.labels == other.labels
            && self.speeds == other.speeds
            && self.scrolls == other.scrolls
            && self.fakes == other.fakes
    }
}

impl TimingData {
    pub fn new(offset_seconds: f32) -> Self {
        TimingData {
            offset_seconds,
            source_file: String::new(),
            bpms: SegmentStore::new(),
            stops: SegmentStore::new(),
            delays: SegmentStore::new(),
            warps: SegmentStore::new(),
            time_signatures: SegmentStore::new(),
            tickcounts: SegmentStore::new(),
            combos: SegmentStore::new(),
            labels: SegmentStore::new(),
            speeds: SegmentStore::new(),
            scrolls: SegmentStore::new(),
            fakes: SegmentStore::new(),
        }
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    pub fn offset_seconds(&self) -> f32 {
        self.offset_seconds
    }

    pub fn set_offset_seconds(&mut self, offset_seconds: f32) {
        self.offset_seconds = offset_seconds;
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn bpms(&self) -> &SegmentStore<BpmPayload> {
        &self.bpms
    }

    pub fn stops(&self) -> &SegmentStore<StopPayload> {
        &self.stops
    }

    pub fn delays(&self) -> &SegmentStore<DelayPayload> {
        &self.delays
    }

    pub fn warps(&self) -> &SegmentStore<WarpPayload> {
        &self.warps
    }

    pub fn time_signatures(&self) -> &SegmentStore<TimeSignaturePayload> {
        &self.time_signatures
    }

    pub fn tickcounts(&self) -> &SegmentStore<TickcountPayload> {
        &self.tickcounts
    }

    pub fn combos(&self) -> &SegmentStore<ComboPayload> {
        &self.combos
    }

    pub fn labels(&self) -> &SegmentStore<LabelPayload> {
        &self.labels
    }

    pub fn speeds(&self) -> &SegmentStore<SpeedPayload> {
        &self.speeds
    }

    pub fn scrolls(&self) -> &SegmentStore<ScrollPayload> {
        &self.scrolls
    }

    pub fn fakes(&self) -> &SegmentStore<FakePayload> {
        &self.fakes
    }
}

/// Marker for types an external scripting runtime can bind to. This crate
/// has no scripting runtime of its own; implement this in the embedding
/// application's adapter layer and register `TimingData` there.
pub trait ScriptBinding {}

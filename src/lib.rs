pub mod convert;
pub mod display;
pub mod edit;
pub mod error;
mod format;
pub mod math;
pub mod mutate;
pub mod query;
pub mod row;
pub mod segment;
pub mod store;
mod tidy;
pub mod timing;

pub const TIMING_ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use convert::BeatAndBps;
pub use error::TimingError;
pub use row::{ROWS_PER_BEAT, beat_to_row, row_to_beat};
pub use segment::{
    BpmPayload, BpmSegment, ComboPayload, ComboSegment, DelayPayload, DelaySegment,
    EffectivePayload, FakePayload, FakeSegment, LabelPayload, LabelSegment, Positioned,
    ScrollPayload, ScrollSegment, SegmentKind, SpeedPayload, SpeedSegment, SpeedUnit,
    StopPayload, StopSegment, TickcountPayload, TickcountSegment, TimeSignaturePayload,
    TimeSignatureSegment, WarpPayload, WarpSegment,
};
pub use store::SegmentStore;
pub use timing::{ScriptBinding, TimingData};

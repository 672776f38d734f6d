use crate::error::TimingError;

/// Kinds of segment sequence a `TimingData` carries. One homogeneous,
/// sorted `SegmentStore` per kind; no virtual dispatch on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Bpm,
    Stop,
    Delay,
    Warp,
    TimeSignature,
    Tickcount,
    Combo,
    Label,
    Speed,
    Scroll,
    Fake,
}

/// A segment's position plus kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Positioned<P> {
    pub start_row: i32,
    pub payload: P,
}

impl<P> Positioned<P> {
    pub fn new(start_row: i32, payload: P) -> Self {
        Positioned { start_row, payload }
    }
}

/// Payload-level equality used by the store to suppress no-op insertions.
/// Defaults to exact equality; BPM overrides with a tolerance compare since
/// it is the one payload whose source values round-trip through text.
pub trait EffectivePayload: Clone + PartialEq {
    fn effectively_equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Domain validation run before a mutator installs this payload.
    fn validate(&self) -> Result<(), TimingError> {
        Ok(())
    }

    /// True if this payload is the kind's "neutral" form and a mutator
    /// setting it should remove the segment instead of installing it.
    fn is_neutral(&self) -> bool {
        false
    }
}

#[inline(always)]
fn approx_eq_f32(a: f32, b: f32) -> bool {
    (a as f64 - b as f64).abs() < 1e-6
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpmPayload {
    pub bpm: f32,
}

pub type BpmSegment = Positioned<BpmPayload>;

impl EffectivePayload for BpmPayload {
    fn effectively_equal(&self, other: &Self) -> bool {
        approx_eq_f32(self.bpm, other.bpm)
    }

    fn validate(&self) -> Result<(), TimingError> {
        if self.bpm <= 0.0 || !self.bpm.is_finite() {
            return Err(TimingError::InvalidSegment(format!(
                "bpm must be strictly positive, got {}",
                self.bpm
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopPayload {
    pub seconds: f32,
}

pub type StopSegment = Positioned<StopPayload>;

impl EffectivePayload for StopPayload {
    fn effectively_equal(&self, other: &Self) -> bool {
        approx_eq_f32(self.seconds, other.seconds)
    }

    fn validate(&self) -> Result<(), TimingError> {
        if self.seconds < 0.0 || !self.seconds.is_finite() {
            return Err(TimingError::InvalidSegment(format!(
                "stop seconds must be non-negative, got {}",
                self.seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayPayload {
    pub seconds: f32,
}

pub type DelaySegment = Positioned<DelayPayload>;

impl EffectivePayload for DelayPayload {
    fn effectively_equal(&self, other: &Self) -> bool {
        approx_eq_f32(self.seconds, other.seconds)
    }

    fn validate(&self) -> Result<(), TimingError> {
        if self.seconds < 0.0 || !self.seconds.is_finite() {
            return Err(TimingError::InvalidSegment(format!(
                "delay seconds must be non-negative, got {}",
                self.seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpPayload {
    pub length_beats: f32,
}

pub type WarpSegment = Positioned<WarpPayload>;

impl EffectivePayload for WarpPayload {
    fn effectively_equal(&self, other: &Self) -> bool {
        approx_eq_f32(self.length_beats, other.length_beats)
    }

    fn is_neutral(&self) -> bool {
        self.length_beats <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSignaturePayload {
    pub numerator: i32,
    pub denominator: i32,
}

pub type TimeSignatureSegment = Positioned<TimeSignaturePayload>;

impl EffectivePayload for TimeSignaturePayload {
    fn validate(&self) -> Result<(), TimingError> {
        if self.numerator < 1 || self.denominator < 1 {
            return Err(TimingError::InvalidSegment(format!(
                "time signature numerator/denominator must be >= 1, got {}/{}",
                self.numerator, self.denominator
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickcountPayload {
    pub ticks: i32,
}

pub type TickcountSegment = Positioned<TickcountPayload>;

impl EffectivePayload for TickcountPayload {
    fn validate(&self) -> Result<(), TimingError> {
        if self.ticks < 0 {
            return Err(TimingError::InvalidSegment(format!(
                "tickcount must be >= 0, got {}",
                self.ticks
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboPayload {
    pub hit_combo: i32,
    pub miss_combo: i32,
}

pub type ComboSegment = Positioned<ComboPayload>;

impl EffectivePayload for ComboPayload {
    fn validate(&self) -> Result<(), TimingError> {
        if self.hit_combo < 0 || self.miss_combo < 0 {
            return Err(TimingError::InvalidSegment(format!(
                "combo multipliers must be >= 0, got hit={} miss={}",
                self.hit_combo, self.miss_combo
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPayload {
    pub text: String,
}

pub type LabelSegment = Positioned<LabelPayload>;

impl EffectivePayload for LabelPayload {
    fn validate(&self) -> Result<(), TimingError> {
        if self.text.is_empty() {
            return Err(TimingError::InvalidSegment(
                "label text must be non-empty".to_string(),
            ));
        }
        if self.text.contains(',') || self.text.contains('=') {
            return Err(TimingError::InvalidSegment(format!(
                "label text must not contain ',' or '=': {:?}",
                self.text
            )));
        }
        Ok(())
    }

    fn is_neutral(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    Beats,
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedPayload {
    pub percent: f32,
    pub wait: f32,
    pub unit: SpeedUnit,
}

pub type SpeedSegment = Positioned<SpeedPayload>;

impl EffectivePayload for SpeedPayload {
    fn validate(&self) -> Result<(), TimingError> {
        if self.wait < 0.0 || !self.wait.is_finite() {
            return Err(TimingError::InvalidSegment(format!(
                "speed wait must be non-negative, got {}",
                self.wait
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPayload {
    pub ratio: f32,
}

pub type ScrollSegment = Positioned<ScrollPayload>;

impl EffectivePayload for ScrollPayload {
    fn effectively_equal(&self, other: &Self) -> bool {
        approx_eq_f32(self.ratio, other.ratio)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakePayload {
    pub length_beats: f32,
}

pub type FakeSegment = Positioned<FakePayload>;

impl EffectivePayload for FakePayload {
    fn effectively_equal(&self, other: &Self) -> bool {
        approx_eq_f32(self.length_beats, other.length_beats)
    }

    fn is_neutral(&self) -> bool {
        self.length_beats <= 0.0
    }
}

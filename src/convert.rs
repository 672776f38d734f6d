use crate::query::DEFAULT_BPM;
use crate::row::{beat_to_row, row_to_beat};
use crate::timing::TimingData;

/// Result of a time→beat lookup: the beat and tempo at that instant, plus
/// whether the instant falls inside a stop/delay or a warp.
///
/// `warp_start_beat`/`warp_length_beats` describe the most recent warp
/// applied while resolving the query; `warp_start_beat == -1.0` if none
/// was encountered, mirroring the reference engine's sentinel out-param.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatAndBps {
    pub beat: f32,
    pub bps: f32,
    pub in_freeze: bool,
    pub in_delay: bool,
    pub warp_start_beat: f32,
    pub warp_length_beats: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    WarpDest,
    Bpm,
    Delay,
    Marker,
    Stop,
    Warp,
}

/// Mutable cursor position shared by both walk directions. Indices only
/// ever advance; a fresh cursor is built per query since `TimingData` keeps
/// no conversion cache (see crate docs on caching).
struct Cursor {
    bpm_idx: usize,
    stop_idx: usize,
    delay_idx: usize,
    warp_idx: usize,
    is_warping: bool,
    warp_destination_beat: f64,
    warp_start_beat: f64,
    warp_length_beats: f64,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            bpm_idx: 1,
            stop_idx: 0,
            delay_idx: 0,
            warp_idx: 0,
            is_warping: false,
            warp_destination_beat: -1.0,
            warp_start_beat: -1.0,
            warp_length_beats: 0.0,
        }
    }
}

impl TimingData {
    /// Candidates in check order: WarpDest, Bpm, Delay, Marker, Stop, Warp.
    /// At equal rows the earliest-checked candidate wins, so a Bpm change
    /// coinciding with a Warp's start row is applied before the warp (and
    /// therefore governs the segment after the warp's destination), and a
    /// Delay coinciding with a Stop is applied before it.
    fn find_next_event(&self, cursor: &Cursor, marker_row: Option<i32>) -> Option<(i32, EventKind)> {
        let mut best: Option<(i32, EventKind)> = None;
        let mut consider = |row: i32, kind: EventKind, best: &mut Option<(i32, EventKind)>| {
            if best.is_none() {
                *best = Some((row, kind));
            }
        };

        if cursor.is_warping {
            consider(beat_to_row(cursor.warp_destination_beat), EventKind::WarpDest, &mut best);
        }
        if let Some(s) = self.bpms.as_slice().get(cursor.bpm_idx) {
            let row = s.start_row;
            if best.map(|(r, _)| row < r).unwrap_or(true) {
                best = Some((row, EventKind::Bpm));
            }
        }
        if let Some(s) = self.delays.as_slice().get(cursor.delay_idx) {
            let row = s.start_row;
            if best.map(|(r, _)| row < r).unwrap_or(true) {
                best = Some((row, EventKind::Delay));
            }
        }
        if let Some(marker_row) = marker_row {
            if best.map(|(r, _)| marker_row < r).unwrap_or(true) {
                best = Some((marker_row, EventKind::Marker));
            }
        }
        if let Some(s) = self.stops.as_slice().get(cursor.stop_idx) {
            let row = s.start_row;
            if best.map(|(r, _)| row < r).unwrap_or(true) {
                best = Some((row, EventKind::Stop));
            }
        }
        if let Some(s) = self.warps.as_slice().get(cursor.warp_idx) {
            let row = s.start_row;
            if best.map(|(r, _)| row < r).unwrap_or(true) {
                best = Some((row, EventKind::Warp));
            }
        }
        best
    }

    fn initial_bps(&self) -> f64 {
        self.bpms
            .as_slice()
            .first()
            .map(|s| s.payload.bpm as f64 / 60.0)
            .unwrap_or(DEFAULT_BPM as f64 / 60.0)
    }

    /// Time in seconds for `target_beat`, ignoring `offset_seconds`.
    pub fn elapsed_time_from_beat_no_offset(&self, target_beat: f64) -> f32 {
        let target_row = beat_to_row(target_beat);
        let mut bps = self.initial_bps();
        let mut cursor = Cursor::new();
        let mut last_row = 0i32;
        let mut last_time = 0.0f64;

        while let Some((event_row, kind)) = self.find_next_event(&cursor, Some(target_row)) {
            let event_beat = row_to_beat(event_row);
            let time_to_event = if cursor.is_warping {
                0.0
            } else {
                (event_beat - row_to_beat(last_row)) / bps
            };
            let next_time = last_time + time_to_event;

            if kind == EventKind::Marker {
                last_time = next_time;
                last_row = event_row;
                break;
            }

            last_time = next_time;
            last_row = event_row;
            match kind {
                EventKind::Bpm => {
                    bps = self.bpms.as_slice()[cursor.bpm_idx].payload.bpm as f64 / 60.0;
                    cursor.bpm_idx += 1;
                }
                EventKind::Delay => {
                    last_time += self.delays.as_slice()[cursor.delay_idx].payload.seconds as f64;
                    cursor.delay_idx += 1;
                }
                EventKind::Stop => {
                    last_time += self.stops.as_slice()[cursor.stop_idx].payload.seconds as f64;
                    cursor.stop_idx += 1;
                }
                EventKind::Warp => {
                    let w = &self.warps.as_slice()[cursor.warp_idx];
                    let destination = event_beat + w.payload.length_beats as f64;
                    cursor.warp_destination_beat = cursor.warp_destination_beat.max(destination);
                    cursor.is_warping = true;
                    cursor.warp_idx += 1;
                }
                EventKind::WarpDest => {
                    cursor.is_warping = false;
                }
                EventKind::Marker => unreachable!(),
            }
        }

        (last_time + (target_beat - row_to_beat(last_row)) / bps) as f32
    }

    /// Time in seconds for `target_beat`, accounting for `offset_seconds`.
    pub fn elapsed_time_from_beat(&self, target_beat: f64) -> f32 {
        self.elapsed_time_from_beat_no_offset(target_beat) + self.offset_seconds
    }

    /// Beat, tempo, and freeze/delay/warp state at `target_time` seconds,
    /// ignoring `offset_seconds`.
    pub fn beat_and_bps_from_elapsed_time_no_offset(&self, target_time: f64) -> BeatAndBps {
        let mut bps = self.initial_bps();
        let mut cursor = Cursor::new();
        let mut last_row = 0i32;
        let mut last_time = 0.0f64;

        while let Some((event_row, kind)) = self.find_next_event(&cursor, None) {
            let event_beat = row_to_beat(event_row);
            let time_to_event = if cursor.is_warping {
                0.0
            } else {
                (event_beat - row_to_beat(last_row)) / bps
            };
            let next_time = last_time + time_to_event;

            if target_time < next_time {
                break;
            }

            last_time = next_time;
            last_row = event_row;
            match kind {
                EventKind::Bpm => {
                    bps = self.bpms.as_slice()[cursor.bpm_idx].payload.bpm as f64 / 60.0;
                    cursor.bpm_idx += 1;
                }
                EventKind::Stop => {
                    let duration = self.stops.as_slice()[cursor.stop_idx].payload.seconds as f64;
                    if target_time <= last_time {
                        return BeatAndBps {
                            beat: event_beat as f32,
                            bps: bps as f32,
                            in_freeze: false,
                            in_delay: false,
                            warp_start_beat: cursor.warp_start_beat as f32,
                            warp_length_beats: cursor.warp_length_beats as f32,
                        };
                    }
                    if target_time < last_time + duration {
                        return BeatAndBps {
                            beat: event_beat as f32,
                            bps: bps as f32,
                            in_freeze: true,
                            in_delay: false,
                            warp_start_beat: cursor.warp_start_beat as f32,
                            warp_length_beats: cursor.warp_length_beats as f32,
                        };
                    }
                    last_time += duration;
                    cursor.stop_idx += 1;
                }
                EventKind::Delay => {
                    let duration = self.delays.as_slice()[cursor.delay_idx].payload.seconds as f64;
                    if target_time <= last_time {
                        return BeatAndBps {
                            beat: event_beat as f32,
                            bps: bps as f32,
                            in_freeze: false,
                            in_delay: false,
                            warp_start_beat: cursor.warp_start_beat as f32,
                            warp_length_beats: cursor.warp_length_beats as f32,
                        };
                    }
                    if target_time < last_time + duration {
                        return BeatAndBps {
                            beat: event_beat as f32,
                            bps: bps as f32,
                            in_freeze: false,
                            in_delay: true,
                            warp_start_beat: cursor.warp_start_beat as f32,
                            warp_length_beats: cursor.warp_length_beats as f32,
                        };
                    }
                    last_time += duration;
                    cursor.delay_idx += 1;
                }
                EventKind::Warp => {
                    let w = &self.warps.as_slice()[cursor.warp_idx];
                    cursor.warp_start_beat = event_beat;
                    cursor.warp_length_beats = w.payload.length_beats as f64;
                    let destination = event_beat + w.payload.length_beats as f64;
                    cursor.warp_destination_beat = cursor.warp_destination_beat.max(destination);
                    cursor.is_warping = true;
                    cursor.warp_idx += 1;
                }
                EventKind::WarpDest => {
                    cursor.is_warping = false;
                }
                EventKind::Marker => unreachable!(),
            }
        }

        let beat = row_to_beat(last_row) + (target_time - last_time) * bps;
        BeatAndBps {
            beat: beat as f32,
            bps: bps as f32,
            in_freeze: false,
            in_delay: false,
            warp_start_beat: cursor.warp_start_beat as f32,
            warp_length_beats: cursor.warp_length_beats as f32,
        }
    }

    /// Beat, tempo, and freeze/delay/warp state at `target_time` seconds,
    /// accounting for `offset_seconds`.
    pub fn beat_and_bps_from_elapsed_time(&self, target_time: f64) -> BeatAndBps {
        self.beat_and_bps_from_elapsed_time_no_offset(target_time - self.offset_seconds as f64)
    }
}

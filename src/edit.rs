use crate::error::TimingError;
use crate::math::lrint_f64;
use crate::segment::Positioned;
use crate::store::SegmentStore;
use crate::timing::TimingData;

fn dedup_by_row<P>(entries: &mut Vec<Positioned<P>>) {
    let mut i = 1;
    while i < entries.len() {
        if entries[i].start_row == entries[i - 1].start_row {
            entries.remove(i - 1);
        } else {
            i += 1;
        }
    }
}

fn remap_rows<P>(entries: &mut Vec<Positioned<P>>, start_row: i32, end_row: i32, scale: f64) {
    let tail_shift = lrint_f64((end_row - start_row) as f64 * (scale - 1.0)) as i32;
    for entry in entries.iter_mut() {
        if entry.start_row >= start_row && entry.start_row < end_row {
            entry.start_row =
                start_row + lrint_f64((entry.start_row - start_row) as f64 * scale) as i32;
        } else if entry.start_row >= end_row {
            entry.start_row += tail_shift;
        }
    }
    entries.sort_by_key(|e| e.start_row);
    dedup_by_row(entries);
}

fn shift_rows<P>(entries: &mut Vec<Positioned<P>>, from_row: i32, delta: i32) {
    for entry in entries.iter_mut() {
        if entry.start_row >= from_row {
            entry.start_row += delta;
        }
    }
}

fn remove_and_shift<P>(entries: &mut Vec<Positioned<P>>, start_row: i32, rows_to_delete: i32) {
    entries.retain(|e| !(e.start_row >= start_row && e.start_row < start_row + rows_to_delete));
    shift_rows(entries, start_row + rows_to_delete, -rows_to_delete);
}

fn copy_subrange<P: Clone>(store: &SegmentStore<P>, start_row: i32, end_row: i32) -> SegmentStore<P> {
    let mut out = SegmentStore::new();
    for entry in store.iter() {
        if entry.start_row >= start_row && entry.start_row < end_row {
            out.push_raw(Positioned::new(entry.start_row - start_row, entry.payload.clone()));
        }
    }
    out
}

macro_rules! for_each_store {
    ($self:expr, |$store:ident| $body:block) => {{
        let $store = &mut $self.bpms;
        $body
        let $store = &mut $self.stops;
        $body
        let $store = &mut $self.delays;
        $body
        let $store = &mut $self.warps;
        $body
        let $store = &mut $self.time_signatures;
        $body
        let $store = &mut $self.tickcounts;
        $body
        let $store = &mut $self.combos;
        $body
        let $store = &mut $self.labels;
        $body
        let $store = &mut $self.speeds;
        $body
        let $store = &mut $self.scrolls;
        $body
        let $store = &mut $self.fakes;
        $body
    }};
}

impl TimingData {
    fn validate_region(start_row: i32, end_row: i32) -> Result<(), TimingError> {
        if start_row < 0 {
            return Err(TimingError::OutOfRange { row: start_row });
        }
        if end_row < start_row {
            return Err(TimingError::OutOfRange { row: end_row });
        }
        Ok(())
    }

    /// Rescales every segment in `[start_row, end_row)` by `scale`, shifting
    /// everything after `end_row` by the resulting length delta. With
    /// `adjust_bpm`, BPM segments landing in the rescaled region have their
    /// `bpm` multiplied by `scale` so wall-clock duration is preserved.
    pub fn scale_region(
        &mut self,
        scale: f64,
        start_row: i32,
        end_row: i32,
        adjust_bpm: bool,
    ) -> Result<(), TimingError> {
        Self::validate_region(start_row, end_row)?;
        if scale <= 0.0 || !scale.is_finite() {
            return Err(TimingError::InvalidSegment(format!(
                "scale must be strictly positive, got {scale}"
            )));
        }

        for_each_store!(self, |store| {
            remap_rows(store.entries_mut(), start_row, end_row, scale);
        });

        if adjust_bpm {
            // The region now spans `scale` times as many rows/beats; to keep
            // its wall-clock duration unchanged, bpm must scale up in step
            // (bps * beats stays constant), not down.
            let scaled_end = start_row + lrint_f64((end_row - start_row) as f64 * scale) as i32;
            for entry in self.bpms.entries_mut().iter_mut() {
                if entry.start_row >= start_row && entry.start_row < scaled_end {
                    entry.payload.bpm = (entry.payload.bpm as f64 * scale) as f32;
                }
            }
        }

        self.coalesce_all();
        Ok(())
    }

    /// Shifts every segment with `start_row >= start_row` forward by
    /// `rows_to_add`, across all kinds.
    pub fn insert_rows(&mut self, start_row: i32, rows_to_add: i32) -> Result<(), TimingError> {
        if start_row < 0 {
            return Err(TimingError::OutOfRange { row: start_row });
        }
        if rows_to_add < 0 {
            return Err(TimingError::InvalidSegment(
                "insert_rows requires a non-negative row count".to_string(),
            ));
        }
        for_each_store!(self, |store| {
            shift_rows(store.entries_mut(), start_row, rows_to_add);
        });
        Ok(())
    }

    /// Removes every segment in `[start_row, start_row + rows_to_delete)`
    /// and shifts later segments back by `rows_to_delete`, across all kinds.
    pub fn delete_rows(&mut self, start_row: i32, rows_to_delete: i32) -> Result<(), TimingError> {
        if start_row < 0 {
            return Err(TimingError::OutOfRange { row: start_row });
        }
        if rows_to_delete < 0 {
            return Err(TimingError::InvalidSegment(
                "delete_rows requires a non-negative row count".to_string(),
            ));
        }
        for_each_store!(self, |store| {
            remove_and_shift(store.entries_mut(), start_row, rows_to_delete);
        });
        Ok(())
    }

    /// Multiplies the `bpm` of every BPM segment in `[start_row, end_row)`
    /// by `factor`.
    pub fn multiply_bpm_in_beat_range(
        &mut self,
        start_row: i32,
        end_row: i32,
        factor: f64,
    ) -> Result<(), TimingError> {
        Self::validate_region(start_row, end_row)?;
        if factor <= 0.0 || !factor.is_finite() {
            return Err(TimingError::InvalidSegment(format!(
                "bpm multiplier must be strictly positive, got {factor}"
            )));
        }
        for entry in self.bpms.entries_mut().iter_mut() {
            if entry.start_row >= start_row && entry.start_row < end_row {
                entry.payload.bpm = (entry.payload.bpm as f64 * factor) as f32;
            }
        }
        self.bpms.coalesce_adjacent();
        Ok(())
    }

    /// Returns a new `TimingData` containing the segments in
    /// `[start_row, end_row)`, rebased so the range starts at row 0.
    /// Inherits `offset_seconds`.
    pub fn copy_range(&self, start_row: i32, end_row: i32) -> Result<TimingData, TimingError> {
        Self::validate_region(start_row, end_row)?;
        let mut out = TimingData::new(self.offset_seconds);
        out.bpms = copy_subrange(&self.bpms, start_row, end_row);
        out.stops = copy_subrange(&self.stops, start_row, end_row);
        out.delays = copy_subrange(&self.delays, start_row, end_row);
        out.warps = copy_subrange(&self.warps, start_row, end_row);
        out.time_signatures = copy_subrange(&self.time_signatures, start_row, end_row);
        out.tickcounts = copy_subrange(&self.tickcounts, start_row, end_row);
        out.combos = copy_subrange(&self.combos, start_row, end_row);
        out.labels = copy_subrange(&self.labels, start_row, end_row);
        out.speeds = copy_subrange(&self.speeds, start_row, end_row);
        out.scrolls = copy_subrange(&self.scrolls, start_row, end_row);
        out.fakes = copy_subrange(&self.fakes, start_row, end_row);
        out.coalesce_all();
        Ok(out)
    }

    pub(crate) fn coalesce_all(&mut self) {
        self.bpms.coalesce_adjacent();
        self.stops.coalesce_adjacent();
        self.delays.coalesce_adjacent();
        self.warps.coalesce_adjacent();
        self.time_signatures.coalesce_adjacent();
        self.tickcounts.coalesce_adjacent();
        self.combos.coalesce_adjacent();
        self.labels.coalesce_adjacent();
        self.speeds.coalesce_adjacent();
        self.scrolls.coalesce_adjacent();
        self.fakes.coalesce_adjacent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BpmPayload;

    #[test]
    fn insert_then_delete_is_identity() {
        let mut t = TimingData::new(0.0);
        t.bpms.set_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
        t.bpms.set_at_row(96, BpmPayload { bpm: 140.0 }).unwrap();
        let original = t.clone();

        t.insert_rows(24, 96).unwrap();
        t.delete_rows(24, 96).unwrap();
        assert_eq!(t, original);
    }

    #[test]
    fn scale_region_preserves_duration_with_bpm_adjust() {
        let mut t = TimingData::new(0.0);
        t.bpms.set_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
        let before = t.elapsed_time_from_beat(4.0);

        t.scale_region(2.0, 0, crate::row::beat_to_row(4.0), true).unwrap();

        assert_eq!(t.bpms.as_slice()[0].payload.bpm, 240.0);
        let after = t.elapsed_time_from_beat(8.0);
        assert!((before - after).abs() < 1e-3);
    }

    #[test]
    fn multiply_bpm_in_range_scales_only_that_range() {
        let mut t = TimingData::new(0.0);
        t.bpms.set_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
        t.bpms.set_at_row(96, BpmPayload { bpm: 120.0 }).unwrap();
        t.multiply_bpm_in_beat_range(0, 48, 2.0).unwrap();
        assert_eq!(t.bpms.as_slice()[0].payload.bpm, 240.0);
    }

    #[test]
    fn copy_range_rebases_to_zero() {
        let mut t = TimingData::new(0.0);
        t.bpms.set_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
        t.bpms.set_at_row(96, BpmPayload { bpm: 140.0 }).unwrap();
        let sub = t.copy_range(96, 192).unwrap();
        assert_eq!(sub.bpms().as_slice().len(), 1);
        assert_eq!(sub.bpms().as_slice()[0].start_row, 0);
        assert_eq!(sub.bpms().as_slice()[0].payload.bpm, 140.0);
    }

    #[test]
    fn equality_ignores_source_file() {
        let mut t = TimingData::new(0.0).with_source_file("song.sm");
        t.bpms.set_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();
        let mut other = TimingData::new(0.0);
        other.bpms.set_at_row(0, BpmPayload { bpm: 120.0 }).unwrap();

        assert_ne!(t.source_file(), other.source_file());
        assert_eq!(t, other, "source_file is informational only and must not affect equality");
    }

    #[test]
    fn copy_range_result_can_equal_an_original_with_a_different_source_file() {
        let mut t = TimingData::new(0.0).with_source_file("song.sm");
        t.bpms.set_at_row(0, BpmPayload { bpm: 140.0 }).unwrap();
        let whole_file_copy = t.copy_range(0, i32::MAX).unwrap();

        let mut hand_built = TimingData::new(0.0);
        hand_built.bpms.set_at_row(0, BpmPayload { bpm: 140.0 }).unwrap();

        assert_eq!(whole_file_copy, hand_built);
    }
}

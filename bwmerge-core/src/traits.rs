use std::collections::{HashMap, HashSet};

use crate::errors::TrackError;
use crate::models::{ChromSize, ChromosomeCatalog, MergedInterval};

///
/// A readable signal track: a chromosome list, a declared maximum and dense,
/// random-access values per chromosome.
///
pub trait SignalTrack {
    /// Chromosomes in the order the track lists them.
    fn chroms(&self) -> &[ChromSize];

    /// The maximum value the track declares for itself (its header summary).
    fn declared_max(&self) -> f64;

    ///
    /// Dense values for the half-open range [start, end) of `chrom`.
    ///
    /// Positions without data are `NaN`, never zero. The returned vector holds exactly
    /// `end - start` values.
    ///
    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>, TrackError>;

    /// An independent handle on the same track, used for parallel reads.
    fn try_clone(&self) -> Result<Self, TrackError>
    where
        Self: Sized;
}

///
/// The sink of a merge. A writer is started once with the reconciled catalog,
/// receives one interval list per chromosome and is then finished or aborted.
///
pub trait TrackWriter {
    /// Install the chromosome catalog and prepare the output.
    fn begin(&mut self, catalog: &ChromosomeCatalog) -> Result<(), TrackError>;

    /// Append the sorted, non-overlapping intervals of one chromosome.
    fn append(&mut self, chrom: &str, intervals: &[MergedInterval]) -> Result<(), TrackError>;

    /// Flush and close the output. After this the output is complete.
    fn finish(&mut self) -> Result<(), TrackError>;

    /// Discard the output. Must release every resource and never leave a partial output.
    fn abort(&mut self);
}

/// Checks that appended interval lists are consistent with the installed catalog.
#[derive(Debug, Default)]
pub struct IntervalValidator {
    lengths: HashMap<String, u32>,
    written: HashSet<String>,
}

impl IntervalValidator {
    pub fn new(catalog: &ChromosomeCatalog) -> Self {
        IntervalValidator {
            lengths: catalog.chrom_sizes(),
            written: HashSet::new(),
        }
    }

    pub fn check(&mut self, chrom: &str, intervals: &[MergedInterval]) -> Result<(), TrackError> {
        let length = *self
            .lengths
            .get(chrom)
            .ok_or_else(|| TrackError::UnknownChrom(chrom.to_string()))?;

        if !self.written.insert(chrom.to_string()) {
            return Err(TrackError::DuplicateChrom(chrom.to_string()));
        }

        let mut previous_end = 0;
        for interval in intervals {
            if interval.start >= interval.end || interval.end > length {
                return Err(TrackError::IntervalOutOfBounds {
                    chrom: chrom.to_string(),
                    start: interval.start,
                    end: interval.end,
                    length,
                });
            }
            if interval.start < previous_end {
                return Err(TrackError::UnsortedInterval {
                    chrom: chrom.to_string(),
                    start: interval.start,
                    end: interval.end,
                });
            }
            previous_end = interval.end;
        }

        Ok(())
    }
}

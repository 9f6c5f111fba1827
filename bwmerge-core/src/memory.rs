//! In-memory tracks and writers, for embedding the engine without any file format.
use std::collections::HashMap;

use crate::errors::TrackError;
use crate::models::{ChromSize, ChromosomeCatalog, MergedInterval};
use crate::traits::{IntervalValidator, SignalTrack, TrackWriter};

/// A signal track held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTrack {
    chroms: Vec<ChromSize>,
    max: f64,
    values: HashMap<String, Vec<f32>>,
}

impl MemoryTrack {
    pub fn new(declared_max: f64) -> Self {
        MemoryTrack {
            max: declared_max,
            ..Default::default()
        }
    }

    /// Add a chromosome whose length is the number of values given.
    pub fn with_chrom(mut self, name: &str, values: Vec<f32>) -> Self {
        self.chroms.push(ChromSize::new(name, values.len() as u32));
        self.values.insert(name.to_string(), values);
        self
    }

    /// List a chromosome without holding any data for it; fetching it fails.
    pub fn with_listed_chrom(mut self, name: &str, length: u32) -> Self {
        self.chroms.push(ChromSize::new(name, length));
        self
    }
}

impl SignalTrack for MemoryTrack {
    fn chroms(&self) -> &[ChromSize] {
        &self.chroms
    }

    fn declared_max(&self) -> f64 {
        self.max
    }

    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>, TrackError> {
        let values = self
            .values
            .get(chrom)
            .ok_or_else(|| TrackError::UnknownChrom(chrom.to_string()))?;

        let length = values.len() as u32;
        if start > end || end > length {
            return Err(TrackError::IntervalOutOfBounds {
                chrom: chrom.to_string(),
                start,
                end,
                length,
            });
        }
        Ok(values[start as usize..end as usize].to_vec())
    }

    fn try_clone(&self) -> Result<Self, TrackError> {
        Ok(self.clone())
    }
}

/// Collects merged intervals in memory, applying the same checks as a file writer.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub chrom_sizes: Vec<ChromSize>,
    pub chroms: Vec<(String, Vec<MergedInterval>)>,
    pub finished: bool,
    pub aborted: bool,
    validator: Option<IntervalValidator>,
    reject: Option<String>,
}

impl MemoryWriter {
    /// A writer that rejects the intervals of `chrom`.
    pub fn rejecting(chrom: &str) -> Self {
        MemoryWriter {
            reject: Some(chrom.to_string()),
            ..Default::default()
        }
    }

    pub fn intervals(&self, chrom: &str) -> Option<&[MergedInterval]> {
        self.chroms
            .iter()
            .find(|(name, _)| name == chrom)
            .map(|(_, intervals)| intervals.as_slice())
    }
}

impl TrackWriter for MemoryWriter {
    fn begin(&mut self, catalog: &ChromosomeCatalog) -> Result<(), TrackError> {
        self.chrom_sizes = catalog
            .iter()
            .map(|e| ChromSize::new(&e.name, e.length))
            .collect();
        self.validator = Some(IntervalValidator::new(catalog));
        Ok(())
    }

    fn append(&mut self, chrom: &str, intervals: &[MergedInterval]) -> Result<(), TrackError> {
        let validator = self.validator.as_mut().ok_or(TrackError::NotStarted)?;
        validator.check(chrom, intervals)?;

        if self.reject.as_deref() == Some(chrom) {
            return Err(TrackError::Io(std::io::Error::other(format!(
                "writer refused intervals for {}",
                chrom
            ))));
        }

        self.chroms.push((chrom.to_string(), intervals.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TrackError> {
        if self.validator.is_none() {
            return Err(TrackError::NotStarted);
        }
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.chroms.clear();
        self.aborted = true;
    }
}

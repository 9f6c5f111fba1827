use log::debug;

use crate::config::MergeConfig;
use crate::errors::{MergeError, Result, TrackError};
use crate::models::{ChromosomeEntry, MergedInterval};
use crate::traits::SignalTrack;
use crate::weights::WeightVector;

/// Per-window accumulation buffers, reused from one chromosome to the next.
#[derive(Debug, Default)]
pub struct MergeScratch {
    sums: Vec<f64>,
    covered: Vec<bool>,
}

impl MergeScratch {
    fn reset(&mut self, span: usize) {
        self.sums.clear();
        self.sums.resize(span, 0.0);
        self.covered.clear();
        self.covered.resize(span, false);
    }
}

/// The merged intervals of one chromosome.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChromMerge {
    pub intervals: Vec<MergedInterval>,
    /// Positions left out because no contributing input had data there.
    pub skipped: u64,
}

///
/// Combines the values of every input holding a chromosome into one weighted sum per
/// position.
///
/// A position where every contributing input is `NaN` holds no data and is skipped. Any
/// other position gets the sum of `value * weight` over the inputs that have a value
/// there; missing values contribute nothing.
///
pub struct PositionalMerger<'a> {
    weights: &'a WeightVector,
    window_size: u32,
    coalesce_runs: bool,
}

impl<'a> PositionalMerger<'a> {
    pub fn new(weights: &'a WeightVector, config: &MergeConfig) -> Self {
        PositionalMerger {
            weights,
            window_size: config.window_size.max(1),
            coalesce_runs: config.coalesce_runs,
        }
    }

    pub fn merge_chromosome<T: SignalTrack>(
        &self,
        entry: &ChromosomeEntry,
        inputs: &mut [T],
        scratch: &mut MergeScratch,
    ) -> Result<ChromMerge> {
        let mut merged = ChromMerge::default();

        let mut start = 0u32;
        while start < entry.length {
            let end = start.saturating_add(self.window_size).min(entry.length);
            self.merge_window(entry, inputs, scratch, start, end)?;

            for (offset, (&sum, &covered)) in scratch.sums.iter().zip(&scratch.covered).enumerate() {
                if !covered {
                    merged.skipped += 1;
                    continue;
                }
                self.push(&mut merged.intervals, start + offset as u32, sum as f32);
            }

            start = end;
        }

        debug!(
            "{}: {} intervals, {} positions without data",
            entry.name,
            merged.intervals.len(),
            merged.skipped
        );

        Ok(merged)
    }

    fn merge_window<T: SignalTrack>(
        &self,
        entry: &ChromosomeEntry,
        inputs: &mut [T],
        scratch: &mut MergeScratch,
        start: u32,
        end: u32,
    ) -> Result<()> {
        let span = (end - start) as usize;
        scratch.reset(span);
        let loaded = inputs.len().min(self.weights.len());

        for input in entry.inputs() {
            let (track, weight) = match (inputs.get_mut(input), self.weights.get(input)) {
                (Some(track), Some(weight)) => (track, weight),
                _ => {
                    return Err(MergeError::Configuration(format!(
                        "{} refers to input {} but only {} inputs are loaded",
                        entry.name, input, loaded
                    )));
                }
            };

            // An input shorter than the catalog length has no data past its own end.
            let input_end = entry.length_in(input).unwrap_or(entry.length).min(end);
            if input_end <= start {
                continue;
            }
            let expected = (input_end - start) as usize;

            let values = track
                .values(&entry.name, start, input_end)
                .map_err(|source| MergeError::Fetch {
                    chrom: entry.name.clone(),
                    input,
                    source,
                })?;

            if values.len() != expected {
                return Err(MergeError::Fetch {
                    chrom: entry.name.clone(),
                    input,
                    source: TrackError::ShortRead {
                        chrom: entry.name.clone(),
                        expected,
                        found: values.len(),
                    },
                });
            }

            for (p, value) in values.iter().enumerate() {
                if value.is_nan() {
                    continue;
                }
                scratch.covered[p] = true;
                scratch.sums[p] += *value as f64 * weight;
            }
        }

        Ok(())
    }

    fn push(&self, intervals: &mut Vec<MergedInterval>, position: u32, value: f32) {
        if self.coalesce_runs {
            if let Some(last) = intervals.last_mut() {
                if last.end == position && last.value.to_bits() == value.to_bits() {
                    last.end += 1;
                    return;
                }
            }
        }
        intervals.push(MergedInterval::at(position, value));
    }
}

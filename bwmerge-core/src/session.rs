use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::config::MergeConfig;
use crate::errors::{MergeError, Result, WriteStage};
use crate::merge::{ChromMerge, MergeScratch, PositionalMerger};
use crate::models::{ChromosomeCatalog, ChromosomeEntry};
use crate::reconcile::{check_input_count, reconcile};
use crate::traits::{SignalTrack, TrackWriter};
use crate::weights::{WeightVector, compute_weights};

/// Totals reported at the end of a successful merge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub chromosomes: usize,
    pub intervals: u64,
    pub skipped_positions: u64,
}

///
/// One merge of a set of inputs into a single output.
///
/// Creating the session reconciles the chromosome catalog and computes the weights; both
/// are frozen from then on. [`MergeSession::run`] then streams every chromosome, in
/// catalog order, into a [`TrackWriter`]. Any failure aborts the writer so no partial
/// output survives.
///
pub struct MergeSession<'a, T: SignalTrack> {
    inputs: &'a mut [T],
    config: MergeConfig,
    catalog: ChromosomeCatalog,
    weights: WeightVector,
}

impl<'a, T: SignalTrack + Send> MergeSession<'a, T> {
    pub fn new(inputs: &'a mut [T], config: MergeConfig) -> Result<Self> {
        config.validate()?;
        check_input_count(inputs.len())?;

        info!("Reconciling chromosomes across {} inputs", inputs.len());
        let catalog = reconcile(inputs)?;
        check_length_conflicts(&catalog, config.strict_lengths)?;

        let weights = compute_weights(inputs)?;

        Ok(MergeSession {
            inputs,
            config,
            catalog,
            weights,
        })
    }

    pub fn catalog(&self) -> &ChromosomeCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge every chromosome into `writer`. The writer is aborted on any error.
    pub fn run<W: TrackWriter + ?Sized>(mut self, writer: &mut W) -> Result<MergeSummary> {
        match self.write_all(writer) {
            Ok(summary) => {
                info!(
                    "Wrote {} intervals over {} chromosomes ({} positions without data)",
                    summary.intervals, summary.chromosomes, summary.skipped_positions
                );
                Ok(summary)
            }
            Err(err) => {
                writer.abort();
                Err(err)
            }
        }
    }

    fn write_all<W: TrackWriter + ?Sized>(&mut self, writer: &mut W) -> Result<MergeSummary> {
        writer
            .begin(&self.catalog)
            .map_err(|source| MergeError::Write {
                stage: WriteStage::Header,
                source,
            })?;

        let bar = match self.config.progress {
            true => ProgressBar::new(self.catalog.len() as u64),
            false => ProgressBar::hidden(),
        };

        let mut summary = MergeSummary::default();
        if self.config.threads > 1 {
            self.merge_parallel(writer, &bar, &mut summary)?;
        } else {
            self.merge_sequential(writer, &bar, &mut summary)?;
        }
        bar.finish_and_clear();

        writer.finish().map_err(|source| MergeError::Write {
            stage: WriteStage::Finalize,
            source,
        })?;

        Ok(summary)
    }

    fn merge_sequential<W: TrackWriter + ?Sized>(
        &mut self,
        writer: &mut W,
        bar: &ProgressBar,
        summary: &mut MergeSummary,
    ) -> Result<()> {
        let merger = PositionalMerger::new(&self.weights, &self.config);
        let mut scratch = MergeScratch::default();

        for entry in self.catalog.iter() {
            let merged = merger.merge_chromosome(entry, &mut *self.inputs, &mut scratch)?;
            commit(writer, entry, merged, summary)?;
            bar.inc(1);
        }

        Ok(())
    }

    /// Merges `threads` chromosomes at a time, each on its own input handles, and
    /// writes the batch in catalog order once every chromosome of it succeeded.
    fn merge_parallel<W: TrackWriter + ?Sized>(
        &mut self,
        writer: &mut W,
        bar: &ProgressBar,
        summary: &mut MergeSummary,
    ) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| MergeError::Configuration(format!("can't build thread pool: {}", e)))?;

        let merger = PositionalMerger::new(&self.weights, &self.config);
        let entries: Vec<&ChromosomeEntry> = self.catalog.iter().collect();

        for batch in entries.chunks(self.config.threads) {
            let mut jobs: Vec<(&ChromosomeEntry, Vec<T>)> = Vec::with_capacity(batch.len());
            for entry in batch {
                let tracks = self
                    .inputs
                    .iter()
                    .enumerate()
                    .map(|(input, track)| {
                        track.try_clone().map_err(|source| MergeError::Fetch {
                            chrom: entry.name.clone(),
                            input,
                            source,
                        })
                    })
                    .collect::<Result<Vec<T>>>()?;
                jobs.push((*entry, tracks));
            }

            let results = pool.install(|| {
                jobs.into_par_iter()
                    .map(|(entry, mut tracks)| {
                        let mut scratch = MergeScratch::default();
                        merger.merge_chromosome(entry, &mut tracks, &mut scratch)
                    })
                    .collect::<Result<Vec<ChromMerge>>>()
            })?;

            for (entry, merged) in batch.iter().zip(results) {
                commit(writer, entry, merged, summary)?;
                bar.inc(1);
            }
        }

        Ok(())
    }
}

fn commit<W: TrackWriter + ?Sized>(
    writer: &mut W,
    entry: &ChromosomeEntry,
    merged: ChromMerge,
    summary: &mut MergeSummary,
) -> Result<()> {
    debug!("Adding {} intervals to {}", merged.intervals.len(), entry.name);

    writer
        .append(&entry.name, &merged.intervals)
        .map_err(|source| MergeError::Write {
            stage: WriteStage::Chrom(entry.name.clone()),
            source,
        })?;

    summary.chromosomes += 1;
    summary.intervals += merged.intervals.len() as u64;
    summary.skipped_positions += merged.skipped;
    Ok(())
}

fn check_length_conflicts(catalog: &ChromosomeCatalog, strict: bool) -> Result<()> {
    for conflict in catalog.conflicts() {
        if strict {
            return Err(MergeError::ChromLengthMismatch {
                chrom: conflict.chrom.clone(),
                first_input: conflict.first_input,
                recorded: conflict.recorded,
                input: conflict.input,
                reported: conflict.reported,
            });
        }
        warn!(
            "{} is {} long in input {} but {} long in input {}; keeping {}",
            conflict.chrom,
            conflict.recorded,
            conflict.first_input,
            conflict.reported,
            conflict.input,
            conflict.recorded
        );
    }
    Ok(())
}

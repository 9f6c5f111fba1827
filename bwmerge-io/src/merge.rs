use std::path::Path;

use log::info;

use bwmerge_core::reconcile::check_input_count;
use bwmerge_core::{
    ChromosomeCatalog, MergeConfig, MergeError, MergeSession, MergeSummary, Result, SignalTrack,
    WeightVector,
};

use crate::bigwig::BigWigTrack;
use crate::writer::BigWigWriter;

/// Open every input path, in order.
pub fn open_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<BigWigTrack>> {
    paths
        .iter()
        .enumerate()
        .map(|(input, path)| {
            BigWigTrack::open(path).map_err(|source| MergeError::Open {
                input,
                path: path.as_ref().display().to_string(),
                source,
            })
        })
        .collect()
}

///
/// Merge bigWig files into a single weighted-average bigWig.
///
/// Inputs are validated, reconciled and weighted before the output is touched, so a
/// merge that can't start never creates or truncates `output`. A merge that fails
/// part-way removes the output.
///
/// # Arguments
/// - inputs: paths to the bigWig files to merge (at least two)
/// - output: path of the bigWig file to create
/// - config: settings for this merge
pub fn merge_bigwig_files<P: AsRef<Path>, Q: AsRef<Path>>(
    inputs: &[P],
    output: Q,
    config: MergeConfig,
) -> Result<MergeSummary> {
    check_input_count(inputs.len())?;
    let mut tracks = open_inputs(inputs)?;

    let session = MergeSession::new(&mut tracks, config)?;
    let mut writer = BigWigWriter::new(output.as_ref(), session.config());

    info!(
        "Merging {} chromosomes into {}",
        session.catalog().len(),
        output.as_ref().display()
    );
    session.run(&mut writer)
}

/// What a merge would do, without writing anything.
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub maxima: Vec<f64>,
    pub weights: WeightVector,
    pub catalog: ChromosomeCatalog,
}

/// Reconcile and weight the inputs of a merge without creating any output.
pub fn plan_merge<P: AsRef<Path>>(inputs: &[P], config: MergeConfig) -> Result<MergePlan> {
    check_input_count(inputs.len())?;
    let mut tracks = open_inputs(inputs)?;
    let maxima = tracks.iter().map(|t| t.declared_max()).collect();

    let session = MergeSession::new(&mut tracks, config)?;
    Ok(MergePlan {
        maxima,
        weights: session.weights().clone(),
        catalog: session.catalog().clone(),
    })
}

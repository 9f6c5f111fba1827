use log::debug;

use crate::consts::MIN_INPUTS;
use crate::errors::{MergeError, Result};
use crate::models::ChromosomeCatalog;
use crate::traits::SignalTrack;

///
/// Reconcile the chromosome lists of every input into a single catalog.
///
/// The catalog is seeded from the first input; every later input adds the chromosomes it
/// lists and marks itself present on the ones already known. Nothing is ever dropped.
///
/// # Arguments
/// - inputs: the tracks being merged, in input order
///
pub fn reconcile<T: SignalTrack>(inputs: &[T]) -> Result<ChromosomeCatalog> {
    if inputs.is_empty() {
        return Err(MergeError::Configuration(
            "no inputs to seed the chromosome catalog from".to_string(),
        ));
    }

    let catalog = ChromosomeCatalog::from_chrom_lists(inputs.iter().map(|t| t.chroms()));

    for entry in catalog.iter() {
        debug!(
            "{}: length={} inputs={:?}",
            entry.name,
            entry.length,
            entry.inputs().collect::<Vec<_>>()
        );
    }

    Ok(catalog)
}

/// Reject input lists too short to merge.
pub fn check_input_count(count: usize) -> Result<()> {
    if count < MIN_INPUTS {
        return Err(MergeError::Configuration(format!(
            "at least {} inputs are required, got {}",
            MIN_INPUTS, count
        )));
    }
    Ok(())
}

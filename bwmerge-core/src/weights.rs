use std::ops::Index;

use log::info;

use crate::errors::{MergeError, Result};
use crate::traits::SignalTrack;

/// One normalized weight per input, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    weights: Vec<f64>,
}

impl WeightVector {
    ///
    /// Normalize declared maxima into weights: `max[i] / sum(max)`.
    ///
    /// Fails with [`MergeError::DegenerateWeights`] when the sum is zero or not finite,
    /// including the empty case.
    ///
    pub fn from_maxima(maxima: &[f64]) -> Result<Self> {
        let total: f64 = maxima.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Err(MergeError::DegenerateWeights { total });
        }

        Ok(WeightVector {
            weights: maxima.iter().map(|m| m / total).collect(),
        })
    }

    pub fn get(&self, input: usize) -> Option<f64> {
        self.weights.get(input).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl Index<usize> for WeightVector {
    type Output = f64;

    fn index(&self, input: usize) -> &f64 {
        &self.weights[input]
    }
}

/// Weights for each input derived from its declared maximum.
pub fn compute_weights<T: SignalTrack>(inputs: &[T]) -> Result<WeightVector> {
    let maxima: Vec<f64> = inputs.iter().map(|t| t.declared_max()).collect();
    let weights = WeightVector::from_maxima(&maxima)?;

    info!("Maximums: {:?}", maxima);
    info!("Total maximum: {}", maxima.iter().sum::<f64>());
    info!("Factors: {:?}", weights.as_slice());

    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    use crate::memory::MemoryTrack;

    const WEIGHT_TOLERANCE: f64 = 1e-9;

    #[rstest]
    fn test_weights_from_scenario() {
        let weights = WeightVector::from_maxima(&[4.0, 6.0]).unwrap();
        assert!((weights[0] - 0.4).abs() < WEIGHT_TOLERANCE);
        assert!((weights[1] - 0.6).abs() < WEIGHT_TOLERANCE);
    }

    #[rstest]
    #[case(vec![1.0, 1.0])]
    #[case(vec![0.1, 0.2, 0.3])]
    #[case(vec![0.0, 17.5, 3.25, 1e6])]
    #[case(vec![1e-12, 3e-12])]
    fn test_weights_sum_to_one(#[case] maxima: Vec<f64>) {
        let weights = WeightVector::from_maxima(&maxima).unwrap();
        assert_eq!(weights.len(), maxima.len());
        assert!((weights.sum() - 1.0).abs() < WEIGHT_TOLERANCE);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![0.0, 0.0])]
    #[case(vec![f64::NAN, 1.0])]
    #[case(vec![f64::INFINITY, 1.0])]
    fn test_degenerate_weights(#[case] maxima: Vec<f64>) {
        let result = WeightVector::from_maxima(&maxima);
        assert!(matches!(result, Err(MergeError::DegenerateWeights { .. })));
    }

    #[rstest]
    fn test_compute_weights_from_tracks() {
        let inputs = vec![
            MemoryTrack::new(1.0).with_chrom("chr1", vec![1.0]),
            MemoryTrack::new(3.0).with_chrom("chr1", vec![3.0]),
        ];
        let weights = compute_weights(&inputs).unwrap();
        assert_eq!(weights.as_slice(), &[0.25, 0.75]);
    }
}

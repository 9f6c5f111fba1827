//! # Weighted merging of genomic signal tracks.
//!
//! `bwmerge-core` holds the merge engine behind `bwmerge`: it reconciles the chromosome
//! lists of several signal tracks into one catalog, derives a weight per track from its
//! declared maximum, and combines the per-position values of every track into a single
//! weighted-sum interval stream per chromosome.
//!
//! The engine never touches a file format directly. Inputs are anything implementing
//! [`SignalTrack`] and the output is anything implementing [`TrackWriter`]; the bigWig
//! implementations live in `bwmerge-io`.
//!
//! ```
//! use bwmerge_core::{MemoryTrack, MemoryWriter, MergeConfig, MergeSession};
//!
//! let mut inputs = vec![
//!     MemoryTrack::new(4.0).with_chrom("chrX", vec![1.0, f32::NAN, 2.0]),
//!     MemoryTrack::new(6.0).with_chrom("chrX", vec![3.0, 5.0, f32::NAN]),
//! ];
//! let mut writer = MemoryWriter::default();
//!
//! let session = MergeSession::new(&mut inputs, MergeConfig::default()).unwrap();
//! let summary = session.run(&mut writer).unwrap();
//!
//! assert_eq!(summary.intervals, 3);
//! ```
pub mod config;
pub mod consts;
pub mod errors;
pub mod memory;
pub mod merge;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod traits;
pub mod weights;

// re-export for cleaner imports
pub use config::MergeConfig;
pub use errors::{MergeError, Result, TrackError, WriteStage};
pub use memory::{MemoryTrack, MemoryWriter};
pub use merge::{ChromMerge, MergeScratch, PositionalMerger};
pub use models::{ChromSize, ChromosomeCatalog, ChromosomeEntry, LengthConflict, MergedInterval};
pub use reconcile::reconcile;
pub use session::{MergeSession, MergeSummary};
pub use traits::{IntervalValidator, SignalTrack, TrackWriter};
pub use weights::{WeightVector, compute_weights};

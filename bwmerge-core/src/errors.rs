use std::fmt;

use thiserror::Error;

/// Failures reported by a track reader or writer.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Chromosome not found in track: {0}")]
    UnknownChrom(String),

    #[error("Chromosome {0} was already written")]
    DuplicateChrom(String),

    #[error("Interval {start}-{end} on {chrom} is out of order or overlaps the previous interval")]
    UnsortedInterval { chrom: String, start: u32, end: u32 },

    #[error("Interval {start}-{end} on {chrom} is invalid for a chromosome of length {length}")]
    IntervalOutOfBounds {
        chrom: String,
        start: u32,
        end: u32,
        length: u32,
    },

    #[error("Expected {expected} values for {chrom} but the track returned {found}")]
    ShortRead {
        chrom: String,
        expected: usize,
        found: usize,
    },

    #[error("Track writer has not been started")]
    NotStarted,

    #[error("BigWig error: {0}")]
    BigWig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The point in the output lifecycle at which a write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStage {
    Header,
    Chrom(String),
    Finalize,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStage::Header => write!(f, "header and chromosome list"),
            WriteStage::Chrom(name) => write!(f, "intervals for {}", name),
            WriteStage::Finalize => write!(f, "finalization"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to open input {input} ({path}): {source}")]
    Open {
        input: usize,
        path: String,
        #[source]
        source: TrackError,
    },

    #[error("Failed to fetch values for {chrom} from input {input}: {source}")]
    Fetch {
        chrom: String,
        input: usize,
        #[source]
        source: TrackError,
    },

    #[error("Failed to write {stage}: {source}")]
    Write {
        stage: WriteStage,
        #[source]
        source: TrackError,
    },

    #[error("Cannot compute weights: declared maxima sum to {total}")]
    DegenerateWeights { total: f64 },

    #[error(
        "Chromosome {chrom} has length {recorded} in input {first_input} but {reported} in input {input}"
    )]
    ChromLengthMismatch {
        chrom: String,
        first_input: usize,
        recorded: u32,
        input: usize,
        reported: u32,
    },
}

pub type Result<T> = std::result::Result<T, MergeError>;

use std::path::Path;

use bigtools::BigWigRead;
use bigtools::utils::reopen::ReopenableFile;

use bwmerge_core::{ChromSize, SignalTrack, TrackError};

/// A bigWig file opened for reading.
pub struct BigWigTrack {
    path: String,
    reader: BigWigRead<ReopenableFile>,
    chroms: Vec<ChromSize>,
    max: f64,
}

impl BigWigTrack {
    ///
    /// Open a bigWig file and read its chromosome list and total summary.
    ///
    /// # Arguments
    /// - path: path to the bigWig file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TrackError> {
        let path = path.as_ref().to_string_lossy().to_string();

        let mut reader = BigWigRead::open_file(&path)
            .map_err(|e| TrackError::BigWig(format!("can't open {}: {:?}", path, e)))?;

        let chroms = reader
            .chroms()
            .iter()
            .map(|c| ChromSize::new(&c.name, c.length))
            .collect();

        let summary = reader
            .get_summary()
            .map_err(|e| TrackError::BigWig(format!("can't read summary of {}: {}", path, e)))?;

        Ok(BigWigTrack {
            path,
            reader,
            chroms,
            max: summary.max_val,
        })
    }
}

impl SignalTrack for BigWigTrack {
    fn chroms(&self) -> &[ChromSize] {
        &self.chroms
    }

    fn declared_max(&self) -> f64 {
        self.max
    }

    fn values(&mut self, chrom: &str, start: u32, end: u32) -> Result<Vec<f32>, TrackError> {
        self.reader
            .values(chrom, start, end)
            .map_err(|e| TrackError::BigWig(format!("{}:{}-{}: {}", chrom, start, end, e)))
    }

    fn try_clone(&self) -> Result<Self, TrackError> {
        BigWigTrack::open(&self.path)
    }
}

/// What a bigWig file declares about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub path: String,
    pub chroms: Vec<ChromSize>,
    pub declared_max: f64,
}

/// Read the chromosome list and declared maximum of a bigWig file.
pub fn inspect_bigwig<P: AsRef<Path>>(path: P) -> Result<TrackInfo, TrackError> {
    let track = BigWigTrack::open(path)?;
    Ok(TrackInfo {
        path: track.path.clone(),
        chroms: track.chroms.clone(),
        declared_max: track.max,
    })
}

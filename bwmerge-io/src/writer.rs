use std::fs::{File, create_dir_all, remove_file};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, SyncSender};
use std::thread::{self, JoinHandle};

use bigtools::beddata::BedParserStreamingIterator;
use bigtools::{BigWigWrite, InputSortType, Value};
use log::{debug, warn};
use tokio::runtime;

use bwmerge_core::{
    ChromosomeCatalog, IntervalValidator, MergeConfig, MergedInterval, TrackError, TrackWriter,
};

use crate::consts::WRITER_CHANNEL_CAPACITY;

type ValueItem = Result<(String, Value), io::Error>;

///
/// Writes a merged track as a bigWig file.
///
/// bigtools consumes its input as one stream, so the writer runs on its own thread and
/// `append` feeds it through a bounded channel. Nothing is created on disk until
/// [`TrackWriter::begin`]. A writer that is aborted, fails, or is dropped before
/// [`TrackWriter::finish`] removes the file it created.
///
pub struct BigWigWriter {
    path: PathBuf,
    config: MergeConfig,
    sender: Option<SyncSender<ValueItem>>,
    handle: Option<JoinHandle<Result<(), String>>>,
    validator: Option<IntervalValidator>,
    created: bool,
}

impl BigWigWriter {
    pub fn new<P: AsRef<Path>>(path: P, config: &MergeConfig) -> Self {
        BigWigWriter {
            path: path.as_ref().to_path_buf(),
            config: config.clone(),
            sender: None,
            handle: None,
            validator: None,
            created: false,
        }
    }

    fn create_bw_writer(&self, catalog: &ChromosomeCatalog) -> Result<BigWigWrite<File>, TrackError> {
        let mut outb = BigWigWrite::create_file(
            self.path.to_string_lossy().to_string(),
            catalog.chrom_sizes(),
        )
        .map_err(|e| TrackError::BigWig(format!("can't create {}: {}", self.path.display(), e)))?;

        outb.options.max_zooms = self.config.zoom_levels;
        outb.options.compress = self.config.compress;
        outb.options.input_sort_type = InputSortType::START;
        outb.options.block_size = self.config.block_size;
        outb.options.items_per_slot = self.config.items_per_slot;

        Ok(outb)
    }

    /// Wait for the writer thread and surface its error, if any.
    fn join(&mut self) -> Result<(), TrackError> {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(msg)) => Err(TrackError::BigWig(msg)),
                Err(_) => Err(TrackError::BigWig("bigWig writer thread panicked".to_string())),
            },
            None => Ok(()),
        }
    }

    fn remove_output(&mut self) {
        if !self.created {
            return;
        }
        self.created = false;
        remove_file(&self.path).unwrap_or_else(|e| {
            warn!("Error deleting file {}: {}", self.path.display(), e);
        });
    }
}

impl TrackWriter for BigWigWriter {
    fn begin(&mut self, catalog: &ChromosomeCatalog) -> Result<(), TrackError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        let mut outb = self.create_bw_writer(catalog)?;
        self.created = true;

        let threads = self.config.threads;
        if threads == 1 {
            outb.options.channel_size = 0;
        }
        let allow_out_of_order_chroms = !matches!(outb.options.input_sort_type, InputSortType::ALL);

        let (sender, receiver) = mpsc::sync_channel::<ValueItem>(WRITER_CHANNEL_CAPACITY);

        let handle = thread::spawn(move || -> Result<(), String> {
            let runtime = if threads == 1 {
                runtime::Builder::new_current_thread().build()
            } else {
                runtime::Builder::new_multi_thread()
                    .worker_threads(threads)
                    .build()
            }
            .map_err(|e| format!("Unable to create runtime: {}", e))?;

            let data =
                BedParserStreamingIterator::wrap_iter(receiver.into_iter(), allow_out_of_order_chroms);
            outb.write(data, runtime).map_err(|e| e.to_string())
        });

        self.sender = Some(sender);
        self.handle = Some(handle);
        self.validator = Some(IntervalValidator::new(catalog));

        debug!("Started bigWig writer for {}", self.path.display());
        Ok(())
    }

    fn append(&mut self, chrom: &str, intervals: &[MergedInterval]) -> Result<(), TrackError> {
        let validator = self.validator.as_mut().ok_or(TrackError::NotStarted)?;
        validator.check(chrom, intervals)?;

        let sender = self.sender.as_ref().ok_or(TrackError::NotStarted)?;
        let stopped = intervals.iter().any(|i| {
            let value = Value {
                start: i.start,
                end: i.end,
                value: i.value,
            };
            sender.send(Ok((chrom.to_string(), value))).is_err()
        });

        if stopped {
            // the receiving side only goes away when bigtools gave up
            self.sender = None;
            return Err(self.join().err().unwrap_or_else(|| {
                TrackError::BigWig("bigWig writer stopped before all data was written".to_string())
            }));
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), TrackError> {
        let sender = self.sender.take().ok_or(TrackError::NotStarted)?;
        drop(sender);

        match self.join() {
            Ok(()) => {
                // committed, never remove it from here on
                self.created = false;
                debug!("Finished writing {}", self.path.display());
                Ok(())
            }
            Err(err) => {
                self.remove_output();
                Err(err)
            }
        }
    }

    fn abort(&mut self) {
        if let Some(sender) = self.sender.take() {
            // make bigtools stop at the next value instead of finishing the file
            let _ = sender.send(Err(io::Error::other("merge aborted")));
        }
        if let Err(err) = self.join() {
            debug!("bigWig writer stopped: {}", err);
        }
        self.remove_output();
    }
}

impl Drop for BigWigWriter {
    fn drop(&mut self) {
        if self.sender.is_some() || self.handle.is_some() || self.created {
            self.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bwmerge_core::{MemoryTrack, SignalTrack};
    use rstest::*;

    fn catalog() -> ChromosomeCatalog {
        let track = MemoryTrack::new(1.0).with_chrom("chr1", vec![0.0; 10]);
        ChromosomeCatalog::from_chrom_lists([track.chroms()])
    }

    #[rstest]
    fn test_nothing_created_before_begin() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.bw");

        let mut writer = BigWigWriter::new(&path, &MergeConfig::default());
        writer.abort();

        assert!(!path.exists());
    }

    #[rstest]
    fn test_abort_removes_output() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.bw");

        let mut writer = BigWigWriter::new(&path, &MergeConfig::default());
        writer.begin(&catalog()).unwrap();
        writer
            .append("chr1", &[MergedInterval::at(0, 1.0), MergedInterval::at(1, 2.0)])
            .unwrap();
        writer.abort();

        assert!(!path.exists());
    }

    #[rstest]
    fn test_drop_removes_unfinished_output() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.bw");

        {
            let mut writer = BigWigWriter::new(&path, &MergeConfig::default());
            writer.begin(&catalog()).unwrap();
        }

        assert!(!path.exists());
    }

    #[rstest]
    fn test_rejects_invalid_intervals() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.bw");

        let mut writer = BigWigWriter::new(&path, &MergeConfig::default());
        writer.begin(&catalog()).unwrap();

        let result = writer.append("chr1", &[MergedInterval::at(10, 1.0)]);
        assert!(matches!(result, Err(TrackError::IntervalOutOfBounds { .. })));
        let result = writer.append("chr2", &[]);
        assert!(matches!(result, Err(TrackError::UnknownChrom(_))));

        writer.abort();
        assert!(!path.exists());
    }

    #[rstest]
    fn test_finish_keeps_output() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("nested").join("out.bw");

        let mut writer = BigWigWriter::new(&path, &MergeConfig::default());
        writer.begin(&catalog()).unwrap();
        writer.append("chr1", &[MergedInterval::at(3, 1.5)]).unwrap();
        writer.finish().unwrap();
        drop(writer);

        assert!(path.exists());
    }
}

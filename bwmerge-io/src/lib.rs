//! # bigWig input and output for bwmerge.
//!
//! Wraps `bigtools` readers and writers behind the [`SignalTrack`](bwmerge_core::SignalTrack)
//! and [`TrackWriter`](bwmerge_core::TrackWriter) traits of `bwmerge-core`, and provides the
//! file-level entry points used by the command line tool.
pub mod bigwig;
pub mod consts;
pub mod merge;
pub mod writer;

// re-expose core functions
pub use bigwig::*;
pub use merge::*;
pub use writer::*;

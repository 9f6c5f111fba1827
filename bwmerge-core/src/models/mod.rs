pub mod catalog;
pub mod interval;

// re-export for cleaner imports
pub use self::catalog::{ChromSize, ChromosomeCatalog, ChromosomeEntry, LengthConflict};
pub use self::interval::MergedInterval;

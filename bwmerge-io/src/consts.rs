/// Number of values buffered between the merge and the bigWig writer thread.
pub const WRITER_CHANNEL_CAPACITY: usize = 1 << 16;

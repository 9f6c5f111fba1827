/// One output interval: [start, end) carrying a single merged value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedInterval {
    pub start: u32,
    pub end: u32,
    pub value: f32,
}

impl MergedInterval {
    pub fn new(start: u32, end: u32, value: f32) -> Self {
        MergedInterval { start, end, value }
    }

    /// Width-1 interval covering a single position.
    #[inline]
    pub fn at(position: u32, value: f32) -> Self {
        MergedInterval {
            start: position,
            end: position + 1,
            value,
        }
    }
}

/// Byte offsets of a node within the query text it was read from.
///
/// Trees assembled in code carry the default `0..0` range. The offsets are
/// carried along unchanged by every operation in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionRange {
    pub start: usize,
    pub end: usize,
}

impl PositionRange {
    pub fn new(start: usize, end: usize) -> Self {
        PositionRange { start, end }
    }
}

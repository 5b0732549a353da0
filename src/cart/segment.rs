// named chunks of raw machine code
use super::address::split_address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    name: &'static str,
    bytes: Vec<u8>,
}

impl Segment {
    pub fn new(name: &'static str, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }

    /// Overwrite the two bytes at `at` with `addr`, low byte first.
    /// Used for absolute operands (JMP/JSR) whose target is only known
    /// once the preceding segments have been laid out.
    pub fn with_address(mut self, at: usize, addr: u16) -> Self {
        let (lo, hi) = split_address(addr);
        self.bytes[at] = lo;
        self.bytes[at + 1] = hi;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Offset of whatever segment follows `preceding` in the image.
pub fn offset_after(preceding: &[&Segment]) -> usize {
    preceding.iter().map(|s| s.len()).sum()
}

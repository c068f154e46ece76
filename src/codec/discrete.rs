//! Discrete payloads

/// A raw, unsigned group of bits placed verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Discrete(u32);

impl Discrete {
    /// Create a discrete payload; width is checked when it is placed
    pub fn new(value: u32) -> Self {
        Discrete(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The bit pattern to place, unchanged
    pub fn encode(&self) -> u32 {
        self.0
    }

    /// Wrap extracted field bits, unchanged
    pub fn decode(raw: u32) -> Self {
        Discrete(raw)
    }

    /// Test a single bit of the group (0-based)
    pub fn bit(&self, index: u32) -> bool {
        index < u32::BITS && (self.0 >> index) & 1 == 1
    }
}

impl From<u32> for Discrete {
    fn from(value: u32) -> Self {
        Discrete(value)
    }
}

impl std::fmt::Display for Discrete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Discrete(value={:#x})", self.0)
    }
}

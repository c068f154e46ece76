//! Error types for ARINC 429 word encoding and decoding

use thiserror::Error;

/// Result type for ARINC 429 operations
pub type Result<T> = std::result::Result<T, Arinc429Error>;

/// Error types encountered while assembling or interpreting ARINC 429 words
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Arinc429Error {
    /// A bit range is reversed or outside the addressable region, or a label
    /// is outside 0o0-0o377
    #[error("Range error: {0}")]
    Range(String),

    /// An encoded integer needs more bits than the destination field provides
    #[error("{value:#x} overflows {bit_length} bit(s)")]
    FieldOverflow {
        /// The offending encoded integer
        value: i64,
        /// Width of the destination field
        bit_length: u32,
    },

    /// Malformed constructor or codec argument
    #[error("Value error: {0}")]
    Value(String),

    /// A BCD digit group holds a nibble above 9
    #[error("Malformed BCD: nibble {nibble:#x} at digit {position}")]
    MalformedBcd {
        /// The nibble value (10-15)
        nibble: u8,
        /// Zero-based digit position, counted from the least significant group
        position: u32,
    },

    /// A received word failed its parity check
    #[error("Parity error: {0}")]
    Parity(String),
}

impl Arinc429Error {
    /// Create a new Range error
    pub fn range(msg: impl Into<String>) -> Self {
        Arinc429Error::Range(msg.into())
    }

    /// Create a new FieldOverflow error
    pub fn field_overflow(value: i64, bit_length: u32) -> Self {
        Arinc429Error::FieldOverflow { value, bit_length }
    }

    /// Create a new Value error
    pub fn value(msg: impl Into<String>) -> Self {
        Arinc429Error::Value(msg.into())
    }

    /// Create a new Parity error
    pub fn parity(msg: impl Into<String>) -> Self {
        Arinc429Error::Parity(msg.into())
    }
}

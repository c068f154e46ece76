//! # ARINC 429 Word Codec
//!
//! A Rust library for assembling and interpreting ARINC 429 avionics data words.
//!
//! An ARINC 429 word is a 32-bit value made of a label, a Source/Destination
//! Identifier (SDI), a 19-bit data region, a Sign/Status Matrix (SSM) and an
//! odd parity bit. This library provides:
//!
//! - The [`Word`] container with validated field access and automatic parity
//! - BCD, BNR and discrete payload codecs
//! - Placement of payloads into arbitrary data bit ranges with overflow checks
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use arinc429::{Bcd, Word};
//!
//! let mut word = Word::new();
//! word.set_label(0o1)?;
//! word.set_bit_field(11, 29, Bcd::new(121.5, 0.1)?)?;
//! assert_eq!(word.data(), 0x1215);
//! assert_eq!(word.decode_bcd(11, 29, 0.1)?, 121.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bits;
pub mod codec;
pub mod error;
pub mod field;
pub mod ssm;
pub mod word;

pub use bits::BitRange;
pub use codec::{Bcd, Bnr, Discrete, Payload, Rounding};
pub use error::{Arinc429Error, Result};
pub use field::DataField;
pub use ssm::{BcdStatus, BnrSign, BnrStatus, DiscreteStatus};
pub use word::{Parity, Word, WordBuilder};

/// ARINC 429 word layout constants (1-based, inclusive bit numbers)
pub mod layout {
    use crate::bits::BitRange;

    /// Word length in bits
    pub const WORD_LENGTH: u32 = 32;

    /// Least significant bit of a word
    pub const LSB: u32 = 1;

    /// Most significant bit of a word
    pub const MSB: u32 = WORD_LENGTH;

    /// Label bits
    pub const LABEL_BITS: BitRange = BitRange::new_unchecked(1, 8);

    /// Source/Destination Identifier bits
    pub const SDI_BITS: BitRange = BitRange::new_unchecked(9, 10);

    /// Data bits
    pub const DATA_BITS: BitRange = BitRange::new_unchecked(11, 29);

    /// Sign/Status Matrix bits
    pub const SSM_BITS: BitRange = BitRange::new_unchecked(30, 31);

    /// Parity bit
    pub const PARITY_BIT: BitRange = BitRange::new_unchecked(32, 32);

    /// Highest valid label (0o377)
    pub const MAX_LABEL: u8 = 0o377;
}

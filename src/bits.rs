//! Bit-field utilities shared by the codecs and the word container
//!
//! ARINC 429 numbers bits from 1 (least significant) to 32 (parity). All
//! ranges in this crate use that 1-based, inclusive convention.

use crate::error::{Arinc429Error, Result};
use crate::layout::{DATA_BITS, LSB, MSB};

/// An inclusive, 1-based range of bits within a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BitRangeForm", into = "BitRangeForm")
)]
pub struct BitRange {
    lsb: u32,
    msb: u32,
}

/// Serialized form of a [`BitRange`], validated on load
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct BitRangeForm {
    /// Least significant bit
    pub lsb: u32,
    /// Most significant bit
    pub msb: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<BitRangeForm> for BitRange {
    type Error = Arinc429Error;

    fn try_from(form: BitRangeForm) -> Result<Self> {
        BitRange::new(form.lsb, form.msb)
    }
}

#[cfg(feature = "serde")]
impl From<BitRange> for BitRangeForm {
    fn from(range: BitRange) -> Self {
        BitRangeForm {
            lsb: range.lsb,
            msb: range.msb,
        }
    }
}

impl BitRange {
    /// Create a range without validation, for the layout constants
    pub(crate) const fn new_unchecked(lsb: u32, msb: u32) -> Self {
        BitRange { lsb, msb }
    }

    /// Least significant bit of the range
    pub const fn lsb(&self) -> u32 {
        self.lsb
    }

    /// Most significant bit of the range
    pub const fn msb(&self) -> u32 {
        self.msb
    }

    /// Create a range anywhere within the 32-bit word
    pub fn new(lsb: u32, msb: u32) -> Result<Self> {
        if lsb < LSB || msb > MSB {
            return Err(Arinc429Error::range(format!(
                "Bits {}-{} outside word bits [{}, {}]",
                lsb, msb, LSB, MSB
            )));
        }
        if msb < lsb {
            return Err(Arinc429Error::range(format!(
                "MSB {} must be >= LSB {}",
                msb, lsb
            )));
        }
        Ok(BitRange { lsb, msb })
    }

    /// Create a range confined to the data region (bits 11-29)
    pub fn data(lsb: u32, msb: u32) -> Result<Self> {
        validate_range(lsb, msb)?;
        Ok(BitRange { lsb, msb })
    }

    /// Number of bits covered by the range
    pub const fn width(&self) -> u32 {
        self.msb - self.lsb + 1
    }

    /// Shift needed to align a value with the range
    pub const fn offset(&self) -> u32 {
        self.lsb - 1
    }

    /// Mask of the range's bits once shifted down to bit 1
    pub const fn value_mask(&self) -> u32 {
        low_mask(self.width())
    }

    /// Mask of the range's bits in word position
    pub const fn word_mask(&self) -> u32 {
        self.value_mask() << self.offset()
    }

    /// Extract the range from a raw word
    pub const fn extract(&self, word: u32) -> u32 {
        (word >> self.offset()) & self.value_mask()
    }

    /// Replace the range in a raw word with the low bits of `value`
    pub const fn insert(&self, word: u32, value: u32) -> u32 {
        (word & !self.word_mask()) | ((value & self.value_mask()) << self.offset())
    }
}

impl std::fmt::Display for BitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bits {}-{}", self.lsb, self.msb)
    }
}

/// Mask with the `width` low bits set
pub const fn low_mask(width: u32) -> u32 {
    if width >= u32::BITS {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Validate that `lsb..=msb` is an ordered range inside the data region
pub fn validate_range(lsb: u32, msb: u32) -> Result<()> {
    if lsb < DATA_BITS.lsb || lsb > DATA_BITS.msb {
        return Err(Arinc429Error::range(format!(
            "LSB {} outside data bits [{}, {}]",
            lsb, DATA_BITS.lsb, DATA_BITS.msb
        )));
    }
    if msb < DATA_BITS.lsb || msb > DATA_BITS.msb {
        return Err(Arinc429Error::range(format!(
            "MSB {} outside data bits [{}, {}]",
            msb, DATA_BITS.lsb, DATA_BITS.msb
        )));
    }
    if msb < lsb {
        return Err(Arinc429Error::range(format!(
            "MSB {} must be >= LSB {}",
            msb, lsb
        )));
    }
    Ok(())
}

/// Minimum number of bits needed to hold an unsigned value (0 needs none)
pub fn bit_length(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Fail if an unsigned raw value needs more than `bit_length` bits
pub fn validate_bit_length(raw_value: u64, bit_length: u32) -> Result<()> {
    check_width(bit_length)?;
    if self::bit_length(raw_value) > bit_length {
        return Err(Arinc429Error::field_overflow(raw_value as i64, bit_length));
    }
    Ok(())
}

/// Fail if a signed value does not fit a `bit_length`-wide two's complement field
pub fn validate_signed_bit_length(value: i64, bit_length: u32) -> Result<()> {
    check_width(bit_length)?;
    let min = -(1i64 << (bit_length - 1));
    let max = (1i64 << (bit_length - 1)) - 1;
    if value < min || value > max {
        return Err(Arinc429Error::field_overflow(value, bit_length));
    }
    Ok(())
}

/// Sign-extend the low `bit_length` bits of `raw` into an `i64`
pub fn sign_extend(raw: u32, bit_length: u32) -> Result<i64> {
    check_width(bit_length)?;
    let raw = (raw & low_mask(bit_length)) as i64;
    let sign = (raw >> (bit_length - 1)) & 1;
    Ok(raw - (sign << bit_length))
}

fn check_width(bit_length: u32) -> Result<()> {
    if bit_length == 0 || bit_length > u32::BITS {
        return Err(Arinc429Error::value(format!(
            "Bit length must be in [1, {}]: {}",
            u32::BITS,
            bit_length
        )));
    }
    Ok(())
}

//! Binary coded decimal (BCD) payloads

use super::{quantize, unquantize, validate_resolution, Rounding};
use crate::error::{Arinc429Error, Result};
use crate::ssm::BcdStatus;

/// A decimal quantity packed as one 4-bit group per digit
///
/// Only the magnitude goes into the data field. The sign travels in the
/// SSM, see [`Bcd::sign`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "super::ScaledForm", into = "super::ScaledForm")
)]
pub struct Bcd {
    value: f64,
    resolution: f64,
    rounding: Rounding,
    steps: i64,
}

impl Bcd {
    /// Create a BCD payload rounding to the nearest resolution step
    pub fn new(value: f64, resolution: f64) -> Result<Self> {
        Self::with_rounding(value, resolution, Rounding::default())
    }

    /// Create a BCD payload with an explicit rounding policy
    pub fn with_rounding(value: f64, resolution: f64, rounding: Rounding) -> Result<Self> {
        let steps = quantize(value, resolution, rounding)?;
        Ok(Bcd {
            value,
            resolution,
            rounding,
            steps,
        })
    }

    /// The value as given to the constructor
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Decimal increment represented by one encoded unit
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Rounding policy used to quantize the value
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// SSM code carrying the sign of the value
    pub fn sign(&self) -> BcdStatus {
        if self.steps < 0 {
            BcdStatus::Minus
        } else {
            BcdStatus::Plus
        }
    }

    /// The value after quantization to the resolution
    pub fn decoded_value(&self) -> f64 {
        unquantize(self.steps, self.resolution)
    }

    /// Pack the magnitude's decimal digits, most significant digit highest
    pub fn encode(&self) -> u64 {
        let mut magnitude = self.steps.unsigned_abs();
        let mut packed = 0u64;
        let mut shift = 0;
        while magnitude > 0 {
            packed |= (magnitude % 10) << shift;
            magnitude /= 10;
            shift += 4;
        }
        packed
    }

    /// Recover a value from packed digits, applying the sign from `ssm`
    ///
    /// `ssm` must be a 2-bit code; anything above 3 is a `Range` error.
    ///
    /// Nibbles above 9 are reserved and weighted as if they were digits;
    /// use [`Bcd::decode_strict`] to reject them.
    pub fn decode(raw: u32, ssm: u8, resolution: f64) -> Result<f64> {
        validate_resolution(resolution)?;
        let steps = unpack(raw, false)?;
        apply_sign(steps, ssm, resolution)
    }

    /// Like [`Bcd::decode`], but fails with `MalformedBcd` on nibbles above 9
    pub fn decode_strict(raw: u32, ssm: u8, resolution: f64) -> Result<f64> {
        validate_resolution(resolution)?;
        let steps = unpack(raw, true)?;
        apply_sign(steps, ssm, resolution)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<super::ScaledForm> for Bcd {
    type Error = Arinc429Error;

    fn try_from(form: super::ScaledForm) -> Result<Self> {
        Bcd::with_rounding(form.value, form.resolution, form.rounding)
    }
}

#[cfg(feature = "serde")]
impl From<Bcd> for super::ScaledForm {
    fn from(bcd: Bcd) -> Self {
        super::ScaledForm {
            value: bcd.value,
            resolution: bcd.resolution,
            rounding: bcd.rounding,
        }
    }
}

fn unpack(raw: u32, strict: bool) -> Result<i64> {
    let mut steps = 0i64;
    let mut weight = 1i64;
    for position in 0..(u32::BITS / 4) {
        let nibble = ((raw >> (position * 4)) & 0xF) as u8;
        if strict && nibble > 9 {
            return Err(Arinc429Error::MalformedBcd { nibble, position });
        }
        steps += i64::from(nibble) * weight;
        weight *= 10;
    }
    Ok(steps)
}

fn apply_sign(steps: i64, ssm: u8, resolution: f64) -> Result<f64> {
    let sign = BcdStatus::try_from(ssm)?.signum();
    let magnitude = unquantize(steps, resolution);
    if steps == 0 {
        Ok(magnitude)
    } else {
        Ok(sign * magnitude)
    }
}

impl std::fmt::Display for Bcd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BCD(value={}, resolution={})",
            self.decoded_value(),
            self.resolution
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_encode_digits() -> Result<()> {
        assert_eq!(Bcd::new(121.5, 0.1)?.encode(), 0x1215);
        assert_eq!(Bcd::new(7.0, 1.0)?.encode(), 0x7);
        assert_eq!(Bcd::new(0.0, 1.0)?.encode(), 0);
        assert_eq!(Bcd::new(90210.0, 1.0)?.encode(), 0x90210);
        Ok(())
    }

    #[test]
    fn test_bcd_negative_value_uses_ssm() -> Result<()> {
        let bcd = Bcd::new(-45.6, 0.1)?;
        assert_eq!(bcd.encode(), 0x456);
        assert_eq!(bcd.sign(), BcdStatus::Minus);
        assert_eq!(Bcd::new(45.6, 0.1)?.sign(), BcdStatus::Plus);
        Ok(())
    }

    #[test]
    fn test_bcd_rounding_policy() -> Result<()> {
        // 2.5 steps of 0.5
        assert_eq!(Bcd::new(1.25, 0.5)?.encode(), 0x3);
        assert_eq!(Bcd::with_rounding(1.25, 0.5, Rounding::Floor)?.encode(), 0x2);
        assert_eq!(Bcd::new(-1.25, 0.5)?.encode(), 0x3);
        Ok(())
    }

    #[test]
    fn test_bcd_decode() -> Result<()> {
        assert_eq!(Bcd::decode(0x1215, 0, 0.1)?, 121.5);
        assert_eq!(Bcd::decode(0x1215, BcdStatus::Minus.bits(), 0.1)?, -121.5);
        assert_eq!(Bcd::decode(0x1215, BcdStatus::FunctionalTest.bits(), 1.0)?, 1215.0);
        assert_eq!(Bcd::decode(0, BcdStatus::Minus.bits(), 1.0)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_bcd_decode_malformed_nibble() -> Result<()> {
        assert_eq!(Bcd::decode(0x1A, 0, 1.0)?, 20.0);
        assert_eq!(
            Bcd::decode_strict(0x1A, 0, 1.0),
            Err(Arinc429Error::MalformedBcd {
                nibble: 0xA,
                position: 0
            })
        );
        assert_eq!(Bcd::decode_strict(0x99, 0, 1.0)?, 99.0);
        Ok(())
    }

    #[test]
    fn test_bcd_rejects_bad_resolution() {
        assert!(Bcd::new(1.0, -0.1).is_err());
        assert!(Bcd::decode(0x1, 0, 0.0).is_err());
    }

    #[test]
    fn test_bcd_decode_rejects_wide_ssm() {
        assert!(matches!(
            Bcd::decode(0x1, 4, 1.0),
            Err(Arinc429Error::Range(_))
        ));
        assert!(Bcd::decode_strict(0x1, 7, 1.0).is_err());
    }

    #[test]
    fn test_bcd_round_trip_within_resolution() -> Result<()> {
        for &value in &[0.0, 0.04, 3.14159, 99.95, 1234.5, 7999.9] {
            let bcd = Bcd::new(value, 0.1)?;
            let decoded = Bcd::decode(bcd.encode() as u32, bcd.sign().bits(), 0.1)?;
            assert!((decoded - value).abs() <= 0.1, "{} -> {}", value, decoded);
        }
        Ok(())
    }
}

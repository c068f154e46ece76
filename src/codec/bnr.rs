//! Binary number representation (BNR) payloads

use super::{quantize, unquantize, validate_resolution, Rounding};
use crate::bits;
use crate::error::{Arinc429Error, Result};

/// A signed quantity stored as a scaled two's complement integer
///
/// The field width is not part of the payload: it comes from the data
/// field the value is placed in, and the same width has to be handed to
/// [`Bnr::decode`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "super::ScaledForm", into = "super::ScaledForm")
)]
pub struct Bnr {
    value: f64,
    resolution: f64,
    rounding: Rounding,
    steps: i64,
}

impl Bnr {
    /// Create a BNR payload truncated to the lesser multiple of the resolution
    ///
    /// 90.0 at a resolution of 0.043945313 encodes as 2047 steps and reads
    /// back as 89.956055711. Use [`Bnr::with_rounding`] with
    /// [`Rounding::NearestTiesAway`] to round to the nearest step instead.
    pub fn new(value: f64, resolution: f64) -> Result<Self> {
        Self::with_rounding(value, resolution, Rounding::Floor)
    }

    /// Create a BNR payload with an explicit rounding policy
    pub fn with_rounding(value: f64, resolution: f64, rounding: Rounding) -> Result<Self> {
        let steps = quantize(value, resolution, rounding)?;
        Ok(Bnr {
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

    /// Value of the least significant encoded bit
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Rounding policy used to quantize the value
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// The value after quantization to the resolution
    pub fn decoded_value(&self) -> f64 {
        unquantize(self.steps, self.resolution)
    }

    /// Signed step count; two's complement truncation happens at placement
    pub fn encode(&self) -> i64 {
        self.steps
    }

    /// Interpret `raw` as a `bit_count`-wide two's complement integer and scale it
    pub fn decode(raw: u32, bit_count: u32, resolution: f64) -> Result<f64> {
        validate_resolution(resolution)?;
        let steps = bits::sign_extend(raw, bit_count)?;
        Ok(unquantize(steps, resolution))
    }

    /// Resolution giving `significant_bits` of magnitude over a full scale range
    ///
    /// BNR labels are usually specified by range and significant bits;
    /// `range` is the magnitude of the most significant bit's weight times two.
    pub fn resolution_for(range: f64, significant_bits: u32) -> Result<f64> {
        validate_resolution(range)?;
        if significant_bits == 0 || significant_bits > 31 {
            return Err(Arinc429Error::value(format!(
                "Significant bits must be in [1, 31]: {}",
                significant_bits
            )));
        }
        Ok(range / f64::from(1u32 << significant_bits))
    }
}

#[cfg(feature = "serde")]
impl TryFrom<super::ScaledForm> for Bnr {
    type Error = Arinc429Error;

    fn try_from(form: super::ScaledForm) -> Result<Self> {
        Bnr::with_rounding(form.value, form.resolution, form.rounding)
    }
}

#[cfg(feature = "serde")]
impl From<Bnr> for super::ScaledForm {
    fn from(bnr: Bnr) -> Self {
        super::ScaledForm {
            value: bnr.value,
            resolution: bnr.resolution,
            rounding: bnr.rounding,
        }
    }
}

impl std::fmt::Display for Bnr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BNR(value={}, resolution={})",
            self.decoded_value(),
            self.resolution
        )
    }
}

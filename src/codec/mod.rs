//! Payload codecs for the ARINC 429 data field
//!
//! Three payload types can occupy a range of the data bits:
//!
//! - [`Bcd`]: packed decimal digits, sign carried in the SSM
//! - [`Bnr`]: scaled two's complement binary
//! - [`Discrete`]: raw unsigned bit groups
//!
//! [`Payload`] is the closed set of these types; the word container only
//! ever talks to a payload through it.

pub mod bcd;
pub mod bnr;
pub mod discrete;

pub use bcd::Bcd;
pub use bnr::Bnr;
pub use discrete::Discrete;

use crate::bits;
use crate::error::{Arinc429Error, Result};

/// Quotients within this relative distance of an integer are treated as exact
const SNAP_EPSILON: f64 = 1e-9;

/// Largest magnitude an f64 holds without losing integer precision
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// How a value is converted to a whole number of resolution steps
///
/// [`Bcd::new`] uses the `Default` policy; [`Bnr::new`] uses `Floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round to the nearest step, halfway cases away from zero
    #[default]
    NearestTiesAway,
    /// Round down to the lesser multiple of the resolution
    Floor,
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::NearestTiesAway => write!(f, "nearest, ties away from zero"),
            Rounding::Floor => write!(f, "floor"),
        }
    }
}

/// Serialized form of a [`Bcd`] or [`Bnr`]
///
/// The step count is not stored; it is recomputed through the validating
/// constructor on load.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ScaledForm {
    /// The value as given to the constructor
    pub value: f64,
    /// Value of one encoded unit
    pub resolution: f64,
    /// Rounding policy
    pub rounding: Rounding,
}

/// Check that a resolution is a finite, positive step
pub fn validate_resolution(resolution: f64) -> Result<()> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(Arinc429Error::value(format!(
            "Resolution must be finite and > 0: {}",
            resolution
        )));
    }
    Ok(())
}

/// Convert `value` to a whole number of `resolution` steps
pub fn quantize(value: f64, resolution: f64, rounding: Rounding) -> Result<i64> {
    validate_resolution(resolution)?;
    if !value.is_finite() {
        return Err(Arinc429Error::value(format!(
            "Value must be finite: {}",
            value
        )));
    }

    let mut steps = value / resolution;
    // Absorb binary representation error of decimal resolutions (121.5 / 0.1).
    let nearest = steps.round();
    if (steps - nearest).abs() <= SNAP_EPSILON * nearest.abs().max(1.0) {
        steps = nearest;
    }

    let steps = match rounding {
        Rounding::NearestTiesAway => steps.round(),
        Rounding::Floor => steps.floor(),
    };
    if steps.abs() >= MAX_EXACT_INTEGER {
        return Err(Arinc429Error::value(format!(
            "{} / {} exceeds the representable step count",
            value, resolution
        )));
    }
    Ok(steps as i64)
}

/// Convert a whole number of `resolution` steps back to a value
pub fn unquantize(steps: i64, resolution: f64) -> f64 {
    let inverse = 1.0 / resolution;
    let whole = inverse.round();
    // Dividing by an integral inverse keeps decimal resolutions exact.
    if whole >= 1.0 && (inverse - whole).abs() <= SNAP_EPSILON * whole {
        steps as f64 / whole
    } else {
        steps as f64 * resolution
    }
}

/// A typed value that can occupy a data field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// Binary coded decimal
    Bcd(Bcd),
    /// Binary number representation
    Bnr(Bnr),
    /// Discrete bits
    Discrete(Discrete),
}

impl Payload {
    /// Encode the payload into the low `bit_length` bits of a raw integer
    ///
    /// Fails with `FieldOverflow` when the encoded value does not fit. BCD
    /// and discrete values must satisfy `raw < 2^bit_length`. BNR step counts
    /// are checked as signed two's complement instead, `-2^(bit_length-1) <=
    /// steps < 2^(bit_length-1)`, so a positive count that would decode as
    /// negative is rejected rather than accepted by the unsigned rule.
    pub fn encode(&self, bit_length: u32) -> Result<u32> {
        match self {
            Payload::Bcd(bcd) => {
                let raw = bcd.encode();
                bits::validate_bit_length(raw, bit_length)?;
                Ok(raw as u32)
            }
            Payload::Bnr(bnr) => {
                let steps = bnr.encode();
                bits::validate_signed_bit_length(steps, bit_length)?;
                Ok((steps as u32) & bits::low_mask(bit_length))
            }
            Payload::Discrete(discrete) => {
                let raw = discrete.encode();
                bits::validate_bit_length(u64::from(raw), bit_length)?;
                Ok(raw)
            }
        }
    }

    /// Decode raw field bits with the same interpretation as `self`
    ///
    /// `bit_length` must be the width used at encode time; `ssm` carries
    /// the BCD sign and is ignored by the other payload types.
    pub fn decode(&self, raw: u32, bit_length: u32, ssm: u8) -> Result<Payload> {
        match self {
            Payload::Bcd(bcd) => {
                let value = Bcd::decode(raw, ssm, bcd.resolution())?;
                Ok(Payload::Bcd(Bcd::with_rounding(
                    value,
                    bcd.resolution(),
                    bcd.rounding(),
                )?))
            }
            Payload::Bnr(bnr) => {
                let value = Bnr::decode(raw, bit_length, bnr.resolution())?;
                Ok(Payload::Bnr(Bnr::with_rounding(
                    value,
                    bnr.resolution(),
                    bnr.rounding(),
                )?))
            }
            Payload::Discrete(_) => Ok(Payload::Discrete(Discrete::decode(raw))),
        }
    }

    /// The value represented once quantized to the payload's resolution
    pub fn decoded_value(&self) -> f64 {
        match self {
            Payload::Bcd(bcd) => bcd.decoded_value(),
            Payload::Bnr(bnr) => bnr.decoded_value(),
            Payload::Discrete(discrete) => f64::from(discrete.value()),
        }
    }

    /// Short name of the payload type
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Bcd(_) => "BCD",
            Payload::Bnr(_) => "BNR",
            Payload::Discrete(_) => "Discrete",
        }
    }
}

impl From<Bcd> for Payload {
    fn from(value: Bcd) -> Self {
        Payload::Bcd(value)
    }
}

impl From<Bnr> for Payload {
    fn from(value: Bnr) -> Self {
        Payload::Bnr(value)
    }
}

impl From<Discrete> for Payload {
    fn from(value: Discrete) -> Self {
        Payload::Discrete(value)
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Bcd(bcd) => write!(f, "{}", bcd),
            Payload::Bnr(bnr) => write!(f, "{}", bnr),
            Payload::Discrete(discrete) => write!(f, "{}", discrete),
        }
    }
}

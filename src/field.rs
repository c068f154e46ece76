//! Data field descriptors

use crate::bits::BitRange;
use crate::codec::Payload;
use crate::error::Result;

/// A payload together with the data bits it occupies
///
/// Bits use the word's 1-based numbering and must lie within the data
/// region (11-29).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DataFieldForm", into = "DataFieldForm")
)]
pub struct DataField {
    range: BitRange,
    payload: Payload,
}

/// Serialized form of a [`DataField`], validated on load
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct DataFieldForm {
    /// Least significant bit
    pub lsb: u32,
    /// Most significant bit
    pub msb: u32,
    /// The payload
    pub payload: Payload,
}

#[cfg(feature = "serde")]
impl TryFrom<DataFieldForm> for DataField {
    type Error = crate::error::Arinc429Error;

    fn try_from(form: DataFieldForm) -> Result<Self> {
        DataField::new(form.lsb, form.msb, form.payload)
    }
}

#[cfg(feature = "serde")]
impl From<DataField> for DataFieldForm {
    fn from(field: DataField) -> Self {
        DataFieldForm {
            lsb: field.lsb(),
            msb: field.msb(),
            payload: field.payload,
        }
    }
}

impl DataField {
    /// Create a data field, validating the bit range
    pub fn new(lsb: u32, msb: u32, payload: impl Into<Payload>) -> Result<Self> {
        Ok(DataField {
            range: BitRange::data(lsb, msb)?,
            payload: payload.into(),
        })
    }

    /// Least significant bit
    pub fn lsb(&self) -> u32 {
        self.range.lsb()
    }

    /// Most significant bit
    pub fn msb(&self) -> u32 {
        self.range.msb()
    }

    /// Bit range occupied
    pub fn range(&self) -> BitRange {
        self.range
    }

    /// Width in bits
    pub fn width(&self) -> u32 {
        self.range.width()
    }

    /// The payload
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Encode the payload to its raw bits, checking it fits the field
    pub fn encode(&self) -> Result<u32> {
        self.payload.encode(self.width())
    }
}

impl std::fmt::Display for DataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.payload, self.range)
    }
}

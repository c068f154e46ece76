//! Sign/Status Matrix (SSM) codes for bits 30-31
//!
//! The meaning of the SSM depends on the payload type carried in the data
//! field, so each payload family has its own code table.

use crate::error::{Arinc429Error, Result};

/// SSM codes for BCD words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BcdStatus {
    /// Plus, North, East, Right, To, Above
    #[default]
    Plus,
    /// No computed data
    NoComputedData,
    /// Functional test
    FunctionalTest,
    /// Minus, South, West, Left, From, Below
    Minus,
}

impl BcdStatus {
    /// Get the 2-bit SSM code
    pub fn bits(&self) -> u8 {
        match self {
            BcdStatus::Plus => 0,
            BcdStatus::NoComputedData => 1,
            BcdStatus::FunctionalTest => 2,
            BcdStatus::Minus => 3,
        }
    }

    /// Sign multiplier implied by this code
    pub fn signum(&self) -> f64 {
        if *self == BcdStatus::Minus {
            -1.0
        } else {
            1.0
        }
    }
}

impl TryFrom<u8> for BcdStatus {
    type Error = Arinc429Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(BcdStatus::Plus),
            1 => Ok(BcdStatus::NoComputedData),
            2 => Ok(BcdStatus::FunctionalTest),
            3 => Ok(BcdStatus::Minus),
            _ => Err(invalid_code(value)),
        }
    }
}

/// SSM status codes for BNR words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BnrStatus {
    /// Failure warning
    FailureWarning,
    /// No computed data
    NoComputedData,
    /// Functional test
    FunctionalTest,
    /// Normal operation
    #[default]
    NormalOperation,
}

impl BnrStatus {
    /// Get the 2-bit SSM code
    pub fn bits(&self) -> u8 {
        match self {
            BnrStatus::FailureWarning => 0,
            BnrStatus::NoComputedData => 1,
            BnrStatus::FunctionalTest => 2,
            BnrStatus::NormalOperation => 3,
        }
    }
}

impl TryFrom<u8> for BnrStatus {
    type Error = Arinc429Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(BnrStatus::FailureWarning),
            1 => Ok(BnrStatus::NoComputedData),
            2 => Ok(BnrStatus::FunctionalTest),
            3 => Ok(BnrStatus::NormalOperation),
            _ => Err(invalid_code(value)),
        }
    }
}

/// Sign carried in bit 30 when a BNR word uses the SSM as its sign bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BnrSign {
    /// Plus, North, East, Right, To, Above
    #[default]
    Plus,
    /// Minus, South, West, Left, From, Below
    Minus,
}

impl BnrSign {
    /// Get the 1-bit sign code
    pub fn bit(&self) -> u8 {
        match self {
            BnrSign::Plus => 0,
            BnrSign::Minus => 1,
        }
    }

    /// Read the sign from a 2-bit SSM code (bit 30 is the low SSM bit)
    pub fn from_ssm(ssm: u8) -> Self {
        if ssm & 1 == 1 {
            BnrSign::Minus
        } else {
            BnrSign::Plus
        }
    }
}

/// SSM codes for discrete words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscreteStatus {
    /// Normal operation / verified data
    #[default]
    NormalOperation,
    /// No computed data
    NoComputedData,
    /// Functional test
    FunctionalTest,
    /// Failure warning
    FailureWarning,
}

impl DiscreteStatus {
    /// Get the 2-bit SSM code
    pub fn bits(&self) -> u8 {
        match self {
            DiscreteStatus::NormalOperation => 0,
            DiscreteStatus::NoComputedData => 1,
            DiscreteStatus::FunctionalTest => 2,
            DiscreteStatus::FailureWarning => 3,
        }
    }
}

impl TryFrom<u8> for DiscreteStatus {
    type Error = Arinc429Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(DiscreteStatus::NormalOperation),
            1 => Ok(DiscreteStatus::NoComputedData),
            2 => Ok(DiscreteStatus::FunctionalTest),
            3 => Ok(DiscreteStatus::FailureWarning),
            _ => Err(invalid_code(value)),
        }
    }
}

fn invalid_code(value: u8) -> Arinc429Error {
    Arinc429Error::range(format!("SSM code {} out of range [0, 3]", value))
}

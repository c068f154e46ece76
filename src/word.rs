//! The ARINC 429 word container

use bitfield::bitfield;
use log::{debug, trace};

use crate::bits::{self, BitRange};
use crate::codec::{Bcd, Bnr, Discrete, Payload};
use crate::error::{Arinc429Error, Result};
use crate::field::DataField;
use crate::layout::{DATA_BITS, MAX_LABEL, PARITY_BIT, SDI_BITS, SSM_BITS};

bitfield! {
    /// Fixed sub-fields of a raw word, with 0-based bit indices
    #[derive(Clone, Copy, PartialEq, Eq)]
    struct Fields(u32);
    impl Debug;
    u8, label_bits, set_label_bits: 7, 0;
    u8, sdi, set_sdi: 9, 8;
    u32, data, set_data: 28, 10;
    u8, ssm, set_ssm: 30, 29;
    parity, set_parity: 31;
}

/// Parity convention applied to bit 32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    /// Total number of set bits is odd (ARINC 429 standard)
    #[default]
    Odd,
    /// Total number of set bits is even
    Even,
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

/// A single ARINC 429 word
///
/// Format (bit 1 is the least significant):
/// - Bits 1-8: label, stored bit-reversed
/// - Bits 9-10: Source/Destination Identifier
/// - Bits 11-29: data
/// - Bits 30-31: Sign/Status Matrix
/// - Bit 32: parity over bits 1-31
///
/// Every mutation recomputes the parity bit. A failed mutation leaves the
/// word unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "WordForm", into = "WordForm")
)]
pub struct Word {
    value: u32,
    parity: Parity,
}

/// Serialized form of a [`Word`]; the parity bit is checked on load
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct WordForm {
    /// Raw 32-bit value, parity bit included
    pub value: u32,
    /// Parity convention
    pub parity: Parity,
}

#[cfg(feature = "serde")]
impl TryFrom<WordForm> for Word {
    type Error = Arinc429Error;

    fn try_from(form: WordForm) -> Result<Self> {
        Word::from_received(form.value, form.parity)
    }
}

#[cfg(feature = "serde")]
impl From<Word> for WordForm {
    fn from(word: Word) -> Self {
        WordForm {
            value: word.value,
            parity: word.parity,
        }
    }
}

impl Word {
    /// Create an all-zero word with odd parity
    pub fn new() -> Self {
        Self::with_parity(Parity::Odd)
    }

    /// Create an all-zero word with the given parity convention
    pub fn with_parity(parity: Parity) -> Self {
        Self::from_bits_with_parity(0, parity)
    }

    /// Create a word from raw bits, replacing bit 32 with odd parity
    pub fn from_bits(value: u32) -> Self {
        Self::from_bits_with_parity(value, Parity::Odd)
    }

    /// Create a word from raw bits, replacing bit 32 per `parity`
    pub fn from_bits_with_parity(value: u32, parity: Parity) -> Self {
        let mut word = Word { value, parity };
        word.refresh_parity();
        word
    }

    /// Accept a word as received, checking its parity bit
    pub fn from_received(value: u32, parity: Parity) -> Result<Self> {
        let word = Word { value, parity };
        if !word.is_parity_valid() {
            debug!("rejected received word {:#010x}: {} parity mismatch", value, parity);
            return Err(Arinc429Error::parity(format!(
                "Word {:#010x} fails {} parity",
                value, parity
            )));
        }
        Ok(word)
    }

    /// Get the raw 32-bit value
    pub fn bits(&self) -> u32 {
        self.value
    }

    /// Get the label in its conventional (octal) orientation
    pub fn label(&self) -> u8 {
        Fields(self.value).label_bits().reverse_bits()
    }

    /// Set the label; valid labels are 0o0-0o377
    pub fn set_label(&mut self, label: u16) -> Result<()> {
        let label = u8::try_from(label).map_err(|_| {
            debug!("rejected label {:#o}", label);
            Arinc429Error::range(format!(
                "Label must be >= 0o0 and <= {:#o}: {:#o}",
                MAX_LABEL, label
            ))
        })?;
        self.update(|fields| fields.set_label_bits(label.reverse_bits()));
        Ok(())
    }

    /// Get the Source/Destination Identifier
    pub fn sdi(&self) -> u8 {
        Fields(self.value).sdi()
    }

    /// Set the Source/Destination Identifier (2 bits)
    pub fn set_sdi(&mut self, sdi: u8) -> Result<()> {
        bits::validate_bit_length(u64::from(sdi), SDI_BITS.width())?;
        self.update(|fields| fields.set_sdi(sdi));
        Ok(())
    }

    /// Get the whole 19-bit data region
    pub fn data(&self) -> u32 {
        Fields(self.value).data()
    }

    /// Replace the whole 19-bit data region
    pub fn set_data(&mut self, data: u32) -> Result<()> {
        bits::validate_bit_length(u64::from(data), DATA_BITS.width())?;
        self.update(|fields| fields.set_data(data));
        Ok(())
    }

    /// Get the Sign/Status Matrix
    pub fn ssm(&self) -> u8 {
        Fields(self.value).ssm()
    }

    /// Set the Sign/Status Matrix (2 bits)
    pub fn set_ssm(&mut self, ssm: u8) -> Result<()> {
        bits::validate_bit_length(u64::from(ssm), SSM_BITS.width())?;
        self.update(|fields| fields.set_ssm(ssm));
        Ok(())
    }

    /// Get the parity bit (bit 32)
    pub fn parity_bit(&self) -> bool {
        Fields(self.value).parity()
    }

    /// Get the parity convention
    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Change the parity convention and refresh bit 32
    pub fn set_parity(&mut self, parity: Parity) {
        self.parity = parity;
        self.refresh_parity();
    }

    /// Check bit 32 against bits 1-31 under the word's parity convention
    pub fn is_parity_valid(&self) -> bool {
        let ones = self.value.count_ones();
        match self.parity {
            Parity::Odd => ones % 2 == 1,
            Parity::Even => ones % 2 == 0,
        }
    }

    /// Calculate the parity bit for bits 1-31 of `value`
    pub fn calculate_parity(value: u32, parity: Parity) -> bool {
        let count_ones = (value & !PARITY_BIT.word_mask()).count_ones();
        match parity {
            Parity::Odd => count_ones % 2 == 0,
            Parity::Even => count_ones % 2 == 1,
        }
    }

    /// Extract raw bits `lsb..=msb` of the data region
    pub fn get_bit_field(&self, lsb: u32, msb: u32) -> Result<u32> {
        let range = BitRange::data(lsb, msb)?;
        Ok(range.extract(self.value))
    }

    /// Encode `payload` into bits `lsb..=msb` of the data region
    ///
    /// Fails with `Range` for a bad range and `FieldOverflow` when the
    /// encoded payload needs more bits than the range has.
    pub fn set_bit_field(&mut self, lsb: u32, msb: u32, payload: impl Into<Payload>) -> Result<()> {
        let field = DataField::new(lsb, msb, payload)?;
        self.place(&field)
    }

    /// Encode a data field into the word
    pub fn place(&mut self, field: &DataField) -> Result<()> {
        let raw = field.encode().map_err(|err| {
            debug!("rejected {}: {}", field, err);
            err
        })?;
        self.value = field.range().insert(self.value, raw);
        self.refresh_parity();
        trace!("placed {} as {:#x}, word {:#010x}", field, raw, self.value);
        Ok(())
    }

    /// Decode the bits occupied by `field` with the same interpretation as its payload
    pub fn read(&self, field: &DataField) -> Result<Payload> {
        let raw = field.range().extract(self.value);
        field.payload().decode(raw, field.width(), self.ssm())
    }

    /// Decode a BCD value from `lsb..=msb`, signed by the word's SSM
    pub fn decode_bcd(&self, lsb: u32, msb: u32, resolution: f64) -> Result<f64> {
        Bcd::decode(self.get_bit_field(lsb, msb)?, self.ssm(), resolution)
    }

    /// Decode a BNR value from `lsb..=msb`, using the range width as bit count
    pub fn decode_bnr(&self, lsb: u32, msb: u32, resolution: f64) -> Result<f64> {
        let range = BitRange::data(lsb, msb)?;
        Bnr::decode(range.extract(self.value), range.width(), resolution)
    }

    /// Decode discrete bits from `lsb..=msb`
    pub fn decode_discrete(&self, lsb: u32, msb: u32) -> Result<Discrete> {
        Ok(Discrete::decode(self.get_bit_field(lsb, msb)?))
    }

    fn update(&mut self, apply: impl FnOnce(&mut Fields)) {
        let mut fields = Fields(self.value);
        apply(&mut fields);
        self.value = fields.0;
        self.refresh_parity();
    }

    fn refresh_parity(&mut self) {
        let mut fields = Fields(self.value);
        fields.set_parity(Self::calculate_parity(self.value, self.parity));
        self.value = fields.0;
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Word> for u32 {
    fn from(word: Word) -> Self {
        word.value
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Label={:#o}, SDI={}, Data={:#x}, SSM={}, Parity={}",
            self.label(),
            self.sdi(),
            self.data(),
            self.ssm(),
            u8::from(self.parity_bit())
        )
    }
}

impl std::fmt::LowerHex for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.value, f)
    }
}

impl std::fmt::Binary for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Binary::fmt(&self.value, f)
    }
}

/// Builder assembling a word from its sub-fields and data fields
///
/// Data fields may not overlap each other.
#[derive(Debug, Clone, Default)]
pub struct WordBuilder {
    label: u16,
    sdi: u8,
    ssm: u8,
    parity: Parity,
    fields: Vec<DataField>,
}

impl WordBuilder {
    /// Create a new word builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn with_label(mut self, label: u16) -> Self {
        self.label = label;
        self
    }

    /// Set the Source/Destination Identifier
    pub fn with_sdi(mut self, sdi: u8) -> Self {
        self.sdi = sdi;
        self
    }

    /// Set the Sign/Status Matrix
    pub fn with_ssm(mut self, ssm: u8) -> Self {
        self.ssm = ssm;
        self
    }

    /// Set the parity convention
    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    /// Add a data field
    pub fn with_field(mut self, field: DataField) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the word, validating every sub-field
    pub fn build(self) -> Result<Word> {
        for (i, field) in self.fields.iter().enumerate() {
            let mask = field.range().word_mask();
            if let Some(other) = self.fields[..i]
                .iter()
                .find(|other| other.range().word_mask() & mask != 0)
            {
                return Err(Arinc429Error::range(format!(
                    "{} overlaps {}",
                    field.range(),
                    other.range()
                )));
            }
        }

        let mut word = Word::with_parity(self.parity);
        word.set_label(self.label)?;
        word.set_sdi(self.sdi)?;
        word.set_ssm(self.ssm)?;
        for field in &self.fields {
            word.place(field)?;
        }
        Ok(word)
    }
}

//! Core types for 8b/10b line coding

use bitfield::bitfield;

use crate::constants::{SYMBOL_MASK, SYMBOL_WIDTH};
use crate::error::{CodingError, Result};
use crate::table;

/// Running disparity of the line between two symbols
///
/// The line is always either one bit heavy in zeros (RD-) or one bit heavy
/// in ones (RD+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunningDisparity {
    /// RD = -1
    #[default]
    Negative,
    /// RD = +1
    Positive,
}

impl RunningDisparity {
    /// Signed value of the disparity (-1 or +1)
    pub const fn as_i8(self) -> i8 {
        match self {
            RunningDisparity::Negative => -1,
            RunningDisparity::Positive => 1,
        }
    }

    /// Row of the lookup tables for this disparity
    pub(crate) const fn index(self) -> usize {
        match self {
            RunningDisparity::Negative => 0,
            RunningDisparity::Positive => 1,
        }
    }

    /// The opposite disparity
    pub const fn inverted(self) -> Self {
        match self {
            RunningDisparity::Negative => RunningDisparity::Positive,
            RunningDisparity::Positive => RunningDisparity::Negative,
        }
    }

    /// Disparity after a block with the given ones/zeros delta
    ///
    /// A balanced block keeps the disparity; an unbalanced one leaves the
    /// line leaning towards the side it added.
    pub const fn after(self, delta: i32) -> Self {
        if delta > 0 {
            RunningDisparity::Positive
        } else if delta < 0 {
            RunningDisparity::Negative
        } else {
            self
        }
    }
}

impl TryFrom<i8> for RunningDisparity {
    type Error = CodingError;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(RunningDisparity::Negative),
            1 => Ok(RunningDisparity::Positive),
            _ => Err(CodingError::disparity_violation(format!(
                "Running disparity must be -1 or +1, got {}",
                value
            ))),
        }
    }
}

impl std::fmt::Display for RunningDisparity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunningDisparity::Negative => write!(f, "RD-"),
            RunningDisparity::Positive => write!(f, "RD+"),
        }
    }
}

/// An 8-bit character presented to the encoder: a data byte or a K-code
///
/// The byte is split as `HGF EDCBA`; `x = EDCBA` and `y = HGF` give the
/// usual `Dx.y` / `Kx.y` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    value: u8,
    control: bool,
}

impl Character {
    /// Create a character, validating the control vocabulary
    pub fn new(value: u8, control: bool) -> Result<Self> {
        if control {
            Self::control(value)
        } else {
            Ok(Self::data(value))
        }
    }

    /// Create a data character; every byte is a valid data character
    pub const fn data(value: u8) -> Self {
        Character {
            value,
            control: false,
        }
    }

    /// Create a control character
    ///
    /// Only the 12 K-characters (K28.0-K28.7, K23.7, K27.7, K29.7, K30.7)
    /// are accepted.
    pub fn control(value: u8) -> Result<Self> {
        if !Self::is_control_code(value) {
            return Err(CodingError::invalid_control_code(format!(
                "{:#04X} (K{}.{}) is not a K-character",
                value,
                value & 0x1F,
                value >> 5
            )));
        }
        Ok(Character {
            value,
            control: true,
        })
    }

    /// Create a character without checking the control vocabulary
    ///
    /// An unsupported control character encodes as its data encoding.
    pub const fn new_unchecked(value: u8, control: bool) -> Self {
        Character { value, control }
    }

    /// Check whether a byte is one of the sanctioned K-characters
    pub const fn is_control_code(value: u8) -> bool {
        table::control_index(value).is_some()
    }

    /// Raw byte value
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Whether this is a K-character
    pub const fn is_control(&self) -> bool {
        self.control
    }

    /// Whether this character carries a comma (K28.1, K28.5, K28.7)
    pub fn is_comma(&self) -> bool {
        self.control && matches!(self.value, 0x3C | 0xBC | 0xFC)
    }

    /// Low five bits (`EDCBA`), the 5b/6b index
    pub const fn x(&self) -> u8 {
        self.value & 0x1F
    }

    /// High three bits (`HGF`), the 3b/4b index
    pub const fn y(&self) -> u8 {
        self.value >> 5
    }
}

impl From<u8> for Character {
    fn from(value: u8) -> Self {
        Character::data(value)
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.control { 'K' } else { 'D' };
        write!(f, "{}{}.{}", kind, self.x(), self.y())
    }
}

bitfield! {
    /// Sub-block view of a 10-bit symbol
    ///
    /// Bits 9-4 hold `abcdei` (the 5b/6b block, `a` first on the line),
    /// bits 3-0 hold `fghj` (the 3b/4b block).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct SymbolFields(u16);
    impl Debug;
    pub u8, six, set_six: 9, 4;
    pub u8, four, set_four: 3, 0;
}

/// A 10-bit line symbol, most significant bit transmitted first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol(u16);

impl Symbol {
    /// Create a symbol, validating it fits in 10 bits
    pub fn new(value: u16) -> Result<Self> {
        if value > SYMBOL_MASK {
            return Err(CodingError::invalid_symbol(format!(
                "{:#06X} exceeds {} bits",
                value, SYMBOL_WIDTH
            )));
        }
        Ok(Symbol(value))
    }

    /// Create a symbol, silently dropping bits above bit 9
    pub const fn new_unchecked(value: u16) -> Self {
        Symbol(value & SYMBOL_MASK)
    }

    /// Assemble a symbol from its 6-bit and 4-bit sub-blocks
    pub fn from_blocks(six: u8, four: u8) -> Self {
        let mut fields = SymbolFields(0);
        fields.set_six(six);
        fields.set_four(four);
        Symbol(fields.0)
    }

    /// Raw 10-bit value
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Sub-block view of the symbol
    pub fn fields(&self) -> SymbolFields {
        SymbolFields(self.0)
    }

    /// Bitwise complement within 10 bits
    pub const fn complement(&self) -> Self {
        Symbol(!self.0 & SYMBOL_MASK)
    }

    /// Ones minus zeros over the 10 bits
    pub const fn disparity(&self) -> i32 {
        table::disparity(self.0 as u32, SYMBOL_WIDTH)
    }

    /// Whether this is one of the six comma symbols
    pub fn is_comma(&self) -> bool {
        crate::comma::COMMA_SYMBOLS.contains(self)
    }
}

impl TryFrom<u16> for Symbol {
    type Error = CodingError;

    fn try_from(value: u16) -> Result<Self> {
        Symbol::new(value)
    }
}

impl From<Symbol> for u16 {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.fields();
        write!(f, "{:06b} {:04b}", fields.six(), fields.four())
    }
}

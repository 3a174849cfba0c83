//! 8b/10b code tables and the disparity model
//!
//! Data characters are coded as a 5b/6b block (`EDCBA` -> `abcdei`) followed
//! by a 3b/4b block (`HGF` -> `fghj`), each block picking its RD- or RD+ form
//! from the disparity in effect when it is sent (Franaszek & Widmer,
//! US 4,486,739). The 12 K-characters come from a flat table whose RD+ form
//! is the full 10-bit complement of the RD- form.
//!
//! Everything is computed at compile time: a forward table per disparity
//! and a 1024-entry reverse table per disparity.

use crate::constants::{CONTROL_CODES, SYMBOL_SPACE};
use crate::core::{Character, RunningDisparity, Symbol};

/// RD- form of the 5b/6b block, indexed by `EDCBA`
const SIX_B: [u8; 32] = [
    0b100111, 0b011101, 0b101101, 0b110001, 0b110101, 0b101001, 0b011001, 0b111000, // D.00-D.07
    0b111001, 0b100101, 0b010101, 0b110100, 0b001101, 0b101100, 0b011100, 0b010111, // D.08-D.15
    0b011011, 0b100011, 0b010011, 0b110010, 0b001011, 0b101010, 0b011010, 0b111010, // D.16-D.23
    0b110011, 0b100110, 0b010110, 0b110110, 0b001110, 0b101110, 0b011110, 0b101011, // D.24-D.31
];

/// RD- form of the 3b/4b block, indexed by `HGF` (D.x.7 is the primary P7)
const FOUR_B: [u8; 8] = [
    0b1011, 0b1001, 0b0101, 0b1100, 0b1101, 0b1010, 0b0110, 0b1110,
];

/// RD- form of the alternate D.x.A7 block
const FOUR_B_A7: u8 = 0b0111;

/// RD- codewords of the K-characters, in the order of `CONTROL_CODES`
const CONTROL_RD_NEG: [u16; 12] = [
    0b0011110100, // K28.0
    0b0011111001, // K28.1
    0b0011110101, // K28.2
    0b0011110011, // K28.3
    0b0011110010, // K28.4
    0b0011111010, // K28.5
    0b0011110110, // K28.6
    0b0011111000, // K28.7
    0b1110101000, // K23.7
    0b1101101000, // K27.7
    0b1011101000, // K29.7
    0b0111101000, // K30.7
];

/// Ones minus zeros over the low `width` bits of `value`
///
/// Bits above `width` are ignored.
pub const fn disparity(value: u32, width: u32) -> i32 {
    let masked = if width >= 32 {
        value
    } else {
        value & ((1u32 << width) - 1)
    };
    2 * masked.count_ones() as i32 - width as i32
}

/// Position of a K-character in `CONTROL_CODES`
pub const fn control_index(value: u8) -> Option<usize> {
    let mut i = 0;
    while i < CONTROL_CODES.len() {
        if CONTROL_CODES[i] == value {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// D.x.A7 replaces D.x.P7 where P7 would close a run of five equal bits
const fn uses_alternate_seven(x: usize, positive: bool) -> bool {
    if positive {
        matches!(x, 11 | 13 | 14)
    } else {
        matches!(x, 17 | 18 | 20)
    }
}

const fn encode_data_raw(value: u8, positive: bool) -> u16 {
    let x = (value & 0x1F) as usize;
    let y = (value >> 5) as usize;

    let mut six = SIX_B[x];
    let six_delta = disparity(six as u32, 6);
    if positive && (six_delta != 0 || x == 7) {
        six = !six & 0x3F;
    }
    // An unbalanced block always flips the disparity
    let positive = if six_delta != 0 { !positive } else { positive };

    let mut four = if y == 7 && uses_alternate_seven(x, positive) {
        FOUR_B_A7
    } else {
        FOUR_B[y]
    };
    let four_delta = disparity(four as u32, 4);
    if positive && (four_delta != 0 || y == 3) {
        four = !four & 0x0F;
    }

    ((six as u16) << 4) | four as u16
}

const fn encode_control_raw(index: usize, positive: bool) -> u16 {
    let code = CONTROL_RD_NEG[index];
    if positive {
        !code & 0x3FF
    } else {
        code
    }
}

const fn build_data_table() -> [[Symbol; 256]; 2] {
    let mut table = [[Symbol::new_unchecked(0); 256]; 2];
    let mut value = 0;
    while value < 256 {
        table[0][value] = Symbol::new_unchecked(encode_data_raw(value as u8, false));
        table[1][value] = Symbol::new_unchecked(encode_data_raw(value as u8, true));
        value += 1;
    }
    table
}

const fn build_control_table() -> [[Symbol; 12]; 2] {
    let mut table = [[Symbol::new_unchecked(0); 12]; 2];
    let mut i = 0;
    while i < CONTROL_RD_NEG.len() {
        table[0][i] = Symbol::new_unchecked(encode_control_raw(i, false));
        table[1][i] = Symbol::new_unchecked(encode_control_raw(i, true));
        i += 1;
    }
    table
}

const fn build_reverse_table() -> [[Option<Character>; SYMBOL_SPACE]; 2] {
    let mut table = [[None; SYMBOL_SPACE]; 2];
    let mut rd = 0;
    while rd < 2 {
        let positive = rd == 1;
        let mut value = 0;
        while value < 256 {
            let symbol = encode_data_raw(value as u8, positive) as usize;
            table[rd][symbol] = Some(Character::new_unchecked(value as u8, false));
            value += 1;
        }
        let mut i = 0;
        while i < CONTROL_CODES.len() {
            let symbol = encode_control_raw(i, positive) as usize;
            table[rd][symbol] = Some(Character::new_unchecked(CONTROL_CODES[i], true));
            i += 1;
        }
        rd += 1;
    }
    table
}

static DATA_TABLE: [[Symbol; 256]; 2] = build_data_table();
static CONTROL_TABLE: [[Symbol; 12]; 2] = build_control_table();
static REVERSE_TABLE: [[Option<Character>; SYMBOL_SPACE]; 2] = build_reverse_table();

/// Result of looking a symbol up under a given running disparity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Legal codeword under this disparity
    Valid(Character),
    /// Legal codeword, but only under the opposite disparity
    WrongDisparity(Character),
    /// Not an 8b/10b codeword
    Invalid,
}

/// Encode a character under the given running disparity
///
/// A control character outside the K-character set (only constructible
/// through [`Character::new_unchecked`]) is encoded as its data encoding
/// and logged at `warn` level.
pub fn encode(character: Character, rd: RunningDisparity) -> Symbol {
    if character.is_control() {
        if let Some(index) = control_index(character.value()) {
            return CONTROL_TABLE[rd.index()][index];
        }
        tracing::warn!(
            character = %character,
            "unsupported control code, emitting data encoding"
        );
    }
    DATA_TABLE[rd.index()][character.value() as usize]
}

/// Both encodings of a character, `[RD-, RD+]`
pub fn encodings(character: Character) -> [Symbol; 2] {
    [
        encode(character, RunningDisparity::Negative),
        encode(character, RunningDisparity::Positive),
    ]
}

/// Reverse-lookup a symbol under the given running disparity
pub fn lookup(symbol: Symbol, rd: RunningDisparity) -> Lookup {
    let index = symbol.value() as usize;
    match REVERSE_TABLE[rd.index()][index] {
        Some(character) => Lookup::Valid(character),
        None => match REVERSE_TABLE[rd.inverted().index()][index] {
            Some(character) => Lookup::WrongDisparity(character),
            None => Lookup::Invalid,
        },
    }
}

/// Whether a symbol is a legal codeword under either disparity
pub fn is_codeword(symbol: Symbol) -> bool {
    lookup(symbol, RunningDisparity::Negative) != Lookup::Invalid
}

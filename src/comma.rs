//! Comma patterns and boundary scanning
//!
//! K28.1, K28.5 and K28.7 carry the comma sequence `0011111` (or its
//! complement `1100000`) in their first seven bits. A receiver hunting for
//! symbol alignment slides a 10-bit window over the raw bit stream, so the
//! code must never produce a comma symbol straddling two data symbols.

use crate::constants::SYMBOL_MASK;
use crate::core::Symbol;

/// The 7-bit comma sequence under RD-
pub const COMMA_SEQUENCE: u16 = 0b0011111;

/// Width of the comma sequence in bits
pub const COMMA_SEQUENCE_WIDTH: u32 = 7;

/// The six 10-bit comma symbols: K28.1, K28.5, K28.7 and their complements
pub const COMMA_SYMBOLS: [Symbol; 6] = [
    Symbol::new_unchecked(0b0011111001), // K28.1 RD-
    Symbol::new_unchecked(0b1100000110), // K28.1 RD+
    Symbol::new_unchecked(0b0011111010), // K28.5 RD-
    Symbol::new_unchecked(0b1100000101), // K28.5 RD+
    Symbol::new_unchecked(0b0011111000), // K28.7 RD-
    Symbol::new_unchecked(0b1100000111), // K28.7 RD+
];

/// Whether the first seven bits of a symbol are a comma sequence
pub fn contains_comma_sequence(symbol: Symbol) -> bool {
    let head = symbol.value() >> (crate::constants::SYMBOL_WIDTH - COMMA_SEQUENCE_WIDTH);
    head == COMMA_SEQUENCE || head == (!COMMA_SEQUENCE & 0x7F)
}

/// The 10-bit windows straddling two consecutive symbols
///
/// Window `shift` starts `shift` bits into `first`; shift 0 is `first`
/// itself.
pub fn boundary_windows(first: Symbol, second: Symbol) -> impl Iterator<Item = (u32, Symbol)> {
    let pair = ((first.value() as u32) << 10) | second.value() as u32;
    (0..10u32).map(move |shift| {
        let window = (pair >> (10 - shift)) as u16 & SYMBOL_MASK;
        (shift, Symbol::new_unchecked(window))
    })
}

/// Position of a comma found across a symbol boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommaHit {
    /// Index of the first symbol of the pair
    pub index: usize,
    /// Bit offset into that symbol
    pub shift: u32,
    /// The comma symbol that matched
    pub symbol: Symbol,
}

/// Find the first comma symbol in any window spanning consecutive symbols
///
/// Intentional commas show up at shift 0 of their own index, so callers
/// checking a data-only stream expect `None`.
pub fn find_comma(symbols: &[Symbol]) -> Option<CommaHit> {
    symbols.windows(2).enumerate().find_map(|(index, pair)| {
        boundary_windows(pair[0], pair[1])
            .find(|(_, window)| window.is_comma())
            .map(|(shift, symbol)| CommaHit {
                index,
                shift,
                symbol,
            })
    })
}

/// Find a comma that is not aligned to a symbol boundary
pub fn find_spurious_comma(symbols: &[Symbol]) -> Option<CommaHit> {
    symbols.windows(2).enumerate().find_map(|(index, pair)| {
        boundary_windows(pair[0], pair[1])
            .skip(1)
            .find(|(_, window)| window.is_comma())
            .map(|(shift, symbol)| CommaHit {
                index,
                shift,
                symbol,
            })
    })
}

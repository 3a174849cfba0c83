//! # 8b/10b Line Coding
//!
//! A Rust library implementing the 8b/10b transmission code used as the
//! symbol layer of serial links such as JESD204B.
//!
//! 8b/10b maps every byte to a 10-bit symbol with a bounded run length and a
//! DC-balanced line. This library provides:
//!
//! - Compile-time code tables for the 256 data characters and 12 K-characters
//! - A per-lane encoder and decoder tracking running disparity, each with a
//!   one-cycle registered output
//! - Detection of invalid codewords and disparity violations
//! - Comma pattern helpers for checking alignment safety of a stream
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use linecode8b10b::{Character, Decoder, Encoder};
//!
//! let mut encoder = Encoder::new();
//! let mut decoder = Decoder::new();
//!
//! let k285 = Character::control(0xBC)?;
//! let symbol = encoder.encode(k285);
//! assert_eq!(symbol.value(), 0b0011111010);
//! assert_eq!(decoder.decode(symbol).into_result()?, k285);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod comma;
pub mod core;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod table;

pub use codec::{LineCodec, LineCodecBuilder};
pub use crate::core::{Character, RunningDisparity, Symbol};
pub use decoder::{Decoded, Decoder, DecoderStats};
pub use encoder::Encoder;
pub use error::{CodingError, Result};

/// 8b/10b code constants
pub mod constants {
    use crate::core::RunningDisparity;

    /// Character width in bits
    pub const CHARACTER_WIDTH: u32 = 8;

    /// Symbol width in bits
    pub const SYMBOL_WIDTH: u32 = 10;

    /// Mask of the bits a symbol may use
    pub const SYMBOL_MASK: u16 = 0x3FF;

    /// Number of distinct 10-bit patterns
    pub const SYMBOL_SPACE: usize = 1 << SYMBOL_WIDTH;

    /// The 12 K-characters: K28.0-K28.7, K23.7, K27.7, K29.7, K30.7
    pub const CONTROL_CODES: [u8; 12] = [
        0x1C, 0x3C, 0x5C, 0x7C, 0x9C, 0xBC, 0xDC, 0xFC, 0xF7, 0xFB, 0xFD, 0xFE,
    ];

    /// Running disparity both ends assume after reset
    pub const INITIAL_DISPARITY: RunningDisparity = RunningDisparity::Negative;
}

//! 8b/10b decoder and link-health counters

use crate::core::{Character, RunningDisparity, Symbol};
use crate::error::{CodingError, Result};
use crate::pipeline::Register;
use crate::table::{self, Lookup};

/// Outcome of decoding one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decoded {
    /// Legal codeword under the running disparity
    Valid(Character),
    /// Legal codeword, but sent under the opposite running disparity
    DisparityError(Character),
    /// Not an 8b/10b codeword
    Invalid(Symbol),
}

impl Decoded {
    /// The decoded character, if the symbol was a codeword
    ///
    /// Disparity errors still recover the character.
    pub fn character(&self) -> Option<Character> {
        match self {
            Decoded::Valid(c) | Decoded::DisparityError(c) => Some(*c),
            Decoded::Invalid(_) => None,
        }
    }

    /// Whether the symbol decoded cleanly
    pub fn is_valid(&self) -> bool {
        matches!(self, Decoded::Valid(_))
    }

    /// Strict view: any error becomes a `CodingError`
    pub fn into_result(self) -> Result<Character> {
        match self {
            Decoded::Valid(c) => Ok(c),
            Decoded::DisparityError(c) => Err(CodingError::disparity_violation(format!(
                "{} received under the wrong running disparity",
                c
            ))),
            Decoded::Invalid(symbol) => Err(CodingError::invalid_codeword(format!(
                "{} ({:#05X}) is not an 8b/10b codeword",
                symbol,
                symbol.value()
            ))),
        }
    }
}

/// Link-health counters kept by a decoder
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderStats {
    /// Number of symbols decoded
    pub symbols: u64,
    /// Number of symbols that were not codewords
    pub invalid_codewords: u64,
    /// Number of codewords received under the wrong disparity
    pub disparity_errors: u64,
}

impl DecoderStats {
    /// Total number of flagged symbols
    pub fn error_count(&self) -> u64 {
        self.invalid_codewords + self.disparity_errors
    }

    /// Flagged symbols per decoded symbol (0.0 to 1.0)
    pub fn error_rate(&self) -> f64 {
        if self.symbols > 0 {
            self.error_count() as f64 / self.symbols as f64
        } else {
            0.0
        }
    }

    fn record(&mut self, decoded: &Decoded) {
        self.symbols += 1;
        match decoded {
            Decoded::Valid(_) => {}
            Decoded::DisparityError(_) => self.disparity_errors += 1,
            Decoded::Invalid(_) => self.invalid_codewords += 1,
        }
    }
}

/// Stateful 8b/10b decoder for one lane
///
/// Mirrors [`Encoder`](crate::Encoder): the result for the symbol clocked in
/// at cycle N is returned at cycle N+1. Errors are reported in-band and
/// never stop decoding.
#[derive(Debug, Clone)]
pub struct Decoder {
    initial: RunningDisparity,
    disparity: RunningDisparity,
    output: Register<Decoded>,
    stats: DecoderStats,
}

impl Decoder {
    /// Create a decoder expecting RD- first
    pub fn new() -> Self {
        Self::with_initial_disparity(crate::constants::INITIAL_DISPARITY)
    }

    /// Create a decoder expecting the given disparity first
    pub fn with_initial_disparity(initial: RunningDisparity) -> Self {
        Decoder {
            initial,
            disparity: initial,
            output: Register::new(),
            stats: DecoderStats::default(),
        }
    }

    /// Decode one symbol immediately, updating the running disparity
    ///
    /// This is the combinational path; it bypasses the output register.
    pub fn decode(&mut self, symbol: Symbol) -> Decoded {
        let decoded = match table::lookup(symbol, self.disparity) {
            Lookup::Valid(c) => Decoded::Valid(c),
            Lookup::WrongDisparity(c) => {
                tracing::debug!(
                    symbol = %symbol,
                    character = %c,
                    disparity = %self.disparity,
                    "disparity violation"
                );
                Decoded::DisparityError(c)
            }
            Lookup::Invalid => {
                tracing::debug!(symbol = %symbol, "invalid codeword");
                Decoded::Invalid(symbol)
            }
        };

        // Same update as the encoder; an unbalanced symbol also resyncs the
        // disparity after an error.
        self.disparity = self.disparity.after(symbol.disparity());
        self.stats.record(&decoded);
        decoded
    }

    /// Advance one cycle
    ///
    /// Decodes `symbol` into the output register and returns the result
    /// latched on the previous cycle (`None` on the first cycle after reset).
    pub fn clock(&mut self, symbol: Symbol) -> Option<Decoded> {
        let decoded = self.decode(symbol);
        self.output.clock(decoded)
    }

    /// Take the result still held in the output register
    pub fn drain(&mut self) -> Option<Decoded> {
        self.output.take()
    }

    /// Result currently presented at the output
    pub fn output(&self) -> Option<Decoded> {
        self.output.peek().copied()
    }

    /// Current running disparity
    pub fn disparity(&self) -> RunningDisparity {
        self.disparity
    }

    /// Link-health counters since the last reset
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Return to the reset state, clearing the counters
    pub fn reset(&mut self) {
        tracing::trace!(disparity = %self.initial, "decoder reset");
        self.disparity = self.initial;
        self.output.reset();
        self.stats = DecoderStats::default();
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

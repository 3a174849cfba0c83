//! Sequence-level encoding and decoding
//!
//! [`LineCodec`] pumps whole slices through a paired [`Encoder`] and
//! [`Decoder`], absorbing the register latency so that output `i` always
//! corresponds to input `i`.

use crate::core::{Character, RunningDisparity, Symbol};
use crate::decoder::{Decoded, Decoder, DecoderStats};
use crate::encoder::Encoder;
use crate::error::Result;

/// An encoder/decoder pair for one lane, sharing the reset disparity
#[derive(Debug, Clone)]
pub struct LineCodec {
    encoder: Encoder,
    decoder: Decoder,
}

impl LineCodec {
    /// Create a codec with both ends starting at `initial`
    pub fn new(initial: RunningDisparity) -> Self {
        LineCodec {
            encoder: Encoder::with_initial_disparity(initial),
            decoder: Decoder::with_initial_disparity(initial),
        }
    }

    /// Encode a sequence of characters, continuing from the current state
    pub fn encode_sequence(&mut self, characters: &[Character]) -> Vec<Symbol> {
        let mut symbols = Vec::with_capacity(characters.len());
        for &character in characters {
            if let Some(symbol) = self.encoder.clock(character) {
                symbols.push(symbol);
            }
        }
        symbols.extend(self.encoder.drain());
        symbols
    }

    /// Decode a sequence of symbols, continuing from the current state
    pub fn decode_sequence(&mut self, symbols: &[Symbol]) -> Vec<Decoded> {
        let mut decoded = Vec::with_capacity(symbols.len());
        for &symbol in symbols {
            if let Some(result) = self.decoder.clock(symbol) {
                decoded.push(result);
            }
        }
        decoded.extend(self.decoder.drain());
        decoded
    }

    /// Decode a sequence, failing on the first flagged symbol
    pub fn decode_sequence_strict(&mut self, symbols: &[Symbol]) -> Result<Vec<Character>> {
        self.decode_sequence(symbols)
            .into_iter()
            .map(Decoded::into_result)
            .collect()
    }

    /// Encode raw data bytes
    pub fn encode_bytes(&mut self, data: &[u8]) -> Vec<Symbol> {
        let characters: Vec<Character> = data.iter().copied().map(Character::data).collect();
        self.encode_sequence(&characters)
    }

    /// Transmit-side running disparity
    pub fn encoder_disparity(&self) -> RunningDisparity {
        self.encoder.disparity()
    }

    /// Receive-side running disparity
    pub fn decoder_disparity(&self) -> RunningDisparity {
        self.decoder.disparity()
    }

    /// Receive-side link-health counters
    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Access the encoder
    pub fn encoder(&mut self) -> &mut Encoder {
        &mut self.encoder
    }

    /// Access the decoder
    pub fn decoder(&mut self) -> &mut Decoder {
        &mut self.decoder
    }

    /// Reset both ends
    pub fn reset(&mut self) {
        self.encoder.reset();
        self.decoder.reset();
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        LineCodecBuilder::new().build()
    }
}

/// Builder for [`LineCodec`]
pub struct LineCodecBuilder {
    initial: RunningDisparity,
}

impl LineCodecBuilder {
    /// Create a new builder (RD- at reset)
    pub fn new() -> Self {
        LineCodecBuilder {
            initial: crate::constants::INITIAL_DISPARITY,
        }
    }

    /// Set the disparity both ends assume at reset
    pub fn with_initial_disparity(mut self, initial: RunningDisparity) -> Self {
        self.initial = initial;
        self
    }

    /// Build the codec
    pub fn build(self) -> LineCodec {
        LineCodec::new(self.initial)
    }
}

impl Default for LineCodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

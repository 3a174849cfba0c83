//! 8b/10b encoder

use crate::core::{Character, RunningDisparity, Symbol};
use crate::pipeline::Register;
use crate::table;

/// Stateful 8b/10b encoder for one lane
///
/// Holds the running disparity and a registered output: the symbol for the
/// character clocked in at cycle N is returned at cycle N+1.
#[derive(Debug, Clone)]
pub struct Encoder {
    initial: RunningDisparity,
    disparity: RunningDisparity,
    output: Register<Symbol>,
}

impl Encoder {
    /// Create an encoder starting at RD-
    pub fn new() -> Self {
        Self::with_initial_disparity(crate::constants::INITIAL_DISPARITY)
    }

    /// Create an encoder starting at the given disparity
    ///
    /// The paired decoder must start at the same disparity.
    pub fn with_initial_disparity(initial: RunningDisparity) -> Self {
        Encoder {
            initial,
            disparity: initial,
            output: Register::new(),
        }
    }

    /// Encode one character immediately, updating the running disparity
    ///
    /// This is the combinational path; it bypasses the output register.
    pub fn encode(&mut self, character: Character) -> Symbol {
        let symbol = table::encode(character, self.disparity);
        self.disparity = self.disparity.after(symbol.disparity());
        symbol
    }

    /// Advance one cycle
    ///
    /// Encodes `character` into the output register and returns the symbol
    /// latched on the previous cycle (`None` on the first cycle after reset).
    pub fn clock(&mut self, character: Character) -> Option<Symbol> {
        let symbol = self.encode(character);
        self.output.clock(symbol)
    }

    /// Take the symbol still held in the output register
    pub fn drain(&mut self) -> Option<Symbol> {
        self.output.take()
    }

    /// Symbol currently presented at the output
    pub fn output(&self) -> Option<Symbol> {
        self.output.peek().copied()
    }

    /// Current running disparity
    pub fn disparity(&self) -> RunningDisparity {
        self.disparity
    }

    /// Return to the reset state
    pub fn reset(&mut self) {
        tracing::trace!(disparity = %self.initial, "encoder reset");
        self.disparity = self.initial;
        self.output.reset();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_creation() {
        let encoder = Encoder::new();
        assert_eq!(encoder.disparity(), RunningDisparity::Negative);
        assert_eq!(encoder.output(), None);
    }

    #[test]
    fn test_comma_alternates_disparity() -> crate::Result<()> {
        let mut encoder = Encoder::new();
        let k285 = Character::control(0xBC)?;

        assert_eq!(encoder.encode(k285).value(), 0b0011111010);
        assert_eq!(encoder.disparity(), RunningDisparity::Positive);
        assert_eq!(encoder.encode(k285).value(), 0b1100000101);
        assert_eq!(encoder.disparity(), RunningDisparity::Negative);
        Ok(())
    }

    #[test]
    fn test_registered_latency() {
        let mut encoder = Encoder::new();
        let first = Character::data(0x00);
        let second = Character::data(0xB5);

        assert_eq!(encoder.clock(first), None);
        let latched = encoder.clock(second);
        assert_eq!(latched.map(|s| s.value()), Some(0b1001110100));
        assert_eq!(encoder.drain().map(|s| s.value()), Some(0b1010101010));
        assert_eq!(encoder.drain(), None);
    }

    #[test]
    fn test_reset_restores_initial_disparity() {
        let mut encoder = Encoder::with_initial_disparity(RunningDisparity::Positive);
        // D0.1 under RD+ is 011000 1001
        encoder.clock(Character::data(0x20));
        assert_eq!(encoder.disparity(), RunningDisparity::Negative);

        encoder.reset();
        assert_eq!(encoder.disparity(), RunningDisparity::Positive);
        assert_eq!(encoder.output(), None);
    }

    #[test]
    fn test_unsupported_control_encodes_as_data() {
        let mut encoder = Encoder::new();
        let mut reference = Encoder::new();
        let bogus = Character::new_unchecked(0x20, true);

        assert_eq!(encoder.encode(bogus), reference.encode(Character::data(0x20)));
        assert_eq!(encoder.disparity(), reference.disparity());
    }

    #[test]
    fn test_balanced_symbol_keeps_disparity() {
        let mut encoder = Encoder::new();
        encoder.encode(Character::data(0xB5));
        assert_eq!(encoder.disparity(), RunningDisparity::Negative);
    }
}

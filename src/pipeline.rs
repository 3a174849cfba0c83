//! Registered output stage
//!
//! The encoder and decoder are single-stage pipelines: the value computed
//! in one cycle is only observable on the next. [`Register`] models that
//! stage as a one-slot delay between "compute" and "observe".

/// One-slot delay line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register<T> {
    slot: Option<T>,
}

impl<T> Register<T> {
    /// Create an empty register (the state right after reset)
    pub const fn new() -> Self {
        Register { slot: None }
    }

    /// Advance one cycle: latch `next` and return what was latched before
    ///
    /// Returns `None` on the first cycle after reset.
    pub fn clock(&mut self, next: T) -> Option<T> {
        self.slot.replace(next)
    }

    /// Take the latched value, leaving the register empty
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Observe the latched value without advancing
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Clear the register
    pub fn reset(&mut self) {
        self.slot = None;
    }
}

impl<T> Default for Register<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_latency() {
        let mut reg = Register::new();
        assert_eq!(reg.clock(1), None);
        assert_eq!(reg.clock(2), Some(1));
        assert_eq!(reg.peek(), Some(&2));
        assert_eq!(reg.take(), Some(2));
        assert_eq!(reg.take(), None);
    }

    #[test]
    fn test_register_reset() {
        let mut reg = Register::new();
        reg.clock("a");
        reg.reset();
        assert_eq!(reg.peek(), None);
        assert_eq!(reg.clock("b"), None);
    }
}

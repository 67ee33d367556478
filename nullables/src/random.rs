//! Nullable random — deterministic login nonces.

use vaultlink_protocol::NonceSource;

/// Returns pre-configured nonces in order, cycling when exhausted.
pub struct NullRandom {
    outputs: Vec<u32>,
    index: usize,
}

impl NullRandom {
    pub fn new(outputs: Vec<u32>) -> Self {
        Self { outputs, index: 0 }
    }

    /// A single value returned for every call.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }
}

impl NonceSource for NullRandom {
    fn next_nonce(&mut self) -> u32 {
        if self.outputs.is_empty() {
            return 0;
        }
        let value = self.outputs[self.index % self.outputs.len()];
        self.index += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_outputs() {
        let mut r = NullRandom::new(vec![7, 8]);
        assert_eq!(r.next_nonce(), 7);
        assert_eq!(r.next_nonce(), 8);
        assert_eq!(r.next_nonce(), 7);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut r = NullRandom::new(vec![]);
        assert_eq!(r.next_nonce(), 0);
    }
}

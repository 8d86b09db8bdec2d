//! Short link tokens.

use crate::config::DEFAULT_LINK_LENGTH;
use uuid::Uuid;

const ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// Source of link tokens. Persisting code retries with a fresh token on collision.
pub trait LinkGenerator {
    fn generate(&self) -> String;
}

/// Random lowercase hex tokens of a fixed length.
#[derive(Debug, Clone)]
pub struct RandomLinks {
    length: usize,
}

impl RandomLinks {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomLinks {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_LENGTH)
    }
}

impl LinkGenerator for RandomLinks {
    fn generate(&self) -> String {
        let mut out = String::with_capacity(self.length);
        while out.len() < self.length {
            // bytes 0..6 of a v4 UUID carry no version/variant bits
            let uuid = Uuid::new_v4();
            for &byte in &uuid.as_bytes()[..6] {
                for nibble in [byte >> 4, byte & 0x0f] {
                    if out.len() < self.length {
                        out.push(ALPHABET[nibble as usize] as char);
                    }
                }
            }
        }
        out
    }
}

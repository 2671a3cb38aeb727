//! Limited password secret material

use rand::distributions::{Alphanumeric, Distribution};
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

/// Generate an alphanumeric secret from the OS random source
pub fn generate_secret(length: usize) -> String {
    Alphanumeric
        .sample_iter(OsRng)
        .take(length)
        .map(char::from)
        .collect()
}

/// Compare two secrets without an early exit on the first differing byte
pub fn secrets_match(stored: &str, presented: &str) -> bool {
    stored.as_bytes().ct_eq(presented.as_bytes()).into()
}

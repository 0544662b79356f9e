//! Anti-CSRF token generation.

use rand::Rng;
use std::fmt;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// An opaque anti-CSRF token.
///
/// The value is a random 64-bit integer rendered in base-36. It carries no
/// signature, timestamp, or session binding; validity is proven purely by the
/// client echoing the same value back as both a cookie and a request
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Generate a new token.
    ///
    /// Draws from `rand::thread_rng()`, a per-thread CSPRNG, so concurrent
    /// requests never contend on or correlate through a shared generator.
    pub fn mint() -> Self {
        let raw: i64 = rand::thread_rng().r#gen();
        Self(encode_base36(raw))
    }

    /// The token value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a signed 64-bit integer in base-36: lowercase digits of the
/// magnitude, with a leading `-` for negative values.
fn encode_base36(value: i64) -> String {
    // unsigned_abs keeps i64::MIN in range.
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::with_capacity(14);
    loop {
        digits.push(BASE36_DIGITS[(magnitude % 36) as usize] as char);
        magnitude /= 36;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

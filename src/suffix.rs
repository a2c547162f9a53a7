use rand::rngs::OsRng;
use rand::{TryCryptoRng, TryRngCore};

use crate::error::{SpliceError, SpliceResult};

/// Length of generated suffixes
pub const SUFFIX_LEN: usize = 4;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

// Largest multiple of 26 that fits in a byte; anything above is rejected to
// keep the draw uniform.
const ACCEPT_BELOW: u8 = 26 * 9;

/// 4-letter lowercase suffix from the operating system's CSPRNG
pub fn random_suffix() -> SpliceResult<String> {
    random_suffix_with(&mut OsRng)
}

/// 4-letter lowercase suffix from the given random source
pub fn random_suffix_with<R>(rng: &mut R) -> SpliceResult<String>
where
    R: TryCryptoRng + ?Sized,
{
    let mut out = String::with_capacity(SUFFIX_LEN);
    let mut buf = [0u8; 8];

    while out.len() < SUFFIX_LEN {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| SpliceError::entropy(e.to_string()))?;

        for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if out.len() == SUFFIX_LEN {
                break;
            }
            out.push(ALPHABET[usize::from(byte % 26)] as char);
        }
    }

    Ok(out)
}

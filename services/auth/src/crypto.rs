//! One-way hashing for OTP codes, passwords, and registration secrets, plus
//! the numeric OTP generator.
//!
//! Stored form is `saltHex:derivedKeyHex` with a random per-secret salt.
//! The derivation is PBKDF2-HMAC-SHA-512; verification recomputes with the
//! stored salt and compares in constant time.

use pbkdf2::pbkdf2_hmac;
use rand::RngExt;
use sha2::Sha512;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const ITERATIONS: u32 = 10_000;
const KEY_LEN: usize = 64;
const SEPARATOR: char = ':';

/// Lowest and highest six-digit OTP values (inclusive).
const OTP_MIN: u32 = 100_000;
const OTP_MAX: u32 = 999_999;

/// Generate a six-digit one-time code.
///
/// Not a CSPRNG-backed draw; acceptable because codes live five minutes,
/// issuance is cooldown-limited, and one success burns every outstanding code.
pub fn generate_otp() -> u32 {
    let mut rng = rand::rng();
    rng.random_range(OTP_MIN..=OTP_MAX)
}

/// Hash a secret into its stored form.
pub fn hash_secret(plaintext: &str) -> String {
    let mut rng = rand::rng();
    let salt: Vec<u8> = (0..SALT_LEN).map(|_| rng.random_range(0..=u8::MAX)).collect();
    let derived = derive(plaintext.as_bytes(), &salt);
    format!("{}{}{}", hex::encode(salt), SEPARATOR, hex::encode(derived))
}

/// Check a plaintext secret against a stored form.
///
/// Fails closed: a malformed stored form (missing separator, bad hex) is a
/// non-match, never a panic or an error.
pub fn verify_secret(plaintext: &str, stored: &str) -> bool {
    let Some((salt_hex, key_hex)) = stored.split_once(SEPARATOR) else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(key_hex) else {
        return false;
    };
    if expected.len() != KEY_LEN {
        return false;
    }
    let derived = derive(plaintext.as_bytes(), &salt);
    derived.as_slice().ct_eq(expected.as_slice()).into()
}

fn derive(secret: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(secret, salt, ITERATIONS, &mut out);
    out
}

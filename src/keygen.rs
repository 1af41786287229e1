//! Short-key generation
//!
//! Produces the public short keys and the derived secret (admin) keys.
//! Uniqueness against the registry is guaranteed by a retry loop over an
//! injected existence predicate, so this module never touches the database
//! directly and can be tested without one. The registry's unique index is
//! the final backstop for concurrent writers (see `services::LinkService`).

use std::future::Future;
use std::iter;

use crate::errors::{Result, ShorturlError};

/// 36-symbol alphabet: uppercase letters and digits.
pub const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of a public short key (36^5 ≈ 60M combinations).
pub const DEFAULT_KEY_LENGTH: usize = 5;

/// Length of the random suffix appended to a key to form its secret key.
pub const SECRET_SUFFIX_LENGTH: usize = 8;

/// Generate a random key of `length` characters drawn uniformly from
/// [`KEY_ALPHABET`].
///
/// `ThreadRng` is a CSPRNG, so keys are not guessable or enumerable.
/// A zero length is input misuse and fails fast.
pub fn generate_random_key(length: usize) -> Result<String> {
    if length == 0 {
        return Err(ShorturlError::validation(
            "key length must be greater than zero",
        ));
    }

    Ok(
        iter::repeat_with(|| KEY_ALPHABET[rand::random_range(0..KEY_ALPHABET.len())] as char)
            .take(length)
            .collect(),
    )
}

/// Draw random keys of `length` characters until `exists` reports one
/// absent, and return that candidate.
///
/// Pure retry: no backoff, no cap. Each draw is an independent
/// high-entropy sample, so at expected scale the loop terminates on the
/// first iteration almost always. Predicate errors propagate immediately.
pub async fn generate_unique_key<F, Fut>(length: usize, exists: F) -> Result<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    loop {
        let candidate = generate_random_key(length)?;
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
}

/// Derive the secret (admin) key for `key`: the key itself plus an
/// underscore and `suffix_length` random alphabet characters
/// ([`SECRET_SUFFIX_LENGTH`] by default, via config).
///
/// The secret key is not collision-checked here; the unique index on the
/// secret-key column rejects the astronomically unlikely duplicate at
/// persistence time.
pub fn derive_secret_key(key: &str, suffix_length: usize) -> Result<String> {
    Ok(format!("{}_{}", key, generate_random_key(suffix_length)?))
}

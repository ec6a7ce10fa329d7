//! Store Extensions Module
//!
//! Convenience operations available on every [`Store`]: bulk hash writes
//! from displayable pairs and a lenient integer getter.

use std::fmt::Display;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::store::Store;

// == Store Extension Trait ==
/// Extra operations implemented for every [`Store`].
#[async_trait]
pub trait StoreExt: Store {
    /// Writes `fields` into the hash at `key`, formatting each field name
    /// and value through [`Display`].
    ///
    /// Existing fields with the same names are overwritten, others are left
    /// alone. An empty key or an empty field list is rejected.
    async fn set_hash_fields<F, V>(&self, key: &str, fields: &[(F, V)]) -> Result<()>
    where
        F: Display + Sync,
        V: Display + Sync;

    /// Reads the value at `key` as an integer, the forgiving way.
    ///
    /// Parsing skips leading whitespace, honors an optional sign, then
    /// consumes decimal digits with single underscores allowed between
    /// them, stopping at the first character that fits none of that. A
    /// value with no leading integer at all reads as 0, and magnitudes
    /// beyond `i64` saturate at `i64::MAX` / `i64::MIN`.
    ///
    /// # Returns
    /// - `Ok(Some(n))` if the key exists
    /// - `Ok(None)` if the key is absent
    async fn get_i(&self, key: &str) -> Result<Option<i64>>;
}

// == Blanket Implementation ==
#[async_trait]
impl<S: Store + ?Sized> StoreExt for S {
    async fn set_hash_fields<F, V>(&self, key: &str, fields: &[(F, V)]) -> Result<()>
    where
        F: Display + Sync,
        V: Display + Sync,
    {
        if key.is_empty() {
            return Err(StoreError::InvalidArgument(
                "hash key must not be empty".to_string(),
            ));
        }
        if fields.is_empty() {
            return Err(StoreError::InvalidArgument(
                "at least one hash field is required".to_string(),
            ));
        }

        let flat: Vec<(String, String)> = fields
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();

        self.hset_many(key, &flat).await
    }

    async fn get_i(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(lenient_i64(&String::from_utf8_lossy(&raw)))),
            None => Ok(None),
        }
    }
}

// == Lenient Parser ==
/// Extracts the leading integer from `raw`, or 0 if there is none.
fn lenient_i64(raw: &str) -> i64 {
    let mut chars = raw.trim_start().chars().peekable();

    let mut negative = false;
    match chars.peek() {
        Some('-') => {
            negative = true;
            chars.next();
        }
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    let mut value: i64 = 0;
    let mut saw_digit = false;
    let mut saturated = false;

    while let Some(&c) = chars.peek() {
        if let Some(digit) = c.to_digit(10) {
            chars.next();
            saw_digit = true;
            if !saturated {
                match value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit as i64))
                {
                    Some(v) => value = v,
                    None => saturated = true,
                }
            }
        } else if c == '_' && saw_digit {
            // A separator only counts when digits surround it
            let mut lookahead = chars.clone();
            lookahead.next();
            match lookahead.peek() {
                Some(next) if next.is_ascii_digit() => {
                    chars.next();
                }
                _ => break,
            }
        } else {
            break;
        }
    }

    if !saw_digit {
        return 0;
    }
    if saturated {
        return if negative { i64::MIN } else { i64::MAX };
    }
    if negative {
        -value
    } else {
        value
    }
}

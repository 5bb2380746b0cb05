//! Shared handle to a field characteristic.

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;
use std::sync::LazyLock;

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_bigint::Sign;
use num_traits::Num;
use num_traits::Zero;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::constants::BLS12_381_Q_BYTES;
use crate::error::ParseFieldElementError;

static BLS12_381_Q: LazyLock<Modulus> = LazyLock::new(|| {
    Modulus(Arc::new(BigUint::from_bytes_be(&BLS12_381_Q_BYTES)))
});

/// A positive prime, shared by every element built on it.
///
/// Cloning only bumps a reference count. Primality is trusted, never
/// re-checked.
#[derive(Clone)]
pub struct Modulus(Arc<BigUint>);

impl Modulus {
    pub fn new(q: impl Into<BigUint>) -> Result<Self, ParseFieldElementError> {
        let q = q.into();
        if q.is_zero() {
            return Err(ParseFieldElementError::ZeroModulus);
        }
        Ok(Self(Arc::new(q)))
    }

    /// Small moduli for tests and toy fields.
    pub fn from_u64(q: u64) -> Result<Self, ParseFieldElementError> {
        Self::new(BigUint::from(q))
    }

    /// Parse a modulus; a `0x` prefix selects hexadecimal.
    pub fn parse(s: &str) -> Result<Self, ParseFieldElementError> {
        let (digits, radix) = split_radix(s)?;
        let q = BigUint::from_str_radix(digits, radix).map_err(|_| {
            ParseFieldElementError::InvalidDigits {
                input: s.to_owned(),
                radix,
            }
        })?;
        Self::new(q)
    }

    /// The process-wide default characteristic.
    pub fn bls12_381() -> Self {
        BLS12_381_Q.clone()
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    #[inline]
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Reduce a signed integer into `[0, q)`.
    pub(crate) fn reduce(&self, n: &BigInt) -> BigUint {
        let q = BigInt::from_biguint(Sign::Plus, self.value().clone());
        let r = n % &q;
        let r = if r.sign() == Sign::Minus { r + q } else { r };
        r.magnitude().clone()
    }
}

pub(crate) fn split_radix(s: &str) -> Result<(&str, u32), ParseFieldElementError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseFieldElementError::Empty);
    }
    let split = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map_or((s, 10), |hex| (hex, 16));
    if split.0.is_empty() {
        return Err(ParseFieldElementError::Empty);
    }
    Ok(split)
}

impl Default for Modulus {
    fn default() -> Self {
        Self::bls12_381()
    }
}

impl PartialEq for Modulus {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for Modulus {}

impl Hash for Modulus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modulus({:#x})", &*self.0)
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::LowerHex for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&*self.0, f)
    }
}

impl Serialize for Modulus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Modulus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let q = BigUint::deserialize(deserializer)?;
        Self::new(q).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod modulus_test {
    use test_strategy::proptest;

    use super::*;
    use crate::constants::BLS12_381_Q_BITS;

    #[test]
    fn default_is_bls12_381() {
        let q = Modulus::default();
        assert_eq!(BLS12_381_Q_BITS, q.bits());
        assert_eq!(
            Modulus::parse("0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab")
                .unwrap(),
            q
        );
    }

    #[test]
    fn zero_modulus_is_rejected() {
        assert_eq!(
            Err(ParseFieldElementError::ZeroModulus),
            Modulus::from_u64(0)
        );
    }

    #[test]
    fn equality_compares_values_not_handles() {
        let a = Modulus::from_u64(13).unwrap();
        let b = Modulus::parse("13").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Modulus::from_u64(17).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Err(ParseFieldElementError::Empty), Modulus::parse("  "));
        assert_eq!(Err(ParseFieldElementError::Empty), Modulus::parse("0x"));
        assert!(matches!(
            Modulus::parse("12z"),
            Err(ParseFieldElementError::InvalidDigits { radix: 10, .. })
        ));
    }

    #[proptest]
    fn reduce_lands_in_canonical_range(n: i64) {
        let q = Modulus::from_u64(13).unwrap();
        let r = q.reduce(&BigInt::from(n));
        proptest::prop_assert_eq!(BigUint::from(n.rem_euclid(13) as u64), r);
    }
}

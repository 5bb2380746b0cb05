use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_traits::Num;
use num_traits::One;
use num_traits::Signed;
use num_traits::Zero;
use rand::RngCore;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::RANDOM_EXTRA_BITS;
use crate::error::FieldError;
use crate::error::ParseFieldElementError;
use crate::error::Result;
use crate::error::Unsupported;
use crate::modulus::split_radix;
use crate::modulus::Modulus;
use crate::traits::check_modulus;
use crate::traits::downcast;
use crate::traits::Field;

/// Element of the prime field ℤ_q.
///
/// Always holds the canonical residue `0 <= value < q` together with the
/// modulus it belongs to.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFq", into = "RawFq")]
pub struct Fq {
    value: BigUint,
    q: Modulus,
}

#[derive(Serialize, Deserialize)]
struct RawFq {
    q: Modulus,
    value: BigUint,
}

impl TryFrom<RawFq> for Fq {
    type Error = ParseFieldElementError;

    fn try_from(raw: RawFq) -> Result<Self, Self::Error> {
        Self::try_new(&raw.q, raw.value)
    }
}

impl From<Fq> for RawFq {
    fn from(fq: Fq) -> Self {
        Self {
            q: fq.q,
            value: fq.value,
        }
    }
}

impl Fq {
    /// Reduce any integer into the field.
    pub fn new(q: &Modulus, n: impl Into<BigInt>) -> Self {
        Self {
            value: q.reduce(&n.into()),
            q: q.clone(),
        }
    }

    /// Construct a new element iff `value` is already canonical, an error
    /// otherwise.
    pub fn try_new(
        q: &Modulus,
        value: BigUint,
    ) -> Result<Self, ParseFieldElementError> {
        if &value < q.value() {
            Ok(Self {
                value,
                q: q.clone(),
            })
        } else {
            Err(ParseFieldElementError::NotCanonical {
                value: value.to_string(),
            })
        }
    }

    pub fn from_str_radix(
        q: &Modulus,
        s: &str,
        radix: u32,
    ) -> Result<Self, ParseFieldElementError> {
        let value = BigUint::from_str_radix(s, radix).map_err(|_| {
            ParseFieldElementError::InvalidDigits {
                input: s.to_owned(),
                radix,
            }
        })?;
        Self::try_new(q, value)
    }

    /// Decimal, or hexadecimal with a `0x` prefix.
    pub fn parse(q: &Modulus, s: &str) -> Result<Self, ParseFieldElementError> {
        let (digits, radix) = split_radix(s)?;
        Self::from_str_radix(q, digits, radix)
    }

    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// Square-and-multiply: `e = 0` and `e = 1` are base cases, otherwise
    /// recurse on `self²` with `e / 2` and fix up odd exponents.
    fn pow_recursive(&self, e: &BigUint) -> Self {
        if e.is_zero() {
            return Self::one(&self.q);
        }
        if e.is_one() {
            return self.clone();
        }
        let half = self.mul_same(self).pow_recursive(&(e >> 1u32));
        if e.bit(0) {
            half.mul_same(self)
        } else {
            half
        }
    }

    #[inline]
    fn mul_same(&self, other: &Self) -> Self {
        Self {
            value: (&self.value * &other.value) % self.q.value(),
            q: self.q.clone(),
        }
    }

    fn with_value(&self, value: BigUint) -> Self {
        Self {
            value,
            q: self.q.clone(),
        }
    }
}

impl Default for Fq {
    fn default() -> Self {
        Self::zero(&Modulus::default())
    }
}

impl Field for Fq {
    const EXTENSION: usize = 1;

    #[inline]
    fn modulus(&self) -> &Modulus {
        &self.q
    }

    fn zero(q: &Modulus) -> Self {
        Self {
            value: BigUint::zero(),
            q: q.clone(),
        }
    }

    fn one(q: &Modulus) -> Self {
        Self::new(q, 1)
    }

    fn from_integer(q: &Modulus, n: &BigInt) -> Self {
        Self::new(q, n.clone())
    }

    fn random<R: RngCore + ?Sized>(q: &Modulus, rng: &mut R) -> Self {
        let bits = q.bits() + RANDOM_EXTRA_BITS;
        let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
        rng.fill_bytes(&mut bytes);
        Self {
            value: BigUint::from_bytes_le(&bytes) % q.value(),
            q: q.clone(),
        }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn neg(&self) -> Self {
        if self.value.is_zero() {
            self.clone()
        } else {
            self.with_value(self.q.value() - &self.value)
        }
    }

    fn add(&self, other: &Self) -> Result<Self> {
        check_modulus(&self.q, &other.q)?;
        let sum = &self.value + &other.value;
        let value = if &sum >= self.q.value() {
            sum - self.q.value()
        } else {
            sum
        };
        Ok(self.with_value(value))
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        check_modulus(&self.q, &other.q)?;
        let value = if self.value >= other.value {
            &self.value - &other.value
        } else {
            &self.value + self.q.value() - &other.value
        };
        Ok(self.with_value(value))
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        check_modulus(&self.q, &other.q)?;
        Ok(self.mul_same(other))
    }

    /// Extended Euclidean algorithm on `(q, value)`.
    fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            tracing::debug!(modulus_bits = self.q.bits(), "refusing to invert zero");
            return Err(FieldError::ZeroInversion);
        }

        let mut a = BigInt::from(self.q.value().clone());
        let mut b = BigInt::from(self.value.clone());
        let mut x0 = BigInt::one();
        let mut x1 = BigInt::zero();
        while !a.is_zero() {
            let quotient = &b / &a;
            let remainder = &b % &a;
            b = std::mem::replace(&mut a, remainder);
            let next = &x0 - &quotient * &x1;
            x0 = std::mem::replace(&mut x1, next);
        }

        Ok(Self::new(&self.q, x0))
    }

    fn pow<E: Into<BigInt>>(&self, e: E) -> Result<Self> {
        let e = e.into();
        if e.is_negative() {
            return Err(Unsupported::NegativeExponent.into());
        }
        Ok(self.pow_recursive(e.magnitude()))
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }

    fn add_int(&self, n: impl Into<BigInt>) -> Self {
        let n = BigInt::from(self.value.clone()) + n.into();
        Self::new(&self.q, n)
    }

    fn mul_int(&self, n: impl Into<BigInt>) -> Self {
        let n = BigInt::from(self.value.clone()) * n.into();
        Self::new(&self.q, n)
    }

    fn lift<L: Field>(q: &Modulus, value: &L) -> Result<Self> {
        let fq = downcast::<L, Self>(value)
            .ok_or_else(|| FieldError::not_dominant(Self::EXTENSION, L::EXTENSION))?;
        check_modulus(q, &fq.q)?;
        Ok(fq.clone())
    }

    fn mul_lower<L: Field>(&self, other: &L) -> Result<Self> {
        let fq = downcast::<L, Self>(other)
            .ok_or_else(|| FieldError::not_dominant(Self::EXTENSION, L::EXTENSION))?;
        self.mul(fq)
    }

    fn eq_lower<L: Field>(&self, other: &L) -> bool {
        downcast::<L, Self>(other).is_some_and(|fq| self == fq)
    }
}

impl fmt::Display for Fq {
    /// Long values are shortened to their first and last hex digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:#x}", self.value);
        if hex.len() > 10 {
            write!(f, "Fq({}..{})", &hex[..7], &hex[hex.len() - 5..])
        } else {
            write!(f, "Fq({hex})")
        }
    }
}

impl fmt::Debug for Fq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fq({:#x})", self.value)
    }
}

impl fmt::LowerHex for Fq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

/// Parses into the default BLS12-381 field.
impl FromStr for Fq {
    type Err = ParseFieldElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&Modulus::default(), s)
    }
}

macro_rules! impl_from_int_for_fq {
    ($($t:ident),+ $(,)?) => {$(
        /// Lifts into the default BLS12-381 field.
        impl From<$t> for Fq {
            fn from(value: $t) -> Self {
                Self::new(&Modulus::default(), value)
            }
        }
    )+};
}

impl_from_int_for_fq!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl From<&Fq> for BigUint {
    fn from(fq: &Fq) -> Self {
        fq.value.clone()
    }
}

impl From<Fq> for BigUint {
    fn from(fq: Fq) -> Self {
        fq.value
    }
}

#[cfg(test)]
pub(crate) mod test_strategies {
    use num_bigint::BigUint;
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::Fq;
    use crate::modulus::Modulus;

    /// Any element of ℤ_q for a small `q`.
    pub(crate) fn arb_fq(q: u64) -> impl Strategy<Value = Fq> {
        let modulus = Modulus::from_u64(q).unwrap();
        (0..q).prop_map(move |v| Fq::new(&modulus, v))
    }

    /// Any element of the BLS12-381 base field.
    pub(crate) fn arb_bls_fq() -> impl Strategy<Value = Fq> {
        vec(any::<u8>(), 48).prop_map(|bytes| {
            Fq::new(&Modulus::default(), BigUint::from_bytes_be(&bytes))
        })
    }
}

#[cfg(test)]
mod prime_field_element_test {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_strategy::proptest;

    use super::test_strategies::*;
    use super::*;

    fn q13() -> Modulus {
        Modulus::from_u64(13).unwrap()
    }

    fn fq13(v: i64) -> Fq {
        Fq::new(&q13(), v)
    }

    #[test]
    fn construction_reduces_into_canonical_range() {
        assert_eq!(BigUint::from(2u8), *fq13(15).value());
        assert_eq!(BigUint::from(12u8), *fq13(-1).value());
        assert_eq!(BigUint::from(0u8), *fq13(-26).value());
    }

    #[test]
    fn addition_wraps_around() {
        assert_eq!(fq13(2), fq13(5).add(&fq13(10)).unwrap());
    }

    #[test]
    fn inverse_of_five_is_eight() {
        assert_eq!(fq13(8), fq13(5).invert().unwrap());
    }

    #[test]
    fn multiplicative_inverse_of_zero() {
        assert_eq!(Err(FieldError::ZeroInversion), fq13(0).invert());
    }

    #[test]
    fn different_moduli_do_not_mix() {
        let seventeen = Modulus::from_u64(17).unwrap();
        let err = fq13(3).add(&Fq::new(&seventeen, 3)).unwrap_err();
        assert!(matches!(err, FieldError::IncompatibleModulus { .. }));
        assert!(fq13(3).mul(&Fq::new(&seventeen, 3)).is_err());
        assert_ne!(fq13(3), Fq::new(&seventeen, 3));
    }

    #[test]
    fn integer_operands_are_lifted() {
        assert_eq!(fq13(2), fq13(5).add_int(10));
        assert_eq!(fq13(11), fq13(5).sub_int(7));
        assert_eq!(fq13(1), fq13(5).mul_int(8));
        assert_eq!(fq13(3), fq13(6).div_int(2).unwrap());
        assert!(fq13(5).eq_int(18));
        assert!(!fq13(5).eq_int(6));
    }

    #[test]
    fn negative_exponent_is_unsupported() {
        assert_eq!(
            Err(FieldError::UnsupportedOperation(Unsupported::NegativeExponent)),
            fq13(5).pow(-1)
        );
    }

    #[test]
    fn pow_base_cases() {
        assert_eq!(Fq::one(&q13()), fq13(0).pow(0).unwrap());
        assert_eq!(Fq::one(&q13()), fq13(7).pow(0).unwrap());
        assert_eq!(fq13(7), fq13(7).pow(1).unwrap());
    }

    #[test]
    fn pow_powers_of_two() {
        let two = fq13(2);
        // 2^12 = 1 mod 13, so the powers cycle
        for i in 0..40u32 {
            let expected = Fq::new(&q13(), BigInt::from(2).pow(i));
            assert_eq!(expected, two.pow(i).unwrap());
        }
    }

    #[test]
    fn fermat_little_theorem_for_thirteen() {
        for v in 1..13 {
            assert_eq!(Fq::one(&q13()), fq13(v).pow(12).unwrap());
        }
    }

    #[test]
    fn display_shortens_long_values() {
        assert_eq!("Fq(0x7)", fq13(7).to_string());
        let minus_one = Fq::one(&Modulus::default()).neg();
        assert_eq!("Fq(0x1a011..faaaa)", minus_one.to_string());
        assert_eq!("Fq(0x7)", format!("{:?}", fq13(7)));
    }

    #[test]
    fn parsing() {
        let q = q13();
        assert_eq!(fq13(12), Fq::parse(&q, "12").unwrap());
        assert_eq!(fq13(12), Fq::parse(&q, "0xc").unwrap());
        assert_eq!(
            Err(ParseFieldElementError::NotCanonical {
                value: "13".to_owned()
            }),
            Fq::parse(&q, "13")
        );
        assert!(Fq::parse(&q, "-1").is_err());
        assert_eq!(Fq::from(7u8), "7".parse::<Fq>().unwrap());
    }

    #[test]
    fn big_endian_bytes_are_minimal() {
        assert_eq!(vec![0u8], fq13(0).to_bytes_be());
        assert_eq!(vec![12u8], fq13(-1).to_bytes_be());

        let mut expected = crate::constants::BLS12_381_Q_BYTES;
        expected[47] -= 1;
        let minus_one = Fq::one(&Modulus::default()).neg();
        assert_eq!(expected.to_vec(), minus_one.to_bytes_be());
        assert_eq!(minus_one, Fq::new(&Modulus::default(), BigUint::from_bytes_be(&expected)));
    }

    #[test]
    fn default_lives_in_bls12_381() {
        let fq = Fq::default();
        assert!(fq.is_zero());
        assert_eq!(&Modulus::bls12_381(), fq.modulus());
    }

    #[test]
    fn lift_from_the_same_field_is_identity() {
        let a = fq13(9);
        assert_eq!(a, Fq::lift(&q13(), &a).unwrap());
        assert!(Fq::lift(&Modulus::from_u64(17).unwrap(), &a).is_err());
    }

    #[test]
    fn random_elements_are_canonical() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let q = Modulus::default();
        for _ in 0..32 {
            let fq = Fq::random(&q, &mut rng);
            assert!(fq.value() < q.value());
        }
    }

    #[test]
    fn equal_elements_hash_equally() {
        let mut hasher_a = DefaultHasher::new();
        let mut hasher_b = DefaultHasher::new();
        fq13(3).hash(&mut hasher_a);
        fq13(16).hash(&mut hasher_b);
        assert_eq!(hasher_a.finish(), hasher_b.finish());
    }

    #[test]
    fn deserializing_non_canonical_value_fails() {
        let json = r#"{"q":[13],"value":[13]}"#;
        assert!(serde_json::from_str::<Fq>(json).is_err());
        let json = r#"{"q":[13],"value":[12]}"#;
        assert_eq!(fq13(12), serde_json::from_str::<Fq>(json).unwrap());
    }

    #[proptest]
    fn serialization_and_deserialization_to_and_from_json_is_identity(
        #[strategy(arb_bls_fq())] fq: Fq,
    ) {
        let serialized = serde_json::to_string(&fq)?;
        let deserialized: Fq = serde_json::from_str(&serialized)?;
        prop_assert_eq!(fq, deserialized);
    }

    #[proptest]
    fn additive_inverse_gives_zero(#[strategy(arb_fq(13))] a: Fq) {
        prop_assert!(a.add(&a.neg())?.is_zero());
    }

    #[proptest]
    fn one_is_neutral_element_for_multiplication(#[strategy(arb_bls_fq())] a: Fq) {
        prop_assert_eq!(a.mul(&Fq::one(a.modulus()))?, a);
    }

    #[proptest]
    fn addition_is_associative(
        #[strategy(arb_bls_fq())] a: Fq,
        #[strategy(arb_bls_fq())] b: Fq,
        #[strategy(arb_bls_fq())] c: Fq,
    ) {
        prop_assert_eq!(a.add(&b)?.add(&c)?, a.add(&b.add(&c)?)?);
    }

    #[proptest]
    fn multiplication_distributes_over_addition(
        #[strategy(arb_bls_fq())] a: Fq,
        #[strategy(arb_bls_fq())] b: Fq,
        #[strategy(arb_bls_fq())] c: Fq,
    ) {
        prop_assert_eq!(a.mul(&b.add(&c)?)?, a.mul(&b)?.add(&a.mul(&c)?)?);
    }

    #[proptest]
    fn subtraction_undoes_addition(
        #[strategy(arb_bls_fq())] a: Fq,
        #[strategy(arb_bls_fq())] b: Fq,
    ) {
        prop_assert_eq!(a.add(&b)?.sub(&b)?, a);
    }

    #[proptest]
    fn multiplication_with_inverse_gives_identity(
        #[strategy(arb_bls_fq())]
        #[filter(!#a.is_zero())]
        a: Fq,
    ) {
        prop_assert_eq!(a.mul(&a.invert()?)?, Fq::one(a.modulus()));
        prop_assert_eq!(a.invert()?.invert()?, a);
    }

    #[proptest]
    fn division_by_self_gives_identity(
        #[strategy(arb_fq(13))]
        #[filter(!#a.is_zero())]
        a: Fq,
    ) {
        prop_assert_eq!(a.div(&a)?, Fq::one(a.modulus()));
    }

    #[proptest]
    fn fourth_power_is_square_of_square(#[strategy(arb_bls_fq())] a: Fq) {
        prop_assert_eq!(a.pow(4)?, a.pow(2)?.pow(2)?);
    }

    #[proptest]
    fn pow_matches_repeated_multiplication(
        #[strategy(arb_fq(13))] a: Fq,
        #[strategy(0u32..40)] e: u32,
    ) {
        let mut expected = Fq::one(a.modulus());
        for _ in 0..e {
            expected = expected.mul(&a)?;
        }
        prop_assert_eq!(expected, a.pow(e)?);
    }

    #[proptest]
    fn order_follows_canonical_values(
        #[strategy(arb_fq(13))] a: Fq,
        #[strategy(arb_fq(13))] b: Fq,
    ) {
        prop_assert_eq!(a.value() < b.value(), a.less_than(&b));
    }
}

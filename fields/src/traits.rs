use std::any::Any;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use num_bigint::BigInt;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FieldError;
use crate::error::Result;
use crate::field_element::Fq;
use crate::modulus::Modulus;

pub trait FieldCore:
    Clone
    + Debug
    + Display
    + Default
    + Eq
    + Hash
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

impl<T> FieldCore for T where
    T: Clone
        + Debug
        + Display
        + Default
        + Eq
        + Hash
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

/// The arithmetic contract shared by the prime field and every extension
/// built over it.
///
/// Binary operations come in two flavours. The plain ones (`add`, `mul`,
/// ...) take an operand of the same type. The `*_lower` ones take an
/// operand of any field type whose [extension degree][Field::EXTENSION] is
/// at most `Self::EXTENSION` and lift it first; an operand of higher degree
/// is refused with [`Unsupported::NotDominant`](crate::error::Unsupported),
/// in which case the caller has to run the operation from the other side
/// (see [`dispatch`](crate::dispatch)).
pub trait Field: FieldCore {
    /// Degree over the prime field: 1 for [`Fq`], 2 for `Fq2`, and so on.
    const EXTENSION: usize;

    fn modulus(&self) -> &Modulus;

    fn zero(q: &Modulus) -> Self;

    fn one(q: &Modulus) -> Self;

    /// Lift a plain integer, reduced modulo `q`, into coefficient 0.
    fn from_integer(q: &Modulus, n: &BigInt) -> Self;

    /// Sample uniformly at random.
    fn random<R: RngCore + ?Sized>(q: &Modulus, rng: &mut R) -> Self;

    fn is_zero(&self) -> bool;

    fn is_nonzero(&self) -> bool {
        !self.is_zero()
    }

    #[must_use]
    fn neg(&self) -> Self;

    fn add(&self, other: &Self) -> Result<Self>;

    fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg())
    }

    fn mul(&self, other: &Self) -> Result<Self>;

    fn square(&self) -> Result<Self> {
        self.mul(self)
    }

    fn invert(&self) -> Result<Self>;

    fn div(&self, other: &Self) -> Result<Self> {
        self.mul(&other.invert()?)
    }

    /// `self^e` for `e >= 0`; a negative exponent is unsupported.
    fn pow<E: Into<BigInt>>(&self, e: E) -> Result<Self>;

    /// Total order used to pick canonical signs. Extensions compare their
    /// most significant coefficient first.
    fn canonical_cmp(&self, other: &Self) -> Ordering;

    fn less_than(&self, other: &Self) -> bool {
        self.canonical_cmp(other) == Ordering::Less
    }

    #[must_use]
    fn add_int(&self, n: impl Into<BigInt>) -> Self;

    #[must_use]
    fn sub_int(&self, n: impl Into<BigInt>) -> Self {
        let n: BigInt = n.into();
        self.add_int(-n)
    }

    #[must_use]
    fn mul_int(&self, n: impl Into<BigInt>) -> Self;

    fn div_int(&self, n: impl Into<BigInt>) -> Result<Self> {
        let inverse = Fq::new(self.modulus(), n).invert()?;
        self.mul_lower(&inverse)
    }

    fn eq_int(&self, n: impl Into<BigInt>) -> bool {
        self.eq_lower(&Fq::new(self.modulus(), n))
    }

    /// Promote `value` into this field: identity for the same type,
    /// coefficient 0 (recursively) for a lower degree.
    fn lift<L: Field>(q: &Modulus, value: &L) -> Result<Self>;

    fn add_lower<L: Field>(&self, other: &L) -> Result<Self> {
        self.add(&Self::lift(self.modulus(), other)?)
    }

    fn sub_lower<L: Field>(&self, other: &L) -> Result<Self> {
        self.add_lower(&other.neg())
    }

    /// `other - self`, the reflected subtraction.
    fn rsub_lower<L: Field>(&self, other: &L) -> Result<Self> {
        self.neg().add_lower(other)
    }

    /// Same degree: full field multiplication. Lower degree: every
    /// coefficient is scaled by `other`.
    fn mul_lower<L: Field>(&self, other: &L) -> Result<Self>;

    fn div_lower<L: Field>(&self, other: &L) -> Result<Self> {
        self.mul_lower(&other.invert()?)
    }

    /// Equality against the same or a lower degree. Values that cannot be
    /// related (different moduli, unrelated types) compare unequal.
    fn eq_lower<L: Field>(&self, other: &L) -> bool;
}

/// Runtime type check standing in for the degree tag comparison when two
/// generic operands might be the very same field type.
pub(crate) fn downcast<T: 'static, U: 'static>(value: &T) -> Option<&U> {
    (value as &dyn Any).downcast_ref::<U>()
}

pub(crate) fn check_modulus(left: &Modulus, right: &Modulus) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(FieldError::incompatible(left, right))
    }
}

/// Invert all elements with a single field inversion.
///
/// Fails with [`FieldError::ZeroInversion`] when any input is zero.
/// Adapted from
/// <https://paulmillr.com/posts/noble-secp256k1-fast-ecc/#batch-inversion>.
pub fn batch_inversion<F: Field>(input: &[F]) -> Result<Vec<F>> {
    let Some(first) = input.first() else {
        return Ok(Vec::new());
    };

    let mut scratch = Vec::with_capacity(input.len());
    let mut acc = F::one(first.modulus());
    for value in input {
        if value.is_zero() {
            tracing::debug!("batch inversion hit a zero element");
            return Err(FieldError::ZeroInversion);
        }
        scratch.push(acc.clone());
        acc = acc.mul(value)?;
    }

    acc = acc.invert()?;

    let mut output = scratch;
    for (slot, value) in output.iter_mut().zip(input).rev() {
        let prefix = std::mem::take(slot);
        *slot = acc.mul(&prefix)?;
        acc = acc.mul(value)?;
    }

    Ok(output)
}

//! Generic field extensions `B[x] / (x^n - β)`.
//!
//! An element of a degree-`n` extension over a basefield `B` is a fixed
//! length list of `n` coefficients in `B`, together with the reduction
//! constant `β` (the element's `root`). The basefield may itself be an
//! extension, so towers such as `Fq → Fq2 → Fq6 → Fq12` are the same
//! generic type applied repeatedly.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::Signed;
use rand::RngCore;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::FieldError;
use crate::error::Result;
use crate::error::Unsupported;
use crate::modulus::Modulus;
use crate::traits::check_modulus;
use crate::traits::downcast;
use crate::traits::Field;

/// Static description of one level of a tower.
pub trait Tower: Sized + Send + Sync + 'static {
    /// Field the coefficients live in.
    type Base: Field;

    /// Number of coefficients per element.
    const EMBEDDING: usize;

    /// The root used by the factories ([`Field::zero`], [`Field::one`],
    /// [`FieldExt::from_coefficients`], ...).
    fn root(q: &Modulus) -> Self::Base;

    /// Inversion has no generic algorithm over an arbitrary tower; each
    /// level that needs it supplies a closed form.
    fn invert(_x: &FieldExt<Self>) -> Result<FieldExt<Self>> {
        Err(Unsupported::NoInversionFormula(std::any::type_name::<Self>()).into())
    }
}

/// Element of the extension described by `T`.
pub struct FieldExt<T: Tower> {
    coeffs: Vec<T::Base>,
    root: T::Base,
    q: Modulus,
    _tower: PhantomData<fn() -> T>,
}

impl<T: Tower> FieldExt<T> {
    /// Build an element from exactly [`T::EMBEDDING`](Tower::EMBEDDING)
    /// coefficients and an explicit reduction constant.
    pub fn new(q: &Modulus, coeffs: Vec<T::Base>, root: T::Base) -> Result<Self> {
        if coeffs.len() != T::EMBEDDING {
            tracing::debug!(
                expected = T::EMBEDDING,
                found = coeffs.len(),
                "wrong number of extension coefficients"
            );
            return Err(FieldError::InvalidArity {
                expected: T::EMBEDDING,
                found: coeffs.len(),
            });
        }
        for c in coeffs.iter().chain(std::iter::once(&root)) {
            check_modulus(q, c.modulus())?;
        }
        Ok(Self::assemble(q, coeffs, root))
    }

    /// Like [`new`](Self::new) with the tower's default root.
    pub fn from_coefficients(q: &Modulus, coeffs: Vec<T::Base>) -> Result<Self> {
        Self::new(q, coeffs, T::root(q))
    }

    /// Each integer is lifted into the basefield on its own.
    pub fn from_integers<I>(q: &Modulus, ints: impl IntoIterator<Item = I>) -> Result<Self>
    where
        I: Into<BigInt>,
    {
        let coeffs = ints
            .into_iter()
            .map(|n| T::Base::from_integer(q, &n.into()))
            .collect();
        Self::from_coefficients(q, coeffs)
    }

    /// Accept coefficients of any field type, as long as it is exactly the
    /// basefield of this level.
    pub fn from_any<L: Field>(q: &Modulus, coeffs: &[L]) -> Result<Self> {
        let coeffs = coeffs
            .iter()
            .map(|c| {
                downcast::<L, T::Base>(c).cloned().ok_or_else(|| {
                    tracing::debug!(
                        expected = T::Base::EXTENSION,
                        found = L::EXTENSION,
                        "coefficient has the wrong degree"
                    );
                    FieldError::DegreeMismatch {
                        expected: T::Base::EXTENSION,
                        found: L::EXTENSION,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_coefficients(q, coeffs)
    }

    /// `base` at coefficient 0, the basefield's zero everywhere else.
    pub fn from_base(q: &Modulus, base: T::Base) -> Result<Self> {
        check_modulus(q, base.modulus())?;
        Ok(Self::embed(q, base))
    }

    #[inline]
    pub fn coefficients(&self) -> &[T::Base] {
        &self.coeffs
    }

    #[inline]
    pub fn root(&self) -> &T::Base {
        &self.root
    }

    pub(crate) fn assemble(q: &Modulus, coeffs: Vec<T::Base>, root: T::Base) -> Self {
        debug_assert_eq!(T::EMBEDDING, coeffs.len());
        Self {
            coeffs,
            root,
            q: q.clone(),
            _tower: PhantomData,
        }
    }

    fn embed(q: &Modulus, base: T::Base) -> Self {
        let coeffs = std::iter::once(base)
            .chain(std::iter::repeat_with(|| T::Base::zero(q)))
            .take(T::EMBEDDING)
            .collect();
        Self::assemble(q, coeffs, T::root(q))
    }

    /// Keep this element's root and modulus, replace the coefficients.
    fn with_coeffs(&self, coeffs: Vec<T::Base>) -> Self {
        Self::assemble(&self.q, coeffs, self.root.clone())
    }

    /// Schoolbook product; terms landing at index `>= n` wrap around and
    /// pick up a factor of `root`.
    fn convolve(&self, other: &Self) -> Result<Self> {
        let n = T::EMBEDDING;
        let mut buf = vec![T::Base::zero(&self.q); n];
        for (i, x) in self.coeffs.iter().enumerate() {
            if x.is_zero() {
                continue;
            }
            for (j, y) in other.coeffs.iter().enumerate() {
                if y.is_zero() {
                    continue;
                }
                let mut term = x.mul(y)?;
                if i + j >= n {
                    term = term.mul(&self.root)?;
                }
                let k = (i + j) % n;
                buf[k] = buf[k].add(&term)?;
            }
        }
        Ok(self.with_coeffs(buf))
    }
}

impl<T: Tower> Field for FieldExt<T> {
    const EXTENSION: usize = T::Base::EXTENSION * T::EMBEDDING;

    #[inline]
    fn modulus(&self) -> &Modulus {
        &self.q
    }

    fn zero(q: &Modulus) -> Self {
        Self::embed(q, T::Base::zero(q))
    }

    fn one(q: &Modulus) -> Self {
        Self::embed(q, T::Base::one(q))
    }

    fn from_integer(q: &Modulus, n: &BigInt) -> Self {
        Self::embed(q, T::Base::from_integer(q, n))
    }

    fn random<R: RngCore + ?Sized>(q: &Modulus, rng: &mut R) -> Self {
        let coeffs = (0..T::EMBEDDING).map(|_| T::Base::random(q, rng)).collect();
        Self::assemble(q, coeffs, T::root(q))
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Field::is_zero)
    }

    fn neg(&self) -> Self {
        self.with_coeffs(self.coeffs.iter().map(Field::neg).collect())
    }

    fn add(&self, other: &Self) -> Result<Self> {
        check_modulus(&self.q, &other.q)?;
        let coeffs = self
            .coeffs
            .iter()
            .zip_eq(&other.coeffs)
            .map(|(a, b)| a.add(b))
            .collect::<Result<_>>()?;
        Ok(self.with_coeffs(coeffs))
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        check_modulus(&self.q, &other.q)?;
        self.convolve(other)
    }

    fn invert(&self) -> Result<Self> {
        T::invert(self)
    }

    /// Least significant bit first; the result carries this element's root.
    fn pow<E: Into<BigInt>>(&self, e: E) -> Result<Self> {
        let e = e.into();
        if e.is_negative() {
            return Err(Unsupported::NegativeExponent.into());
        }
        let e = e.magnitude();

        let mut ans = Self::assemble(
            &self.q,
            Self::one(&self.q).coeffs,
            self.root.clone(),
        );
        let mut base = self.clone();
        for bit in 0..e.bits() {
            if e.bit(bit) {
                ans = ans.convolve(&base)?;
            }
            base = base.convolve(&base)?;
        }
        Ok(ans)
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.coeffs
            .iter()
            .rev()
            .zip(other.coeffs.iter().rev())
            .map(|(a, b)| a.canonical_cmp(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    fn add_int(&self, n: impl Into<BigInt>) -> Self {
        let n = n.into();
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(i, c)| if i == 0 { c.add_int(n.clone()) } else { c.clone() })
            .collect();
        self.with_coeffs(coeffs)
    }

    fn mul_int(&self, n: impl Into<BigInt>) -> Self {
        let n = n.into();
        self.with_coeffs(self.coeffs.iter().map(|c| c.mul_int(n.clone())).collect())
    }

    fn lift<L: Field>(q: &Modulus, value: &L) -> Result<Self> {
        if let Some(same) = downcast::<L, Self>(value) {
            check_modulus(q, &same.q)?;
            return Ok(same.clone());
        }
        if L::EXTENSION >= Self::EXTENSION {
            return Err(FieldError::not_dominant(Self::EXTENSION, L::EXTENSION));
        }
        let base = T::Base::lift(q, value)
            .map_err(|err| err.at_degrees(Self::EXTENSION, L::EXTENSION))?;
        Ok(Self::embed(q, base))
    }

    fn mul_lower<L: Field>(&self, other: &L) -> Result<Self> {
        if let Some(same) = downcast::<L, Self>(other) {
            return self.mul(same);
        }
        if L::EXTENSION >= Self::EXTENSION {
            return Err(FieldError::not_dominant(Self::EXTENSION, L::EXTENSION));
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| c.mul_lower(other))
            .collect::<Result<_>>()
            .map_err(|err| err.at_degrees(Self::EXTENSION, L::EXTENSION))?;
        Ok(self.with_coeffs(coeffs))
    }

    fn eq_lower<L: Field>(&self, other: &L) -> bool {
        if let Some(same) = downcast::<L, Self>(other) {
            return self == same;
        }
        if L::EXTENSION >= Self::EXTENSION {
            return false;
        }
        match self.coeffs.split_first() {
            Some((first, rest)) => rest.iter().all(Field::is_zero) && first.eq_lower(other),
            None => false,
        }
    }
}

impl<T: Tower> Default for FieldExt<T> {
    fn default() -> Self {
        Self::zero(&Modulus::default())
    }
}

impl<T: Tower> Clone for FieldExt<T> {
    fn clone(&self) -> Self {
        Self::assemble(&self.q, self.coeffs.clone(), self.root.clone())
    }
}

/// Structural equality on the coefficients and the modulus; the root is
/// configuration, not value.
impl<T: Tower> PartialEq for FieldExt<T> {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q && self.coeffs == other.coeffs
    }
}

impl<T: Tower> Eq for FieldExt<T> {}

impl<T: Tower> Hash for FieldExt<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.q.hash(state);
        self.coeffs.hash(state);
    }
}

impl<T: Tower> fmt::Display for FieldExt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fq{}({})", Self::EXTENSION, self.coeffs.iter().join(", "))
    }
}

impl<T: Tower> fmt::Debug for FieldExt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fq{}(", Self::EXTENSION)?;
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Debug::fmt(c, f)?;
        }
        f.write_str(")")
    }
}

#[derive(Serialize)]
struct RawFieldExtRef<'a, B> {
    q: &'a Modulus,
    root: &'a B,
    coeffs: &'a [B],
}

#[derive(Deserialize)]
struct RawFieldExt<B> {
    q: Modulus,
    root: B,
    coeffs: Vec<B>,
}

impl<T: Tower> Serialize for FieldExt<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawFieldExtRef {
            q: &self.q,
            root: &self.root,
            coeffs: &self.coeffs,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Tower> Deserialize<'de> for FieldExt<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawFieldExt::<T::Base>::deserialize(deserializer)?;
        Self::new(&raw.q, raw.coeffs, raw.root).map_err(serde::de::Error::custom)
    }
}

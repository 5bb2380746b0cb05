//! Quadratic extension `Fq2 = Fq[i] / (i² + 1)`.

use num_bigint::BigInt;

use crate::error::Result;
use crate::extension::FieldExt;
use crate::extension::Tower;
use crate::field_element::Fq;
use crate::modulus::Modulus;
use crate::traits::Field;

/// Tower level `Fq(i) / (i² - β)` with `β = -1`.
#[derive(Debug)]
pub enum Quadratic {}

pub type Fq2 = FieldExt<Quadratic>;

impl Tower for Quadratic {
    type Base = Fq;

    const EMBEDDING: usize = 2;

    fn root(q: &Modulus) -> Fq {
        Fq::one(q).neg()
    }

    /// `(a + bi)⁻¹ = (a - bi) / (a² + b²)`
    fn invert(x: &Fq2) -> Result<Fq2> {
        let factor = x.norm()?.invert()?;
        let c0 = x.c0().mul(&factor)?;
        let c1 = x.c1().neg().mul(&factor)?;
        Ok(Fq2::assemble(x.modulus(), vec![c0, c1], Self::root(x.modulus())))
    }
}

impl FieldExt<Quadratic> {
    /// `a + b·i`
    pub fn from_pair(q: &Modulus, a: impl Into<BigInt>, b: impl Into<BigInt>) -> Self {
        Self::assemble(
            q,
            vec![Fq::new(q, a), Fq::new(q, b)],
            Quadratic::root(q),
        )
    }

    #[inline]
    pub fn c0(&self) -> &Fq {
        &self.coefficients()[0]
    }

    #[inline]
    pub fn c1(&self) -> &Fq {
        &self.coefficients()[1]
    }

    /// `a - b·i`
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::assemble(
            self.modulus(),
            vec![self.c0().clone(), self.c1().neg()],
            self.root().clone(),
        )
    }

    /// `a² + b²`, the product of the element with its conjugate.
    pub fn norm(&self) -> Result<Fq> {
        self.c0().square()?.add(&self.c1().square()?)
    }

    /// `(a + b·i)·i = -b + a·i`
    #[must_use]
    pub fn mul_by_i(&self) -> Self {
        Self::assemble(
            self.modulus(),
            vec![self.c1().neg(), self.c0().clone()],
            self.root().clone(),
        )
    }
}

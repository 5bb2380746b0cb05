//! Binary operations between two elements of possibly different degree.
//!
//! The operand with the larger [extension degree][Field::EXTENSION] decides
//! the type of the result. The left operand is tried first whenever its
//! degree is at least the right one's; if it turns out not to dominate, the
//! operation is retried from the right. Both attempts failing means the two
//! types are unrelated, and the resulting
//! [`NotDominant`](crate::error::Unsupported::NotDominant)
//! names the degrees of the left and right operand in that order.

use crate::error::Result;
use crate::traits::Field;

/// Result of a mixed-degree operation: whichever operand type dominated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dominant<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Dominant<L, R> {
    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(l) => Some(l),
            Self::Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(r) => Some(r),
        }
    }
}

impl<F> Dominant<F, F> {
    /// Both sides have the same type, so the side does not matter.
    pub fn into_inner(self) -> F {
        match self {
            Self::Left(f) | Self::Right(f) => f,
        }
    }
}

fn resolve<L, R>(
    l: &L,
    r: &R,
    from_left: impl FnOnce(&L, &R) -> Result<L>,
    from_right: impl FnOnce(&L, &R) -> Result<R>,
) -> Result<Dominant<L, R>>
where
    L: Field,
    R: Field,
{
    if L::EXTENSION >= R::EXTENSION {
        match from_left(l, r) {
            Ok(value) => return Ok(Dominant::Left(value)),
            Err(err) if err.is_not_dominant() => {
                tracing::trace!(
                    left = L::EXTENSION,
                    right = R::EXTENSION,
                    "left operand does not dominate, retrying from the right"
                );
            }
            Err(err) => return Err(err),
        }
    }
    from_right(l, r)
        .map(Dominant::Right)
        .map_err(|err| err.at_degrees(L::EXTENSION, R::EXTENSION))
}

/// `l + r`
pub fn add<L: Field, R: Field>(l: &L, r: &R) -> Result<Dominant<L, R>> {
    resolve(l, r, |l, r| l.add_lower(r), |l, r| r.add_lower(l))
}

/// `l - r`; from the right this is the reflected subtraction.
pub fn sub<L: Field, R: Field>(l: &L, r: &R) -> Result<Dominant<L, R>> {
    resolve(l, r, |l, r| l.sub_lower(r), |l, r| r.rsub_lower(l))
}

/// `l * r`
pub fn mul<L: Field, R: Field>(l: &L, r: &R) -> Result<Dominant<L, R>> {
    resolve(l, r, |l, r| l.mul_lower(r), |l, r| r.mul_lower(l))
}

/// `l / r`; from the right this is `r⁻¹ · l`.
pub fn div<L: Field, R: Field>(l: &L, r: &R) -> Result<Dominant<L, R>> {
    resolve(l, r, |l, r| l.div_lower(r), |l, r| r.invert()?.mul_lower(l))
}

/// Mixed-degree equality; unrelated values compare unequal.
pub fn equals<L: Field, R: Field>(l: &L, r: &R) -> bool {
    if L::EXTENSION >= R::EXTENSION {
        l.eq_lower(r)
    } else {
        r.eq_lower(l)
    }
}

//! Prime fields and extension towers over them.
//!
//! [`Fq`] is an element of ℤ_q for a shared [`Modulus`] (BLS12-381 by
//! default). [`FieldExt`] builds `B[x] / (x^n - β)` over any [`Field`] `B`,
//! and [`Fq2`] is its quadratic instance with `β = -1`. Operands of
//! different degree are combined through [`dispatch`].

pub mod constants;
pub mod dispatch;
pub mod error;
pub mod extension;
pub mod field_element;
pub mod fq2;
pub mod macros;
pub mod modulus;
pub mod prelude;
pub mod traits;

pub use crate::{
    dispatch::Dominant,
    error::{FieldError, ParseFieldElementError, Result, Unsupported},
    extension::{FieldExt, Tower},
    field_element::Fq,
    fq2::{Fq2, Quadratic},
    modulus::Modulus,
    traits::{batch_inversion, Field},
};

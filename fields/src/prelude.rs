pub use crate::dispatch;
pub use crate::dispatch::Dominant;
pub use crate::error::FieldError;
pub use crate::error::ParseFieldElementError;
pub use crate::error::Unsupported;
pub use crate::extension::FieldExt;
pub use crate::extension::Tower;
pub use crate::field_element::Fq;
pub use crate::fq2::Fq2;
pub use crate::fq2::Quadratic;
pub use crate::modulus::Modulus;
pub use crate::traits::batch_inversion;
pub use crate::traits::Field;
pub use crate::{fq, fq2, fq_vec};

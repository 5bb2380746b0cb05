//! Shorthand constructors for field elements.

/// Simplifies constructing [`Fq`](crate::field_element::Fq)s.
///
/// Without a modulus, the value lands in the default BLS12-381 field. See
/// [`Fq::from`](crate::field_element::Fq::from) for supported types.
///
/// ```
/// use fields::prelude::*;
///
/// let a = fq!(42);
/// assert_eq!(a, Fq::from(42));
///
/// let q = Modulus::from_u64(13).unwrap();
/// assert_eq!(fq!(q; 15), fq!(q; 2));
/// ```
#[macro_export]
macro_rules! fq {
    ($q:expr; $value:expr) => {
        $crate::field_element::Fq::new(&$q, $value)
    };
    ($value:expr) => {
        $crate::field_element::Fq::from($value)
    };
}

/// Construct an [`Fq2`](crate::fq2::Fq2) from its two coefficients.
///
/// ```
/// use fields::prelude::*;
///
/// let q = Modulus::from_u64(13).unwrap();
/// let x = fq2!(q; 3, 4);
/// assert_eq!(x.c1(), &fq!(q; 4));
/// assert!(fq2!(5, 0).eq_int(5));
/// ```
#[macro_export]
macro_rules! fq2 {
    ($q:expr; $a:expr, $b:expr $(,)?) => {
        $crate::fq2::Fq2::from_pair(&$q, $a, $b)
    };
    ($a:expr, $b:expr $(,)?) => {
        $crate::fq2::Fq2::from_pair(&$crate::modulus::Modulus::default(), $a, $b)
    };
}

/// Create a [`Vec`] of [`Fq`](crate::field_element::Fq)s in the default
/// field.
///
/// ```
/// use fields::prelude::*;
///
/// let repeated = fq_vec![7; 3];
/// assert_eq!(repeated, vec![Fq::from(7); 3]);
/// assert_eq!(fq_vec![1, 2], vec![fq!(1), fq!(2)]);
/// ```
#[macro_export]
macro_rules! fq_vec {
    ($b:expr; $n:expr) => {
        vec![$crate::field_element::Fq::from($b); $n]
    };
    ($($b:expr),* $(,)?) => {
        vec![$($crate::field_element::Fq::from($b)),*]
    };
}

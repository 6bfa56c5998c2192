//! Pluggable element equivalence for the ranged algebra.

/// Equivalence relation over `E` used in place of `PartialEq`.
///
/// Any `Fn(&E, &E) -> bool` is an equalator; `NaturalEq` defers to
/// `PartialEq` and `ByKey` compares a projection of each element.
pub trait Equalator<E: ?Sized> {
    fn equal(&self, a: &E, b: &E) -> bool;
}

impl<E: ?Sized, F> Equalator<E> for F
where
    F: Fn(&E, &E) -> bool,
{
    #[inline]
    fn equal(&self, a: &E, b: &E) -> bool {
        self(a, b)
    }
}

/// `PartialEq` equality. On `Option<T>`, `None` equals only `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalEq;

impl<E: ?Sized + PartialEq> Equalator<E> for NaturalEq {
    #[inline]
    fn equal(&self, a: &E, b: &E) -> bool {
        a == b
    }
}

/// Elements are equivalent when their projections are equal.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<E: ?Sized, T: PartialEq, F> Equalator<E> for ByKey<F>
where
    F: Fn(&E) -> T,
{
    #[inline]
    fn equal(&self, a: &E, b: &E) -> bool {
        (self.0)(a) == (self.0)(b)
    }
}

/// Elements that may represent an absent value.
///
/// Duplicate removal can exempt null elements; `Option::None` is the null
/// of every `Option<T>`, plain values are never null.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

macro_rules! never_null {
    ($($t:ty),* $(,)?) => {
        $(
            impl Nullable for $t {
                #[inline]
                fn is_null(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_null!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

use ndarray::NdFloat;
use num_traits::NumCast;

#[cfg(feature = "blas")]
pub trait Float: NdFloat + ndarray_linalg::Lapack {
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

#[cfg(not(feature = "blas"))]
pub trait Float: NdFloat {
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f64 {}
impl Float for f32 {}

#![allow(non_snake_case)]

use super::{Adjoint, FloatT, Matrix, MultiplyGEMV, VectorMath};

impl<T> MultiplyGEMV for Matrix<T>
where
    T: FloatT,
{
    type T = T;
    // implements y = a*A*x + b*y
    fn gemv(&self, x: &[T], y: &mut [T], a: T, b: T) {
        assert!(self.n == x.len() && self.m == y.len());

        y.scale(b);
        for (col, &xc) in x.iter().enumerate() {
            y.axpby(a * xc, self.col_slice(col), T::one());
        }
    }
}

impl<'a, T> MultiplyGEMV for Adjoint<'a, Matrix<T>>
where
    T: FloatT,
{
    type T = T;
    // implements y = a*A'*x + b*y
    fn gemv(&self, x: &[T], y: &mut [T], a: T, b: T) {
        let A = self.src;
        assert!(A.m == x.len() && A.n == y.len());

        for (col, yc) in y.iter_mut().enumerate() {
            *yc = a * A.col_slice(col).dot(x) + b * *yc;
        }
    }
}

#[test]
fn test_gemv() {
    let A = Matrix::from(&[[1., 2., 3.], [4., 5., 6.]]);

    let x = vec![1., 2., 3.];
    let mut y = vec![-1., -2.];
    A.gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [25.0, 58.0]);

    let x = vec![1., 2.];
    let mut y = vec![-1., -2., -3.];
    A.t().gemv(&x, &mut y, 2.0, 3.0);
    assert!(y == [15.0, 18.0, 21.0]);
}

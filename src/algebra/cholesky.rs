#![allow(non_snake_case)]

use super::{DenseFactorizationError, FloatT, Matrix};

/// Factor a symmetric positive definite matrix in place as H = LL'.
///
/// Only the lower triangle of `H` is read; on return it holds the lower
/// triangular factor L and the strict upper triangle is left untouched.
pub fn cholesky_factor<T>(H: &mut Matrix<T>) -> Result<(), DenseFactorizationError>
where
    T: FloatT,
{
    if !H.is_square() {
        return Err(DenseFactorizationError::IncompatibleDimension);
    }
    let n = H.nrows();

    for j in 0..n {
        let mut d = H[(j, j)];
        for k in 0..j {
            d -= H[(j, k)] * H[(j, k)];
        }
        if d <= T::zero() {
            return Err(DenseFactorizationError::NotPositiveDefinite);
        }
        let ljj = T::sqrt(d);
        H[(j, j)] = ljj;

        for i in (j + 1)..n {
            let mut s = H[(i, j)];
            for k in 0..j {
                s -= H[(i, k)] * H[(j, k)];
            }
            H[(i, j)] = s / ljj;
        }
    }
    Ok(())
}

/// Solve LL'x = b in place given the factor L; `x` holds b on entry and
/// the solution on return.  Only the lower triangle of `L` is read.
pub fn cholesky_solve<T>(L: &Matrix<T>, x: &mut [T])
where
    T: FloatT,
{
    let n = L.nrows();
    assert!(L.is_square() && x.len() == n);

    //forward substitution Ly = b
    for i in 0..n {
        let mut s = x[i];
        for k in 0..i {
            s -= L[(i, k)] * x[k];
        }
        x[i] = s / L[(i, i)];
    }

    //backward substitution L'x = y
    for i in (0..n).rev() {
        let mut s = x[i];
        for k in (i + 1)..n {
            s -= L[(k, i)] * x[k];
        }
        x[i] = s / L[(i, i)];
    }
}

/// Write J := L⁻ᵀ given the lower triangular factor L.
///
/// J comes out upper triangular; its strict lower triangle is zeroed.
/// This is the initialization of the factorization identity J'HJ = I.
pub fn triangular_inverse_transpose<T>(L: &Matrix<T>, J: &mut Matrix<T>)
where
    T: FloatT,
{
    let n = L.nrows();
    assert!(L.is_square() && J.is_square() && J.nrows() == n);

    //row j of J collects column j of L⁻¹
    for j in 0..n {
        for i in 0..j {
            J[(j, i)] = T::zero();
        }
        J[(j, j)] = T::recip(L[(j, j)]);
        for i in (j + 1)..n {
            let mut s = T::zero();
            for k in j..i {
                s += L[(i, k)] * J[(j, k)];
            }
            J[(j, i)] = -s / L[(i, i)];
        }
    }
}

/// Quadratic form x'Hx evaluated through the factor, as ‖L'x‖².
pub fn quad_form_factored<T>(L: &Matrix<T>, x: &[T]) -> T
where
    T: FloatT,
{
    let n = L.nrows();
    assert!(x.len() == n);

    let mut acc = T::zero();
    for j in 0..n {
        let mut s = T::zero();
        for i in j..n {
            s += L[(i, j)] * x[i];
        }
        acc += s * s;
    }
    acc
}

/// Solve Rz = z in place on the upper triangular block
/// R[offset.., offset..] of order `z.len()`.
pub(crate) fn upper_triangular_solve_in_place<T>(R: &Matrix<T>, offset: usize, z: &mut [T])
where
    T: FloatT,
{
    let len = z.len();
    for i in (0..len).rev() {
        let mut s = z[i];
        for k in (i + 1)..len {
            s -= R[(offset + i, offset + k)] * z[k];
        }
        z[i] = s / R[(offset + i, offset + i)];
    }
}

use super::{FloatT, Matrix};

/// A 2-element plane rotation.
///
/// `compute` selects (c, s) such that the pair (a, b) rotates onto
/// (r, 0) with r = hypot(a, b), i.e. the second element is annihilated.
/// The same rotation can then be applied across a row or column range of
/// a dense matrix, which is how the solver's factorization is revised as
/// constraints enter and leave the active set.
#[derive(Debug, Clone, Copy)]
pub struct GivensRotation<T> {
    pub c: T,
    pub s: T,
    /// length of the rotated pair, to be stored in place of `a`
    pub r: T,
}

impl<T> GivensRotation<T>
where
    T: FloatT,
{
    pub fn compute(a: T, b: T) -> Self {
        if b == T::zero() {
            //identity rotation, a is left unchanged
            Self {
                c: T::one(),
                s: T::zero(),
                r: a,
            }
        } else {
            let r = a.hypot(b);
            Self {
                c: a / r,
                s: -b / r,
                r,
            }
        }
    }

    #[inline]
    fn rotate(&self, x: T, y: T) -> (T, T) {
        (self.c * x - self.s * y, self.s * x + self.c * y)
    }

    /// Rotate the column pair (col_a, col_b) of `mat` over the row
    /// range [row_start, row_end).
    pub fn apply_column_wise(
        &self,
        mat: &mut Matrix<T>,
        row_start: usize,
        row_end: usize,
        col_a: usize,
        col_b: usize,
    ) {
        for row in row_start..row_end {
            let (x, y) = self.rotate(mat[(row, col_a)], mat[(row, col_b)]);
            mat[(row, col_a)] = x;
            mat[(row, col_b)] = y;
        }
    }

    /// Rotate the row pair (row_a, row_b) of `mat` over the column
    /// range [col_start, col_end).
    pub fn apply_row_wise(
        &self,
        mat: &mut Matrix<T>,
        col_start: usize,
        col_end: usize,
        row_a: usize,
        row_b: usize,
    ) {
        for col in col_start..col_end {
            let (x, y) = self.rotate(mat[(row_a, col)], mat[(row_b, col)]);
            mat[(row_a, col)] = x;
            mat[(row_b, col)] = y;
        }
    }
}

use super::{FloatT, VectorMath};
use std::ops::{Index, IndexMut};

/// Dense matrix in column-major format.
///
/// This is the input format for the Hessian and the general constraint
/// block, and the storage for the internal factorization matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

/// Adjoint (transpose) view of a dense matrix.
#[derive(Debug)]
pub struct Adjoint<'a, M> {
    pub src: &'a M,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    /// An empty matrix, used as a stand-in for an absent constraint block.
    pub fn empty() -> Self {
        Self::zeros((0, 0))
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = Matrix::zeros((n, n));
        mat.set_identity();
        mat
    }

    pub fn set_identity(&mut self) {
        assert!(self.m == self.n);
        self.data.set(T::zero());
        for i in 0..self.n {
            self[(i, i)] = T::one();
        }
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    pub fn nrows(&self) -> usize {
        self.m
    }

    pub fn ncols(&self) -> usize {
        self.n
    }

    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    #[inline]
    pub(crate) fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// Dot product of a (strided) matrix row with a dense vector.
    pub fn row_dot(&self, row: usize, x: &[T]) -> T {
        assert!(row < self.m && x.len() == self.n);
        let mut out = T::zero();
        for (col, &xc) in x.iter().enumerate() {
            out += self[(row, col)] * xc;
        }
        out
    }

    /// Gather a (strided) matrix row into a contiguous slice.
    pub fn copy_row_into(&self, row: usize, dst: &mut [T]) {
        assert!(row < self.m && dst.len() == self.n);
        for (col, d) in dst.iter_mut().enumerate() {
            *d = self[(row, col)];
        }
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    #[inline]
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    #[inline]
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

// conversion from row-major nested arrays, mainly for
// concise problem construction in tests and examples
impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut mat = Matrix::zeros((R, C));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                mat[(i, j)] = v;
            }
        }
        mat
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

#[test]
fn test_matrix_from_rows() {
    let mat = Matrix::from(&[[1., 2., 3.], [4., 5., 6.]]);
    assert_eq!(mat.nrows(), 2);
    assert_eq!(mat.ncols(), 3);
    assert_eq!(mat[(0, 1)], 2.);
    assert_eq!(mat[(1, 0)], 4.);
    assert_eq!(mat.col_slice(1), [2., 5.]);

    //column-major storage agreement with the slice constructor
    let same = Matrix::new_from_slice((2, 3), &[1., 4., 2., 5., 3., 6.]);
    assert_eq!(mat, same);
}

#[test]
fn test_matrix_row_ops() {
    let mat = Matrix::from(&[[1., 2.], [3., 4.]]);
    assert_eq!(mat.row_dot(1, &[1., 1.]), 7.);

    let mut row = [0.; 2];
    mat.copy_row_into(0, &mut row);
    assert_eq!(row, [1., 2.]);
}

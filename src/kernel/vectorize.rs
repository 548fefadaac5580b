//! Lift a scalar kernel function to a kernel-matrix function.

use ndarray::Array2;

use crate::error::ModelError;

/// Wraps an unvectorized kernel `k(x, y) -> f64` over two feature slices so
/// it can produce a full kernel matrix. Every entry is an independent call
/// with no shared mutable state, so only the element-wise result is
/// specified, not evaluation order.
pub struct VectorizeKernel<K> {
    kernel: K,
}

impl<K> VectorizeKernel<K>
where
    K: Fn(&[f64], &[f64]) -> f64,
{
    pub fn new(kernel: K) -> Self {
        VectorizeKernel { kernel }
    }

    /// Compute the kernel matrix of `x` against `y`.
    ///
    /// Entry (i, j) is `kernel(x.row(i), y.row(j))`. When `y` is `None` the
    /// matrix is computed against `x` itself.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `x` and `y` disagree on the feature dimension.
    pub fn evaluate(
        &self,
        x: &Array2<f64>,
        y: Option<&Array2<f64>>,
    ) -> Result<Array2<f64>, ModelError> {
        let y = y.unwrap_or(x);
        if x.ncols() != y.ncols() {
            return Err(ModelError::shape(
                format!("{} features", x.ncols()),
                format!("{} features", y.ncols()),
            ));
        }

        // Rows materialized once so the kernel sees plain slices.
        let x_rows: Vec<Vec<f64>> = x.outer_iter().map(|r| r.to_vec()).collect();
        let y_rows: Vec<Vec<f64>> = y.outer_iter().map(|r| r.to_vec()).collect();

        let mut computed = Array2::zeros((x.nrows(), y.nrows()));
        for (i, xi) in x_rows.iter().enumerate() {
            for (j, yj) in y_rows.iter().enumerate() {
                computed[[i, j]] = (self.kernel)(xi, yj);
            }
        }
        Ok(computed)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// The plain inner-product kernel, handy as a baseline and in tests.
pub fn linear_kernel(a: &[f64], b: &[f64]) -> f64 {
    dot(a, b)
}

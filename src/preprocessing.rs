//! Small preprocessing utilities shared by the kernels and examples.
//!
//! Provides a simple Scaler for mean/std standardization and the arcsin
//! transform that accompanies the polynomial feature map. The API operates
//! on `Array2<f64>` so the output can be fed directly to a kernel.

use ndarray::Array2;

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f64 = 1e-9;
}

/// Fit a `Scaler` from an `Array2<f64>` where rows are samples and columns
/// are features.
pub fn fit_scaler(x: &Array2<f64>) -> Scaler {
    let (nrows, ncols) = x.dim();
    assert!(
        nrows > 0 && ncols > 0,
        "fit_scaler requires non-empty matrix"
    );

    let mut mean = vec![0.0f64; ncols];
    for row in x.outer_iter() {
        for (c, v) in row.iter().enumerate() {
            mean[c] += v;
        }
    }
    let nrows_f = nrows as f64;
    for v in mean.iter_mut() {
        *v /= nrows_f;
    }

    let mut var = vec![0.0f64; ncols];
    for row in x.outer_iter() {
        for (c, v) in row.iter().enumerate() {
            let d = v - mean[c];
            var[c] += d * d;
        }
    }
    for v in var.iter_mut() {
        *v = (*v / nrows_f).sqrt().max(Scaler::MIN_STD);
    }

    Scaler { mean, std: var }
}

/// Transform all rows using the provided `Scaler` and return a new matrix.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Array2<f64> {
    let (nrows, ncols) = x.dim();
    let mut out = Vec::with_capacity(nrows * ncols);
    for row in x.outer_iter() {
        for (c, v) in row.iter().enumerate() {
            out.push((v - sc.mean[c]) / sc.std[c]);
        }
    }
    Array2::from_shape_vec((nrows, ncols), out).expect("transform_all: shape mismatch")
}

/// Elementwise arcsin of values clamped to [-1, 1].
///
/// The polynomial feature map expects `Ry(arcsin(x))` angles; clamping keeps
/// out-of-range raw data from producing NaN angles.
pub fn arcsin_transform(x: &Array2<f64>) -> Array2<f64> {
    x.mapv(|v| v.clamp(-1.0, 1.0).asin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scaler_standardizes_columns() {
        let x = array![[1.0, 10.0], [3.0, 30.0]];
        let sc = fit_scaler(&x);
        let z = transform_all(&x, &sc);
        // Each column becomes [-1, 1] after mean/std standardization.
        assert!((z[[0, 0]] + 1.0).abs() < 1e-12);
        assert!((z[[1, 0]] - 1.0).abs() < 1e-12);
        assert!((z[[0, 1]] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_does_not_divide_by_zero() {
        let x = array![[2.0], [2.0]];
        let sc = fit_scaler(&x);
        let z = transform_all(&x, &sc);
        assert!(z.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn arcsin_clamps_out_of_range() {
        let x = array![[1.5, -2.0, 0.0]];
        let z = arcsin_transform(&x);
        assert!((z[[0, 0]] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((z[[0, 1]] + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(z[[0, 2]], 0.0);
    }
}

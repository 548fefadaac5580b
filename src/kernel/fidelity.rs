//! Fidelity kernel over a parameterized feature map.
//!
//! Given a feature map φ and samples x, y, the kernel entry is the squared
//! overlap |<φ(x)|φ(y)>|^2. Computing that overlap requires a statevector
//! engine, which stays external to this crate: anything implementing
//! `OverlapEngine` can be plugged in.

use std::fmt;

use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

use crate::circuit::Circuit;
use crate::error::ModelError;

/// External statevector-overlap evaluation engine.
///
/// Implementations bind the two parameter vectors into `circuit` and return
/// the squared-modulus inner product of the resulting states.
pub trait OverlapEngine: Sync {
    fn overlap(
        &self,
        circuit: &Circuit,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<f64, ModelError>;
}

/// Preprocessing applied to raw data before it is bound into the feature
/// map, e.g. standardization or the arcsin companion of the polynomial map.
pub type PreprocessFn = Box<dyn Fn(&Array2<f64>) -> Array2<f64> + Send + Sync>;

/// Kernel-matrix function over a feature map and an overlap engine, with
/// optional data preprocessing.
pub struct FeatureMapKernel<E> {
    feature_map: Circuit,
    engine: E,
    name: Option<String>,
    preprocess: Option<PreprocessFn>,
}

impl<E: OverlapEngine> FeatureMapKernel<E> {
    pub fn new(feature_map: Circuit, engine: E) -> Self {
        FeatureMapKernel {
            feature_map,
            engine,
            name: None,
            preprocess: None,
        }
    }

    /// Attach a display name for reports and logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a preprocessing function applied to both inputs before
    /// binding.
    pub fn with_preprocess(mut self, preprocess: PreprocessFn) -> Self {
        self.preprocess = Some(preprocess);
        self
    }

    pub fn feature_map(&self) -> &Circuit {
        &self.feature_map
    }

    /// Compute the overlaps of all points in `x` against all points in `y`
    /// (or against `x` itself when `y` is `None`).
    ///
    /// Rows of the output are computed in parallel; entry placement is by
    /// index, so the result does not depend on scheduling.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the (preprocessed) feature dimension differs from
    /// the circuit's parameter count or between `x` and `y`; any error the
    /// engine raises is passed through.
    pub fn evaluate(
        &self,
        x: &Array2<f64>,
        y: Option<&Array2<f64>>,
    ) -> Result<Array2<f64>, ModelError> {
        let x_owned;
        let x = match &self.preprocess {
            Some(f) => {
                x_owned = f(x);
                &x_owned
            }
            None => x,
        };
        let y_owned;
        let y = match (y, &self.preprocess) {
            (Some(y), Some(f)) => {
                y_owned = f(y);
                &y_owned
            }
            (Some(y), None) => y,
            (None, _) => x,
        };

        let want = self.feature_map.num_parameters();
        if x.ncols() != want || y.ncols() != want {
            return Err(ModelError::shape(
                format!("{} features", want),
                format!("{} x {} features", x.ncols(), y.ncols()),
            ));
        }

        let (n, m) = (x.nrows(), y.nrows());
        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                (0..m)
                    .map(|j| self.engine.overlap(&self.feature_map, x.row(i), y.row(j)))
                    .collect::<Result<Vec<f64>, ModelError>>()
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Ok(Array2::from_shape_vec((n, m), flat).expect("kernel matrix shape"))
    }
}

impl<E> fmt::Display for FeatureMapKernel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "FeatureMapKernel(feature_map={})", name),
            None => write!(f, "FeatureMapKernel"),
        }
    }
}

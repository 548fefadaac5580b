//! Integration tests for the kernel-matrix wrappers.

use ndarray::{array, Array2, ArrayView1};
use qboost::feature_maps::{iqp_feature_map, polynomial_feature_map};
use qboost::preprocessing::arcsin_transform;
use qboost::{Circuit, Entanglement, FeatureMapKernel, ModelError, OverlapEngine, VectorizeKernel};

// ---------------------------------------------------------------------------
// VectorizeKernel
// ---------------------------------------------------------------------------

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[test]
fn dot_product_reproduces_gram_matrix() {
    let k = VectorizeKernel::new(dot);
    let x: Array2<f64> = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let gram = k.evaluate(&x, None).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            let want = if i == j { 1.0 } else { 0.0 };
            assert_eq!(gram[[i, j]], want);
        }
    }
}

#[test]
fn omitted_y_defaults_to_x() {
    let k = VectorizeKernel::new(dot);
    let x = array![[1.0, 2.0], [3.0, 4.0]];
    let implicit = k.evaluate(&x, None).unwrap();
    let explicit = k.evaluate(&x, Some(&x)).unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn mismatched_feature_dimensions_are_rejected() {
    let k = VectorizeKernel::new(dot);
    let x = array![[1.0, 2.0]];
    let y = array![[1.0, 2.0, 3.0]];
    assert!(matches!(
        k.evaluate(&x, Some(&y)),
        Err(ModelError::ShapeMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// FeatureMapKernel with a stand-in overlap engine
// ---------------------------------------------------------------------------

/// Test double for the external statevector engine: a Gaussian of the
/// parameter-space distance. Symmetric with unit diagonal, which is all the
/// kernel wrapper relies on.
struct GaussianOverlap;

impl OverlapEngine for GaussianOverlap {
    fn overlap(
        &self,
        _circuit: &Circuit,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<f64, ModelError> {
        let d2: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok((-d2).exp())
    }
}

/// Engine that always fails, for error propagation checks.
struct FailingOverlap;

impl OverlapEngine for FailingOverlap {
    fn overlap(
        &self,
        _circuit: &Circuit,
        _x: ArrayView1<'_, f64>,
        _y: ArrayView1<'_, f64>,
    ) -> Result<f64, ModelError> {
        Err(ModelError::InvalidState("engine offline".to_string()))
    }
}

#[test]
fn fidelity_kernel_is_symmetric_with_unit_diagonal() -> anyhow::Result<()> {
    let fm = iqp_feature_map(2, 1, Entanglement::Linear)?;
    let kernel = FeatureMapKernel::new(fm, GaussianOverlap).with_name("iqp");
    let x = array![[0.1, 0.2], [0.3, -0.4], [1.0, 0.0]];
    let m = kernel.evaluate(&x, None)?;
    assert_eq!(m.shape(), &[3, 3]);
    for i in 0..3 {
        assert!((m[[i, i]] - 1.0).abs() < 1e-12);
        for j in 0..3 {
            assert!((m[[i, j]] - m[[j, i]]).abs() < 1e-12);
        }
    }
    assert_eq!(kernel.to_string(), "FeatureMapKernel(feature_map=iqp)");
    Ok(())
}

#[test]
fn preprocessing_applies_to_both_sides() {
    let fm = polynomial_feature_map(2, 1).unwrap();
    let kernel = FeatureMapKernel::new(fm, GaussianOverlap)
        .with_preprocess(Box::new(|x: &Array2<f64>| arcsin_transform(x)));
    let x = array![[0.5, -0.5], [0.2, 0.9]];
    let implicit = kernel.evaluate(&x, None).unwrap();
    let explicit = kernel.evaluate(&x, Some(&x)).unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn feature_count_must_match_circuit_parameters() {
    let fm = iqp_feature_map(3, 1, Entanglement::Linear).unwrap();
    let kernel = FeatureMapKernel::new(fm, GaussianOverlap);
    let x = array![[0.1, 0.2]];
    assert!(matches!(
        kernel.evaluate(&x, None),
        Err(ModelError::ShapeMismatch { .. })
    ));
}

#[test]
fn engine_errors_propagate() {
    let fm = iqp_feature_map(2, 1, Entanglement::Linear).unwrap();
    let kernel = FeatureMapKernel::new(fm, FailingOverlap);
    let x = array![[0.1, 0.2]];
    assert!(matches!(
        kernel.evaluate(&x, None),
        Err(ModelError::InvalidState(_))
    ));
}

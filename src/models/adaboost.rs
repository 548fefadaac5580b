//! AdaBoost classifier over a fixed pool of weak classifiers.
//!
//! The trainer greedily selects, each round, the candidate with the lowest
//! weighted error, re-weights the samples, and accumulates (classifier,
//! alpha) records. Prediction is the sign of the alpha-weighted vote.
//!
//! References
//! ----------
//! Yoav Freund and Robert E. Schapire. "A decision-theoretic generalization
//! of on-line learning and an application to boosting". Journal of Computer
//! and System Sciences, 55(1):119-139, 1997.

use std::fmt;
use std::sync::Arc;

use ndarray::Array2;
use rayon::prelude::*;

use crate::error::ModelError;
use crate::models::classifier_trait::WeakClassifier;

/// Stabilizes the alpha formula when the weighted error is exactly 0. The
/// epsilon is applied to the denominator only; an error approaching 1 from
/// below still drives alpha toward negative infinity.
const ALPHA_EPS: f64 = 1e-10;

/// A weak classifier chosen during training together with its vote weight.
#[derive(Clone)]
pub struct SelectedClassifier {
    pub classifier: Arc<dyn WeakClassifier>,
    pub alpha: f64,
}

/// AdaBoost ensemble built from an externally supplied pool of weak
/// classifiers.
pub struct AdaBoost {
    weak_classifiers: Vec<Arc<dyn WeakClassifier>>,
    n_estimators: usize,
    num_workers: usize,
    selected: Vec<SelectedClassifier>,
}

impl AdaBoost {
    /// Create a new ensemble.
    ///
    /// # Arguments
    ///
    /// * `weak_classifiers` - The pool of candidate classifiers to choose
    ///   from. Each maps a sample matrix to per-row labels in {-1, +1}.
    /// * `n_estimators` - Maximum number of boosting rounds.
    /// * `num_workers` - Worker threads used by `predict`. 1 means strictly
    ///   sequential evaluation in record order.
    pub fn new(
        weak_classifiers: Vec<Arc<dyn WeakClassifier>>,
        n_estimators: usize,
        num_workers: usize,
    ) -> Self {
        AdaBoost {
            weak_classifiers,
            n_estimators,
            num_workers,
            selected: Vec::new(),
        }
    }

    /// Create an ensemble with the default 50 estimators and sequential
    /// prediction.
    pub fn with_defaults(weak_classifiers: Vec<Arc<dyn WeakClassifier>>) -> Self {
        Self::new(weak_classifiers, 50, 1)
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// The (classifier, alpha) records accumulated by `fit`, in selection
    /// order.
    pub fn selected(&self) -> &[SelectedClassifier] {
        &self.selected
    }

    /// Vote weights of the selected classifiers, in selection order.
    pub fn alphas(&self) -> Vec<f64> {
        self.selected.iter().map(|s| s.alpha).collect()
    }

    /// Fit the ensemble to the training data.
    ///
    /// Runs up to `n_estimators` boosting rounds. A round with minimum
    /// weighted error >= 1.0 terminates training early; the partial model is
    /// a normal, successful outcome. Rounds are strictly sequential (each
    /// depends on the previous round's weights); candidate evaluation within
    /// a round is parallel, which does not affect the result.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features of shape (n_samples, n_features)
    /// * `y` - Target labels in {-1, +1}, one per sample
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the classifier pool or the training set is
    /// empty, `ShapeMismatch` if `y` does not align with `x` or a candidate
    /// returns a prediction of the wrong length.
    pub fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<&mut Self, ModelError> {
        if self.weak_classifiers.is_empty() {
            return Err(ModelError::InvalidConfiguration(
                "weak_classifiers must not be empty".to_string(),
            ));
        }
        let n_samples = x.nrows();
        if n_samples == 0 {
            return Err(ModelError::InvalidConfiguration(
                "training set must contain at least one sample".to_string(),
            ));
        }
        if y.len() != n_samples {
            return Err(ModelError::shape(
                format!("{} labels", n_samples),
                format!("{} labels", y.len()),
            ));
        }

        self.selected.clear();

        // Initialize weights uniformly
        let mut w = vec![1.0 / n_samples as f64; n_samples];

        for round in 0..self.n_estimators {
            // Candidates are stateless functions, so every round re-evaluates
            // the full pool against x.
            let clf_preds: Vec<Vec<i32>> = self
                .weak_classifiers
                .par_iter()
                .map(|clf| clf.predict(x))
                .collect();
            for (idx, preds) in clf_preds.iter().enumerate() {
                if preds.len() != n_samples {
                    return Err(ModelError::shape(
                        format!("{} predictions", n_samples),
                        format!(
                            "{} predictions from candidate {}",
                            preds.len(),
                            idx
                        ),
                    ));
                }
            }

            // Weighted error per candidate
            let errors: Vec<f64> = clf_preds
                .iter()
                .map(|preds| {
                    preds
                        .iter()
                        .zip(y.iter())
                        .zip(w.iter())
                        .filter(|((p, t), _)| p != t)
                        .map(|(_, wi)| wi)
                        .sum()
                })
                .collect();

            // Select the best candidate; ties go to the earliest index.
            let mut best_idx = 0;
            for (idx, &err) in errors.iter().enumerate() {
                if err < errors[best_idx] {
                    best_idx = idx;
                }
            }
            let error = errors[best_idx];

            if error >= 1.0 {
                log::warn!(
                    "boosting terminated at round {}: minimum weighted error {:.6} >= 1.0",
                    round,
                    error
                );
                break;
            }
            let alpha = 0.5 * ((1.0 - error) / (error + ALPHA_EPS)).ln();

            // Update sample weights: correct samples shrink, mistakes grow.
            let predictions = &clf_preds[best_idx];
            scale_weights(&mut w, y, predictions, alpha);
            normalize_weights(&mut w);

            log::debug!(
                "round {}: selected candidate {} (error {:.6}, alpha {:.6})",
                round,
                best_idx,
                error,
                alpha
            );

            self.selected.push(SelectedClassifier {
                classifier: Arc::clone(&self.weak_classifiers[best_idx]),
                alpha,
            });
        }

        log::info!(
            "fit complete: {} of {} rounds produced a classifier",
            self.selected.len(),
            self.n_estimators
        );
        Ok(self)
    }

    /// Predict labels in {-1, +1} for every row of `x`.
    ///
    /// With `num_workers > 1` each selected classifier is evaluated as an
    /// independent unit of work on a bounded pool; results are reassembled
    /// in record order before the weighted vote, so the output is identical
    /// to the sequential path. A weighted sum of exactly zero resolves
    /// to -1.
    ///
    /// # Errors
    ///
    /// `InvalidState` if `fit` has not selected any classifier (including
    /// the case `n_estimators == 0`).
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>, ModelError> {
        if self.selected.is_empty() {
            return Err(ModelError::InvalidState(
                "predict called on an ensemble with no selected classifiers".to_string(),
            ));
        }

        let clf_preds: Vec<Vec<i32>> = if self.num_workers <= 1 {
            self.selected
                .iter()
                .map(|s| s.classifier.predict(x))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.num_workers)
                .build()
                .map_err(|e| {
                    ModelError::InvalidConfiguration(format!("failed to build worker pool: {}", e))
                })?;
            // par_iter + collect preserves submission order regardless of
            // completion order.
            pool.install(|| {
                self.selected
                    .par_iter()
                    .map(|s| s.classifier.predict(x))
                    .collect()
            })
        };

        let n_samples = x.nrows();
        let mut labels = Vec::with_capacity(n_samples);
        for i in 0..n_samples {
            let vote: f64 = self
                .selected
                .iter()
                .zip(clf_preds.iter())
                .map(|(s, preds)| s.alpha * preds[i] as f64)
                .sum();
            labels.push(if vote > 0.0 { 1 } else { -1 });
        }
        Ok(labels)
    }

    /// Accuracy of the ensemble on `x` against targets `y`.
    pub fn score(&self, x: &Array2<f64>, y: &[i32]) -> Result<f64, ModelError> {
        if y.len() != x.nrows() {
            return Err(ModelError::shape(
                format!("{} labels", x.nrows()),
                format!("{} labels", y.len()),
            ));
        }
        let preds = self.predict(x)?;
        let correct = preds.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        Ok(correct as f64 / y.len() as f64)
    }
}

/// Multiplicative weight update for one boosting round: each weight is
/// scaled by exp(-alpha * y * pred), so with a positive alpha correctly
/// classified samples shrink and misclassified samples grow.
fn scale_weights(w: &mut [f64], y: &[i32], predictions: &[i32], alpha: f64) {
    for ((wi, &yi), &pi) in w.iter_mut().zip(y.iter()).zip(predictions.iter()) {
        *wi *= (-alpha * yi as f64 * pi as f64).exp();
    }
}

/// Renormalize the weight vector to sum to 1.
fn normalize_weights(w: &mut [f64]) {
    let w_sum: f64 = w.iter().sum();
    for wi in w.iter_mut() {
        *wi /= w_sum;
    }
}

impl fmt::Display for AdaBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdaBoost(n_estimators={})", self.n_estimators)
    }
}

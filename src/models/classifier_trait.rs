use ndarray::Array2;

/// A small trait abstraction for the weak learners consumed by the boosting
/// ensemble. Implementations must be pure: the same input matrix always
/// yields the same prediction vector, with no observable side effects.
pub trait WeakClassifier: Send + Sync {
    /// Predict a label in {-1, +1} for every row of `x`. The returned vector
    /// must have length `x.nrows()`.
    fn predict(&self, x: &Array2<f64>) -> Vec<i32>;

    /// Optional human readable name for the classifier.
    fn name(&self) -> &str {
        "weak classifier"
    }
}

/// Plain functions and closures over a sample matrix are usable as weak
/// classifiers directly.
impl<F> WeakClassifier for F
where
    F: Fn(&Array2<f64>) -> Vec<i32> + Send + Sync,
{
    fn predict(&self, x: &Array2<f64>) -> Vec<i32> {
        self(x)
    }
}

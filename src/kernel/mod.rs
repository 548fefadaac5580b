pub mod fidelity;
pub mod vectorize;

pub use fidelity::{FeatureMapKernel, OverlapEngine};
pub use vectorize::{linear_kernel, VectorizeKernel};

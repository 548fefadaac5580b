//! qboost: AdaBoost ensembles and quantum feature-map kernels.
//!
//! This crate provides two loosely related pieces of machine-learning
//! infrastructure: a generic AdaBoost trainer/predictor over externally
//! supplied weak classifiers, and a library of quantum feature-map
//! constructors with a kernel evaluator that turns pairwise state overlaps
//! into kernel matrices for kernel methods such as SVMs.
//!
//! The feature maps are circuit *descriptions* only; binding them into
//! statevectors and computing fidelities is delegated to an external engine
//! through the `kernel::OverlapEngine` trait. The design favors small,
//! testable modules with typed errors over panics at the API surface.
pub mod circuit;
pub mod entanglement;
pub mod error;
pub mod feature_maps;
pub mod kernel;
pub mod models;
pub mod preprocessing;

pub use circuit::{Circuit, Gate, ParamExpr};
pub use entanglement::{entanglement_pattern, Entanglement};
pub use error::ModelError;
pub use kernel::{FeatureMapKernel, OverlapEngine, VectorizeKernel};
pub use models::{AdaBoost, SelectedClassifier, WeakClassifier};

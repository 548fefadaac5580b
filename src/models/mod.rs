pub mod adaboost;
pub mod classifier_trait;

pub use adaboost::{AdaBoost, SelectedClassifier};
pub use classifier_trait::WeakClassifier;

//! Scorer - joins predictions to private labels and computes macro F1

mod metrics;
mod scorer;

pub use metrics::macro_f1;
pub use scorer::Scorer;

pub mod scorer;

pub use scorer::{FieldWeightScorer, FieldWeights, Scorer};

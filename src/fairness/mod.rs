//! Fairness classification
//!
//! Scores normally arrive from the upstream assessment collaborator; this
//! module maps them to one canonical rating and display band so every
//! surface shows the same classification for the same score. A local
//! heuristic scorer covers contracts with no upstream assessment.

pub mod classifier;
pub mod models;
pub mod scorer;

pub use classifier::{classify, classify_assessment, EXCELLENT_THRESHOLD, FAIR_THRESHOLD};
pub use models::{Band, Classification, ClassifiedAssessment, FairnessAssessment, Rating};
pub use scorer::score_contract;

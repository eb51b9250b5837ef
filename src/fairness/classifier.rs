//! Score to rating classification

use super::models::{Classification, ClassifiedAssessment, FairnessAssessment, Rating};

/// Lowest score rated Excellent
pub const EXCELLENT_THRESHOLD: u8 = 75;

/// Lowest score rated Fair
pub const FAIR_THRESHOLD: u8 = 50;

const MAX_SCORE: u8 = 100;

/// Classify a 0-100 score. Lower bounds are inclusive; scores above 100 are
/// clamped.
pub fn classify(score: u8) -> Classification {
    let score = score.min(MAX_SCORE);
    let rating = if score >= EXCELLENT_THRESHOLD {
        Rating::Excellent
    } else if score >= FAIR_THRESHOLD {
        Rating::Fair
    } else {
        Rating::Poor
    };

    Classification {
        score,
        rating,
        band: rating.band(),
    }
}

/// Attach the canonical classification to an upstream assessment.
/// Reasons and flags pass through untouched.
pub fn classify_assessment(assessment: FairnessAssessment) -> ClassifiedAssessment {
    let classification = classify(assessment.score);

    ClassifiedAssessment {
        score: classification.score,
        rating: classification.rating,
        rating_label: classification.rating.label().to_string(),
        band: classification.band,
        assessment: assessment.assessment,
        reasons: assessment.reasons,
        flags: assessment.flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fairness::models::Band;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(100).rating, Rating::Excellent);
        assert_eq!(classify(75).rating, Rating::Excellent);
        assert_eq!(classify(74).rating, Rating::Fair);
        assert_eq!(classify(50).rating, Rating::Fair);
        assert_eq!(classify(49).rating, Rating::Poor);
        assert_eq!(classify(0).rating, Rating::Poor);
    }

    #[test]
    fn test_bands() {
        assert_eq!(classify(80).band, Band::Good);
        assert_eq!(classify(60).band, Band::Average);
        assert_eq!(classify(10).band, Band::Bad);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = classify(0);
        for score in 1..=u8::MAX {
            let current = classify(score);
            assert!(current.rating >= previous.rating, "score {}", score);
            assert!(current.band >= previous.band, "score {}", score);
            previous = current;
        }
    }

    #[test]
    fn test_clamps_above_hundred() {
        let classification = classify(250);
        assert_eq!(classification.score, 100);
        assert_eq!(classification.rating, Rating::Excellent);
    }

    #[test]
    fn test_passthrough() {
        let assessment = FairnessAssessment {
            score: 62,
            assessment: Some("Reasonable deal".to_string()),
            reasons: vec!["APR is average".to_string(), "Mileage is low".to_string()],
            flags: vec![],
        };

        let classified = classify_assessment(assessment);
        assert_eq!(classified.rating_label, "Fair");
        assert_eq!(classified.band, Band::Average);
        assert_eq!(classified.reasons, vec!["APR is average", "Mileage is low"]);
        assert!(!classified.has_issues());
    }
}

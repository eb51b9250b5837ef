//! Data models for fairness assessment

use serde::{Deserialize, Deserializer, Serialize};

/// Fairness rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    Poor = 1,
    Fair = 2,
    Excellent = 3,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn band(&self) -> Band {
        match self {
            Self::Excellent => Band::Good,
            Self::Fair => Band::Average,
            Self::Poor => Band::Bad,
        }
    }
}

/// Stable visual band identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Bad,
    Average,
    Good,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Average => "average",
            Self::Bad => "bad",
        }
    }
}

/// Rating and band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub score: u8,
    pub rating: Rating,
    pub band: Band,
}

/// Assessment as produced upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FairnessAssessment {
    /// Required; fractional scores are rounded and out-of-range ones clamped to 0..=100
    #[serde(deserialize_with = "lenient_score")]
    pub score: u8,
    /// Free-text verdict from the collaborator, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
}

fn lenient_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("score must be a finite number"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Assessment with its canonical classification attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAssessment {
    pub score: u8,
    pub rating: Rating,
    pub rating_label: String,
    pub band: Band,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<String>,
    pub reasons: Vec<String>,
    pub flags: Vec<String>,
}

impl ClassifiedAssessment {
    /// An empty flag list means the collaborator found no issues
    pub fn has_issues(&self) -> bool {
        !self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_defaults() {
        let assessment: FairnessAssessment = serde_json::from_str(r#"{"score": 82}"#).unwrap();
        assert_eq!(assessment.score, 82);
        assert!(assessment.reasons.is_empty());
        assert!(assessment.flags.is_empty());
    }

    #[test]
    fn test_score_is_lenient() {
        let parse = |json: &str| serde_json::from_str::<FairnessAssessment>(json).map(|a| a.score);

        assert_eq!(parse(r#"{"score": 82.5}"#).unwrap(), 83);
        assert_eq!(parse(r#"{"score": 74.4}"#).unwrap(), 74);
        assert_eq!(parse(r#"{"score": 150}"#).unwrap(), 100);
        assert_eq!(parse(r#"{"score": -7}"#).unwrap(), 0);
    }

    #[test]
    fn test_score_is_required() {
        assert!(serde_json::from_str::<FairnessAssessment>(r#"{"reasons": []}"#).is_err());
        assert!(serde_json::from_str::<FairnessAssessment>(r#"{"score": "high"}"#).is_err());
    }

    #[test]
    fn test_band_wire_names() {
        assert_eq!(serde_json::to_value(Band::Good).unwrap(), "good");
        assert_eq!(serde_json::to_value(Band::Average).unwrap(), "average");
        assert_eq!(serde_json::to_value(Band::Bad).unwrap(), "bad");
    }

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::Poor < Rating::Fair);
        assert!(Rating::Fair < Rating::Excellent);
        assert!(Band::Bad < Band::Good);
    }
}

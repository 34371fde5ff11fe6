use serde::{Deserialize, Serialize};

/// Compound scores at or beyond this magnitude carry a directional label.
pub const SENTIMENT_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Labels a compound score in [-1, 1].
    pub fn from_compound(compound: f64) -> Self {
        if compound >= SENTIMENT_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= -SENTIMENT_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

/// Interpretation bands for a correlation coefficient, as shown next to the
/// overall correlation figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    /// Above 0.7.
    StrongPositive,
    /// 0.3 to 0.7 inclusive.
    Moderate,
    /// Between -0.3 and 0.3.
    Weak,
    /// -0.3 or below.
    Negative,
}

impl CorrelationStrength {
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient > 0.7 {
            CorrelationStrength::StrongPositive
        } else if coefficient >= 0.3 {
            CorrelationStrength::Moderate
        } else if coefficient > -0.3 {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::Negative
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CorrelationStrength::StrongPositive => "strong positive correlation",
            CorrelationStrength::Moderate => "moderate correlation",
            CorrelationStrength::Weak => "weak correlation",
            CorrelationStrength::Negative => "negative correlation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_thresholds_are_inclusive() {
        assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_compound(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn correlation_bands_follow_dashboard_legend() {
        assert_eq!(
            CorrelationStrength::from_coefficient(0.71),
            CorrelationStrength::StrongPositive
        );
        assert_eq!(CorrelationStrength::from_coefficient(0.7), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.3), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(0.0), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(-0.3), CorrelationStrength::Negative);
        assert_eq!(CorrelationStrength::from_coefficient(-0.9), CorrelationStrength::Negative);
    }
}

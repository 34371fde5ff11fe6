//! Rule-based headline sentiment.
//!
//! Each headline is tokenised, matched against a small financial lexicon,
//! and the adjusted valences are summed and squashed into a compound score in
//! (-1, 1). The compound is then labelled with the usual ±0.05 rule.

use core_types::{Sentiment, SentimentLabel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Squashing constant of the compound score, `s / sqrt(s^2 + ALPHA)`.
const ALPHA: f64 = 15.0;

/// Word valences plus the negation and intensifier rules applied around them.
pub struct FinancialLexicon {
    words: HashMap<&'static str, f64>,
    negations: Vec<&'static str>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for FinancialLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl FinancialLexicon {
    pub fn new() -> Self {
        let words = [
            // Positive
            ("bullish", 2.4),
            ("surge", 2.1),
            ("surges", 2.1),
            ("soar", 2.4),
            ("soars", 2.4),
            ("rally", 2.1),
            ("rallies", 2.1),
            ("gain", 1.5),
            ("gains", 1.5),
            ("profit", 1.8),
            ("profits", 1.8),
            ("growth", 1.8),
            ("rise", 1.5),
            ("rises", 1.5),
            ("jump", 1.5),
            ("jumps", 1.5),
            ("beat", 1.8),
            ("beats", 1.8),
            ("record", 1.8),
            ("strong", 1.5),
            ("upgrade", 1.8),
            ("upgraded", 1.8),
            ("outperform", 2.1),
            ("optimistic", 1.8),
            ("recovery", 1.5),
            ("rebound", 1.5),
            ("breakout", 1.8),
            ("approval", 1.5),
            ("approved", 1.5),
            // Negative
            ("bearish", -2.4),
            ("crash", -2.7),
            ("crashes", -2.7),
            ("plunge", -2.4),
            ("plunges", -2.4),
            ("slump", -2.1),
            ("drop", -1.8),
            ("drops", -1.8),
            ("fall", -1.5),
            ("falls", -1.5),
            ("decline", -1.8),
            ("declines", -1.8),
            ("loss", -1.8),
            ("losses", -1.8),
            ("weak", -1.5),
            ("miss", -1.8),
            ("misses", -1.8),
            ("downgrade", -1.8),
            ("downgraded", -1.8),
            ("fear", -1.8),
            ("fears", -1.8),
            ("risk", -1.2),
            ("volatile", -0.9),
            ("uncertainty", -1.5),
            ("recession", -2.4),
            ("crisis", -2.4),
            ("lawsuit", -1.8),
            ("fraud", -2.7),
            ("hack", -2.4),
            ("hacked", -2.4),
            ("selloff", -2.1),
            ("bankruptcy", -2.7),
        ]
        .into_iter()
        .collect();

        let negations = vec![
            "not", "no", "never", "none", "cannot", "cant", "dont", "doesnt", "didnt", "wont",
            "isnt", "arent", "wasnt", "werent", "without", "hardly", "barely",
        ];

        let intensifiers = [
            ("very", 1.3),
            ("extremely", 1.5),
            ("highly", 1.3),
            ("sharply", 1.4),
            ("significantly", 1.3),
            ("dramatically", 1.5),
            ("massive", 1.4),
            ("slightly", 0.6),
            ("somewhat", 0.7),
            ("marginally", 0.6),
        ]
        .into_iter()
        .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    pub fn valence(&self, token: &str) -> Option<f64> {
        self.words.get(token).copied()
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(&token)
    }

    pub fn intensifier(&self, token: &str) -> Option<f64> {
        self.intensifiers.get(token).copied()
    }

    /// Sum of matched valences after negation and intensifier adjustments.
    ///
    /// A negation flips the next scored word, an intensifier scales it. Both
    /// expire once a scored word consumes them.
    pub fn raw_score(&self, text: &str) -> (f64, usize) {
        let mut sum = 0.0;
        let mut matched = 0;
        let mut negate = false;
        let mut scale = 1.0;

        for token in tokenize(text) {
            if self.is_negation(&token) {
                negate = true;
                continue;
            }
            if let Some(mult) = self.intensifier(&token) {
                scale = mult;
                continue;
            }
            if let Some(mut valence) = self.valence(&token) {
                if negate {
                    valence = -valence;
                    negate = false;
                }
                sum += valence * scale;
                scale = 1.0;
                matched += 1;
            }
        }

        (sum, matched)
    }
}

/// Lowercases, strips apostrophes ("don't" -> "dont") and splits on anything
/// that is not alphanumeric.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(['\'', '\u{2019}'], "")
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps a raw valence sum into (-1, 1).
pub fn compound(raw: f64) -> f64 {
    if raw == 0.0 {
        return 0.0;
    }
    raw / (raw * raw + ALPHA).sqrt()
}

/// Per-label counts and the average compound of a batch of headlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub mean_compound: f64,
    pub overall: SentimentLabel,
}

#[derive(Default)]
pub struct SentimentAnalyzer {
    lexicon: FinancialLexicon,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: FinancialLexicon) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, headline: &str) -> Sentiment {
        let (raw, matched) = self.lexicon.raw_score(headline);
        let sentiment = Sentiment::from_compound(compound(raw));
        tracing::trace!(headline, matched, compound = sentiment.compound, "Scored headline");
        sentiment
    }

    pub fn score_all<'a>(&self, headlines: impl IntoIterator<Item = &'a str>) -> Vec<Sentiment> {
        headlines.into_iter().map(|h| self.score(h)).collect()
    }

    /// Aggregates scored headlines; the overall label is the label of the
    /// mean compound. An empty batch summarises as neutral.
    pub fn summarize(scores: &[Sentiment]) -> SentimentSummary {
        let count = |label| scores.iter().filter(|s| s.label == label).count();
        let mean_compound = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.compound).sum::<f64>() / scores.len() as f64
        };

        SentimentSummary {
            total: scores.len(),
            positive: count(SentimentLabel::Positive),
            negative: count(SentimentLabel::Negative),
            neutral: count(SentimentLabel::Neutral),
            mean_compound,
            overall: SentimentLabel::from_compound(mean_compound),
        }
    }
}

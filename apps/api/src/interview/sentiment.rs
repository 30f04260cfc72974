//! Lexicon sentiment: local, deterministic polarity and subjectivity scoring.
//!
//! Every sentiment-bearing word carries a (polarity, subjectivity) pair. While
//! scanning an answer:
//! - an intensifier ("very", "extremely") multiplies the next sentiment word,
//! - a negation ("not", "never", "don't") within `NEGATION_WINDOW` words flips the
//!   next sentiment word and halves it,
//! - sentence punctuation resets both.
//!
//! Polarity and subjectivity of the text are the means over the matched words,
//! clamped to range and rounded to 3 decimals. Text with no sentiment words scores
//! (0.0, 0.0). The label is derived from the unrounded polarity.

use std::collections::HashMap;

use crate::interview::models::{mean, round_to, Sentiment, SentimentResult};
use crate::interview::providers::SentimentAnalyzer;

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;
const PRECISION: i32 = 3;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("excited", 0.375, 0.75),
    ("exciting", 0.3, 0.8),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("passionate", 0.6, 0.9),
    ("confident", 0.5, 0.833),
    ("successful", 0.75, 0.95),
    ("successfully", 0.75, 0.95),
    ("effective", 0.6, 0.8),
    ("efficient", 0.5, 0.6),
    ("strong", 0.433, 0.733),
    ("clear", 0.1, 0.383),
    ("clean", 0.367, 0.683),
    ("robust", 0.4, 0.5),
    ("reliable", 0.45, 0.55),
    ("scalable", 0.3, 0.4),
    ("proud", 0.8, 1.0),
    ("positive", 0.227, 0.545),
    ("valuable", 0.5, 0.55),
    ("helpful", 0.4, 0.5),
    ("important", 0.4, 1.0),
    ("interesting", 0.5, 0.5),
    ("impressive", 1.0, 1.0),
    ("creative", 0.5, 0.7),
    ("innovative", 0.5, 0.6),
    ("easy", 0.433, 0.833),
    ("simple", 0.0, 0.357),
    ("fast", 0.2, 0.6),
    ("improved", 0.4, 0.5),
    ("improve", 0.3, 0.4),
    ("solved", 0.3, 0.4),
    ("achieved", 0.4, 0.5),
    ("fantastic", 0.4, 0.9),
    ("wonderful", 1.0, 1.0),
    ("perfect", 1.0, 1.0),
    ("right", 0.286, 0.536),
    ("correct", 0.3, 0.4),
    ("comfortable", 0.4, 0.75),
    ("motivated", 0.5, 0.7),
    ("skilled", 0.5, 0.6),
    ("experienced", 0.6, 0.6),
    ("well", 0.4, 0.3),
    // negative
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("difficult", -0.5, 1.0),
    ("hard", -0.292, 0.542),
    ("challenging", -0.1, 0.5),
    ("complicated", -0.5, 1.0),
    ("confusing", -0.3, 0.7),
    ("confused", -0.4, 0.7),
    ("stressful", -0.5, 0.8),
    ("stressed", -0.5, 0.8),
    ("nervous", -0.3, 1.0),
    ("anxious", -0.25, 0.75),
    ("unsure", -0.2, 0.7),
    ("uncertain", -0.214, 0.714),
    ("afraid", -0.6, 0.9),
    ("worried", -0.4, 0.8),
    ("frustrating", -0.4, 0.7),
    ("frustrated", -0.7, 0.4),
    ("annoying", -0.8, 0.9),
    ("boring", -1.0, 1.0),
    ("slow", -0.3, 0.4),
    ("wrong", -0.5, 0.9),
    ("failed", -0.5, 0.3),
    ("failure", -0.316, 0.3),
    ("mistake", -0.4, 0.4),
    ("mistakes", -0.4, 0.4),
    ("problem", -0.2, 0.3),
    ("problems", -0.2, 0.3),
    ("weak", -0.375, 0.625),
    ("sad", -0.5, 1.0),
    ("unfortunately", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("messy", -0.4, 0.6),
    ("broken", -0.4, 0.4),
    ("impossible", -0.667, 1.0),
];

/// (word, multiplier) applied to the next sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("highly", 1.3),
    ("super", 1.4),
    ("quite", 1.1),
    ("so", 1.2),
    ("pretty", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.6),
    ("fairly", 0.9),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "hardly", "cannot", "without",
];

/// Default sentiment analyzer: word lexicon with intensifiers and negation.
pub struct LexiconSentimentAnalyzer {
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconSentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Scores each sentiment word in `text`, returning (polarity, subjectivity) pairs.
    fn assess(&self, text: &str) -> Vec<(f64, f64)> {
        let mut assessments = Vec::new();
        let mut negation_left = 0usize;
        let mut intensity = 1.0_f64;

        for token in tokenize(text) {
            let word = match token {
                Token::Break => {
                    negation_left = 0;
                    intensity = 1.0;
                    continue;
                }
                Token::Word(word) => word,
            };

            if is_negation(&word) {
                negation_left = NEGATION_WINDOW;
                intensity = 1.0;
                continue;
            }

            if let Some(multiplier) = self.intensifiers.get(word.as_str()) {
                intensity *= multiplier;
                continue;
            }

            match self.lexicon.get(word.as_str()) {
                Some(&(polarity, subjectivity)) => {
                    let mut polarity = polarity * intensity;
                    if negation_left > 0 {
                        polarity *= NEGATION_FACTOR;
                    }
                    assessments.push((
                        polarity.clamp(-1.0, 1.0),
                        (subjectivity * intensity).clamp(0.0, 1.0),
                    ));
                    negation_left = 0;
                    intensity = 1.0;
                }
                None => {
                    intensity = 1.0;
                    negation_left = negation_left.saturating_sub(1);
                }
            }
        }

        assessments
    }
}

impl Default for LexiconSentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer for LexiconSentimentAnalyzer {
    fn analyze(&self, text: &str) -> SentimentResult {
        let assessments = self.assess(text);

        let polarity = mean(assessments.iter().map(|(p, _)| *p)).clamp(-1.0, 1.0);
        let subjectivity = mean(assessments.iter().map(|(_, s)| *s)).clamp(0.0, 1.0);

        SentimentResult {
            label: Sentiment::from_polarity(polarity),
            polarity: round_to(polarity, PRECISION),
            subjectivity: round_to(subjectivity, PRECISION),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    /// Sentence punctuation; ends any pending negation or intensifier.
    Break,
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() || c == '\'' || c == '\u{2019}' {
            let c = if c == '\u{2019}' { '\'' } else { c };
            current.extend(c.to_lowercase());
            continue;
        }

        if !current.is_empty() {
            tokens.push(Token::Word(std::mem::take(&mut current)));
        }
        if matches!(c, '.' | '!' | '?' | ';' | ':') {
            tokens.push(Token::Break);
        }
    }

    if !current.is_empty() {
        tokens.push(Token::Word(current));
    }

    tokens
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

//! Approximate substring matching with a normalised error score.
//!
//! A pattern matches a text when some substring of the text can be turned into the
//! pattern with few enough edits (insertions, deletions, substitutions). The score is
//! `edits / pattern length`, so it does not depend on where in the text the match
//! occurs: a hit at the end of a long answer scores like one at the start.

/// Smallest score a non-identical match can get.
///
/// Only a text equal to the pattern scores exactly 0; an exact substring hit scores
/// this value.
pub const MIN_MATCH_SCORE: f64 = 0.001;

/// A lowercased query, prepared once and scored against many texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.to_lowercase().chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Fuzzy matcher with a similarity threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    /// Create a matcher. `threshold` is the highest score still counted as a match
    /// (0.0 = exact substrings only, 1.0 = almost anything).
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Lowercase a text into the form `score` expects.
    pub fn prepare(text: &str) -> Vec<char> {
        text.to_lowercase().chars().collect()
    }

    /// Score `pattern` against a prepared `text`.
    ///
    /// Returns `None` when the text does not match, otherwise a score in `0.0..=threshold`
    /// where lower is better.
    pub fn score(&self, pattern: &Pattern, text: &[char]) -> Option<f64> {
        if pattern.is_empty() {
            return None;
        }

        if pattern.chars == text {
            return Some(0.0);
        }

        let len = pattern.len();
        let errors = Self::best_substring_distance(&pattern.chars, text);

        // A match needs at least one correct character
        if errors >= len {
            return None;
        }

        let score = errors as f64 / len as f64;
        if score <= self.threshold {
            Some(score.max(MIN_MATCH_SCORE))
        } else {
            None
        }
    }

    /// Smallest edit distance between `pattern` and any substring of `text`.
    ///
    /// Levenshtein dynamic programming where the match may start anywhere in the text
    /// at no cost. Keeps a single column per text character.
    fn best_substring_distance(pattern: &[char], text: &[char]) -> usize {
        let len = pattern.len();
        let mut prev: Vec<usize> = (0..=len).collect();
        let mut cur: Vec<usize> = vec![0; len + 1];
        let mut best = prev[len];

        for &c in text {
            cur[0] = 0;
            for (i, &p) in pattern.iter().enumerate() {
                let cost = if p == c { 0 } else { 1 };
                cur[i + 1] = (prev[i] + cost).min(prev[i + 1] + 1).min(cur[i] + 1);
            }

            best = best.min(cur[len]);
            if best == 0 {
                break;
            }
            std::mem::swap(&mut prev, &mut cur);
        }

        best
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MATCH_THRESHOLD)
    }
}

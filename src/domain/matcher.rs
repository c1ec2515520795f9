//! Approximate label matching for the command palette.
//!
//! Labels are scored with a Bitap search that tolerates insertions, deletions
//! and substitutions. A score is `errors / pattern_len + drift / distance`,
//! where `drift` is how far the match starts from the expected location.
//! Lower is better; anything above the threshold is dropped.

use std::collections::HashMap;

use nucleo_matcher::chars;
use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::domain::commands::Command;

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_LOCATION: usize = 0;
pub const DEFAULT_DISTANCE: usize = 100;
pub const DEFAULT_MAX_PATTERN_LENGTH: usize = 20;
pub const DEFAULT_MIN_MATCH_CHAR_LENGTH: usize = 2;

/// Widest pattern the bit-vector search can represent.
pub const MAX_BITAP_WIDTH: usize = 32;

/// Score given to every hit of the token fallback used for over-long queries.
const TOKEN_MATCH_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub threshold: f64,
    pub location: usize,
    pub distance: usize,
    pub max_pattern_length: usize,
    pub min_match_char_length: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            location: DEFAULT_LOCATION,
            distance: DEFAULT_DISTANCE,
            max_pattern_length: DEFAULT_MAX_PATTERN_LENGTH,
            min_match_char_length: DEFAULT_MIN_MATCH_CHAR_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredIndex {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    options: MatchOptions,
}

enum PreparedQuery {
    Bitap {
        pattern: Vec<char>,
        alphabet: HashMap<char, u64>,
    },
    Tokens(Vec<Atom>),
}

impl FuzzyMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// Ranks `items` against `query`, returning references in best-first order.
    ///
    /// An empty query returns every item in its original order.
    pub fn search<'a>(&self, query: &str, items: &'a [Command]) -> Vec<&'a Command> {
        if query.is_empty() {
            return items.iter().collect();
        }
        self.rank(query, items)
            .into_iter()
            .map(|hit| &items[hit.index])
            .collect()
    }

    /// Scores every labeled item against a non-empty query.
    ///
    /// Hits are ordered by ascending score; equal scores keep input order.
    /// Unlabeled items never appear. An empty query yields no hits.
    pub fn rank(&self, query: &str, items: &[Command]) -> Vec<ScoredIndex> {
        let Some(prepared) = self.prepare(query) else {
            return Vec::new();
        };

        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();
        let mut hits: Vec<ScoredIndex> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let label = item.label()?;
                let score = match &prepared {
                    PreparedQuery::Bitap { pattern, alphabet } => {
                        self.bitap_score(pattern, alphabet, &fold(label))
                    }
                    PreparedQuery::Tokens(atoms) => {
                        let haystack = Utf32Str::new(label, &mut buf);
                        atoms
                            .iter()
                            .any(|atom| atom.score(haystack, &mut matcher).is_some())
                            .then_some(TOKEN_MATCH_SCORE)
                    }
                }?;
                Some(ScoredIndex { index, score })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }

    fn prepare(&self, query: &str) -> Option<PreparedQuery> {
        let pattern = fold(query);
        if pattern.is_empty() || pattern.len() < self.options.min_match_char_length {
            return None;
        }

        if pattern.len() > self.options.max_pattern_length.min(MAX_BITAP_WIDTH) {
            let atoms: Vec<Atom> = query
                .split_whitespace()
                .map(|token| {
                    Atom::new(
                        token,
                        CaseMatching::Ignore,
                        Normalization::Smart,
                        AtomKind::Substring,
                        false,
                    )
                })
                .collect();
            return Some(PreparedQuery::Tokens(atoms));
        }

        let mut alphabet = HashMap::new();
        let len = pattern.len();
        for (i, ch) in pattern.iter().enumerate() {
            *alphabet.entry(*ch).or_insert(0u64) |= 1u64 << (len - i - 1);
        }
        Some(PreparedQuery::Bitap { pattern, alphabet })
    }

    fn bitap_score(
        &self,
        pattern: &[char],
        alphabet: &HashMap<char, u64>,
        text: &[char],
    ) -> Option<f64> {
        if pattern == text {
            return Some(0.0);
        }

        let pattern_len = pattern.len() as i64;
        let text_len = text.len() as i64;
        let expected = self.options.location as i64;
        let mut threshold = self.options.threshold;

        if let Some(pos) = find_from(text, pattern, self.options.location) {
            threshold = threshold.min(self.location_score(0, pos as i64, pattern_len));
            if let Some(pos) = rfind_from(text, pattern, self.options.location + pattern.len()) {
                threshold = threshold.min(self.location_score(0, pos as i64, pattern_len));
            }
        }

        let mut best: Option<f64> = None;
        let mut last_bits: Vec<u64> = Vec::new();
        let mut bin_max = pattern_len + text_len;
        let mask = 1u64 << (pattern_len - 1);

        for errors in 0..pattern_len {
            // Widest drift from `expected` that could still beat the threshold.
            let mut bin_min = 0;
            let mut bin_mid = bin_max;
            while bin_min < bin_mid {
                if self.location_score(errors, expected + bin_mid, pattern_len) <= threshold {
                    bin_min = bin_mid;
                } else {
                    bin_max = bin_mid;
                }
                bin_mid = (bin_max - bin_min) / 2 + bin_min;
            }
            bin_max = bin_mid;

            let mut start = (expected - bin_mid + 1).max(1);
            let finish = (expected + bin_mid).min(text_len) + pattern_len;
            let mut bits = vec![0u64; (finish + 2) as usize];
            bits[(finish + 1) as usize] = (1u64 << errors) - 1;

            let previous = |idx: usize| last_bits.get(idx).copied().unwrap_or(0);
            let mut j = finish;
            while j >= start {
                let location = j - 1;
                let slot = j as usize;
                let char_match = text
                    .get(location as usize)
                    .and_then(|ch| alphabet.get(ch))
                    .copied()
                    .unwrap_or(0);

                bits[slot] = ((bits[slot + 1] << 1) | 1) & char_match;
                if errors != 0 {
                    bits[slot] |= (((previous(slot + 1) | previous(slot)) << 1) | 1)
                        | previous(slot + 1);
                }

                if bits[slot] & mask != 0 {
                    let score = self.location_score(errors, location, pattern_len);
                    if score <= threshold {
                        threshold = score;
                        best = Some(score);
                        if location <= expected {
                            break;
                        }
                        start = (2 * expected - location).max(1);
                    }
                }
                j -= 1;
            }

            if self.location_score(errors + 1, expected, pattern_len) > threshold {
                break;
            }
            last_bits = bits;
        }

        best.map(|score| if score == 0.0 { 0.001 } else { score })
    }

    fn location_score(&self, errors: i64, location: i64, pattern_len: i64) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        let proximity = (self.options.location as i64 - location).abs();
        if self.options.distance == 0 {
            return if proximity != 0 { 1.0 } else { accuracy };
        }
        accuracy + proximity as f64 / self.options.distance as f64
    }
}

/// Ranks `items` against `query` with the default options.
pub fn search<'a>(query: &str, items: &'a [Command]) -> Vec<&'a Command> {
    FuzzyMatcher::default().search(query, items)
}

fn fold(text: &str) -> Vec<char> {
    chars::graphemes(text)
        .map(chars::normalize)
        .map(chars::to_lower_case)
        .collect()
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.len() > text.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&i| text[i..i + pattern.len()] == *pattern)
}

fn rfind_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.len() > text.len() {
        return None;
    }
    let last = from.min(text.len() - pattern.len());
    (0..=last)
        .rev()
        .find(|&i| text[i..i + pattern.len()] == *pattern)
}

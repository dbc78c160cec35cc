//! Whole-word, case-insensitive multi-keyword matching

use crate::error::{Result, ResumeAnalyzerError};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;

/// Finds which of a fixed list of keywords occur in a text.
///
/// A hit only counts when it is not glued to surrounding word characters,
/// so `Java` is not found inside `JavaScript` and `C` not inside `C++`.
/// Spelling variants (`machine-learning`, `CI-CD`) map back to the
/// keyword they were generated from.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    automaton: Option<AhoCorasick>,
    /// Pattern id → keyword index
    pattern_keywords: Vec<usize>,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let keywords: Vec<String> = keywords.iter().map(|k| k.as_ref().trim().to_string()).collect();

        let mut patterns = Vec::new();
        let mut pattern_keywords = Vec::new();
        for (idx, keyword) in keywords.iter().enumerate() {
            for variant in spelling_variants(keyword) {
                patterns.push(variant);
                pattern_keywords.push(idx);
            }
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            // Standard semantics are required for overlapping iteration
            let automaton = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&patterns)
                .map_err(|e| ResumeAnalyzerError::Processing(format!("Failed to build keyword matcher: {}", e)))?;
            Some(automaton)
        };

        Ok(Self {
            automaton,
            pattern_keywords,
            keywords,
        })
    }

    /// Indices of the keywords found in `text`, ascending
    pub fn find_indices(&self, text: &str) -> Vec<usize> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };

        let mut found = vec![false; self.keywords.len()];
        for mat in automaton.find_overlapping_iter(text) {
            if is_word_bounded(text, mat.start(), mat.end()) {
                found[self.pattern_keywords[mat.pattern().as_usize()]] = true;
            }
        }

        found
            .iter()
            .enumerate()
            .filter_map(|(idx, hit)| hit.then_some(idx))
            .collect()
    }

    /// Keywords found in `text`, in declaration order
    pub fn find(&self, text: &str) -> Vec<&str> {
        self.find_indices(text)
            .into_iter()
            .map(|idx| self.keywords[idx].as_str())
            .collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

/// The keyword plus its space/hyphen/slash spellings, deduplicated
fn spelling_variants(keyword: &str) -> Vec<String> {
    if keyword.is_empty() {
        return Vec::new();
    }

    let candidates = [
        keyword.to_string(),
        keyword.replace(' ', "-"),
        keyword.replace('-', " "),
        keyword.replace('/', "-"),
        keyword.replace('/', " "),
    ];

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|v| seen.insert(v.to_lowercase()))
        .collect()
}

//! Job profile matching and scoring

use crate::error::Result;
use crate::processing::keyword_matcher::KeywordMatcher;
use crate::processing::sections::{SectionKind, SectionMap};
use crate::processing::taxonomy::JobProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Job match weights, version 1.
///
/// Changing any value changes every historical score; bump
/// [`MatchWeights::version`] when doing so.
pub const MATCH_WEIGHTS: MatchWeights = MatchWeights {
    version: 1,
    required: 0.60,
    preferred: 0.25,
    context: 0.15,
};

/// Sections whose mention of a keyword counts as contextual evidence
const CONTEXT_SECTIONS: [SectionKind; 3] = [
    SectionKind::Skills,
    SectionKind::Experience,
    SectionKind::Projects,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub version: u32,
    pub required: f64,
    pub preferred: f64,
    pub context: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchResult {
    pub profile: String,
    pub score: f64,
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
}

struct CompiledProfile {
    name: String,
    required: KeywordMatcher,
    preferred: KeywordMatcher,
    all: KeywordMatcher,
}

/// Scores a resume against every configured job profile
pub struct JobProfileMatcher {
    profiles: Vec<CompiledProfile>,
    weights: MatchWeights,
}

impl JobProfileMatcher {
    pub fn new(profiles: &[JobProfile]) -> Result<Self> {
        let profiles = profiles
            .iter()
            .map(|profile| {
                Ok(CompiledProfile {
                    name: profile.name.clone(),
                    required: KeywordMatcher::new(&profile.required)?,
                    preferred: KeywordMatcher::new(&profile.preferred)?,
                    all: KeywordMatcher::new(&profile.all_keywords())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            profiles,
            weights: MATCH_WEIGHTS,
        })
    }

    /// One result per profile, in declaration order.
    ///
    /// Matched and missing keywords are computed over the whole text;
    /// sections only feed the context component of the score.
    pub fn match_profiles(&self, text: &str, sections: &SectionMap) -> Vec<JobMatchResult> {
        let context_text = CONTEXT_SECTIONS
            .iter()
            .filter_map(|kind| sections.get(kind))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        self.profiles
            .iter()
            .map(|profile| self.match_profile(profile, text, &context_text))
            .collect()
    }

    fn match_profile(&self, profile: &CompiledProfile, text: &str, context_text: &str) -> JobMatchResult {
        let (matched_required, missing_required) = split_found(&profile.required, text);
        let (matched_preferred, missing_preferred) = split_found(&profile.preferred, text);

        let required_coverage = coverage(matched_required.len(), profile.required.len());
        let preferred_coverage = coverage(matched_preferred.len(), profile.preferred.len());
        let context_coverage = if profile.all.is_empty() {
            0.0
        } else {
            profile.all.find_indices(context_text).len() as f64 / profile.all.len() as f64
        };

        let raw = 100.0
            * (self.weights.required * required_coverage
                + self.weights.preferred * preferred_coverage
                + self.weights.context * context_coverage);

        JobMatchResult {
            profile: profile.name.clone(),
            score: round1(raw.clamp(0.0, 100.0)),
            matched_required,
            missing_required,
            matched_preferred,
            missing_preferred,
        }
    }

    pub fn weights(&self) -> MatchWeights {
        self.weights
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

/// Highest-scoring match; on equal scores the earliest declared profile wins
pub fn best_match(matches: &[JobMatchResult]) -> Option<&JobMatchResult> {
    let mut best: Option<&JobMatchResult> = None;
    for candidate in matches {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// (found, missing) keywords, both in declared order
fn split_found(matcher: &KeywordMatcher, text: &str) -> (Vec<String>, Vec<String>) {
    let found: HashSet<usize> = matcher.find_indices(text).into_iter().collect();
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for (idx, keyword) in matcher.keywords().iter().enumerate() {
        if found.contains(&idx) {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }
    (matched, missing)
}

/// Fraction of a keyword list found; an empty list is fully covered
fn coverage(found: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        found as f64 / total as f64
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sections::SectionParser;

    fn profile(name: &str, required: &[&str], preferred: &[&str]) -> JobProfile {
        JobProfile {
            name: name.to_string(),
            required: required.iter().map(|s| s.to_string()).collect(),
            preferred: preferred.iter().map(|s| s.to_string()).collect(),
            weight: 1.0,
        }
    }

    fn result(name: &str, score: f64) -> JobMatchResult {
        JobMatchResult {
            profile: name.to_string(),
            score,
            matched_required: vec![],
            missing_required: vec![],
            matched_preferred: vec![],
            missing_preferred: vec![],
        }
    }

    #[test]
    fn test_match_weights_are_pinned() {
        assert_eq!(MATCH_WEIGHTS.version, 1);
        assert_eq!(MATCH_WEIGHTS.required, 0.60);
        assert_eq!(MATCH_WEIGHTS.preferred, 0.25);
        assert_eq!(MATCH_WEIGHTS.context, 0.15);
        assert!(MATCH_WEIGHTS.required >= 2.0 * MATCH_WEIGHTS.preferred);
    }

    #[test]
    fn test_missing_required_keyword() {
        let matcher = JobProfileMatcher::new(&[profile("Analyst", &["Python", "SQL"], &[])]).unwrap();

        let partial_text = "Skills\nPython";
        let partial = &matcher.match_profiles(partial_text, &SectionParser::default().parse(partial_text))[0];
        assert_eq!(partial.missing_required, vec!["SQL".to_string()]);
        assert_eq!(partial.matched_required, vec!["Python".to_string()]);

        let full_text = "Skills\nPython, SQL";
        let full = &matcher.match_profiles(full_text, &SectionParser::default().parse(full_text))[0];
        assert!(full.missing_required.is_empty());
        assert!(partial.score < full.score);
        assert_eq!(full.score, 100.0);
    }

    #[test]
    fn test_keywords_outside_sections_still_match() {
        let matcher = JobProfileMatcher::new(&[profile("Dev", &["Rust"], &["Docker"])]).unwrap();
        let text = "Rust developer who loves Docker";
        let matches = matcher.match_profiles(text, &SectionMap::new());

        assert!(matches[0].missing_required.is_empty());
        assert!(matches[0].missing_preferred.is_empty());
        // No context evidence: 60 + 25
        assert_eq!(matches[0].score, 85.0);
    }

    #[test]
    fn test_required_weighs_more_than_preferred() {
        let matcher = JobProfileMatcher::new(&[profile("Dev", &["Rust"], &["Docker"])]).unwrap();
        let sections = SectionMap::new();

        let only_required = matcher.match_profiles("Rust", &sections)[0].score;
        let only_preferred = matcher.match_profiles("Docker", &sections)[0].score;
        assert!(only_required > only_preferred);
    }

    #[test]
    fn test_matched_and_missing_partition_declared_lists() {
        let profiles = crate::processing::taxonomy::Registry::default().profiles;
        let matcher = JobProfileMatcher::new(&profiles).unwrap();
        let text = "Python SQL Docker React machine-learning Excel";

        for (profile, result) in profiles.iter().zip(matcher.match_profiles(text, &SectionMap::new())) {
            let mut required: Vec<String> = result.matched_required.clone();
            required.extend(result.missing_required.iter().cloned());
            required.sort();
            let mut declared = profile.required.clone();
            declared.sort();
            assert_eq!(required, declared);
            assert!(result.matched_required.iter().all(|k| !result.missing_required.contains(k)));

            let mut preferred: Vec<String> = result.matched_preferred.clone();
            preferred.extend(result.missing_preferred.iter().cloned());
            preferred.sort();
            let mut declared = profile.preferred.clone();
            declared.sort();
            assert_eq!(preferred, declared);
        }
    }

    #[test]
    fn test_missing_lists_keep_declared_order() {
        let matcher = JobProfileMatcher::new(&[profile("Dev", &["Zig", "Ada", "Rust", "Nim"], &[])]).unwrap();
        let result = &matcher.match_profiles("Rust", &SectionMap::new())[0];
        assert_eq!(result.missing_required, vec!["Zig", "Ada", "Nim"]);
    }

    #[test]
    fn test_best_match_first_declared_wins_ties() {
        let matches = vec![result("A", 40.0), result("B", 75.5), result("C", 75.5)];
        assert_eq!(best_match(&matches).unwrap().profile, "B");

        let matches = vec![result("A", 10.0), result("B", 10.0)];
        assert_eq!(best_match(&matches).unwrap().profile, "A");

        assert!(best_match(&[]).is_none());
    }

    #[test]
    fn test_empty_text_scores_are_bounded() {
        let matcher = JobProfileMatcher::new(&crate::processing::taxonomy::Registry::default().profiles).unwrap();
        for result in matcher.match_profiles("", &SectionMap::new()) {
            assert!(result.score >= 0.0 && result.score <= 100.0);
            assert!(result.matched_required.is_empty());
        }
    }
}

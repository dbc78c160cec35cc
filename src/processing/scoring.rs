//! Composite ATS compatibility score

use crate::error::Result;
use crate::processing::job_matcher::{best_match, round1, JobMatchResult};
use crate::processing::keyword_analyzer::TechnicalKeywordAnalyzer;
use crate::processing::sections::{SectionKind, SectionMap};
use crate::processing::taxonomy::KeywordCategory;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};

/// Composite weights, version 1. They sum to 1.0.
///
/// Job alignment enters unscaled; its 0.20 weight is the fixed factor that
/// keeps it below structural completeness in the composite.
pub const SCORING_WEIGHTS: ScoringWeights = ScoringWeights {
    version: 1,
    section_completeness: 0.35,
    keyword_density: 0.25,
    job_alignment: 0.20,
    formatting: 0.20,
};

/// Keyword hits per 100 words that earn the full density score
const TARGET_KEYWORDS_PER_100_WORDS: f64 = 3.0;

/// Words a core section needs before it counts as complete
const MIN_SECTION_WORDS: usize = 5;

const MIN_TOTAL_WORDS: usize = 150;
const MAX_TOTAL_WORDS: usize = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub version: u32,
    pub section_completeness: f64,
    pub keyword_density: f64,
    pub job_alignment: f64,
    pub formatting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub section_completeness: f64,
    pub keyword_density: f64,
    pub job_alignment: f64,
    pub formatting: f64,
    pub weights_version: u32,
}

pub struct AtsScoreCalculator {
    keyword_analyzer: TechnicalKeywordAnalyzer,
    processor: TextProcessor,
    weights: ScoringWeights,
}

impl AtsScoreCalculator {
    pub fn new(categories: &[KeywordCategory]) -> Result<Self> {
        Ok(Self {
            keyword_analyzer: TechnicalKeywordAnalyzer::new(categories)?,
            processor: TextProcessor::new(),
            weights: SCORING_WEIGHTS,
        })
    }

    /// Composite score in [0, 100] and its per-component breakdown.
    ///
    /// The composite is computed from unrounded components and rounded once;
    /// breakdown entries are rounded individually.
    pub fn calculate(&self, text: &str, sections: &SectionMap, job_matches: &[JobMatchResult]) -> (f64, ScoreBreakdown) {
        let completeness = self.section_completeness(sections);
        let density = self.keyword_density(text);
        let alignment = best_match(job_matches).map_or(0.0, |m| m.score);
        let formatting = self.formatting(text);

        let composite = self.weights.section_completeness * completeness
            + self.weights.keyword_density * density
            + self.weights.job_alignment * alignment
            + self.weights.formatting * formatting;

        let breakdown = ScoreBreakdown {
            section_completeness: round1(completeness),
            keyword_density: round1(density),
            job_alignment: round1(alignment),
            formatting: round1(formatting),
            weights_version: self.weights.version,
        };

        (round1(composite.clamp(0.0, 100.0)), breakdown)
    }

    fn section_completeness(&self, sections: &SectionMap) -> f64 {
        let complete = SectionKind::CORE
            .iter()
            .filter(|kind| {
                sections
                    .get(*kind)
                    .is_some_and(|content| self.processor.word_count(content) >= MIN_SECTION_WORDS)
            })
            .count();

        100.0 * complete as f64 / SectionKind::CORE.len() as f64
    }

    fn keyword_density(&self, text: &str) -> f64 {
        let words = self.processor.word_count(text);
        if words == 0 {
            return 0.0;
        }

        let hits = TechnicalKeywordAnalyzer::total_found(&self.keyword_analyzer.analyze(text));
        let per_100 = hits as f64 * 100.0 / words as f64;
        100.0 * (per_100 / TARGET_KEYWORDS_PER_100_WORDS).min(1.0)
    }

    fn formatting(&self, text: &str) -> f64 {
        let words = self.processor.word_count(text);
        let checks = [
            self.processor.has_email(text),
            self.processor.has_phone(text),
            text.lines().any(|line| self.processor.is_bullet_line(line)),
            (MIN_TOTAL_WORDS..=MAX_TOTAL_WORDS).contains(&words),
        ];

        25.0 * checks.iter().filter(|passed| **passed).count() as f64
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::taxonomy::Registry;

    fn calculator() -> AtsScoreCalculator {
        AtsScoreCalculator::new(&Registry::default().categories).unwrap()
    }

    fn job_match(name: &str, score: f64) -> JobMatchResult {
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
    fn test_scoring_weights_are_pinned() {
        assert_eq!(SCORING_WEIGHTS.version, 1);
        assert_eq!(SCORING_WEIGHTS.section_completeness, 0.35);
        assert_eq!(SCORING_WEIGHTS.keyword_density, 0.25);
        assert_eq!(SCORING_WEIGHTS.job_alignment, 0.20);
        assert_eq!(SCORING_WEIGHTS.formatting, 0.20);

        let sum = SCORING_WEIGHTS.section_completeness
            + SCORING_WEIGHTS.keyword_density
            + SCORING_WEIGHTS.job_alignment
            + SCORING_WEIGHTS.formatting;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let (score, breakdown) = calculator().calculate("", &SectionMap::new(), &[]);
        assert_eq!(score, 0.0);
        assert_eq!(breakdown.keyword_density, 0.0);
        assert_eq!(breakdown.weights_version, 1);
    }

    #[test]
    fn test_section_completeness_counts_substantial_core_sections() {
        let mut sections = SectionMap::new();
        sections.insert(SectionKind::Skills, "Rust, Python, Go, SQL, Docker".to_string());
        sections.insert(SectionKind::Summary, "Too short".to_string());
        sections.insert(SectionKind::Certifications, "AWS Certified Solutions Architect Associate".to_string());

        let (_, breakdown) = calculator().calculate("", &sections, &[]);
        assert_eq!(breakdown.section_completeness, 20.0);
    }

    #[test]
    fn test_keyword_density_saturates() {
        let (_, breakdown) = calculator().calculate("Python Rust Docker AWS", &SectionMap::new(), &[]);
        assert_eq!(breakdown.keyword_density, 100.0);

        let sparse = format!("Python {}", "word ".repeat(99));
        let (_, breakdown) = calculator().calculate(&sparse, &SectionMap::new(), &[]);
        assert_eq!(breakdown.keyword_density, 33.3);
    }

    #[test]
    fn test_job_alignment_uses_best_match() {
        let matches = vec![job_match("A", 42.0), job_match("B", 77.5)];
        let (score, breakdown) = calculator().calculate("", &SectionMap::new(), &matches);
        assert_eq!(breakdown.job_alignment, 77.5);
        assert_eq!(score, 15.5);
    }

    #[test]
    fn test_formatting_signals() {
        let text = "jane@example.com\n(555) 123-4567\n- Built things";
        let (_, breakdown) = calculator().calculate(text, &SectionMap::new(), &[]);
        assert_eq!(breakdown.formatting, 75.0);
    }

    #[test]
    fn test_composite_is_bounded() {
        let text = "Python ".repeat(400);
        let matches = vec![job_match("A", 100.0)];
        let (score, _) = calculator().calculate(&text, &SectionMap::new(), &matches);
        assert!((0.0..=100.0).contains(&score));
    }
}

//! Analysis engine wiring sections, keywords, job matching, scoring and recommendations

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::job_matcher::{best_match, round1, JobMatchResult, JobProfileMatcher};
use crate::processing::keyword_analyzer::{KeywordFindings, TechnicalKeywordAnalyzer};
use crate::processing::recommendations::{RecommendationEngine, Recommendations};
use crate::processing::scoring::{AtsScoreCalculator, ScoreBreakdown};
use crate::processing::section_quality::{QualityRules, SectionAnalysis, SectionQualityAnalyzer};
use crate::processing::sections::{SectionKind, SectionParser};
use crate::processing::taxonomy::Registry;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

/// Headroom added to the score for `improvement_potential`, and its cap
const IMPROVEMENT_HEADROOM: f64 = 15.0;
const IMPROVEMENT_CAP: f64 = 95.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub report_id: String,
    pub ats_score: f64,
    pub best_job_match: Option<String>,
    pub match_percentage: f64,
    pub tech_keywords_found: usize,
    pub improvement_potential: f64,
    pub total_words: usize,
    pub job_matches: Vec<JobMatchResult>,
    pub sections: BTreeMap<SectionKind, SectionAnalysis>,
    pub score_breakdown: ScoreBreakdown,
    pub recommendations: Recommendations,
    pub tech_keywords: KeywordFindings,
}

impl AnalysisResult {
    /// The job match named by `best_job_match`
    pub fn best_match(&self) -> Option<&JobMatchResult> {
        let name = self.best_job_match.as_deref()?;
        self.job_matches.iter().find(|m| m.profile == name)
    }
}

/// Runs the whole analysis pipeline over one resume text.
///
/// The engine is immutable once built: matchers are compiled from the
/// registry up front and `analyze` takes `&self`, so one engine can be
/// shared across threads.
pub struct AnalysisEngine {
    registry: Registry,
    processor: TextProcessor,
    section_parser: SectionParser,
    keyword_analyzer: TechnicalKeywordAnalyzer,
    job_matcher: JobProfileMatcher,
    quality_analyzer: SectionQualityAnalyzer,
    score_calculator: AtsScoreCalculator,
}

impl AnalysisEngine {
    pub fn new(registry: Registry, quality_rules: QualityRules) -> Result<Self> {
        registry.validate()?;

        let engine = Self {
            processor: TextProcessor::new(),
            section_parser: SectionParser::new(&registry.headings),
            keyword_analyzer: TechnicalKeywordAnalyzer::new(&registry.categories)?,
            job_matcher: JobProfileMatcher::new(&registry.profiles)?,
            quality_analyzer: SectionQualityAnalyzer::new(quality_rules),
            score_calculator: AtsScoreCalculator::new(&registry.categories)?,
            registry,
        };

        log::debug!(
            "Analysis engine ready: {} keyword categories ({} keywords), {} job profiles",
            engine.keyword_analyzer.category_count(),
            engine.keyword_analyzer.keyword_count(),
            engine.job_matcher.profile_count()
        );

        Ok(engine)
    }

    /// Analyze resume text.
    ///
    /// A panic anywhere in the pipeline is reported as
    /// [`ResumeAnalyzerError::InternalAnalysis`]; no partial result is returned.
    pub fn analyze(&self, text: &str, report_id: &str) -> Result<AnalysisResult> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(text, report_id))) {
            Ok(result) => Ok(result),
            Err(_) => {
                log::error!("Analysis pipeline panicked for report {}", report_id);
                Err(ResumeAnalyzerError::InternalAnalysis(
                    "analysis pipeline aborted".to_string(),
                ))
            }
        }
    }

    fn run_pipeline(&self, text: &str, report_id: &str) -> AnalysisResult {
        let text = self.processor.normalize(text);
        let total_words = self.processor.word_count(&text);

        let sections = self.section_parser.parse(&text);
        if sections.is_empty() {
            log::warn!("No sections detected in resume text ({} words)", total_words);
        } else {
            log::debug!(
                "Detected sections: {}",
                sections.keys().map(SectionKind::as_str).collect::<Vec<_>>().join(", ")
            );
        }

        let tech_keywords = self.keyword_analyzer.analyze(&text);
        let tech_keywords_found = TechnicalKeywordAnalyzer::total_found(&tech_keywords);

        let job_matches = self.job_matcher.match_profiles(&text, &sections);

        let mut section_analyses = BTreeMap::new();
        for (kind, content) in &sections {
            section_analyses.insert(*kind, self.quality_analyzer.analyze(*kind, content));
        }
        for kind in SectionKind::EXPECTED {
            section_analyses
                .entry(kind)
                .or_insert_with(|| self.quality_analyzer.analyze_missing(kind));
        }

        let (ats_score, score_breakdown) = self.score_calculator.calculate(&text, &sections, &job_matches);
        let recommendations = RecommendationEngine::generate(&job_matches, &section_analyses, ats_score);

        let best = best_match(&job_matches);
        let best_job_match = best.map(|m| m.profile.clone());
        let match_percentage = best.map_or(0.0, |m| m.score);

        log::info!(
            "Analysis {}: ATS score {:.1}, best match {} ({:.1}%), {} keywords",
            report_id,
            ats_score,
            best_job_match.as_deref().unwrap_or("none"),
            match_percentage,
            tech_keywords_found
        );

        AnalysisResult {
            report_id: report_id.to_string(),
            ats_score,
            best_job_match,
            match_percentage,
            tech_keywords_found,
            improvement_potential: round1((ats_score + IMPROVEMENT_HEADROOM).min(IMPROVEMENT_CAP)),
            total_words,
            job_matches,
            sections: section_analyses,
            score_breakdown,
            recommendations,
            tech_keywords,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

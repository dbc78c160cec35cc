//! Plain-text analysis report artifact

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::analyzer::AnalysisResult;
use crate::processing::sections::SectionKind;
use std::path::{Path, PathBuf};

const REPORT_SUFFIX: &str = "_analysis_report.txt";
const NOT_AVAILABLE: &str = "N/A";
const NONE: &str = "None";

/// Renders and stores the downloadable report.
///
/// Rendering is deterministic: the report carries no timestamps, so the
/// same result always produces the same bytes.
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(result: &AnalysisResult, raw_text: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str("RESUME ATS ANALYSIS REPORT\n");
        output.push_str(&"=".repeat(26));
        output.push_str("\n\n");

        output.push_str(&format!("Report ID: {}\n", result.report_id));
        output.push_str(&format!("ATS Score: {:.1} / 100\n", result.ats_score));
        output.push_str(&format!("Improvement Potential: {:.1}\n", result.improvement_potential));
        let best = match &result.best_job_match {
            Some(name) => format!("{} ({:.1}%)", name, result.match_percentage),
            None => NOT_AVAILABLE.to_string(),
        };
        output.push_str(&format!("Best Job Match: {}\n", best));
        output.push_str(&format!("Total Words: {}\n", result.total_words));
        output.push_str(&format!("Technical Keywords Found: {}\n", result.tech_keywords_found));

        Self::heading(&mut output, &format!("SCORE BREAKDOWN (weights v{})", result.score_breakdown.weights_version));
        let breakdown = &result.score_breakdown;
        output.push_str(&format!("Section Completeness: {:.1}\n", breakdown.section_completeness));
        output.push_str(&format!("Keyword Density: {:.1}\n", breakdown.keyword_density));
        output.push_str(&format!("Job Alignment: {:.1}\n", breakdown.job_alignment));
        output.push_str(&format!("Formatting: {:.1}\n", breakdown.formatting));

        Self::heading(&mut output, "JOB PROFILE MATCHES");
        if result.job_matches.is_empty() {
            output.push_str(&format!("{}\n", NONE));
        }
        for job_match in &result.job_matches {
            output.push_str(&format!("{}: {:.1}\n", job_match.profile, job_match.score));
            output.push_str(&format!("  Matched required: {}\n", Self::list(&job_match.matched_required)));
            output.push_str(&format!("  Missing required: {}\n", Self::list(&job_match.missing_required)));
            output.push_str(&format!("  Matched preferred: {}\n", Self::list(&job_match.matched_preferred)));
            output.push_str(&format!("  Missing preferred: {}\n", Self::list(&job_match.missing_preferred)));
        }

        Self::heading(&mut output, "SECTION ANALYSIS");
        for (kind, analysis) in &result.sections {
            let metrics = &analysis.metrics;
            output.push_str(&format!("{} [{}]\n", kind.title(), analysis.improvement_priority.as_str()));
            output.push_str(&format!(
                "  Words: {} | Lines: {} | Bullets: {} | Quantified: {} | Action verbs: {}",
                metrics.word_count,
                metrics.line_count,
                metrics.bullet_lines,
                metrics.quantified_lines,
                metrics.action_verb_lines
            ));
            if *kind == SectionKind::Skills {
                output.push_str(&format!(" | Listed items: {}", metrics.listed_items));
            }
            output.push('\n');

            if analysis.issues.is_empty() {
                output.push_str("  No issues found\n");
            }
            for issue in &analysis.issues {
                output.push_str(&format!("  - [{}] {}\n", issue.severity.as_str(), issue.message));
            }
        }

        Self::heading(&mut output, "TECHNICAL KEYWORDS");
        if result.tech_keywords.is_empty() {
            output.push_str(&format!("{}\n", NONE));
        }
        for (category, keywords) in &result.tech_keywords {
            output.push_str(&format!("{}: {}\n", category, Self::list(keywords)));
        }

        Self::heading(&mut output, "RECOMMENDATIONS");
        let recommendations = &result.recommendations;
        for (label, items) in [
            ("Critical", &recommendations.critical),
            ("High", &recommendations.high),
            ("Medium", &recommendations.medium),
        ] {
            output.push_str(&format!("{}:\n", label));
            if items.is_empty() {
                output.push_str(&format!("  {}\n", NONE));
            }
            for item in items {
                output.push_str(&format!("  - {}\n", item));
            }
        }

        if let Some(text) = raw_text {
            Self::heading(&mut output, "EXTRACTED TEXT");
            output.push_str(if text.is_empty() { NOT_AVAILABLE } else { text });
            output.push('\n');
        }

        output
    }

    /// Write `content` as the report for `report_id`, creating `dir` if needed
    pub async fn save_report(dir: &Path, report_id: &str, content: &str) -> Result<PathBuf> {
        let path = Self::report_path(dir, report_id)?;
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, content).await?;
        log::info!("Report saved to {}", path.display());
        Ok(path)
    }

    pub async fn load_report(dir: &Path, report_id: &str) -> Result<String> {
        let path = Self::report_path(dir, report_id)?;
        if !path.exists() {
            return Err(ResumeAnalyzerError::ReportNotFound(report_id.to_string()));
        }
        Ok(tokio::fs::read_to_string(&path).await?)
    }

    pub fn report_path(dir: &Path, report_id: &str) -> Result<PathBuf> {
        Self::validate_report_id(report_id)?;
        Ok(dir.join(format!("{}{}", report_id, REPORT_SUFFIX)))
    }

    /// Report ids are limited to ASCII alphanumerics, `-` and `_`
    pub fn validate_report_id(report_id: &str) -> Result<()> {
        let valid = !report_id.is_empty()
            && report_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(())
        } else {
            Err(ResumeAnalyzerError::InvalidInput(format!(
                "Invalid report id: {:?}",
                report_id
            )))
        }
    }

    fn heading(output: &mut String, title: &str) {
        output.push('\n');
        output.push_str(title);
        output.push('\n');
        output.push_str(&"-".repeat(title.chars().count()));
        output.push('\n');
    }

    fn list(items: &[String]) -> String {
        if items.is_empty() {
            NONE.to_string()
        } else {
            items.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::section_quality::QualityRules;
    use crate::processing::taxonomy::Registry;
    use tempfile::TempDir;

    fn analyze(text: &str, registry: Registry) -> AnalysisResult {
        AnalysisEngine::new(registry, QualityRules::default())
            .unwrap()
            .analyze(text, "test-report")
            .unwrap()
    }

    #[test]
    fn test_render_is_deterministic() {
        let text = "Summary\nRust engineer.\n\nSkills\nRust, Python, Docker";
        let result = analyze(text, Registry::default());

        let first = ReportRenderer::render(&result, Some(text));
        let second = ReportRenderer::render(&result, Some(text));
        assert_eq!(first, second);
        assert!(first.contains("Report ID: test-report"));
        assert!(first.contains("EXTRACTED TEXT"));
    }

    #[test]
    fn test_render_without_profiles_uses_placeholders() {
        let registry = Registry {
            profiles: vec![],
            ..Registry::default()
        };
        let result = analyze("", registry);
        let report = ReportRenderer::render(&result, None);

        assert!(report.contains("Best Job Match: N/A"));
        assert!(report.contains("JOB PROFILE MATCHES\n-------------------\nNone\n"));
        assert!(!report.contains("EXTRACTED TEXT"));
    }

    #[test]
    fn test_report_id_validation() {
        assert!(ReportRenderer::validate_report_id("3f2b-41_ab").is_ok());
        assert!(ReportRenderer::validate_report_id("").is_err());
        assert!(ReportRenderer::validate_report_id("../etc/passwd").is_err());
        assert!(ReportRenderer::validate_report_id("a b").is_err());
    }

    #[tokio::test]
    async fn test_save_and_load_report() {
        let dir = TempDir::new().unwrap();
        let path = ReportRenderer::save_report(dir.path(), "abc-123", "report body")
            .await
            .unwrap();

        assert!(path.ends_with("abc-123_analysis_report.txt"));
        let loaded = ReportRenderer::load_report(dir.path(), "abc-123").await.unwrap();
        assert_eq!(loaded, "report body");
    }

    #[tokio::test]
    async fn test_load_missing_report() {
        let dir = TempDir::new().unwrap();
        let err = ReportRenderer::load_report(dir.path(), "missing").await.unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::ReportNotFound(_)));
    }
}

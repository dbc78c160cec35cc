//! Integration tests for the resume analyzer

use resume_ats::config::OutputFormat;
use resume_ats::input::manager::InputManager;
use resume_ats::output::{ReportGenerator, ReportRenderer};
use resume_ats::processing::analyzer::AnalysisEngine;
use resume_ats::processing::section_quality::{Priority, QualityRules};
use resume_ats::processing::sections::SectionKind;
use resume_ats::processing::taxonomy::Registry;
use resume_ats::ResumeAnalyzerError;
use std::path::Path;
use tempfile::TempDir;

fn default_engine() -> AnalysisEngine {
    AnalysisEngine::new(Registry::default(), QualityRules::default()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    // First extraction
    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Second extraction should use cache
    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_blank_document_fails_extraction() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/blank_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::ExtractionFailed(_))));
}

#[tokio::test]
async fn test_pdf_pages_extracted_in_order() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/two_page_resume.pdf"))
        .await
        .unwrap();

    let first_page = text.find("SUMMARY").expect("page one text");
    let second_page = text.find("EDUCATION").expect("page two text");
    assert!(text.contains("Jane Roe"));
    assert!(first_page < second_page);
    assert!(text.find("EXPERIENCE").unwrap() < second_page);

    let result = default_engine().analyze(&text, "pdf").unwrap();
    assert!(result.total_words > 0);
    assert!(result.tech_keywords_found >= 3);
    assert!(result.best_job_match.is_some());
}

#[tokio::test]
async fn test_full_analysis_of_sample_resume() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let result = default_engine().analyze(&text, "sample").unwrap();

    for kind in [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
    ] {
        assert!(result.sections.contains_key(&kind), "missing {}", kind);
        assert_ne!(result.sections[&kind].improvement_priority, Priority::Critical);
    }

    assert_eq!(result.best_job_match.as_deref(), Some("Full Stack Developer"));
    assert!(result.ats_score > 50.0 && result.ats_score <= 100.0);
    assert_eq!(result.score_breakdown.section_completeness, 100.0);
    assert_eq!(result.score_breakdown.formatting, 100.0);
    assert!(result.tech_keywords["frameworks"].contains(&"Node.js".to_string()));
    assert!(result.tech_keywords_found >= 20);

    // Hobbies are not part of any canonical section
    let skills = &result.sections[&SectionKind::Skills];
    assert!(skills.metrics.listed_items >= 16);
}

#[test]
fn test_custom_registry_from_file() {
    let registry = Registry::from_file(Path::new("tests/fixtures/registry.toml")).unwrap();
    assert_eq!(registry.profiles.len(), 2);

    let engine = AnalysisEngine::new(registry, QualityRules::default()).unwrap();
    let result = engine
        .analyze("Skills\nSQL, Excel, Tableau and a little Python", "custom")
        .unwrap();

    assert_eq!(result.best_job_match.as_deref(), Some("Data Analyst"));
    assert_eq!(result.job_matches[0].profile, "Data Analyst");
    assert!(result.job_matches[0].missing_required.is_empty());
    assert_eq!(result.job_matches[1].missing_required, vec!["Rust".to_string()]);
    assert_eq!(result.tech_keywords.len(), 2);
}

#[test]
fn test_concurrent_analyses_agree() {
    let engine = std::sync::Arc::new(default_engine());
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            let text = text.clone();
            std::thread::spawn(move || engine.analyze(&text, "shared").unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_report_round_trip() {
    let dir = TempDir::new().unwrap();
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let result = default_engine().analyze(&text, "round-trip").unwrap();

    let content = ReportRenderer::render(&result, Some(&text));
    ReportRenderer::save_report(dir.path(), "round-trip", &content)
        .await
        .unwrap();

    let loaded = ReportRenderer::load_report(dir.path(), "round-trip").await.unwrap();
    assert_eq!(loaded, content);
    assert_eq!(ReportRenderer::render(&result, Some(&text)), loaded);

    let missing = ReportRenderer::load_report(dir.path(), "other").await;
    assert!(matches!(missing, Err(ResumeAnalyzerError::ReportNotFound(_))));
}

#[test]
fn test_json_output_shape() {
    let text = std::fs::read_to_string("tests/fixtures/sample_resume.txt").unwrap();
    let result = default_engine().analyze(&text, "json").unwrap();

    let json = ReportGenerator::with_options(false, true, None)
        .generate(&result, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["report_id"], "json");
    assert!(value["job_matches"].as_array().unwrap().len() >= 1);
    assert!(value["recommendations"]["medium"].as_array().unwrap().len() == 5);
    assert_eq!(value["score_breakdown"]["weights_version"], 1);
}

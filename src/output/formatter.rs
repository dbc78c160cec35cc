//! Output formatters for the CLI

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::ReportRenderer;
use crate::processing::analyzer::AnalysisResult;
use crate::processing::section_quality::Priority;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored console summary
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integrations
pub struct JsonFormatter {
    pretty: bool,
}

/// Full plain-text report, identical to the saved artifact
pub struct TextFormatter {
    raw_text: Option<String>,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    text_formatter: TextFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score.round() as u8 {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::Critical => Color::Red,
            Priority::High => Color::Yellow,
            Priority::Medium => Color::Blue,
            Priority::Low => Color::Green,
        };
        self.colorize(priority.as_str(), color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header("📊 RESUME ATS ANALYSIS", 1));
        output.push_str(&format!(
            "Analyzed: {} | Report ID: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            result.report_id
        ));

        // Summary
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "ATS Score: {:.1}% {}\n",
            result.ats_score,
            self.format_score_badge(result.ats_score)
        ));
        output.push_str(&format!("Improvement Potential: {:.1}%\n", result.improvement_potential));
        match &result.best_job_match {
            Some(name) => output.push_str(&format!(
                "Best Match: {} ({:.1}%)\n",
                self.colorize(name, Color::Cyan),
                result.match_percentage
            )),
            None => output.push_str("Best Match: N/A\n"),
        }
        output.push_str(&format!(
            "Words: {} | Technical keywords: {}\n",
            result.total_words, result.tech_keywords_found
        ));

        // Score breakdown
        let breakdown = &result.score_breakdown;
        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!("🧩 Section Completeness: {:.1}%\n", breakdown.section_completeness));
        output.push_str(&format!("🔍 Keyword Density: {:.1}%\n", breakdown.keyword_density));
        output.push_str(&format!("🎯 Job Alignment: {:.1}%\n", breakdown.job_alignment));
        output.push_str(&format!("📐 Formatting: {:.1}%\n", breakdown.formatting));

        // Job profiles
        if !result.job_matches.is_empty() {
            output.push_str(&self.format_header("Job Profile Matches", 2));
            for job_match in &result.job_matches {
                output.push_str(&format!("  {:<28} {:>5.1}%\n", job_match.profile, job_match.score));
                if !job_match.missing_required.is_empty() {
                    output.push_str(&format!(
                        "    {} {}\n",
                        self.colorize("missing:", Color::BrightBlack),
                        job_match.missing_required.join(", ")
                    ));
                }
            }
        }

        // Sections
        output.push_str(&self.format_header("Sections", 2));
        for (kind, analysis) in &result.sections {
            output.push_str(&format!(
                "  {:<16} {}\n",
                kind.title(),
                self.format_priority(analysis.improvement_priority)
            ));
            for issue in &analysis.issues {
                output.push_str(&format!("    • {}\n", issue.message));
            }
        }

        // Recommendations
        let recommendations = &result.recommendations;
        output.push_str(&self.format_header("📋 Recommendations", 2));
        for item in &recommendations.critical {
            output.push_str(&format!("  {}\n", self.colorize(item, Color::Red)));
        }
        for item in &recommendations.high {
            output.push_str(&format!("  {}\n", self.colorize(item, Color::Yellow)));
        }
        for item in &recommendations.medium {
            output.push_str(&format!("  {}\n", item));
        }

        // Footer
        output.push_str(&format!(
            "\n{} Generated by Resume ATS v{}\n",
            self.colorize("ℹ️", Color::Blue),
            env!("CARGO_PKG_VERSION")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl TextFormatter {
    pub fn new(raw_text: Option<String>) -> Self {
        Self { raw_text }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        Ok(ReportRenderer::render(result, self.raw_text.as_deref()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, None)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, raw_text: Option<String>) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            text_formatter: TextFormatter::new(raw_text),
        }
    }

    pub fn generate(&self, result: &AnalysisResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_result(result),
            OutputFormat::Json => self.json_formatter.format_result(result),
            OutputFormat::Text => self.text_formatter.format_result(result),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an output format name as given on the command line
pub fn parse_output_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "text" | "txt" => Ok(OutputFormat::Text),
        _ => Err(ResumeAnalyzerError::OutputFormatting(format!(
            "Invalid output format: {}. Supported: console, json, text",
            format
        ))),
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

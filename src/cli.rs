//! CLI interface for the resume analyzer

use crate::input::file_detector::ALLOWED_EXTENSIONS;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-ats")]
#[command(about = "Resume ATS compatibility analyzer")]
#[command(long_about = "Score a resume against job-profile keyword taxonomies, inspect its sections and get prioritized recommendations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume and write its report
    Analyze {
        /// Path to resume file (PDF, TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, text
        #[arg(short, long)]
        output: Option<String>,

        /// Report id (defaults to a random UUID)
        #[arg(long)]
        report_id: Option<String>,

        /// Directory for report files
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Append the extracted text to the report
        #[arg(long)]
        include_text: bool,

        /// Do not write a report file
        #[arg(long)]
        no_report: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Keyword and job profile registry (TOML)
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Print a previously written report
    Report {
        /// Report id printed by `analyze`
        report_id: String,

        /// Directory for report files
        #[arg(long)]
        reports_dir: Option<PathBuf>,
    },

    /// List job profiles
    Profiles {
        /// Also list keyword categories
        #[arg(short, long)]
        keywords: bool,

        /// Keyword and job profile registry (TOML)
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Validate file extension against the accepted upload types
pub fn validate_file_extension(path: &Path) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    ALLOWED_EXTENSIONS.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "resume-ats", "analyze", "--resume", "cv.pdf", "--output", "json", "--no-report",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { resume, output, no_report, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(no_report);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("resume.PDF")).is_ok());
        assert!(validate_file_extension(Path::new("resume.txt")).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx")).is_err());
        assert!(validate_file_extension(Path::new("resume")).is_err());
    }
}

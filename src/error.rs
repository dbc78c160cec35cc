//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is corrupt, encrypted or has no extractable text
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    /// Rejected before extraction is attempted
    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    /// Any unexpected fault inside scoring or matching
    #[error("Analysis failed: {0}")]
    InternalAnalysis(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeAnalyzerError {
    /// Message safe to show to an end user.
    ///
    /// Internal faults collapse into one generic sentence, everything else
    /// keeps its own description.
    pub fn user_message(&self) -> String {
        match self {
            ResumeAnalyzerError::ExtractionFailed(_) => {
                "Could not extract text from the file".to_string()
            }
            ResumeAnalyzerError::UnsupportedFormat(_) => {
                "Invalid file type. Please upload PDF or TXT files only.".to_string()
            }
            ResumeAnalyzerError::InternalAnalysis(_) => "Analysis failed".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

impl From<toml::de::Error> for ResumeAnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        ResumeAnalyzerError::Configuration(err.to_string())
    }
}

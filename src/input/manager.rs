//! Input manager for handling different file types

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::{FileType, ALLOWED_EXTENSIONS};
use crate::input::text_extractor::{PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::text_processor::TextProcessor;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Largest accepted resume file, in bytes
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BYTES_PER_MB: u64 = 1024 * 1024;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size: u64,
    processor: TextProcessor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_file_size: MAX_FILE_SIZE,
            processor: TextProcessor::new(),
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Extract and normalize the text of a resume document.
    ///
    /// The extension is checked before the file is touched and the size
    /// before its content is read. Documents that normalize to an empty
    /// string are reported as `ExtractionFailed`.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let file_type = Self::detect_file_type(path)?;

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let size = fs::metadata(path).await.map_err(ResumeAnalyzerError::Io)?.len();
        if size > self.max_file_size {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File too large. Maximum size is {}.",
                Self::format_limit(self.max_file_size)
            )));
        }

        let raw = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let text = self.processor.normalize(&raw);
        if text.is_empty() {
            return Err(ResumeAnalyzerError::ExtractionFailed(format!(
                "No extractable text in: {}",
                path.display()
            )));
        }
        debug!("Extracted {} characters from {}", text.len(), path.display());

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Resolve the declared file type, rejecting anything outside the allowed set
    pub fn detect_file_type(path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeAnalyzerError::UnsupportedFormat(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        match FileType::from_extension(extension) {
            FileType::Unknown => Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                ".{} (allowed: {})",
                extension,
                ALLOWED_EXTENSIONS.join(", ")
            ))),
            file_type => Ok(file_type),
        }
    }

    fn format_limit(bytes: u64) -> String {
        if bytes >= BYTES_PER_MB && bytes % BYTES_PER_MB == 0 {
            format!("{}MB", bytes / BYTES_PER_MB)
        } else {
            format!("{} bytes", bytes)
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_rejects_unknown_extensions() {
        assert!(matches!(
            InputManager::detect_file_type(Path::new("resume.docx")),
            Err(ResumeAnalyzerError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            InputManager::detect_file_type(Path::new("resume")),
            Err(ResumeAnalyzerError::UnsupportedFormat(_))
        ));
        assert_eq!(
            InputManager::detect_file_type(Path::new("Resume.PDF")).unwrap(),
            FileType::Pdf
        );
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_before_reading() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all("Python developer ".repeat(8).as_bytes()).unwrap();

        let mut manager = InputManager::new().with_max_file_size(64);
        match manager.extract_text(file.path()).await {
            Err(ResumeAnalyzerError::InvalidInput(message)) => {
                assert_eq!(message, "File too large. Maximum size is 64 bytes.");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert_eq!(manager.cache_size(), 0);

        let mut manager = InputManager::new().with_max_file_size(1024);
        assert!(manager.extract_text(file.path()).await.is_ok());
    }

    #[test]
    fn test_default_limit_message() {
        assert_eq!(MAX_FILE_SIZE, 10 * 1024 * 1024);
        assert_eq!(InputManager::format_limit(MAX_FILE_SIZE), "10MB");
    }
}

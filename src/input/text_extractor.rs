//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use std::cell::Cell;
use std::panic;
use std::path::Path;
use std::sync::Once;
use tokio::fs;

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static INSTALL_QUIET_HOOK: Once = Once::new();

/// Wrap the panic hook so panics raised while `QUIET_PANICS` is set on the
/// current thread are not printed. Other panics reach the previous hook.
fn install_quiet_hook() {
    INSTALL_QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeAnalyzerError::Io)?;
        Self::extract_from_bytes(&bytes).map_err(|reason| {
            ResumeAnalyzerError::ExtractionFailed(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                reason
            ))
        })
    }
}

impl PdfExtractor {
    /// Extract the text of every page, in document order.
    ///
    /// pdf-extract panics on some malformed inputs; a panic is reported the
    /// same way as a regular extraction error, without a panic message on
    /// stderr.
    pub fn extract_from_bytes(bytes: &[u8]) -> std::result::Result<String, String> {
        install_quiet_hook();
        QUIET_PANICS.with(|quiet| quiet.set(true));
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        QUIET_PANICS.with(|quiet| quiet.set(false));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("document is malformed or encrypted".to_string()),
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeAnalyzerError::Io)?;
        // Undecodable sequences become U+FFFD instead of failing
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_plain_text_replaces_invalid_utf8() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Python \xff\xfe developer").unwrap();

        let text = PlainTextExtractor.extract(file.path()).await.unwrap();
        assert!(text.starts_with("Python "));
        assert!(text.ends_with(" developer"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        let result = PdfExtractor::extract_from_bytes(b"this is not a pdf");
        assert!(result.is_err());
        assert!(!QUIET_PANICS.with(Cell::get));
    }

    #[test]
    fn test_panics_outside_extraction_still_unwind() {
        install_quiet_hook();
        let caught = panic::catch_unwind(|| panic!("outside extraction"));
        assert!(caught.is_err());
        assert!(!QUIET_PANICS.with(Cell::get));
    }

    #[tokio::test]
    async fn test_pdf_extraction_keeps_page_order() {
        let text = PdfExtractor
            .extract(Path::new("tests/fixtures/two_page_resume.pdf"))
            .await
            .unwrap();

        let summary = text.find("SUMMARY").unwrap();
        let skills = text.find("SKILLS").unwrap();
        assert!(summary < skills);
        assert!(text.contains("Kubernetes"));
    }
}

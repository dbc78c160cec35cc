//! File type detection

/// Extensions accepted for upload
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            _ => FileType::Unknown,
        }
    }
}

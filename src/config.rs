//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::manager::MAX_FILE_SIZE;
use crate::processing::section_quality::QualityRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub quality: QualityRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// TOML registry replacing the built-in keywords and job profiles
    pub registry_file: Option<PathBuf>,
    /// Append the extracted text to saved reports
    pub include_raw_text: bool,
    pub enable_caching: bool,
    /// Largest accepted resume file, in bytes
    pub max_file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
    pub reports_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Text,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            registry_file: None,
            include_raw_text: false,
            enable_caching: true,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        let reports_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ats")
            .join("reports");

        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
            reports_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            quality: QualityRules::default(),
        }
    }
}

impl Config {
    /// Load the user config, writing the defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            log::debug!("No config at {}, writing defaults", config_path.display());
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Overwrite `config_path` with the defaults
    pub fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ats")
            .join("config.toml")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[output]\nformat = \"Json\"\ncolor_output = false\n\n[quality]\nmin_skill_items = 8\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color_output);
        assert_eq!(config.quality.min_skill_items, 8);
        assert_eq!(config.quality.min_words.experience, 40);
        assert!(config.analysis.enable_caching);
        assert_eq!(config.analysis.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_config_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output\nformat = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ResumeAnalyzerError::Configuration(_))
        ));
    }

    #[test]
    fn test_reset_overwrites_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.analysis.include_raw_text = true;
        config.save_to(&path).unwrap();
        assert!(Config::load_from(&path).unwrap().analysis.include_raw_text);

        Config::reset(&path).unwrap();
        assert!(!Config::load_from(&path).unwrap().analysis.include_raw_text);
    }
}

//! resume-ats: rule-based resume ATS compatibility analyzer

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use resume_ats::cli::{self, Cli, Commands, ConfigAction};
use resume_ats::config::{Config, OutputFormat};
use resume_ats::input::InputManager;
use resume_ats::output::formatter::{parse_output_format, save_output_to_file};
use resume_ats::output::{ReportGenerator, ReportRenderer};
use resume_ats::processing::analyzer::AnalysisEngine;
use resume_ats::processing::taxonomy::Registry;
use resume_ats::ResumeAnalyzerError;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli, config, &config_path).await {
        match e.downcast_ref::<ResumeAnalyzerError>() {
            Some(analyzer_error) => error!("{}", analyzer_error.user_message()),
            None => error!("Command failed: {:#}", e),
        }
        process::exit(1);
    }
}

async fn run_command(args: Cli, config: Config, config_path: &Path) -> Result<()> {
    let use_colors = config.output.color_output && !args.no_color;

    match args.command {
        Commands::Analyze {
            resume,
            output,
            report_id,
            reports_dir,
            include_text,
            no_report,
            save,
            registry,
        } => {
            info!("Starting resume analysis");

            cli::validate_file_extension(&resume)
                .map_err(|e| ResumeAnalyzerError::UnsupportedFormat(format!("{}: {}", resume.display(), e)))?;

            let output_format = match output {
                Some(format) => parse_output_format(&format)?,
                None => config.output.format,
            };

            let report_id = report_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            ReportRenderer::validate_report_id(&report_id)?;

            let registry = load_registry(registry.as_deref().or(config.analysis.registry_file.as_deref()))?;

            let mut input_manager = InputManager::new()
                .with_cache(config.analysis.enable_caching)
                .with_max_file_size(config.analysis.max_file_size);
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            info!("Extracted {} characters from {}", resume_text.len(), resume.display());

            let engine = AnalysisEngine::new(registry, config.quality.clone())?;
            let result = engine.analyze(&resume_text, &report_id)?;

            let raw_text = (include_text || config.analysis.include_raw_text).then(|| resume_text.clone());

            if !no_report {
                let dir = reports_dir.unwrap_or_else(|| config.output.reports_dir.clone());
                let content = ReportRenderer::render(&result, raw_text.as_deref());
                let path = ReportRenderer::save_report(&dir, &report_id, &content).await?;
                if output_format == OutputFormat::Console {
                    println!("📄 Report saved: {}", path.display());
                }
            }

            let generator = ReportGenerator::with_options(use_colors, config.output.pretty_json, raw_text);
            let rendered = generator.generate(&result, output_format)?;

            match save {
                Some(path) => {
                    save_output_to_file(&rendered, &path)?;
                    info!("Output written to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Report { report_id, reports_dir } => {
            let dir = reports_dir.unwrap_or_else(|| config.output.reports_dir.clone());
            let content = ReportRenderer::load_report(&dir, &report_id).await?;
            print!("{}", content);
        }

        Commands::Profiles { keywords, registry } => {
            let registry = load_registry(registry.as_deref().or(config.analysis.registry_file.as_deref()))?;

            println!("💼 Job profiles ({}):", registry.profiles.len());
            for profile in &registry.profiles {
                println!("  • {} (weight {:.1})", profile.name, profile.weight);
                println!("    Required: {}", profile.required.join(", "));
                if !profile.preferred.is_empty() {
                    println!("    Preferred: {}", profile.preferred.join(", "));
                }
            }

            if keywords {
                println!("\n🔤 Keyword categories ({} keywords):", registry.keyword_count());
                for category in &registry.categories {
                    println!("  • {}: {}", category.name, category.keywords.join(", "));
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("📋 Configuration ({})", config_path.display());
                println!("{}", config.to_toml()?);
            }
            Some(ConfigAction::Reset) => {
                Config::reset(config_path)?;
                println!("✅ Configuration reset to defaults");
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn load_registry(path: Option<&Path>) -> Result<Registry> {
    let registry = Registry::load(path)
        .with_context(|| format!("Failed to load registry {}", display_path(path)))?;
    Ok(registry)
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in)".to_string())
}

//! Text processing and analysis module

pub mod text_processor;
pub mod sections;
pub mod taxonomy;
pub mod keyword_matcher;
pub mod keyword_analyzer;
pub mod job_matcher;
pub mod section_quality;
pub mod scoring;
pub mod recommendations;
pub mod analyzer;

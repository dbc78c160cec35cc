//! Prioritized improvement suggestions

use crate::processing::job_matcher::{best_match, JobMatchResult};
use crate::processing::section_quality::{Priority, SectionAnalysis};
use crate::processing::sections::SectionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores below this trigger the keyword density suggestion
const KEYWORD_DENSITY_THRESHOLD: f64 = 70.0;

/// How many keywords a suggestion names at most
const MAX_LISTED_KEYWORDS: usize = 3;

const HIGH_PRIORITY_FIXED: [&str; 3] = [
    "📈 Add more quantifiable metrics and achievements",
    "💪 Increase action verb usage in experience descriptions",
    "🎯 Expand technical skills section with relevant technologies",
];

const MEDIUM_PRIORITY_FIXED: [&str; 5] = [
    "✨ Optimize formatting and visual consistency",
    "🔗 Add portfolio/GitHub links if missing",
    "📚 Include relevant certifications or recent courses",
    "🎨 Tailor summary/objective for target roles",
    "📊 Ensure consistent bullet point formatting",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        self.critical.len() + self.high.len() + self.medium.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Build the recommendation lists.
    ///
    /// Output depends only on the arguments; section messages follow
    /// [`SectionKind`] order.
    pub fn generate(
        job_matches: &[JobMatchResult],
        section_analyses: &BTreeMap<SectionKind, SectionAnalysis>,
        ats_score: f64,
    ) -> Recommendations {
        let best = best_match(job_matches);
        let mut recommendations = Recommendations::default();

        if let Some(best) = best {
            if !best.missing_required.is_empty() {
                recommendations.critical.push(format!(
                    "🚨 Add missing critical keywords: {}",
                    first_keywords(&best.missing_required)
                ));
            }
        }

        for (kind, analysis) in section_analyses {
            if analysis.improvement_priority != Priority::Critical {
                continue;
            }
            if let Some(issue) = analysis.first_issue() {
                recommendations
                    .critical
                    .push(format!("🚨 Fix {} section: {}", kind, issue.message));
            }
        }

        if ats_score < KEYWORD_DENSITY_THRESHOLD {
            recommendations
                .high
                .push("⚡ Increase technical keyword density throughout resume".to_string());
        }
        recommendations
            .high
            .extend(HIGH_PRIORITY_FIXED.iter().map(|s| s.to_string()));

        if let Some(best) = best {
            if !best.missing_preferred.is_empty() {
                recommendations.high.push(format!(
                    "⭐ Consider adding preferred keywords: {}",
                    first_keywords(&best.missing_preferred)
                ));
            }
        }

        recommendations.medium = MEDIUM_PRIORITY_FIXED.iter().map(|s| s.to_string()).collect();

        recommendations
    }
}

fn first_keywords(keywords: &[String]) -> String {
    keywords
        .iter()
        .take(MAX_LISTED_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

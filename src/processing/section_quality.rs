//! Per-section quality checks

use crate::processing::sections::SectionKind;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingSection,
    EmptySection,
    TooBrief,
    NoQuantifiedResults,
    WeakActionVerbs,
    FewSkillsListed,
    OverlyLong,
    MissingDates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionIssue {
    pub code: IssueCode,
    pub severity: Priority,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMetrics {
    pub word_count: usize,
    pub line_count: usize,
    pub bullet_lines: usize,
    pub quantified_lines: usize,
    pub action_verb_lines: usize,
    pub listed_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub issues: Vec<SectionIssue>,
    pub improvement_priority: Priority,
    pub metrics: SectionMetrics,
}

impl SectionAnalysis {
    fn from_issues(issues: Vec<SectionIssue>, metrics: SectionMetrics) -> Self {
        let improvement_priority = issues
            .iter()
            .map(|issue| issue.severity)
            .max()
            .unwrap_or(Priority::Low);

        Self {
            issues,
            improvement_priority,
            metrics,
        }
    }

    pub fn first_issue(&self) -> Option<&SectionIssue> {
        self.issues.first()
    }
}

/// Minimum word count per section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinWords {
    pub summary: usize,
    pub experience: usize,
    pub education: usize,
    pub skills: usize,
    pub projects: usize,
    pub certifications: usize,
}

impl MinWords {
    pub fn get(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Summary => self.summary,
            SectionKind::Experience => self.experience,
            SectionKind::Education => self.education,
            SectionKind::Skills => self.skills,
            SectionKind::Projects => self.projects,
            SectionKind::Certifications => self.certifications,
        }
    }
}

impl Default for MinWords {
    fn default() -> Self {
        Self {
            summary: 20,
            experience: 40,
            education: 8,
            skills: 5,
            projects: 20,
            certifications: 2,
        }
    }
}

/// Thresholds for the section checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityRules {
    pub min_action_verb_ratio: f64,
    pub min_skill_items: usize,
    pub max_summary_words: usize,
    pub action_verbs: Vec<String>,
    pub min_words: MinWords,
}

impl Default for QualityRules {
    fn default() -> Self {
        Self {
            min_action_verb_ratio: 0.3,
            min_skill_items: 5,
            max_summary_words: 150,
            action_verbs: [
                "achieved", "administered", "analyzed", "architected", "automated", "built",
                "collaborated", "conducted", "coordinated", "created", "debugged", "delivered",
                "deployed", "designed", "developed", "directed", "drove", "engineered",
                "established", "executed", "expanded", "generated", "grew", "implemented",
                "improved", "increased", "integrated", "introduced", "launched", "led",
                "maintained", "managed", "mentored", "migrated", "modernized", "optimized",
                "orchestrated", "organized", "oversaw", "owned", "pioneered", "planned",
                "produced", "programmed", "reduced", "refactored", "resolved", "restructured",
                "scaled", "shipped", "simplified", "spearheaded", "streamlined", "supervised",
                "tested", "trained", "transformed", "upgraded", "wrote",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            min_words: MinWords::default(),
        }
    }
}

/// Inspects section content for structural and wording problems
pub struct SectionQualityAnalyzer {
    rules: QualityRules,
    action_verbs: HashSet<String>,
    processor: TextProcessor,
}

impl SectionQualityAnalyzer {
    pub fn new(rules: QualityRules) -> Self {
        let action_verbs = rules.action_verbs.iter().map(|v| v.to_lowercase()).collect();
        Self {
            rules,
            action_verbs,
            processor: TextProcessor::new(),
        }
    }

    /// Analysis for a section the document does not have
    pub fn analyze_missing(&self, kind: SectionKind) -> SectionAnalysis {
        let severity = if SectionKind::EXPECTED.contains(&kind) {
            Priority::Critical
        } else {
            Priority::Medium
        };

        SectionAnalysis::from_issues(
            vec![SectionIssue {
                code: IssueCode::MissingSection,
                severity,
                message: format!("No {} section detected", kind),
            }],
            SectionMetrics::default(),
        )
    }

    /// Check one present section.
    ///
    /// The resulting priority is the highest severity among the issues,
    /// or LOW when nothing was flagged.
    pub fn analyze(&self, kind: SectionKind, content: &str) -> SectionAnalysis {
        let metrics = self.measure(kind, content);
        let mut issues = Vec::new();

        if content.trim().is_empty() {
            issues.push(SectionIssue {
                code: IssueCode::EmptySection,
                severity: Priority::High,
                message: "Section heading has no content".to_string(),
            });
            return SectionAnalysis::from_issues(issues, metrics);
        }

        let min_words = self.rules.min_words.get(kind);
        if metrics.word_count < min_words {
            issues.push(SectionIssue {
                code: IssueCode::TooBrief,
                severity: Priority::High,
                message: format!("Only {} words; aim for at least {}", metrics.word_count, min_words),
            });
        }

        match kind {
            SectionKind::Experience | SectionKind::Projects => {
                if metrics.quantified_lines == 0 {
                    issues.push(SectionIssue {
                        code: IssueCode::NoQuantifiedResults,
                        severity: Priority::Medium,
                        message: "No quantifiable achievements (numbers, percentages, amounts)".to_string(),
                    });
                }

                let statements = self.statement_lines(content).len();
                if statements > 0
                    && (metrics.action_verb_lines as f64 / statements as f64) < self.rules.min_action_verb_ratio
                {
                    issues.push(SectionIssue {
                        code: IssueCode::WeakActionVerbs,
                        severity: Priority::Medium,
                        message: format!(
                            "Few statements start with action verbs ({} of {})",
                            metrics.action_verb_lines, statements
                        ),
                    });
                }
            }
            SectionKind::Skills => {
                if metrics.listed_items < self.rules.min_skill_items {
                    issues.push(SectionIssue {
                        code: IssueCode::FewSkillsListed,
                        severity: Priority::Medium,
                        message: format!(
                            "Only {} skills listed; aim for at least {}",
                            metrics.listed_items, self.rules.min_skill_items
                        ),
                    });
                }
            }
            SectionKind::Summary => {
                if metrics.word_count > self.rules.max_summary_words {
                    issues.push(SectionIssue {
                        code: IssueCode::OverlyLong,
                        severity: Priority::Medium,
                        message: format!(
                            "Summary runs {} words; keep it under {}",
                            metrics.word_count, self.rules.max_summary_words
                        ),
                    });
                }
            }
            SectionKind::Education => {
                if !self.processor.contains_year(content) {
                    issues.push(SectionIssue {
                        code: IssueCode::MissingDates,
                        severity: Priority::Low,
                        message: "No graduation or attendance years found".to_string(),
                    });
                }
            }
            SectionKind::Certifications => {}
        }

        SectionAnalysis::from_issues(issues, metrics)
    }

    fn measure(&self, kind: SectionKind, content: &str) -> SectionMetrics {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        let action_verb_lines = self
            .statement_lines(content)
            .iter()
            .filter(|line| self.starts_with_action_verb(line))
            .count();

        let listed_items = if kind == SectionKind::Skills {
            Self::count_listed_items(content)
        } else {
            0
        };

        SectionMetrics {
            word_count: self.processor.word_count(content),
            line_count: lines.len(),
            bullet_lines: lines.iter().filter(|l| self.processor.is_bullet_line(l)).count(),
            quantified_lines: lines.iter().filter(|l| self.processor.has_metric(l)).count(),
            action_verb_lines,
            listed_items,
        }
    }

    /// Bullet lines, or every line of four or more words when there are no bullets
    fn statement_lines<'a>(&self, content: &'a str) -> Vec<&'a str> {
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        let bullets: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|l| self.processor.is_bullet_line(l))
            .collect();

        if bullets.is_empty() {
            lines
                .into_iter()
                .filter(|l| self.processor.word_count(l) >= 4)
                .collect()
        } else {
            bullets
        }
    }

    fn starts_with_action_verb(&self, line: &str) -> bool {
        self.processor
            .first_word(line)
            .is_some_and(|word| self.action_verbs.contains(&word))
    }

    fn count_listed_items(content: &str) -> usize {
        content
            .split([',', ';', '|', '•', '\n'])
            .map(|item| {
                // "Languages: Rust" counts as the item after the label
                let item = item.rsplit(':').next().unwrap_or(item);
                item.trim().trim_start_matches(['-', '*']).trim()
            })
            .filter(|item| !item.is_empty())
            .count()
    }
}

impl Default for SectionQualityAnalyzer {
    fn default() -> Self {
        Self::new(QualityRules::default())
    }
}

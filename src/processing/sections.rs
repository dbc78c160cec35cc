//! Resume section detection
//!
//! Headings are recognized from configurable synonym lists. A line only
//! counts as a heading when its label matches a synonym and it also looks
//! like a heading. An exact label may be short, all caps or followed by a
//! colon; a label that only starts with a synonym needs caps or a colon.
//! Bullet lines are never headings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical resume sections.
///
/// Declaration order is the stable order used everywhere sections are
/// iterated (`BTreeMap` keys, reports, recommendations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    /// Sections counted by the completeness score
    pub const CORE: [SectionKind; 5] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
    ];

    /// Sections whose absence is a critical issue
    pub const EXPECTED: [SectionKind; 3] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Certifications => "Certifications",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section name → raw content. Absent sections are absent keys.
pub type SectionMap = BTreeMap<SectionKind, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub kind: SectionKind,
    pub synonyms: Vec<String>,
}

/// Heading recognition rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingRules {
    pub sections: Vec<SectionHeading>,
    /// Known headings that do not map to a canonical section
    pub ignored: Vec<String>,
    pub max_heading_words: usize,
    pub max_heading_chars: usize,
}

impl Default for HeadingRules {
    fn default() -> Self {
        let heading = |kind, synonyms: &[&str]| SectionHeading {
            kind,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            sections: vec![
                heading(SectionKind::Summary, &[
                    "summary", "professional summary", "career summary", "profile",
                    "professional profile", "objective", "career objective", "about me", "overview",
                ]),
                heading(SectionKind::Experience, &[
                    "experience", "work experience", "professional experience", "relevant experience",
                    "work history", "employment", "employment history", "career history", "internships",
                ]),
                heading(SectionKind::Education, &[
                    "education", "academic background", "academics", "qualifications",
                    "education and training", "academic qualifications",
                ]),
                heading(SectionKind::Skills, &[
                    "skills", "technical skills", "key skills", "core competencies", "competencies",
                    "expertise", "technologies", "tech stack", "skills and tools",
                ]),
                heading(SectionKind::Projects, &[
                    "projects", "personal projects", "notable projects", "academic projects",
                    "key projects", "portfolio",
                ]),
                heading(SectionKind::Certifications, &[
                    "certifications", "certificates", "licenses", "licenses and certifications",
                    "courses", "training",
                ]),
            ],
            ignored: [
                "references", "hobbies", "interests", "awards", "honors", "achievements",
                "publications", "volunteer", "volunteering", "contact", "contact information",
                "personal details", "declaration",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_heading_words: 4,
            max_heading_chars: 40,
        }
    }
}

/// Leading and trailing heading decoration (`## Skills`, `**EXPERIENCE**`)
const DECORATION: &[char] = &['#', '*', '=', '-', '•', '>', '_', ' '];

/// Markers that open a list item
const BULLET_MARKERS: &[char] = &['•', '▪', '◦', '‣', '●'];
const DASH_BULLETS: &[char] = &['-', '*', '+', '–'];

fn is_bullet(line: &str) -> bool {
    let mut chars = line.trim_start().chars();
    match chars.next() {
        Some(c) if BULLET_MARKERS.contains(&c) => true,
        Some(c) if DASH_BULLETS.contains(&c) => chars.next().is_some_and(char::is_whitespace),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct HeadingLine {
    /// `None` for ignored or unrecognized headings
    target: Option<SectionKind>,
    has_inline_content: bool,
}

/// Splits resume text into canonical sections
#[derive(Debug, Clone)]
pub struct SectionParser {
    /// (lowercased synonym, target) pairs
    patterns: Vec<(String, Option<SectionKind>)>,
    max_heading_words: usize,
    max_heading_chars: usize,
}

impl SectionParser {
    pub fn new(rules: &HeadingRules) -> Self {
        let mut patterns = Vec::new();
        for section in &rules.sections {
            for synonym in &section.synonyms {
                patterns.push((synonym.trim().to_lowercase(), Some(section.kind)));
            }
        }
        for ignored in &rules.ignored {
            patterns.push((ignored.trim().to_lowercase(), None));
        }
        patterns.retain(|(synonym, _)| !synonym.is_empty());

        Self {
            patterns,
            max_heading_words: rules.max_heading_words,
            max_heading_chars: rules.max_heading_chars,
        }
    }

    /// Segment text into sections.
    ///
    /// Content between a heading and the next heading belongs to the first
    /// one. A repeated heading appends to the existing section.
    pub fn parse(&self, text: &str) -> SectionMap {
        let mut collected: BTreeMap<SectionKind, Vec<&str>> = BTreeMap::new();
        let mut current: Option<SectionKind> = None;

        for line in text.lines() {
            match self.classify(line) {
                Some(HeadingLine { target: Some(kind), has_inline_content }) => {
                    current = Some(kind);
                    let lines = collected.entry(kind).or_default();
                    if has_inline_content {
                        lines.push(line.trim());
                    }
                }
                Some(HeadingLine { target: None, .. }) => current = None,
                None => {
                    if let Some(kind) = current {
                        collected.entry(kind).or_default().push(line);
                    }
                }
            }
        }

        collected
            .into_iter()
            .map(|(kind, lines)| (kind, lines.join("\n").trim().to_string()))
            .collect()
    }

    fn classify(&self, line: &str) -> Option<HeadingLine> {
        if is_bullet(line) {
            return None;
        }

        let stripped = line.trim().trim_matches(DECORATION);
        if stripped.is_empty() {
            return None;
        }

        let (label_raw, inline, has_colon) = match stripped.find(':') {
            Some(idx) => (&stripped[..idx], stripped[idx + 1..].trim(), true),
            None => (stripped, "", false),
        };
        let label_raw = label_raw.trim().trim_end_matches(['.', '-', '|', '/']).trim();
        if label_raw.is_empty() {
            return None;
        }

        let label = label_raw.to_lowercase();
        let label_words = label.split_whitespace().count();

        let short = label_words <= self.max_heading_words
            && stripped.chars().count() <= self.max_heading_chars;
        let all_caps = label_raw.chars().any(|c| c.is_alphabetic())
            && !label_raw.chars().any(|c| c.is_lowercase());

        // Longest synonym wins, canonical beats ignored on equal length
        let mut best: Option<(usize, bool, Option<SectionKind>, bool)> = None;
        for (synonym, target) in &self.patterns {
            if !self.label_matches(&label, label_words, synonym) {
                continue;
            }
            let candidate = (synonym.chars().count(), target.is_some(), *target, label == *synonym);
            let better = match best {
                None => true,
                Some((len, canonical, _, _)) => (candidate.0, candidate.1) > (len, canonical),
            };
            if better {
                best = Some(candidate);
            }
        }

        match best {
            Some((_, _, target, exact)) if (exact && short) || all_caps || has_colon => Some(HeadingLine {
                target,
                has_inline_content: !inline.is_empty(),
            }),
            Some(_) => None,
            // Unknown all-caps label with a bare trailing colon, e.g. "AWARDS:"
            None if has_colon && inline.is_empty() && all_caps && label_words <= self.max_heading_words => {
                Some(HeadingLine { target: None, has_inline_content: false })
            }
            None => None,
        }
    }

    fn label_matches(&self, label: &str, label_words: usize, synonym: &str) -> bool {
        if label == synonym {
            return true;
        }
        if label_words > self.max_heading_words {
            return false;
        }
        match label.strip_prefix(synonym) {
            Some(rest) => rest.chars().next().is_some_and(|c| !c.is_alphanumeric()),
            None => false,
        }
    }
}

impl Default for SectionParser {
    fn default() -> Self {
        Self::new(&HeadingRules::default())
    }
}

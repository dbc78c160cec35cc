//! Text processing and normalization

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Characters that open a bullet-style line
const BULLET_MARKERS: &[char] = &['-', '*', '•', '◦', '▪', '‣', '·', '–', '>'];

#[derive(Debug, Clone)]
pub struct TextProcessor {
    email_regex: Regex,
    phone_regex: Regex,
    horizontal_ws_regex: Regex,
    metric_regex: Regex,
    year_regex: Regex,
    numbered_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"(?:\+?\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}\b")
            .expect("Invalid phone regex");

        let horizontal_ws_regex = Regex::new(r"[ \t\u{00A0}\u{2000}-\u{200B}\u{3000}]+")
            .expect("Invalid whitespace regex");

        let metric_regex = Regex::new(r"[0-9%$€£¥₹]").expect("Invalid metric regex");

        let year_regex = Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex");

        let numbered_regex = Regex::new(r"^\d{1,2}[.)]\s").expect("Invalid numbered list regex");

        Self {
            email_regex,
            phone_regex,
            horizontal_ws_regex,
            metric_regex,
            year_regex,
            numbered_regex,
        }
    }

    /// Normalize extracted text while keeping its line structure.
    ///
    /// Folds typographic punctuation to ASCII, drops control characters,
    /// collapses horizontal whitespace inside each line, trims every line
    /// and keeps at most one blank line in a row.
    pub fn normalize(&self, text: &str) -> String {
        let unified = self.normalize_unicode(&text.replace("\r\n", "\n").replace('\r', "\n"));

        let mut lines: Vec<String> = Vec::new();
        let mut previous_blank = true;

        for line in unified.lines() {
            let collapsed = self.horizontal_ws_regex.replace_all(line, " ");
            let trimmed = collapsed.trim();

            if trimmed.is_empty() {
                if !previous_blank {
                    lines.push(String::new());
                }
                previous_blank = true;
            } else {
                lines.push(trimmed.to_string());
                previous_blank = false;
            }
        }

        lines.join("\n").trim().to_string()
    }

    /// Whitespace-delimited word count
    pub fn word_count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Lowercased first word of a line, ignoring any bullet marker
    pub fn first_word(&self, line: &str) -> Option<String> {
        self.strip_bullet(line)
            .unicode_words()
            .next()
            .map(|w| w.to_lowercase())
    }

    pub fn is_bullet_line(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        trimmed.starts_with(BULLET_MARKERS) || self.numbered_regex.is_match(trimmed)
    }

    /// Line text without its leading bullet or list number
    pub fn strip_bullet<'a>(&self, line: &'a str) -> &'a str {
        let trimmed = line.trim_start();
        if let Some(m) = self.numbered_regex.find(trimmed) {
            return trimmed[m.end()..].trim_start();
        }
        trimmed.trim_start_matches(BULLET_MARKERS).trim_start()
    }

    /// True when the line carries a quantifiable token (digit, percent, currency)
    pub fn has_metric(&self, line: &str) -> bool {
        self.metric_regex.is_match(line)
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex.is_match(text)
    }

    pub fn contains_year(&self, text: &str) -> bool {
        self.year_regex.is_match(text)
    }

    /// Normalize Unicode punctuation to plain ASCII and drop control characters
    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'', // Smart quotes to regular quotes
                '\u{201C}' | '\u{201D}' => '"',  // Smart double quotes
                '\u{2013}' | '\u{2014}' => '-',  // En dash, em dash to hyphen
                '\u{2026}' => '.',               // Ellipsis to period
                _ => c,
            })
            .collect()
    }
}

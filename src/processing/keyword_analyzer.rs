//! Technical keyword detection across taxonomy categories

use crate::error::Result;
use crate::processing::keyword_matcher::KeywordMatcher;
use crate::processing::taxonomy::KeywordCategory;
use std::collections::BTreeMap;

/// Category name → matched keywords (declared order, no duplicates)
pub type KeywordFindings = BTreeMap<String, Vec<String>>;

pub struct TechnicalKeywordAnalyzer {
    categories: Vec<(String, KeywordMatcher)>,
}

impl TechnicalKeywordAnalyzer {
    pub fn new(categories: &[KeywordCategory]) -> Result<Self> {
        let categories = categories
            .iter()
            .map(|category| Ok((category.name.clone(), KeywordMatcher::new(&category.keywords)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { categories })
    }

    /// Report the keywords of every category found in `text`.
    ///
    /// Every category is present in the result, with an empty list when
    /// nothing matched.
    pub fn analyze(&self, text: &str) -> KeywordFindings {
        self.categories
            .iter()
            .map(|(name, matcher)| {
                let found = matcher.find(text).into_iter().map(str::to_string).collect();
                (name.clone(), found)
            })
            .collect()
    }

    /// Total matches across categories; a keyword listed in two categories counts twice
    pub fn total_found(findings: &KeywordFindings) -> usize {
        findings.values().map(Vec::len).sum()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|(_, m)| m.len()).sum()
    }
}

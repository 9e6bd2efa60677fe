use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::column::ColumnDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickFilterMode {
    /// Case-insensitive regex match, falling back to a literal substring
    /// match when the pattern does not compile.
    #[default]
    Text,
    /// Fuzzy match; a leading `'` requests an exact substring instead.
    Fuzzy,
}

/// A table-wide text filter applied across every column that has an
/// accessor, AND-combined with the per-column filter engine.
///
/// Transient UI state: the quick filter is never part of the persisted
/// record.
pub struct QuickFilter {
    pattern: String,
    mode: QuickFilterMode,
    regex: Option<Regex>,
    matcher: SkimMatcherV2,
}

impl Default for QuickFilter {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            mode: QuickFilterMode::Text,
            regex: None,
            matcher: SkimMatcherV2::default(),
        }
    }
}

impl Clone for QuickFilter {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            mode: self.mode,
            regex: self.regex.clone(),
            // SkimMatcherV2 is stateless configuration; a fresh one is equivalent.
            matcher: SkimMatcherV2::default(),
        }
    }
}

impl std::fmt::Debug for QuickFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickFilter")
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .field("regex", &self.regex.is_some())
            .finish()
    }
}

impl QuickFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, pattern: impl Into<String>, mode: QuickFilterMode) {
        self.pattern = pattern.into();
        self.mode = mode;
        self.regex = match mode {
            QuickFilterMode::Text if !self.pattern.is_empty() => {
                match RegexBuilder::new(&self.pattern).case_insensitive(true).build() {
                    Ok(regex) => Some(regex),
                    Err(error) => {
                        debug!(
                            target: "view",
                            "quick filter '{}' is not a valid regex ({}); using literal match",
                            self.pattern, error
                        );
                        None
                    }
                }
            }
            _ => None,
        };
    }

    pub fn clear(&mut self) {
        self.pattern.clear();
        self.regex = None;
    }

    pub fn is_active(&self) -> bool {
        !self.pattern.is_empty()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> QuickFilterMode {
        self.mode
    }

    /// Whether any accessor-bearing column's value matches the pattern.
    /// An inactive filter matches everything.
    pub fn matches_row<R>(&self, row: &R, columns: &[ColumnDescriptor<R>]) -> bool {
        if !self.is_active() {
            return true;
        }
        columns
            .iter()
            .filter_map(|column| column.value(row))
            .any(|value| self.matches_value(&value))
    }

    fn matches_value(&self, value: &str) -> bool {
        match self.mode {
            QuickFilterMode::Text => match &self.regex {
                Some(regex) => regex.is_match(value),
                None => value.to_lowercase().contains(&self.pattern.to_lowercase()),
            },
            QuickFilterMode::Fuzzy => {
                if let Some(exact) = self.pattern.strip_prefix('\'') {
                    value.to_lowercase().contains(&exact.to_lowercase())
                } else {
                    self.matcher.fuzzy_match(value, &self.pattern).is_some()
                }
            }
        }
    }
}

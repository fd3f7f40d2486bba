//! Selector construction for attribute lookups

use crate::index::AttributeFamily;

/// Desired values per attribute family.
///
/// Values inside one family are alternatives (OR); every non-empty family
/// must be satisfied (AND). A selector with all families empty matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    widths: Vec<String>,
    weights: Vec<String>,
    styles: Vec<String>,
    languages: Vec<String>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widths(mut self, widths: Vec<String>) -> Self {
        self.widths = widths;
        self
    }

    pub fn with_weights(mut self, weights: Vec<String>) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_styles(mut self, styles: Vec<String>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Replace the values wanted for `family`.
    pub fn with_family(mut self, family: AttributeFamily, values: Vec<String>) -> Self {
        *self.values_mut(family) = values;
        self
    }

    /// Build a selector from `key=value` pairs such as a parsed query string.
    ///
    /// Keys are the singular family names (`width`, `weight`, `style`,
    /// `language`) and may repeat. Unknown keys are ignored. Values are kept
    /// verbatim, so `width=` constrains widths to the empty value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut selector = Self::new();
        for (key, value) in pairs {
            let Some(family) = AttributeFamily::from_key(key.as_ref()) else {
                continue;
            };
            selector.values_mut(family).push(value.into());
        }
        selector
    }

    pub fn values(&self, family: AttributeFamily) -> &[String] {
        match family {
            AttributeFamily::Width => &self.widths,
            AttributeFamily::Weight => &self.weights,
            AttributeFamily::Style => &self.styles,
            AttributeFamily::Language => &self.languages,
        }
    }

    pub fn widths(&self) -> &[String] {
        &self.widths
    }

    pub fn weights(&self) -> &[String] {
        &self.weights
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// True when no family is constrained.
    pub fn is_empty(&self) -> bool {
        AttributeFamily::ALL
            .into_iter()
            .all(|family| self.values(family).is_empty())
    }

    fn values_mut(&mut self, family: AttributeFamily) -> &mut Vec<String> {
        match family {
            AttributeFamily::Width => &mut self.widths,
            AttributeFamily::Weight => &mut self.weights,
            AttributeFamily::Style => &mut self.styles,
            AttributeFamily::Language => &mut self.languages,
        }
    }
}

/// Split comma-delimited values (`bold,black`) into a flat list.
///
/// Surrounding whitespace is trimmed from each value and empty pieces are
/// dropped, so `"bold, black,"` yields `bold` and `black`.
pub fn parse_value_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|chunk| chunk.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selector_is_empty() {
        assert!(Selector::new().is_empty());
        assert!(!Selector::new()
            .with_styles(vec!["italic".into()])
            .is_empty());
    }

    #[test]
    fn from_pairs_groups_repeated_keys() {
        let selector = Selector::from_pairs([
            ("width", "condensed"),
            ("weight", "bold"),
            ("width", "expanded"),
            ("language", "latin"),
            ("page", "2"),
        ]);

        assert_eq!(selector.widths(), ["condensed", "expanded"]);
        assert_eq!(selector.weights(), ["bold"]);
        assert!(selector.styles().is_empty());
        assert_eq!(selector.languages(), ["latin"]);
    }

    #[test]
    fn from_pairs_keeps_blank_values() {
        let selector = Selector::from_pairs([("style", ""), ("style", "  ")]);
        assert!(!selector.is_empty());
        assert_eq!(selector.styles(), ["", "  "]);
    }

    #[test]
    fn with_family_targets_one_list() {
        let selector =
            Selector::new().with_family(AttributeFamily::Language, vec!["greek".to_string()]);
        assert_eq!(selector.values(AttributeFamily::Language), ["greek"]);
        assert!(selector.values(AttributeFamily::Width).is_empty());
    }

    #[test]
    fn parses_comma_delimited_values() {
        let raw = vec!["bold, black".to_string(), "thin,".to_string()];
        assert_eq!(parse_value_list(&raw), vec!["bold", "black", "thin"]);
    }
}

use regex::Regex;

/// Whole-word keyword matching for news texts. Keywords are compiled once
/// and matched case-insensitively; regex metacharacters in a keyword are
/// treated as literal text.
pub struct KeywordMatcher {
    patterns: Vec<(String, Regex)>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[String]) -> Self {
        let patterns = keywords
            .iter()
            .map(|keyword| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
                let regex = Regex::new(&pattern).expect("keyword pattern failed to compile");

                (keyword.clone(), regex)
            })
            .collect();

        KeywordMatcher { patterns }
    }

    /// Returns the matched keywords in the order the keyword list was
    /// configured. An empty result means the text is not relevant.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(keyword, _)| keyword.as_str())
            .collect()
    }
}

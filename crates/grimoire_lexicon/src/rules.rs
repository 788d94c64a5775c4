//! # Keyword Rule Engine
//!
//! Keyword tables are plain ordered slices of [`KeywordRule`]s. The engine
//! answers three questions about a tokenized prompt:
//!
//! - [`first_match`]: the earliest *rule* that fires (table order wins)
//! - [`earliest_match`]: the rule whose keyword appears earliest in the prompt
//! - [`all_matches`]: every rule that fires, in table order

/// How a rule's keywords are compared against the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Whole tokens; keywords containing spaces match as consecutive tokens.
    Word,
    /// Raw substring of the lower-cased prompt.
    Substring,
}

/// One row of a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    /// Any of these fires the rule.
    pub keywords: &'static [&'static str],
    /// What the rule maps to.
    pub value: T,
    /// Comparison mode.
    pub mode: MatchMode,
}

impl<T> KeywordRule<T> {
    /// Rule matching whole words or phrases.
    #[must_use]
    pub const fn words(keywords: &'static [&'static str], value: T) -> Self {
        Self {
            keywords,
            value,
            mode: MatchMode::Word,
        }
    }

    /// Rule matching substrings.
    #[must_use]
    pub const fn substrings(keywords: &'static [&'static str], value: T) -> Self {
        Self {
            keywords,
            value,
            mode: MatchMode::Substring,
        }
    }

    /// Earliest position at which any keyword occurs.
    ///
    /// Word mode reports a token index; substring mode a byte offset.
    #[must_use]
    pub fn position(&self, tokens: &Tokens) -> Option<usize> {
        self.keywords
            .iter()
            .filter_map(|k| match self.mode {
                MatchMode::Word => tokens.word_position(k),
                MatchMode::Substring => tokens.text().find(k),
            })
            .min()
    }

    /// True when any keyword occurs.
    #[must_use]
    pub fn matches(&self, tokens: &Tokens) -> bool {
        self.position(tokens).is_some()
    }

    /// The first keyword that occurs, in keyword order.
    #[must_use]
    pub fn matched_keyword(&self, tokens: &Tokens) -> Option<&'static str> {
        self.keywords.iter().copied().find(|k| match self.mode {
            MatchMode::Word => tokens.word_position(k).is_some(),
            MatchMode::Substring => tokens.text().contains(k),
        })
    }
}

/// A prompt split into normalized words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    text: String,
    words: Vec<String>,
    spaced: String,
}

impl Tokens {
    /// Lower-cases, splits on whitespace and trims punctuation from each
    /// word. A trailing possessive `'s` is dropped.
    #[must_use]
    pub fn new(prompt: &str) -> Self {
        let text = prompt.to_lowercase();
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                let w = w.trim_matches(|c: char| !c.is_alphanumeric());
                w.strip_suffix("'s").unwrap_or(w).to_owned()
            })
            .filter(|w| !w.is_empty())
            .collect();
        let spaced = format!(" {} ", words.join(" "));
        Self { text, words, spaced }
    }

    /// The lower-cased prompt.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized words in prompt order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// True when the prompt has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Token index where `keyword` (a word or space-separated phrase) starts.
    #[must_use]
    pub fn word_position(&self, keyword: &str) -> Option<usize> {
        if keyword.contains(' ') {
            let needle = format!(" {keyword} ");
            let offset = self.spaced.find(&needle)?;
            // spaces before the match count the words before it
            Some(self.spaced[..=offset].matches(' ').count() - 1)
        } else {
            self.words.iter().position(|w| w == keyword)
        }
    }

    /// True when `keyword` occurs as a word or phrase.
    #[must_use]
    pub fn has_word(&self, keyword: &str) -> bool {
        self.word_position(keyword).is_some()
    }
}

/// Value of the first rule (in table order) that fires.
#[must_use]
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], tokens: &Tokens) -> Option<T> {
    rules.iter().find(|r| r.matches(tokens)).map(|r| r.value)
}

/// Value of the rule whose keyword appears earliest in the prompt.
///
/// Ties go to the earlier rule. All rules of `rules` should share one
/// [`MatchMode`] so positions are comparable.
#[must_use]
pub fn earliest_match<T: Copy>(rules: &[KeywordRule<T>], tokens: &Tokens) -> Option<T> {
    rules
        .iter()
        .filter_map(|r| r.position(tokens).map(|p| (p, r.value)))
        .min_by_key(|(p, _)| *p)
        .map(|(_, v)| v)
}

/// Values of every rule that fires, in table order.
#[must_use]
pub fn all_matches<T: Copy>(rules: &[KeywordRule<T>], tokens: &Tokens) -> Vec<T> {
    rules.iter().filter(|r| r.matches(tokens)).map(|r| r.value).collect()
}

/// True when any keyword occurs as a word or phrase.
#[must_use]
pub fn contains_any(tokens: &Tokens, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| tokens.has_word(k))
}

/// True when any fragment occurs anywhere in the lower-cased prompt.
#[must_use]
pub fn contains_substring(tokens: &Tokens, fragments: &[&str]) -> bool {
    fragments.iter().any(|f| tokens.text().contains(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[KeywordRule<u8>] = &[
        KeywordRule::words(&["cube", "box"], 1),
        KeywordRule::words(&["orb", "sphere"], 2),
        KeywordRule::words(&["glowing eyes"], 3),
    ];

    #[test]
    fn test_tokenize_trims_punctuation() {
        let tokens = Tokens::new("  A Dragon's (glowing) ORB!  ");
        assert_eq!(tokens.words(), &["a", "dragon", "glowing", "orb"]);
        assert!(Tokens::new("   ").is_empty());
    }

    #[test]
    fn test_first_match_prefers_table_order() {
        let tokens = Tokens::new("an orb on a box");
        assert_eq!(first_match(RULES, &tokens), Some(1));
    }

    #[test]
    fn test_earliest_match_prefers_prompt_order() {
        let tokens = Tokens::new("an orb on a box");
        assert_eq!(earliest_match(RULES, &tokens), Some(2));
    }

    #[test]
    fn test_phrases_match_consecutive_words() {
        let tokens = Tokens::new("a cat with glowing eyes");
        assert_eq!(tokens.word_position("glowing eyes"), Some(3));
        assert_eq!(all_matches(RULES, &tokens), vec![3]);
        assert!(!Tokens::new("eyes glowing").has_word("glowing eyes"));
    }

    #[test]
    fn test_word_mode_ignores_fragments() {
        let tokens = Tokens::new("boxer");
        assert_eq!(first_match(RULES, &tokens), None);
        assert!(contains_substring(&tokens, &["box"]));
        assert!(!contains_any(&tokens, &["box"]));
    }

    #[test]
    fn test_matched_keyword() {
        let rule = KeywordRule::substrings(&["cathedral", "church"], ());
        assert_eq!(rule.matched_keyword(&Tokens::new("old churches")), Some("church"));
    }
}

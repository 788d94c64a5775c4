//! Display-name extraction.
//!
//! Patterns are tried in order: an explicit `named X` / `called X`, then an
//! article-led noun phrase, then the leading words of the prompt.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tables::NAME_STOP_WORDS;

/// Name used when nothing usable is left.
pub const UNNAMED: &str = "Unnamed";

/// Words kept in a display name.
pub const MAX_NAME_WORDS: usize = 3;

static NAMED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:named|called)\s+(.+)$").expect("named pattern is valid")
});

static ARTICLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:a|an|the)\s+(.+)$").expect("article pattern is valid")
});

/// Extracts a title-cased display name from a character prompt.
///
/// ```
/// use grimoire_lexicon::extract_name;
///
/// assert_eq!(extract_name("a toad with a tail"), "Toad");
/// assert_eq!(extract_name("a robot named Bolt who sings"), "Bolt");
/// assert_eq!(extract_name(""), "Unnamed");
/// ```
#[must_use]
pub fn extract_name(prompt: &str) -> String {
    let phrase = [&*NAMED, &*ARTICLE]
        .iter()
        .find_map(|re| re.captures(prompt).and_then(|c| c.get(1)))
        .map_or(prompt, |m| m.as_str());

    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '\''))
        .filter(|w| !w.is_empty())
        .take_while(|w| !NAME_STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .take(MAX_NAME_WORDS)
        .map(title_case)
        .collect();

    if words.is_empty() {
        UNNAMED.to_owned()
    } else {
        words.join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

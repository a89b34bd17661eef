use std::fmt;

use anyhow::Context;
use regex::Regex;

/// Ordered list of heuristics that flag a text as spam.
#[derive(Debug, Clone)]
pub struct SpamFilter {
    rules: Vec<SpamRule>,
}

#[derive(Debug, Clone)]
pub enum SpamRule {
    /// Matches if the regex matches anywhere in the text.
    Pattern { name: &'static str, regex: Regex },
    /// Matches if a single character occurs `run` or more times in a row.
    RepeatedChar { run: usize },
}

impl SpamFilter {
    /// Builds the filter from its configurable parts.
    ///
    /// Links (`http://`, `https://`, `www.`) are always rejected. Shortener
    /// domains and keywords are matched case-insensitively as whole words. A
    /// `repeated_char_run` of zero disables the repeated character rule.
    pub fn new(
        shorteners: &[String],
        keywords: &[String],
        repeated_char_run: usize,
    ) -> anyhow::Result<Self> {
        let mut rules = vec![
            SpamRule::pattern("url", r"(?i)https?://")?,
            SpamRule::pattern("web address", r"(?i)www\.")?,
        ];

        if let Some(pattern) = alternation(shorteners) {
            rules.push(SpamRule::pattern("url shortener", &pattern)?);
        }
        if let Some(pattern) = alternation(keywords) {
            rules.push(SpamRule::pattern("keyword", &pattern)?);
        }
        if repeated_char_run > 0 {
            rules.push(SpamRule::RepeatedChar {
                run: repeated_char_run,
            });
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SpamRule] {
        &self.rules
    }

    /// Returns the first rule matching `text`.
    pub fn find_match(&self, text: &str) -> Option<&SpamRule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }
}

impl SpamRule {
    fn pattern(name: &'static str, pattern: &str) -> anyhow::Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Failed to compile spam rule {name:?}"))?;
        Ok(Self::Pattern { name, regex })
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            SpamRule::Pattern { regex, .. } => regex.is_match(text),
            SpamRule::RepeatedChar { run } => longest_run(text) >= *run,
        }
    }
}

impl fmt::Display for SpamRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpamRule::Pattern { name, .. } => f.write_str(name),
            SpamRule::RepeatedChar { run } => write!(f, "{run} repeated characters"),
        }
    }
}

/// Builds a case-insensitive alternation of the escaped `words`. Word
/// boundaries are only added next to word characters, so entries like
/// `100% free` still match.
fn alternation(words: &[String]) -> Option<String> {
    let alternatives = words
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
            let start = if is_word(word.chars().next()) { r"\b" } else { "" };
            let end = if is_word(word.chars().next_back()) { r"\b" } else { "" };
            format!("{start}{}{end}", regex::escape(word))
        })
        .collect::<Vec<_>>();

    (!alternatives.is_empty()).then(|| format!("(?i)(?:{})", alternatives.join("|")))
}

fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for c in text.chars() {
        if previous == Some(c) {
            current += 1;
        } else {
            current = 1;
            previous = Some(c);
        }
        longest = longest.max(current);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SpamFilter {
        SpamFilter::new(
            &["bit.ly".into(), "t.co".into()],
            &["casino".into(), "100% free".into(), "click here".into()],
            11,
        )
        .unwrap()
    }

    fn matched(text: &str) -> Option<String> {
        filter().find_match(text).map(ToString::to_string)
    }

    #[test]
    fn links() {
        assert_eq!(matched("see http://example.com").as_deref(), Some("url"));
        assert_eq!(matched("HTTPS://EXAMPLE.COM").as_deref(), Some("url"));
        assert_eq!(matched("visit www.example.com").as_deref(), Some("web address"));
    }

    #[test]
    fn shorteners() {
        assert_eq!(matched("go to bit.ly/abc").as_deref(), Some("url shortener"));
        assert_eq!(matched("T.CO/xyz").as_deref(), Some("url shortener"));
        assert_eq!(matched("I am not.com related"), None);
        assert_eq!(matched("that.co-founder"), None);
    }

    #[test]
    fn keywords() {
        assert_eq!(matched("Best Casino bonus").as_deref(), Some("keyword"));
        assert_eq!(matched("this is 100% free").as_deref(), Some("keyword"));
        assert_eq!(matched("please CLICK  HERE"), None);
        assert_eq!(matched("Please click here now").as_deref(), Some("keyword"));
        assert_eq!(matched("occasional casinos"), None);
    }

    #[test]
    fn repeated_characters() {
        assert_eq!(
            matched(&"a".repeat(12)).as_deref(),
            Some("11 repeated characters")
        );
        assert_eq!(
            matched(&format!("wow{}", "!".repeat(11))).as_deref(),
            Some("11 repeated characters")
        );
        assert_eq!(matched(&"a".repeat(10)), None);
        assert_eq!(matched("ab".repeat(20).as_str()), None);
    }

    #[test]
    fn legitimate_messages() {
        for text in [
            "Hello, I would like to discuss a project with you.",
            "Looking forward to working together",
            "Are you available for a backend internship?",
        ] {
            assert_eq!(matched(text), None, "{text:?} was flagged");
        }
    }

    #[test]
    fn rule_order() {
        let filter = filter();
        let names = filter
            .rules()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "url",
                "web address",
                "url shortener",
                "keyword",
                "11 repeated characters"
            ]
        );
    }

    #[test]
    fn optional_rules() {
        let filter = SpamFilter::new(&[], &["  ".into()], 0).unwrap();
        assert_eq!(filter.rules().len(), 2);
        assert!(filter.find_match("aaaaaaaaaaaaaaaaaaaa").is_none());
    }

    #[test]
    fn longest_run_counts_chars() {
        assert_eq!(longest_run(""), 0);
        assert_eq!(longest_run("abc"), 1);
        assert_eq!(longest_run("abbbc"), 3);
        assert_eq!(longest_run("ééé"), 3);
    }
}

//! Public Suffix List text parser
//!
//! Splits `public_suffix_list.dat` into exception rules, wildcard rules and
//! the flat set of plain suffixes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::str::Utf8Error;

use crate::rule::Rule;

/// Error type for ruleset loading.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parsing error{}", .0.as_ref().map(|e| format!(": {e}")).unwrap_or_default())]
    Parsing(#[source] Option<Utf8Error>),
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rule counts per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct RuleStats {
    pub basic: usize,
    pub wildcard: usize,
    pub exception: usize,
}

impl RuleStats {
    pub fn total(&self) -> usize {
        self.basic + self.wildcard + self.exception
    }
}

/// A fully parsed ruleset.
#[derive(Debug, Clone, Default)]
pub struct ParsedRules {
    /// `!` rules, in file order.
    pub exceptions: Vec<Rule>,
    /// Rules containing `*`, in file order.
    pub wildcard_rules: Vec<Rule>,
    /// Every other rule, verbatim.
    pub basic_rules: HashSet<String>,
}

impl ParsedRules {
    pub fn stats(&self) -> RuleStats {
        RuleStats {
            basic: self.basic_rules.len(),
            wildcard: self.wildcard_rules.len(),
            exception: self.exceptions.len(),
        }
    }
}

/// Parse raw list bytes. Fails only if the data is not UTF-8.
pub fn parse_rules(data: &[u8]) -> Result<ParsedRules, ParseError> {
    let text = std::str::from_utf8(data).map_err(|e| ParseError::Parsing(Some(e)))?;
    Ok(parse_rules_str(text))
}

/// Parse list text.
///
/// Only the first whitespace-delimited token of a line is a rule. A line
/// containing `*` is always a wildcard rule, even if it also starts with `!`.
pub fn parse_rules_str(text: &str) -> ParsedRules {
    let mut rules = ParsedRules::default();

    for raw_line in text.split('\n') {
        let line = rule_token(raw_line);
        if line.is_empty() || is_comment_line(line) {
            continue;
        }

        if line.contains('*') {
            rules.wildcard_rules.push(Rule::new(line));
        } else if line.starts_with('!') {
            rules.exceptions.push(Rule::new(line));
        } else {
            rules.basic_rules.insert(line.to_string());
        }
    }

    let stats = rules.stats();
    log::debug!(
        "Parsed PSL: {} basic, {} wildcard, {} exception rules",
        stats.basic,
        stats.wildcard,
        stats.exception
    );

    rules
}

fn rule_token(line: &str) -> &str {
    line.split(char::is_whitespace).next().unwrap_or_default()
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
// ===BEGIN ICANN DOMAINS===
com
uk.com

// ck : https://en.wikipedia.org/wiki/.ck
*.ck
!www.ck
biz  trailing annotation
com
";

    #[test]
    fn test_parse_sample() {
        let rules = parse_rules_str(SAMPLE);

        assert_eq!(rules.basic_rules.len(), 3);
        assert!(rules.basic_rules.contains("com"));
        assert!(rules.basic_rules.contains("uk.com"));
        assert!(rules.basic_rules.contains("biz"));

        assert_eq!(rules.wildcard_rules.len(), 1);
        assert_eq!(rules.wildcard_rules[0].source, "*.ck");

        assert_eq!(rules.exceptions.len(), 1);
        assert_eq!(rules.exceptions[0].source, "www.ck");
    }

    #[test]
    fn test_wildcard_checked_before_exception() {
        let rules = parse_rules_str("!*.example\n");
        assert!(rules.exceptions.is_empty());
        assert_eq!(rules.wildcard_rules.len(), 1);
        assert!(rules.wildcard_rules[0].is_exception);
    }

    #[test]
    fn test_crlf_and_indented_lines() {
        let rules = parse_rules_str("com\r\nnet\r\n  org\r\n");
        assert!(rules.basic_rules.contains("com"));
        assert!(rules.basic_rules.contains("net"));
        // A leading space makes the first token empty.
        assert!(!rules.basic_rules.contains("org"));
    }

    #[test]
    fn test_basic_rules_kept_verbatim() {
        let rules = parse_rules_str("Example.COM\n");
        assert!(rules.basic_rules.contains("Example.COM"));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_rules(&[b'c', b'o', 0xff, b'\n']).unwrap_err();
        assert!(matches!(err, ParseError::Parsing(Some(_))));
        assert!(err.to_string().starts_with("Parsing error: "));
    }

    #[test]
    fn test_stats() {
        let stats = parse_rules_str(SAMPLE).stats();
        assert_eq!(stats, RuleStats { basic: 3, wildcard: 1, exception: 1 });
        assert_eq!(stats.total(), 5);

        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"basic":3,"wildcard":1,"exception":1}"#);
    }
}

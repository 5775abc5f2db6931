//! PSL rule model
//!
//! A [`Rule`] is one wildcard or exception line of the list, split into
//! labels. Plain suffix lines never become a `Rule`; they live in the flat
//! set used by [`crate::basic::BasicRulesParser`].

use std::cmp::Ordering;

use crate::domain::ParsedHost;

/// Score added to exception rules so they outrank any wildcard rule.
const EXCEPTION_RANK_BONUS: usize = 1000;

/// One label of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleLabel {
    /// Matches the host label exactly.
    Text(String),
    /// `*`, matches any single host label.
    Wildcard,
}

impl RuleLabel {
    fn from_part(part: &str) -> Self {
        if part == "*" {
            RuleLabel::Wildcard
        } else {
            RuleLabel::Text(part.to_lowercase())
        }
    }

    /// Check this label against one host label.
    #[inline]
    pub fn matches(&self, host_label: &str) -> bool {
        match self {
            RuleLabel::Wildcard => true,
            RuleLabel::Text(text) => text == host_label,
        }
    }
}

/// A wildcard (`*.ck`) or exception (`!www.ck`) rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Line started with `!`.
    pub is_exception: bool,
    /// Rule text without the leading `!`.
    pub source: String,
    /// Labels left to right as written; the last one is the TLD.
    pub labels: Vec<RuleLabel>,
    /// `labels.len()`, plus a bonus for exceptions.
    pub rank: usize,
}

impl Rule {
    /// Build a rule from a raw, already truncated list line.
    pub fn new(raw: &str) -> Self {
        let (is_exception, source) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let labels: Vec<RuleLabel> = source.split('.').map(RuleLabel::from_part).collect();
        let rank = labels.len() + if is_exception { EXCEPTION_RANK_BONUS } else { 0 };

        Self {
            is_exception,
            source: source.to_string(),
            labels,
            rank,
        }
    }

    /// Check whether the rule matches the rightmost labels of a host.
    pub fn is_matching(&self, host_labels: &[&str]) -> bool {
        if host_labels.len() < self.labels.len() {
            return false;
        }

        let delta = host_labels.len() - self.labels.len();
        self.labels
            .iter()
            .zip(&host_labels[delta..])
            .all(|(label, host_label)| label.matches(host_label))
    }

    /// Split a host this rule matches into suffix and registrable domain.
    ///
    /// The caller must have checked [`Rule::is_matching`] first. An exception
    /// rule's suffix is one label shorter than the rule itself, so `!www.ck`
    /// yields suffix `ck` and domain `www.ck`.
    pub fn parse(&self, host_labels: &[&str]) -> ParsedHost {
        let parts_count = self.labels.len() - usize::from(self.is_exception);
        let delta = host_labels.len().saturating_sub(parts_count);

        let domain = if delta == 0 {
            None
        } else {
            Some(host_labels[delta - 1..].join("."))
        };

        ParsedHost {
            public_suffix: host_labels[delta..].join("."),
            domain,
        }
    }
}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.source.cmp(&other.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(host: &str) -> Vec<&str> {
        host.split('.').collect()
    }

    #[test]
    fn test_rule_new_wildcard() {
        let rule = Rule::new("*.ck");
        assert!(!rule.is_exception);
        assert_eq!(rule.source, "*.ck");
        assert_eq!(rule.labels, vec![RuleLabel::Wildcard, RuleLabel::Text("ck".into())]);
        assert_eq!(rule.rank, 2);
    }

    #[test]
    fn test_rule_new_exception() {
        let rule = Rule::new("!www.ck");
        assert!(rule.is_exception);
        assert_eq!(rule.source, "www.ck");
        assert_eq!(rule.rank, 1002);
    }

    #[test]
    fn test_exception_outranks_wildcard() {
        let wildcard = Rule::new("*.*.*.kobe.jp");
        let exception = Rule::new("!city.kobe.jp");
        assert!(exception > wildcard);
    }

    #[test]
    fn test_is_matching() {
        let rule = Rule::new("*.ck");
        assert!(rule.is_matching(&labels("test.ck")));
        assert!(rule.is_matching(&labels("a.b.test.ck")));
        assert!(!rule.is_matching(&labels("ck")));
        assert!(!rule.is_matching(&labels("test.mm")));

        let inner = Rule::new("*.compute.amazonaws.com");
        assert!(inner.is_matching(&labels("x.eu-west-1.compute.amazonaws.com")));
        assert!(!inner.is_matching(&labels("x.compute.amazonaws.org")));
    }

    #[test]
    fn test_parse_wildcard() {
        let rule = Rule::new("*.ck");

        let parsed = rule.parse(&labels("test.ck"));
        assert_eq!(parsed.public_suffix, "test.ck");
        assert_eq!(parsed.domain, None);

        let parsed = rule.parse(&labels("a.b.test.ck"));
        assert_eq!(parsed.public_suffix, "test.ck");
        assert_eq!(parsed.domain.as_deref(), Some("b.test.ck"));
    }

    #[test]
    fn test_parse_exception() {
        let rule = Rule::new("!www.ck");

        let parsed = rule.parse(&labels("www.ck"));
        assert_eq!(parsed.public_suffix, "ck");
        assert_eq!(parsed.domain.as_deref(), Some("www.ck"));

        let parsed = rule.parse(&labels("www.www.ck"));
        assert_eq!(parsed.domain.as_deref(), Some("www.ck"));
    }
}

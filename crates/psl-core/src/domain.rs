//! Registrable domain extraction
//!
//! [`DomainParser`] owns a parsed ruleset and answers `parse(host)` queries.
//! Exception and wildcard rules are tried first, then the plain suffix set.
//!
//! # Examples
//!
//! ```
//! use psl_core::DomainParser;
//!
//! let parser = DomainParser::new().unwrap();
//! let parsed = parser.parse("www.bbc.co.uk").unwrap();
//! assert_eq!(parsed.public_suffix, "co.uk");
//! assert_eq!(parsed.domain.as_deref(), Some("bbc.co.uk"));
//! ```

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

use crate::basic::BasicRulesParser;
use crate::cache::LruCache;
use crate::host::HostSuffixIter;
use crate::parser::{parse_rules, ParseError, ParsedRules, RuleStats};

/// Snapshot of the Mozilla list shipped with the crate.
pub const BUNDLED_LIST: &[u8] = include_bytes!("../data/public_suffix_list.dat");

/// Result of parsing a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedHost {
    /// Longest rule-matched suffix, e.g. `co.uk`.
    pub public_suffix: String,
    /// Suffix plus one label, e.g. `bbc.co.uk`. `None` when the host is the suffix.
    pub domain: Option<String>,
}

impl ParsedHost {
    /// Second level label: the registrable domain without its suffix.
    ///
    /// `m.foo.com` gives `foo`.
    pub fn sld(&self) -> Option<&str> {
        self.domain
            .as_deref()?
            .strip_suffix(self.public_suffix.as_str())?
            .strip_suffix('.')
    }

    /// Labels left of the registrable domain, e.g. `a.b` for `a.b.example.com`.
    pub fn subdomain<'h>(&self, host: &'h str) -> Option<&'h str> {
        let domain = self.domain.as_deref()?;
        if host.len() <= domain.len() || !host.is_char_boundary(host.len() - domain.len()) {
            return None;
        }

        let (head, tail) = host.split_at(host.len() - domain.len());
        if tail.to_lowercase() != domain {
            return None;
        }

        head.strip_suffix('.').filter(|s| !s.is_empty())
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Skip exception and wildcard rules. Faster, but wrong for the few
    /// suffixes that depend on them (`*.ck`, `!www.ck`).
    pub quick_parsing: bool,
    /// Memoize results for this many hosts. `0` disables the cache.
    pub cache_capacity: usize,
}

impl ParserOptions {
    pub fn quick() -> Self {
        Self {
            quick_parsing: true,
            ..Self::default()
        }
    }
}

/// Public Suffix List parser.
#[derive(Debug)]
pub struct DomainParser {
    rules: ParsedRules,
    only_basic_rules: bool,
    cache: Option<Mutex<LruCache>>,
}

impl DomainParser {
    /// Parser over the bundled list with default options.
    pub fn new() -> Result<Self, ParseError> {
        Self::with_options(ParserOptions::default())
    }

    /// Parser over the bundled list.
    pub fn with_options(options: ParserOptions) -> Result<Self, ParseError> {
        Self::from_bytes(BUNDLED_LIST, options)
    }

    /// Parser over raw list bytes.
    pub fn from_bytes(data: &[u8], options: ParserOptions) -> Result<Self, ParseError> {
        let rules = parse_rules(data)?;
        Ok(Self::from_rules(rules, options))
    }

    /// Parser over a list file on disk.
    pub fn from_path(path: impl AsRef<Path>, options: ParserOptions) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data, options)
    }

    /// Parser over an already parsed ruleset.
    pub fn from_rules(rules: ParsedRules, options: ParserOptions) -> Self {
        let cache = (options.cache_capacity > 0)
            .then(|| Mutex::new(LruCache::new(options.cache_capacity)));

        Self {
            rules,
            only_basic_rules: options.quick_parsing,
            cache,
        }
    }

    pub fn rules(&self) -> &ParsedRules {
        &self.rules
    }

    pub fn stats(&self) -> RuleStats {
        self.rules.stats()
    }

    /// Split a host into public suffix and registrable domain.
    ///
    /// Returns `None` if no rule matches (empty host, unknown TLD, trailing dot).
    pub fn parse(&self, host: &str) -> Option<ParsedHost> {
        let host = host.to_lowercase();

        let Some(cache) = &self.cache else {
            return self.parse_uncached(&host);
        };

        if let Some(hit) = lock(cache).get(&host) {
            return hit;
        }

        let result = self.parse_uncached(&host);
        lock(cache).insert(host, result.clone());
        result
    }

    fn parse_uncached(&self, host: &str) -> Option<ParsedHost> {
        let basic = BasicRulesParser::new(&self.rules.basic_rules);
        if self.only_basic_rules {
            return basic.parse(host);
        }

        self.parse_exceptions_and_wildcard_rules(host)
            .or_else(|| basic.parse(host))
    }

    fn parse_exceptions_and_wildcard_rules(&self, host: &str) -> Option<ParsedHost> {
        let labels: Vec<&str> = host.split('.').collect();

        // First match in file order; rank is not consulted.
        let rule = self
            .rules
            .exceptions
            .iter()
            .find(|rule| rule.is_matching(&labels))
            .or_else(|| {
                self.rules
                    .wildcard_rules
                    .iter()
                    .find(|rule| rule.is_matching(&labels))
            })?;

        log::trace!("{host} matched rule '{}'", rule.source);
        Some(rule.parse(&labels))
    }

    /// Registrable domain (eTLD+1) of a host.
    pub fn registrable_domain(&self, host: &str) -> Option<String> {
        self.parse(host)?.domain
    }

    /// Public suffix (eTLD) of a host.
    pub fn public_suffix(&self, host: &str) -> Option<String> {
        self.parse(host).map(|parsed| parsed.public_suffix)
    }

    /// Check if two hosts share a registrable domain.
    pub fn is_same_site(&self, host1: &str, host2: &str) -> bool {
        match (self.registrable_domain(host1), self.registrable_domain(host2)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Check if a request to `req_host` from `site_host` is third-party.
    pub fn is_third_party(&self, site_host: &str, req_host: &str) -> bool {
        !self.is_same_site(site_host, req_host)
    }

    /// Walk host suffixes from the full host down to its registrable domain.
    pub fn host_suffixes<'a>(&self, host: &'a str) -> HostSuffixIter<'a> {
        let stop_labels = self
            .registrable_domain(host)
            .map(|domain| domain.split('.').count());
        HostSuffixIter::new(host, stop_labels)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            lock(cache).clear();
        }
    }
}

fn lock(cache: &Mutex<LruCache>) -> std::sync::MutexGuard<'_, LruCache> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

static DEFAULT_PARSER: OnceLock<Result<DomainParser, ParseError>> = OnceLock::new();

/// Shared parser over the bundled list, built on first use.
pub fn default_parser() -> Result<&'static DomainParser, &'static ParseError> {
    DEFAULT_PARSER.get_or_init(DomainParser::new).as_ref()
}

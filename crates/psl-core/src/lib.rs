//! Public Suffix List Core Library
//!
//! This crate computes the public suffix (eTLD) and registrable domain
//! (eTLD+1) of a hostname from Mozilla's `public_suffix_list.dat`.
//!
//! # Architecture
//!
//! The list is parsed once into three collections: plain suffixes (a hash
//! set), wildcard rules and exception rules. Lookups first scan the
//! exception and wildcard rules, then walk the plain suffix set label by
//! label. Everything is immutable after construction, so a [`DomainParser`]
//! can be shared across threads by reference.
//!
//! # Modules
//!
//! - `parser`: list text parsing into [`ParsedRules`]
//! - `rule`: wildcard/exception rule model and matching
//! - `basic`: fast path over the plain suffix set
//! - `domain`: [`DomainParser`] and [`ParsedHost`]
//! - `cache`: optional LRU memoization of results
//! - `host`: hostname helpers

pub mod basic;
pub mod cache;
pub mod domain;
pub mod host;
pub mod parser;
pub mod rule;

// Re-export commonly used types
pub use basic::BasicRulesParser;
pub use domain::{default_parser, DomainParser, ParsedHost, ParserOptions, BUNDLED_LIST};
pub use host::{normalize_host, parent_domain, HostSuffixIter};
pub use parser::{parse_rules, parse_rules_str, ParseError, ParsedRules, RuleStats};
pub use rule::{Rule, RuleLabel};

//! Fast-path suffix matching over the plain suffix set.

use std::collections::HashSet;

use crate::domain::ParsedHost;

/// Resolves hosts using only exact-match suffixes.
#[derive(Debug, Clone, Copy)]
pub struct BasicRulesParser<'a> {
    valid_extensions: &'a HashSet<String>,
}

impl<'a> BasicRulesParser<'a> {
    pub fn new(valid_extensions: &'a HashSet<String>) -> Self {
        Self { valid_extensions }
    }

    /// Walk the host from the left, dropping one label at a time, and stop
    /// at the first remaining suffix found in the set.
    pub fn parse(&self, host: &str) -> Option<ParsedHost> {
        let host = host.to_lowercase();
        let labels: Vec<&str> = host.split('.').collect();

        let start = (0..labels.len()).find(|&i| {
            let candidate = labels[i..].join(".");
            self.valid_extensions.contains(&candidate)
        })?;

        let domain = if start > 0 {
            Some(labels[start - 1..].join("."))
        } else {
            None
        };

        Some(ParsedHost {
            public_suffix: labels[start..].join("."),
            domain,
        })
    }
}

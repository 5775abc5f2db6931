//! Hostname helpers that do not need the ruleset.

/// Lowercase a host and drop a single trailing dot (`Example.COM.` → `example.com`).
pub fn normalize_host(host: &str) -> String {
    let host = host.strip_suffix('.').unwrap_or(host);
    host.to_lowercase()
}

/// Get the parent domain (strip leftmost label).
pub fn parent_domain(host: &str) -> Option<&str> {
    match host.find('.') {
        Some(idx) if idx < host.len() - 1 => Some(&host[idx + 1..]),
        _ => None,
    }
}

/// Iterator for suffix-walking a host from full to eTLD+1.
///
/// Built by [`crate::DomainParser::host_suffixes`]; yields nothing when the
/// host has no registrable domain.
#[derive(Debug, Clone)]
pub struct HostSuffixIter<'a> {
    current: Option<&'a str>,
    stop_labels: usize,
}

impl<'a> HostSuffixIter<'a> {
    /// `stop_labels` is the label count of the registrable domain.
    pub fn new(host: &'a str, stop_labels: Option<usize>) -> Self {
        match stop_labels {
            Some(stop_labels) if label_count(host) >= stop_labels => Self {
                current: Some(host),
                stop_labels,
            },
            _ => Self {
                current: None,
                stop_labels: 0,
            },
        }
    }
}

impl<'a> Iterator for HostSuffixIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;

        // Move to parent
        self.current = parent_domain(result).filter(|parent| label_count(parent) >= self.stop_labels);

        Some(result)
    }
}

fn label_count(host: &str) -> usize {
    host.split('.').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("Example.COM."), "example.com");
        assert_eq!(normalize_host("example.com"), "example.com");
        assert_eq!(normalize_host(""), "");
    }

    #[test]
    fn test_parent_domain() {
        assert_eq!(parent_domain("sub.example.com"), Some("example.com"));
        assert_eq!(parent_domain("example.com"), Some("com"));
        assert_eq!(parent_domain("com"), None);
        assert_eq!(parent_domain("com."), None);
        assert_eq!(parent_domain(""), None);
    }

    #[test]
    fn test_suffix_iter() {
        let walked: Vec<&str> = HostSuffixIter::new("a.b.test.ck", Some(3)).collect();
        assert_eq!(walked, vec!["a.b.test.ck", "b.test.ck"]);

        assert_eq!(HostSuffixIter::new("example.com", Some(2)).count(), 1);
        assert_eq!(HostSuffixIter::new("com", Some(2)).count(), 0);
        assert_eq!(HostSuffixIter::new("test.ck", None).count(), 0);
    }
}
